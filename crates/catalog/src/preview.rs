use serde::{Deserialize, Serialize};

use crate::api::PreviewResponse;
use crate::error::CatalogError;
use crate::image_url;

/// Query of `/api/saco-preview`. Only `anime` is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviewRequest {
    pub anime: Option<String>,
    pub espalda: Option<String>,
    pub pecho: Option<String>,
    pub manga1: Option<String>,
    pub manga2: Option<String>,
}

/// Image URL per garment slot; slots that were not requested are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewImages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub espalda: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pecho: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manga1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manga2: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl PreviewRequest {
    /// Compose image URLs under `base` for every supplied slot. Pure string
    /// work, nothing is checked against storage.
    pub fn compose(&self, base: &str) -> Result<PreviewResponse, CatalogError> {
        let anime = present(&self.anime).ok_or(CatalogError::MissingParameter("anime"))?;
        let url = |slot: &Option<String>| present(slot).map(|f| image_url(base, anime, f));

        Ok(PreviewResponse {
            success: true,
            anime: anime.to_string(),
            images: PreviewImages {
                espalda: url(&self.espalda),
                pecho: url(&self.pecho),
                manga1: url(&self.manga1),
                manga2: url(&self.manga2),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_only_supplied_slots() {
        let req = PreviewRequest {
            anime: Some("Naruto".into()),
            pecho: Some("foo.png".into()),
            ..Default::default()
        };
        let resp = req.compose("/api").unwrap();
        assert_eq!(resp.anime, "Naruto");
        assert_eq!(resp.images.pecho.as_deref(), Some("/api/image/Naruto/foo.png"));

        let json = serde_json::to_value(&resp).unwrap();
        let images = json["images"].as_object().unwrap();
        assert_eq!(images.len(), 1);
        assert!(!images.contains_key("espalda"));
        assert!(!images.contains_key("manga1"));
        assert!(!images.contains_key("manga2"));
    }

    #[test]
    fn test_compose_all_slots() {
        let req = PreviewRequest {
            anime: Some("A".into()),
            espalda: Some("b.png".into()),
            pecho: Some("p.png".into()),
            manga1: Some("m1.png".into()),
            manga2: Some("m2.png".into()),
        };
        let images = req.compose("/api").unwrap().images;
        assert_eq!(images.espalda.as_deref(), Some("/api/image/A/b.png"));
        assert_eq!(images.manga2.as_deref(), Some("/api/image/A/m2.png"));
    }

    #[test]
    fn test_compose_requires_anime() {
        let req = PreviewRequest {
            pecho: Some("foo.png".into()),
            ..Default::default()
        };
        assert!(matches!(
            req.compose("/api"),
            Err(CatalogError::MissingParameter("anime"))
        ));

        let empty = PreviewRequest {
            anime: Some(String::new()),
            ..Default::default()
        };
        assert!(empty.compose("/api").is_err());
    }

    #[test]
    fn test_compose_skips_empty_slot_values() {
        let req = PreviewRequest {
            anime: Some("A".into()),
            espalda: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(req.compose("/api").unwrap().images, PreviewImages::default());
    }
}
