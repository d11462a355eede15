//! JSON envelopes exchanged between the API server and the storefront.

use serde::{Deserialize, Serialize};

use crate::preview::PreviewImages;
use crate::types::{Category, Design};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub data: Vec<Category>,
}

impl CategoriesResponse {
    pub fn new(data: Vec<Category>) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignsResponse {
    pub success: bool,
    pub anime: String,
    pub count: usize,
    pub data: Vec<Design>,
}

impl DesignsResponse {
    pub fn new(anime: String, data: Vec<Design>) -> Self {
        Self {
            success: true,
            anime,
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub success: bool,
    pub anime: String,
    pub images: PreviewImages,
}

/// Uniform failure body: `{success:false, error, details?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_designs_response_counts() {
        let resp = DesignsResponse::new(
            "A".into(),
            vec![Design {
                id: "estampados/A/x.png".into(),
                filename: "x.png".into(),
                name: "x".into(),
            }],
        );
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["anime"], "A");
        assert_eq!(json["count"], 1);
        assert_eq!(json["data"][0]["filename"], "x.png");
    }

    #[test]
    fn test_error_response_omits_missing_details() {
        let json = serde_json::to_value(ErrorResponse::new("Imagen no encontrada", None)).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("details").is_none());
    }
}
