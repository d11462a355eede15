//! The page query string is the only place a configuration is persisted.
//!
//! `anime`, `pecho` (front filename), `espalda` (back filename) and `color`
//! fully describe a shareable configuration.

use std::borrow::Cow;

const SHARE_ENDPOINT: &str = "https://api.whatsapp.com/send";
const SHARE_PHONE: &str = "573163201115";
const SHARE_GREETING: &str = "Holaa 👋👋. Estoy interesado en este saco personalizado ";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedQuery {
    pub anime: Option<String>,
    pub pecho: Option<String>,
    pub espalda: Option<String>,
    pub color: Option<String>,
}

fn decode_component(raw: &str) -> Option<String> {
    let spaced: Cow<str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    urlencoding::decode(&spaced).ok().map(Cow::into_owned)
}

impl SharedQuery {
    /// Parse `?a=b&c=d` (leading `?` optional). Unknown keys are ignored, the
    /// first occurrence of a repeated key wins and empty values count as unset.
    pub fn parse(query: &str) -> Self {
        let mut parsed = SharedQuery::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let (Some(key), Some(value)) = (decode_component(raw_key), decode_component(raw_value))
            else {
                log::debug!("skipping undecodable query pair {pair:?}");
                continue;
            };
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_str() {
                "anime" => &mut parsed.anime,
                "pecho" => &mut parsed.pecho,
                "espalda" => &mut parsed.espalda,
                "color" => &mut parsed.color,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        parsed
    }

    /// Serialise the set fields, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        [
            ("anime", &self.anime),
            ("pecho", &self.pecho),
            ("espalda", &self.espalda),
            ("color", &self.color),
        ]
        .iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(|v| format!("{key}={}", urlencoding::encode(v)))
        })
        .collect::<Vec<_>>()
        .join("&")
    }
}

/// Messaging deep link pre-filled with a greeting and the page URL.
pub fn share_link(page_url: &str) -> String {
    let text = format!("{SHARE_GREETING}{page_url}");
    format!(
        "{SHARE_ENDPOINT}?phone={SHARE_PHONE}&text={}",
        urlencoding::encode(&text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_fields() {
        let q = SharedQuery::parse("?anime=Naruto&pecho=a.png&espalda=b.png&color=azul");
        assert_eq!(q.anime.as_deref(), Some("Naruto"));
        assert_eq!(q.pecho.as_deref(), Some("a.png"));
        assert_eq!(q.espalda.as_deref(), Some("b.png"));
        assert_eq!(q.color.as_deref(), Some("azul"));
    }

    #[test]
    fn test_parse_decodes_and_ignores_noise() {
        let q = SharedQuery::parse("anime=One+Piece&pecho=luffy%202.png&utm=x&espalda=&anime=Other");
        assert_eq!(q.anime.as_deref(), Some("One Piece"));
        assert_eq!(q.pecho.as_deref(), Some("luffy 2.png"));
        assert_eq!(q.espalda, None);
        assert_eq!(q.color, None);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(SharedQuery::parse(""), SharedQuery::default());
        assert_eq!(SharedQuery::parse("?"), SharedQuery::default());
    }

    #[test]
    fn test_serialize_omits_unset() {
        let q = SharedQuery {
            anime: Some("Dragon Ball".into()),
            color: Some("negro".into()),
            ..Default::default()
        };
        assert_eq!(q.to_query_string(), "anime=Dragon%20Ball&color=negro");
        assert_eq!(SharedQuery::parse(&q.to_query_string()), q);
    }

    #[test]
    fn test_share_link_embeds_page_url() {
        let link = share_link("https://tienda.example/?anime=A&color=azul");
        assert!(link.starts_with("https://api.whatsapp.com/send?phone=573163201115&text=Holaa%20"));
        assert!(link.ends_with("https%3A%2F%2Ftienda.example%2F%3Fanime%3DA%26color%3Dazul"));
    }
}
