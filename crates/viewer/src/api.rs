use gloo::net::http::Request;
use saco_catalog::api::{CategoriesResponse, DesignsResponse, ErrorResponse};
use saco_catalog::{Category, Design};
use serde::de::DeserializeOwned;

/// API mount point, fixed at build time.
pub const API_URL: &str = match option_env!("API_URL") {
    Some(url) => url,
    None => "/api",
};

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;
    let text = resp
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {e}"))?;
    if !resp.ok() {
        return Err(match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(err) => err.error,
            Err(_) => format!("HTTP {}", resp.status()),
        });
    }
    serde_json::from_str(&text).map_err(|e| format!("Failed to parse data: {e}"))
}

pub async fn fetch_categories() -> Result<Vec<Category>, String> {
    let resp: CategoriesResponse = get_json(&format!("{API_URL}/animes")).await?;
    Ok(resp.data)
}

pub async fn fetch_designs(category: &str) -> Result<Vec<Design>, String> {
    let resp: DesignsResponse = get_json(&saco_catalog::designs_url(API_URL, category)).await?;
    Ok(resp.data)
}

/// Source of a design thumbnail or overlay.
pub fn image_src(category: Option<&str>, filename: &str) -> String {
    category
        .map(|c| saco_catalog::image_url(API_URL, c, filename))
        .unwrap_or_default()
}
