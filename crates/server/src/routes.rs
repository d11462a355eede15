use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use saco_catalog::api::{CategoriesResponse, DesignsResponse, PreviewResponse};
use saco_catalog::listing::{
    categories_from_keys, category_prefix, designs_from_keys, image_key, root_prefix,
};
use saco_catalog::preview::PreviewRequest;
use saco_catalog::{IMAGE_CACHE_CONTROL, IMAGE_CONTENT_TYPE};
use serde::Serialize;

use crate::error::ApiError;
use crate::storage::ObjectStore;
use crate::AppState;

/// Where the API is mounted; image URLs handed to clients start here.
const API_BASE: &str = "/api";

pub fn router<S: ObjectStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/health", get(health))
        .route("/api/animes", get(list_animes::<S>))
        .route("/api/designs/{anime}", get(list_designs::<S>))
        .route("/api/image/{anime}/{filename}", get(get_image::<S>))
        .route("/api/saco-preview", get(saco_preview))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Backend funcionando correctamente",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn list_animes<S: ObjectStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let keys = state
        .store
        .list_keys(&root_prefix(&state.prefix))
        .await
        .map_err(ApiError::upstream("Error al obtener la lista de animes"))?;
    let categories = categories_from_keys(&state.prefix, keys.iter().map(String::as_str));
    Ok(Json(CategoriesResponse::new(categories)))
}

async fn list_designs<S: ObjectStore>(
    State(state): State<AppState<S>>,
    Path(anime): Path<String>,
) -> Result<Json<DesignsResponse>, ApiError> {
    let keys = state
        .store
        .list_keys(&category_prefix(&state.prefix, &anime))
        .await
        .map_err(ApiError::upstream("Error al obtener diseños"))?;
    let designs = designs_from_keys(&state.prefix, &anime, keys.iter().map(String::as_str));
    Ok(Json(DesignsResponse::new(anime, designs)))
}

async fn get_image<S: ObjectStore>(
    State(state): State<AppState<S>>,
    Path((anime, filename)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let key = image_key(&state.prefix, &anime, &filename);
    let found = state
        .store
        .exists(&key)
        .await
        .map_err(ApiError::upstream("Error al obtener la imagen"))?;
    if !found {
        return Err(ApiError::NotFound("Imagen no encontrada"));
    }

    let body = state
        .store
        .stream(&key)
        .await
        .map_err(ApiError::upstream("Error al obtener la imagen"))?;
    Ok((
        [
            (header::CONTENT_TYPE, IMAGE_CONTENT_TYPE),
            (header::CACHE_CONTROL, IMAGE_CACHE_CONTROL),
        ],
        body,
    ))
}

async fn saco_preview(
    query: Result<Query<PreviewRequest>, QueryRejection>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let Query(request) = query.map_err(|e| ApiError::Validation(e.body_text()))?;
    Ok(Json(request.compose(API_BASE)?))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::storage::memory::MemoryStore;

    fn bucket() -> MemoryStore {
        MemoryStore::with_objects([
            ("estampados/A/x.png", &b"x-bytes"[..]),
            ("estampados/A/y.png", &b"y-bytes"[..]),
            ("estampados/A/thumbs.db", &b""[..]),
            ("estampados/B/z.png", &b"z-bytes"[..]),
            ("otros/C/w.png", &b"w-bytes"[..]),
        ])
    }

    fn app(store: MemoryStore) -> Router {
        router().with_state(AppState {
            store,
            prefix: "estampados".to_string(),
        })
    }

    async fn get(store: MemoryStore, uri: &str) -> Response {
        app(store)
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json(resp: Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let resp = get(bucket(), "/health").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_animes() {
        let resp = get(bucket(), "/api/animes").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json(resp).await;
        assert_eq!(body["success"], true);
        let mut ids: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap())
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_list_designs_filters_png() {
        let body = json(get(bucket(), "/api/designs/A").await).await;
        assert_eq!(body["anime"], "A");
        assert_eq!(body["count"], 2);
        assert_eq!(body["data"][0]["id"], "estampados/A/x.png");
        assert_eq!(body["data"][0]["filename"], "x.png");
        assert_eq!(body["data"][0]["name"], "x");
    }

    #[tokio::test]
    async fn test_list_designs_unknown_category_is_empty() {
        let resp = get(bucket(), "/api/designs/Nada").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json(resp).await;
        assert_eq!(body["count"], 0);
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_image_streams_bytes() {
        let resp = get(bucket(), "/api/image/A/x.png").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/png");
        assert_eq!(
            resp.headers()[header::CACHE_CONTROL],
            "public, max-age=31536000"
        );
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"x-bytes");
    }

    #[tokio::test]
    async fn test_get_image_missing_is_not_found() {
        let resp = get(bucket(), "/api/image/A/missing.png").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Imagen no encontrada");
    }

    #[tokio::test]
    async fn test_storage_failure_is_server_error() {
        for uri in ["/api/animes", "/api/designs/A", "/api/image/A/x.png"] {
            let resp = get(MemoryStore::failing(), uri).await;
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
            let body = json(resp).await;
            assert_eq!(body["success"], false);
            assert_eq!(body["details"], "connection reset by peer");
        }
    }

    #[tokio::test]
    async fn test_preview_only_supplied_slots() {
        let resp = get(bucket(), "/api/saco-preview?anime=Naruto&pecho=foo.png").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json(resp).await;
        assert_eq!(body["anime"], "Naruto");
        let images = body["images"].as_object().unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images["pecho"], "/api/image/Naruto/foo.png");
    }

    #[tokio::test]
    async fn test_preview_requires_anime() {
        let resp = get(bucket(), "/api/saco-preview?pecho=foo.png").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "El parámetro anime es requerido");
    }

    #[tokio::test]
    async fn test_preview_malformed_query_uses_envelope() {
        let resp = get(bucket(), "/api/saco-preview?anime=A&anime=B").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("anime"));
    }
}
