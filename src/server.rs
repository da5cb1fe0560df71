//! HTTP facade: the query endpoint, static front-end serving, and the
//! response layers shared by both.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::assets::ASSET_MARKER;
use crate::state::AppState;

/// Build the application router.
///
/// `POST /tipitaka-query/` carries the JSON query protocol; everything else is
/// served from the resolved asset directory, falling back to the entry document
/// so client-side routes resolve.
pub fn build_router(state: Arc<AppState>, asset_dir: &Path) -> Router {
    let static_files =
        ServeDir::new(asset_dir).fallback(ServeFile::new(asset_dir.join(ASSET_MARKER)));

    Router::new()
        .route("/tipitaka-query/", post(tipitaka_query))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer())
        // CorsLayer only emits the allow-headers list on preflight responses;
        // the wire protocol wants it on every response.
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("X-Requested-With"),
        ))
        .with_state(state)
}

/// Any origin may call us. Deliberate relaxation for a single-user local tool;
/// would need tightening before any shared deployment.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([HeaderName::from_static("x-requested-with")])
}

/// POST /tipitaka-query/ - dispatch a query.
///
/// The body is taken raw rather than through the `Json` extractor: a malformed
/// body must become an `{"error": ...}` envelope with HTTP 200, not a transport
/// level rejection. The front-end distinguishes outcomes by the `error` field.
async fn tipitaka_query(State(state): State<Arc<AppState>>, body: String) -> Json<Value> {
    tracing::debug!("received request with query {}", body);
    Json(state.dispatcher.dispatch(&body).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{QueryDispatcher, QueryHandler};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    struct StubHandler(Value);

    #[async_trait]
    impl QueryHandler for StubHandler {
        async fn run(&self, _query: Value) -> anyhow::Result<Value> {
            Ok(self.0.clone())
        }
    }

    fn test_router(asset_dir: &Path) -> Router {
        let dispatcher = QueryDispatcher::new(
            Arc::new(StubHandler(json!({"matches": []}))),
            Arc::new(StubHandler(json!({"definition": "the teaching"}))),
        );
        build_router(Arc::new(AppState { dispatcher }), asset_dir)
    }

    fn asset_fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ASSET_MARKER), "<html>tipitaka</html>").unwrap();
        dir
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_query_endpoint_returns_handler_output() {
        let dir = asset_fixture();
        let response = test_router(dir.path())
            .oneshot(
                Request::post("/tipitaka-query/")
                    .body(Body::from(r#"{"type":"dict","term":"dhamma"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
                .unwrap(),
            "X-Requested-With"
        );
        assert_eq!(body_json(response).await, json!({"definition": "the teaching"}));
    }

    #[tokio::test]
    async fn test_malformed_body_still_gets_http_ok() {
        let dir = asset_fixture();
        let response = test_router(dir.path())
            .oneshot(
                Request::post("/tipitaka-query/")
                    .body(Body::from("not-json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_unmatched_path_falls_back_to_entry_document() {
        let dir = asset_fixture();
        let response = test_router(dir.path())
            .oneshot(
                Request::get("/sutta/dn/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
                .unwrap(),
            "X-Requested-With"
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"<html>tipitaka</html>");
    }
}
