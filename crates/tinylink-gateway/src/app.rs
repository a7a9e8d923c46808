use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, health_handler,
    list_links_handler, qr_handler, redirect_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route(
                "/v1/links",
                get(list_links_handler).post(create_link_handler),
            )
            .route(
                "/v1/links/{code}",
                get(get_link_handler).delete(delete_link_handler),
            )
            .route("/v1/links/{code}/qr", get(qr_handler))
            .route("/{code}", get(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ErrorResponse, LinkResponse, ListLinksResponse};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use serde::de::DeserializeOwned;
    use std::sync::Arc;
    use std::time::Duration;
    use tinylink_core::{Registry, ShortCode, ShortenParams};
    use tinylink_generator::RandomGenerator;
    use tinylink_registry::RegistryService;
    use tinylink_storage::InMemoryRepository;
    use tower::ServiceExt;

    const BASE_URL: &str = "https://tiny.link";

    fn setup() -> (Router, Arc<dyn Registry>) {
        let registry: Arc<dyn Registry> = Arc::new(RegistryService::new(
            InMemoryRepository::new(),
            RandomGenerator::new(),
        ));
        let app = App::router(AppState::new(Arc::clone(&registry), BASE_URL));
        (app, registry)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> Response {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        app.clone().oneshot(request).await.unwrap()
    }

    async fn json<T: DeserializeOwned>(response: Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health() {
        let (app, _) = setup();

        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn create_link_returns_created() {
        let (app, _) = setup();

        let response = send(
            &app,
            Method::POST,
            "/v1/links",
            Some(r#"{"target": "example.com", "custom_code": "promo"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let link: LinkResponse = json(response).await;
        assert_eq!(link.code, "promo");
        assert_eq!(link.target, "https://example.com");
        assert_eq!(link.short_url, "https://tiny.link/promo");
        assert_eq!(link.clicks, 0);
    }

    #[tokio::test]
    async fn create_link_with_empty_target_is_bad_request() {
        let (app, _) = setup();

        let response = send(&app, Method::POST, "/v1/links", Some(r#"{"target": "  "}"#)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = json(response).await;
        assert!(!body.error.is_empty());
    }

    #[tokio::test]
    async fn duplicate_custom_code_is_conflict() {
        let (app, _) = setup();
        let body = r#"{"target": "https://example.com", "custom_code": "dup"}"#;

        send(&app, Method::POST, "/v1/links", Some(body)).await;
        let response = send(&app, Method::POST, "/v1/links", Some(body)).await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn get_link() {
        let (app, registry) = setup();
        registry
            .shorten(ShortenParams::new("https://example.com").with_custom_code("abc123"))
            .await
            .unwrap();

        let response = send(&app, Method::GET, "/v1/links/abc123", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let link: LinkResponse = json(response).await;
        assert_eq!(link.target, "https://example.com");

        let missing = send(&app, Method::GET, "/v1/links/nope", None).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_links_newest_first() {
        let (app, registry) = setup();
        for code in ["first", "second"] {
            registry
                .shorten(ShortenParams::new("https://example.com").with_custom_code(code))
                .await
                .unwrap();
        }

        let response = send(&app, Method::GET, "/v1/links", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: ListLinksResponse = json(response).await;
        let codes: Vec<&str> = body.links.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn delete_link_is_idempotent() {
        let (app, registry) = setup();
        registry
            .shorten(ShortenParams::new("https://example.com").with_custom_code("gone"))
            .await
            .unwrap();

        for _ in 0..2 {
            let response = send(&app, Method::DELETE, "/v1/links/gone", None).await;
            assert_eq!(response.status(), StatusCode::NO_CONTENT);
        }
        let code = ShortCode::new_unchecked("gone");
        assert!(registry.resolve(&code).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn redirect_sends_found_and_counts_click() {
        let (app, registry) = setup();
        registry
            .shorten(ShortenParams::new("https://example.com/page").with_custom_code("go"))
            .await
            .unwrap();

        let response = send(&app, Method::GET, "/go", None).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://example.com/page"
        );

        let code = ShortCode::new_unchecked("go");
        let mut clicks = 0;
        for _ in 0..50 {
            clicks = registry.resolve(&code).await.unwrap().unwrap().clicks;
            if clicks == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(clicks, 1);
    }

    #[tokio::test]
    async fn redirect_for_unknown_code_is_not_found() {
        let (app, _) = setup();

        let response = send(&app, Method::GET, "/missing", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = json(response).await;
        assert!(body.error.contains("missing"));
    }

    #[tokio::test]
    async fn qr_code_is_png_of_short_url() {
        let (app, registry) = setup();
        registry
            .shorten(ShortenParams::new("https://example.com").with_custom_code("promo"))
            .await
            .unwrap();

        let response = send(&app, Method::GET, "/v1/links/promo/qr", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/png"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
        let image = image::load_from_memory(&bytes).unwrap();
        assert_eq!(image.width(), image.height());

        let missing = send(&app, Method::GET, "/v1/links/nope/qr", None).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn custom_code_shadowed_by_route_is_bad_request() {
        let (app, registry) = setup();

        for body in [
            r#"{"target": "example.com", "custom_code": "health"}"#,
            r#"{"target": "example.com", "custom_code": "v1"}"#,
            r#"{"target": "example.com", "custom_code": "a/b"}"#,
        ] {
            let response = send(&app, Method::POST, "/v1/links", Some(body)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        }
        assert!(registry.list().await.unwrap().is_empty());

        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
