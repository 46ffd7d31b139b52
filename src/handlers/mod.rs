mod health_handler;
pub mod oauth;
mod origin_guard;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::models::AppState;
pub use health_handler::health_handler;
use oauth::exchange_handler;
use origin_guard::{cors_layer, origin_guard};

/// Builds the relay's routes. The origin guard runs before CORS handling and
/// before any route, so denied requests never reach a handler.
pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/oauth/github/token", post(exchange_handler))
        .route("/health", get(health_handler))
        .layer(cors_layer(app_state.origins.clone()))
        .layer(middleware::from_fn_with_state(app_state.clone(), origin_guard))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, header},
        response::Response,
    };
    use serde_json::Value;

    use crate::handlers::oauth::TokenExchange;
    use crate::models::AppState;
    use crate::models::origins::AllowedOrigins;

    pub fn state_with(exchange: Arc<dyn TokenExchange>, origins: &str) -> AppState {
        AppState {
            exchange,
            origins: Arc::new(AllowedOrigins::parse(origins)),
        }
    }

    pub fn post_exchange(body: &str, origin: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/oauth/github/token")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(origin) = origin {
            builder = builder.header(header::ORIGIN, origin);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    pub async fn read_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{post_exchange, state_with};
    use crate::handlers::oauth::{TokenExchange, TokenResult};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use oauth2::AuthorizationCode;
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct StaticExchange;

    #[async_trait]
    impl TokenExchange for StaticExchange {
        async fn exchange(&self, _code: &AuthorizationCode, _redirect_uri: &str) -> TokenResult {
            Ok(json!({ "access_token": "abc123" }))
        }
    }

    #[tokio::test]
    async fn token_path_only_accepts_post() {
        let app = super::router(state_with(Arc::new(StaticExchange), "https://app.example"));

        for method in ["GET", "PUT", "DELETE"] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri("/oauth/github/token")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        }

        let response = app
            .oneshot(post_exchange(r#"{"code": "abc"}"#, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_paths_are_not_found() {
        let app = super::router(state_with(Arc::new(StaticExchange), "*"));

        let response = app
            .oneshot(Request::builder().uri("/oauth/gitlab/token").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
