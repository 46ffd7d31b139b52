use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        HeaderValue, Method,
        header::{ACCEPT, CONTENT_TYPE, ORIGIN},
        request::Parts,
    },
    middleware::Next,
    response::Response,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::debug;

use crate::error::RelayError;
use crate::models::AppState;
use crate::models::origins::AllowedOrigins;

/// Stops requests whose `Origin` is not on the allow-list before they reach
/// any handler. An empty header counts as absent; a header that is not valid
/// UTF-8 never matches.
pub async fn origin_guard(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, RelayError> {
    let permitted = match request.headers().get(ORIGIN) {
        None => app_state.origins.permits(None),
        Some(value) if value.is_empty() => app_state.origins.permits(None),
        Some(value) => value
            .to_str()
            .is_ok_and(|origin| app_state.origins.permits(Some(origin))),
    };

    if !permitted {
        debug!(outcome = RelayError::OriginDenied.outcome(), "Blocked cross-origin request");
        return Err(RelayError::OriginDenied);
    }

    Ok(next.run(request).await)
}

/// CORS response headers for permitted origins.
pub fn cors_layer(origins: Arc<AllowedOrigins>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .is_ok_and(|origin| origins.permits(Some(origin)))
            },
        ))
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT])
}
