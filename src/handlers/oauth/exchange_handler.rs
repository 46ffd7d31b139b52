use crate::error::RelayError;
use crate::handlers::oauth::TokenPayload;
use crate::models::AppState;
use crate::models::oauth::{ExchangeRequest, code_prefix};
use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use tracing::{Span, info, instrument, warn};

#[instrument(
    name = "oauth.github.token",
    skip_all,
    fields(
        code = tracing::field::Empty,
        redirect_uri = tracing::field::Empty,
    )
)]
pub async fn exchange_handler(
    State(app_state): State<AppState>,
    body: Result<Json<ExchangeRequest>, JsonRejection>,
) -> Result<Json<TokenPayload>, RelayError> {
    let Json(request) = body.map_err(|rejection| {
        let err = RelayError::InvalidBody(rejection.body_text());
        warn!(outcome = err.outcome(), error = %err, "Rejected exchange request");
        err
    })?;

    let Some(code) = request.authorization_code() else {
        let err = RelayError::MissingCode;
        warn!(outcome = err.outcome(), "Rejected exchange request");
        return Err(err);
    };
    let redirect_uri = request.redirect_uri();

    let span = Span::current();
    span.record("code", code_prefix(&code).as_str());
    span.record("redirect_uri", redirect_uri);
    info!("Exchanging authorization code");

    match app_state.exchange.exchange(&code, redirect_uri).await {
        Ok(token) => {
            info!(outcome = "success", "Token exchange succeeded");
            Ok(Json(token))
        }
        Err(err) => {
            warn!(outcome = err.outcome(), error = %err, "Token exchange failed");
            Err(err)
        }
    }
}
