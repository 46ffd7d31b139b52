use std::time::Duration;

use async_trait::async_trait;
use oauth2::AuthorizationCode;
use reqwest::header::ACCEPT;
use serde::Serialize;
use serde_json::Value;

use crate::error::RelayError;
use crate::models::{AppConfig, Credentials};

/// Token payload returned by the provider, relayed as-is.
pub type TokenPayload = Value;

pub type TokenResult = Result<TokenPayload, RelayError>;

/// One authorization-code exchange against the provider.
///
/// Implementations make exactly one upstream attempt per call.
#[async_trait]
pub trait TokenExchange: Send + Sync {
    async fn exchange(&self, code: &AuthorizationCode, redirect_uri: &str) -> TokenResult;
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
    redirect_uri: &'a str,
}

/// Exchanges codes at GitHub's OAuth token endpoint.
pub struct GitHubExchange {
    client: reqwest::Client,
    token_url: String,
    credentials: Credentials,
}

impl GitHubExchange {
    pub fn new(
        credentials: Credentials,
        token_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            token_url: token_url.into(),
            credentials,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        Self::new(
            config.credentials.clone(),
            config.token_url.clone(),
            config.upstream_timeout,
        )
    }
}

#[async_trait]
impl TokenExchange for GitHubExchange {
    async fn exchange(&self, code: &AuthorizationCode, redirect_uri: &str) -> TokenResult {
        let request = TokenRequest {
            client_id: self.credentials.client_id.as_str(),
            client_secret: self.credentials.client_secret.secret().as_str(),
            code: code.secret().as_str(),
            redirect_uri,
        };

        let response = self
            .client
            .post(&self.token_url)
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_string());
            return Err(RelayError::UpstreamStatus { status, body });
        }

        let payload: TokenPayload = response.json().await?;

        // GitHub reports bad codes and credentials with a 200 and an `error` field.
        if payload.get("error").is_some_and(|error| !error.is_null()) {
            return Err(RelayError::UpstreamRejected(payload));
        }

        Ok(payload)
    }
}
