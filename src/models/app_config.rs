use std::sync::Arc;
use std::time::Duration;

use oauth2::{ClientId, ClientSecret};
use thiserror::Error;

use crate::handlers::oauth::TokenExchange;
use crate::models::origins::AllowedOrigins;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not found")]
    Missing(&'static str),
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// OAuth application credentials. `ClientSecret` redacts itself in `Debug`.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
}

/// Process configuration, resolved once at startup from:
/// - `PORT`: listening port (default: 3000)
/// - `GITHUB_CLIENT_ID`: OAuth client id (required)
/// - `GITHUB_CLIENT_SECRET`: OAuth client secret (required)
/// - `ALLOWED_ORIGINS`: comma-separated browser origins, `*` for any (required)
/// - `GITHUB_TOKEN_URL`: token endpoint (default: GitHub's)
/// - `UPSTREAM_TIMEOUT_SECS`: outbound request timeout (default: 10)
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub credentials: Credentials,
    pub allowed_origins: AllowedOrigins,
    pub token_url: String,
    pub upstream_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        use dotenvy::dotenv;
        use std::env;

        dotenv().ok();

        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(var))
        };

        let client_id = required("GITHUB_CLIENT_ID")?;
        let client_secret = required("GITHUB_CLIENT_SECRET")?;

        let allowed_origins = AllowedOrigins::parse(&required("ALLOWED_ORIGINS")?);
        if allowed_origins.is_empty() {
            return Err(ConfigError::Invalid {
                var: "ALLOWED_ORIGINS",
                reason: "no origins listed".to_string(),
            });
        }

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::Invalid {
                var: "PORT",
                reason: format!("{e}"),
            })?,
            None => DEFAULT_PORT,
        };

        let upstream_timeout = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        var: "UPSTREAM_TIMEOUT_SECS",
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Ok(secs) => Duration::from_secs(secs),
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: "UPSTREAM_TIMEOUT_SECS",
                        reason: format!("{e}"),
                    });
                }
            },
            None => Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        };

        let token_url = lookup("GITHUB_TOKEN_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string());

        Ok(Self {
            port,
            credentials: Credentials {
                client_id: ClientId::new(client_id),
                client_secret: ClientSecret::new(client_secret),
            },
            allowed_origins,
            token_url,
            upstream_timeout,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub exchange: Arc<dyn TokenExchange>,
    pub origins: Arc<AllowedOrigins>,
}
