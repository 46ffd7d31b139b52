use oauth2::AuthorizationCode;
use serde::Deserialize;

/// Characters of an authorization code that may appear in logs.
const CODE_LOG_PREFIX_LEN: usize = 6;

/// Body of `POST /oauth/github/token`.
///
/// Both fields are optional at the serde level so that a missing `code`
/// surfaces as a structured 400 rather than an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ExchangeRequest {
    pub code: Option<String>,
    pub redirect_uri: Option<String>,
}

impl ExchangeRequest {
    /// The authorization code, if present and non-empty.
    pub fn authorization_code(&self) -> Option<AuthorizationCode> {
        self.code
            .as_deref()
            .filter(|code| !code.is_empty())
            .map(|code| AuthorizationCode::new(code.to_string()))
    }

    pub fn redirect_uri(&self) -> &str {
        self.redirect_uri.as_deref().unwrap_or("")
    }
}

/// Log-safe rendering of an authorization code: a short prefix and an ellipsis.
/// At least one character is always withheld, so short codes never appear whole.
pub fn code_prefix(code: &AuthorizationCode) -> String {
    let len = code.secret().chars().count();
    let shown = CODE_LOG_PREFIX_LEN.min(len.saturating_sub(1));
    let prefix: String = code.secret().chars().take(shown).collect();
    format!("{prefix}...")
}
