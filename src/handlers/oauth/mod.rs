mod exchange_handler;
mod github_client;

pub use exchange_handler::exchange_handler;
pub use github_client::{GitHubExchange, TokenExchange, TokenPayload, TokenResult};
