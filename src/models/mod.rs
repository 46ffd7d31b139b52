pub mod app_config;
pub mod oauth;
pub mod origins;

pub use app_config::{AppConfig, AppState, Credentials};
