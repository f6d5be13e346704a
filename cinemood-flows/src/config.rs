use crate::error::{FlowError, Result};

pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Service configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub openrouter_api_key: String,
    pub tmdb_api_key: String,
    pub openrouter_base_url: String,
    pub tmdb_base_url: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            openrouter_api_key: require("OPENROUTER_API_KEY")?,
            tmdb_api_key: require("TMDB_API_KEY")?,
            openrouter_base_url: std::env::var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENROUTER_BASE_URL.to_string()),
            tmdb_base_url: std::env::var("TMDB_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_TMDB_BASE_URL.to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        })
    }
}

fn require(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| FlowError::Config(format!("{} environment variable not set", name)))
}
