use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every external collaborator is optional; a missing one disables its feature.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub llm_model: Option<String>,
    pub scraper: Option<ScraperConfig>,
    pub port: u16,
    pub rust_log: String,
}

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub api_url: String,
    pub api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let scraper = match (optional_env("SCRAPER_API_URL"), optional_env("SCRAPER_API_KEY")) {
            (Some(api_url), Some(api_key)) => Some(ScraperConfig { api_url, api_key }),
            (None, None) => None,
            _ => anyhow::bail!("SCRAPER_API_URL and SCRAPER_API_KEY must be set together"),
        };

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            llm_model: optional_env("LLM_MODEL"),
            scraper,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Unset and blank are the same thing.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
