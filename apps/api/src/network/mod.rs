// Network profile fetch: public-profile lookups through a third-party scraping API.
//
// `AppState` carries an `Arc<dyn ProfileFetcher>`; the pipeline never talks to the
// scraper directly. Lookups are keyed by the canonical URL from `normalize_profile_url`.

pub mod cache;

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::profile::models::NetworkProfile;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

static PROFILE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:[a-z]{2,3}\.|www\.)?linkedin\.com/in/([a-z0-9%_\-]+)/?(?:[?#].*)?$")
        .unwrap()
});

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("not a public profile URL: {0}")]
    InvalidUrl(String),

    #[error("profile fetching is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("scraper API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected scraper payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Canonical form `https://www.linkedin.com/in/<slug>`, slug lower-cased. Accepts the
/// URL with or without scheme, `www.` or country subdomain, trailing slash or query.
pub fn normalize_profile_url(raw: &str) -> Result<String, FetchError> {
    let trimmed = raw.trim();
    let slug = PROFILE_URL_RE
        .captures(trimmed)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
        .ok_or_else(|| FetchError::InvalidUrl(trimmed.to_string()))?;
    Ok(format!("https://www.linkedin.com/in/{slug}"))
}

/// Fetches a scraped public profile for a canonical profile URL.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    async fn fetch(&self, profile_url: &str) -> Result<NetworkProfile, FetchError>;
}

/// Client for the scraping API: `GET {base_url}?url=<profile>` with an `x-api-key` header.
pub struct ScraperClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl ScraperClient {
    pub fn new(base_url: String, api_key: String) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }
}

/// Some scraper plans wrap the profile in `{ "data": { ... } }`.
fn unwrap_payload(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or_default()
        }
        other => other,
    }
}

#[async_trait]
impl ProfileFetcher for ScraperClient {
    async fn fetch(&self, profile_url: &str) -> Result<NetworkProfile, FetchError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("url", profile_url)])
            .header("x-api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: Value = response.json().await?;
        let profile: NetworkProfile = serde_json::from_value(unwrap_payload(payload))?;
        debug!(
            "Fetched network profile for {profile_url} ({} experiences)",
            profile.experiences.len()
        );
        Ok(profile)
    }
}

/// Used when no scraper is configured.
pub struct DisabledFetcher;

#[async_trait]
impl ProfileFetcher for DisabledFetcher {
    async fn fetch(&self, _profile_url: &str) -> Result<NetworkProfile, FetchError> {
        Err(FetchError::NotConfigured)
    }
}
