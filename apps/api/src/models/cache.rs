use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;

/// One row of `linkedin_profiles`: the last scraped payload for a canonical profile URL.
#[derive(Debug, Clone, FromRow)]
pub struct CachedProfileRow {
    pub profile_url: String,
    pub data: Value,
    pub fetched_at: DateTime<Utc>,
}
