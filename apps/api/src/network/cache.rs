//! 24-hour reuse window for scraped network profiles.
//!
//! A fresh row is served without calling the scraper; a stale or missing row triggers a
//! fetch whose result overwrites it. There is no eviction: stale rows stay until refetched.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::models::cache::CachedProfileRow;
use crate::profile::models::NetworkProfile;

pub const FRESHNESS_WINDOW_HOURS: i64 = 24;

/// True iff `fetched_at` is less than 24 hours before `now`.
pub fn is_fresh(fetched_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(fetched_at) < Duration::hours(FRESHNESS_WINDOW_HOURS)
}

/// JSONB payload for a profile row.
fn encode_profile(profile: &NetworkProfile) -> Result<Value, sqlx::Error> {
    serde_json::to_value(profile).map_err(|e| sqlx::Error::Protocol(e.to_string()))
}

#[async_trait]
pub trait ProfileCache: Send + Sync {
    /// The cached profile for `profile_url`, if one was stored within the window.
    async fn get_fresh(&self, profile_url: &str) -> Result<Option<NetworkProfile>, sqlx::Error>;

    async fn store(&self, profile_url: &str, profile: &NetworkProfile) -> Result<(), sqlx::Error>;
}

pub struct PgProfileCache {
    pool: PgPool,
}

impl PgProfileCache {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS linkedin_profiles (
                profile_url TEXT PRIMARY KEY,
                data        JSONB NOT NULL,
                fetched_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        info!("linkedin_profiles table ready");
        Ok(())
    }
}

#[async_trait]
impl ProfileCache for PgProfileCache {
    async fn get_fresh(&self, profile_url: &str) -> Result<Option<NetworkProfile>, sqlx::Error> {
        let row = sqlx::query_as::<_, CachedProfileRow>(
            "SELECT profile_url, data, fetched_at FROM linkedin_profiles WHERE profile_url = $1",
        )
        .bind(profile_url)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row.filter(|r| is_fresh(r.fetched_at, Utc::now())) else {
            return Ok(None);
        };
        match serde_json::from_value(row.data) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                warn!("Ignoring unreadable cached profile for {}: {e}", row.profile_url);
                Ok(None)
            }
        }
    }

    async fn store(&self, profile_url: &str, profile: &NetworkProfile) -> Result<(), sqlx::Error> {
        let data = encode_profile(profile)?;
        sqlx::query(
            r#"
            INSERT INTO linkedin_profiles (profile_url, data, fetched_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (profile_url)
            DO UPDATE SET data = EXCLUDED.data, fetched_at = EXCLUDED.fetched_at
            "#,
        )
        .bind(profile_url)
        .bind(data)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// Used when no database is configured: nothing is ever fresh, stores are dropped.
pub struct NoopProfileCache;

#[async_trait]
impl ProfileCache for NoopProfileCache {
    async fn get_fresh(&self, _profile_url: &str) -> Result<Option<NetworkProfile>, sqlx::Error> {
        Ok(None)
    }

    async fn store(&self, _profile_url: &str, _profile: &NetworkProfile) -> Result<(), sqlx::Error> {
        Ok(())
    }
}
