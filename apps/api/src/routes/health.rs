use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Service status plus which optional collaborators are configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "pathway-api",
        "features": {
            "structuredExtraction": state.config.anthropic_api_key.is_some(),
            "networkProfiles": state.config.scraper.is_some(),
            "profileCache": state.config.database_url.is_some()
        }
    }))
}
