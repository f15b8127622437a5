use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::document::{MediaType, RawDocument};
use crate::errors::AppError;
use crate::profile::merge::merge_profiles;
use crate::profile::models::{CandidateProfile, ProfileAnalysis};
use crate::profile::pipeline::{build_report, ProfileReport, ProfileRequest};
use crate::profile::scoring::analyze_profile;
use crate::state::AppState;

const DEFAULT_UPLOAD_NAME: &str = "resume";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileTextRequest {
    pub resume_text: Option<String>,
    pub linkedin_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuery {
    pub filename: Option<String>,
    pub linkedin_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MergeRequest {
    pub resume: Option<CandidateProfile>,
    pub network: Option<CandidateProfile>,
}

/// POST /api/v1/profile
pub async fn handle_build_profile(
    State(state): State<AppState>,
    Json(req): Json<ProfileTextRequest>,
) -> Result<Json<ProfileReport>, AppError> {
    let request = ProfileRequest {
        resume: None,
        resume_text: req.resume_text,
        linkedin_url: req.linkedin_url,
    };
    Ok(Json(build_report(&state.profile, request).await?))
}

/// POST /api/v1/profile/resume: raw PDF/DOCX body.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ProfileReport>, AppError> {
    if body.is_empty() {
        return Err(AppError::Validation("Request body is empty".to_string()));
    }
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    let media_type = MediaType::detect(content_type, query.filename.as_deref())?;
    let request = ProfileRequest {
        resume: Some(RawDocument {
            bytes: body,
            media_type,
            filename: query
                .filename
                .unwrap_or_else(|| DEFAULT_UPLOAD_NAME.to_string()),
        }),
        resume_text: None,
        linkedin_url: query.linkedin_url,
    };
    Ok(Json(build_report(&state.profile, request).await?))
}

/// POST /api/v1/profile/analyze: scores any profile-shaped JSON.
pub async fn handle_analyze(Json(profile): Json<Value>) -> Json<ProfileAnalysis> {
    Json(analyze_profile(&profile))
}

/// POST /api/v1/profile/merge
pub async fn handle_merge(Json(req): Json<MergeRequest>) -> Json<Option<CandidateProfile>> {
    Json(merge_profiles(req.resume, req.network))
}
