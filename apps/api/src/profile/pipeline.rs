//! Profile pipeline: résumé path ∥ network path → merge → score.
//!
//! The two paths are independent and run concurrently. Neither path's failure is fatal
//! while the other yields a profile: a structured-extraction failure falls back to the
//! heuristic builder, a fetch failure means "no network profile".

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::document::{extract_raw_text_async, RawDocument};
use crate::errors::AppError;
use crate::network::cache::ProfileCache;
use crate::network::{normalize_profile_url, ProfileFetcher};
use crate::profile::builder::{build_from_structured, build_from_text};
use crate::profile::merge::merge_profiles;
use crate::profile::models::{CandidateProfile, ProfileAnalysis};
use crate::profile::normalize::normalize_text;
use crate::profile::scoring::analyze_candidate;
use crate::profile::structured::StructuredExtractor;

/// Collaborators the pipeline needs, constructed once at startup.
#[derive(Clone)]
pub struct ProfileDeps {
    pub extractor: Arc<dyn StructuredExtractor>,
    pub fetcher: Arc<dyn ProfileFetcher>,
    pub cache: Arc<dyn ProfileCache>,
}

#[derive(Debug, Default)]
pub struct ProfileRequest {
    /// An uploaded document; takes precedence over `resume_text`.
    pub resume: Option<RawDocument>,
    pub resume_text: Option<String>,
    pub linkedin_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeSource {
    Structured,
    Heuristic,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkSource {
    Fetched,
    Cached,
    Unavailable,
    None,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSources {
    pub resume: ResumeSource,
    pub network: NetworkSource,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileReport {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub profile: CandidateProfile,
    pub analysis: ProfileAnalysis,
    pub sources: ReportSources,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

async fn resume_profile(
    extractor: &dyn StructuredExtractor,
    document: Option<RawDocument>,
    resume_text: Option<String>,
) -> Result<(Option<CandidateProfile>, ResumeSource), AppError> {
    let raw = match document {
        Some(document) => Some(extract_raw_text_async(document).await?),
        None => resume_text,
    };
    let Some(raw) = non_blank(raw) else {
        return Ok((None, ResumeSource::None));
    };

    let text = normalize_text(Some(&raw));
    match extractor.extract(&text).await {
        Ok(record) => Ok((Some(build_from_structured(record)), ResumeSource::Structured)),
        Err(e) => {
            warn!("Structured extraction failed, using heuristic parser: {e}");
            Ok((Some(build_from_text(Some(&raw))), ResumeSource::Heuristic))
        }
    }
}

async fn network_profile(
    fetcher: &dyn ProfileFetcher,
    cache: &dyn ProfileCache,
    profile_url: Option<&str>,
) -> (Option<CandidateProfile>, NetworkSource) {
    let Some(profile_url) = profile_url else {
        return (None, NetworkSource::None);
    };

    match cache.get_fresh(profile_url).await {
        Ok(Some(cached)) => {
            info!("Serving cached network profile for {profile_url}");
            return (Some(cached.into()), NetworkSource::Cached);
        }
        Ok(None) => {}
        Err(e) => warn!("Profile cache lookup failed for {profile_url}: {e}"),
    }

    match fetcher.fetch(profile_url).await {
        Ok(fetched) => {
            if let Err(e) = cache.store(profile_url, &fetched).await {
                warn!("Could not cache network profile for {profile_url}: {e}");
            }
            (Some(fetched.into()), NetworkSource::Fetched)
        }
        Err(e) => {
            warn!("Network profile unavailable for {profile_url}: {e}");
            (None, NetworkSource::Unavailable)
        }
    }
}

pub async fn build_report(
    deps: &ProfileDeps,
    request: ProfileRequest,
) -> Result<ProfileReport, AppError> {
    let resume_text = non_blank(request.resume_text);
    let linkedin_url = non_blank(request.linkedin_url);
    if request.resume.is_none() && resume_text.is_none() && linkedin_url.is_none() {
        return Err(AppError::Validation(
            "Provide a résumé, résumé text, or a profile URL".to_string(),
        ));
    }
    let profile_url = linkedin_url.as_deref().map(normalize_profile_url).transpose()?;

    let (resume, (network, network_source)) = tokio::join!(
        resume_profile(deps.extractor.as_ref(), request.resume, resume_text),
        network_profile(deps.fetcher.as_ref(), deps.cache.as_ref(), profile_url.as_deref()),
    );
    let (resume, resume_source) = resume?;

    let Some(profile) = merge_profiles(resume, network) else {
        return Err(match network_source {
            NetworkSource::Unavailable => {
                AppError::Upstream("network profile could not be fetched".to_string())
            }
            _ => AppError::Validation("The résumé contained no readable text".to_string()),
        });
    };
    let analysis = analyze_candidate(&profile);

    let report = ProfileReport {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        profile,
        analysis,
        sources: ReportSources {
            resume: resume_source,
            network: network_source,
        },
    };
    info!(
        report_id = %report.report_id,
        score = report.analysis.profile_score,
        resume = ?resume_source,
        network = ?network_source,
        "Profile report built"
    );
    Ok(report)
}
