use crate::config::Config;
use crate::profile::pipeline::ProfileDeps;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Structured extractor, profile fetcher and profile cache. Each is a disabled/no-op
    /// implementation when its backing service is not configured.
    pub profile: ProfileDeps,
}
