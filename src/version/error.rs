use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timed out after {0} ms")]
    Timeout(u64),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Source unavailable: {0}")]
    SourceUnavailable(#[source] SourceError),

    #[error("No files found under {root} matching {prefix}*{suffix}")]
    EmptyResult {
        root: String,
        prefix: String,
        suffix: String,
    },

    #[error("Could not map chart {chart} {version} to an app version: {source}")]
    VersionMapping {
        chart: String,
        version: String,
        #[source]
        source: SourceError,
    },
}
