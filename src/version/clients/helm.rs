//! Helm repository index implementation

use std::collections::HashMap;

use crate::version::error::SourceError;
use crate::version::index::ChartIndex;
use semver::Version;
use serde::Deserialize;
use tracing::{debug, warn};

/// `index.yaml` served at the root of a Helm repository
#[derive(Debug, Deserialize)]
struct RepositoryIndex {
    #[serde(default)]
    entries: HashMap<String, Vec<ChartVersion>>,
}

/// One published version of a chart
///
/// Plain scalars keep their source text, so `version: 1.10` stays `"1.10"`.
#[derive(Debug, Deserialize)]
struct ChartVersion {
    #[serde(default)]
    version: Option<String>,
    #[serde(rename = "appVersion", default)]
    app_version: Option<String>,
}

/// Chart index implementation for classic (HTTP) Helm repositories
pub struct HelmRepository {
    client: reqwest::Client,
}

impl HelmRepository {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("nginx-mesh-config")
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    async fn fetch_index(&self, repo_url: &str) -> Result<RepositoryIndex, SourceError> {
        let url = format!("{}/index.yaml", repo_url.trim_end_matches('/'));
        debug!("Fetching chart index {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(url));
        }

        if !status.is_success() {
            warn!("Chart repository returned status {}: {}", status, url);
            return Err(SourceError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let body = response.text().await?;

        serde_yaml::from_str(&body).map_err(|e| {
            warn!("Failed to parse chart index {}: {}", url, e);
            SourceError::InvalidResponse(e.to_string())
        })
    }
}

impl Default for HelmRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a published version matches the requested one.
///
/// Exact string match first; otherwise both must parse as the same semantic
/// version, ignoring a leading `v`.
fn versions_match(published: &str, requested: &str) -> bool {
    if published == requested {
        return true;
    }
    let parse = |v: &str| Version::parse(v.strip_prefix('v').unwrap_or(v)).ok();
    match (parse(published), parse(requested)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[async_trait::async_trait]
impl ChartIndex for HelmRepository {
    async fn app_version(
        &self,
        repo_url: &str,
        chart_name: &str,
        chart_version: &str,
    ) -> Result<String, SourceError> {
        let index = self.fetch_index(repo_url).await?;

        let versions = index
            .entries
            .get(chart_name)
            .ok_or_else(|| SourceError::NotFound(format!("chart {}", chart_name)))?;

        let entry = versions
            .iter()
            .find(|v| {
                v.version
                    .as_deref()
                    .is_some_and(|published| versions_match(published, chart_version))
            })
            .ok_or_else(|| {
                SourceError::NotFound(format!("chart {} version {}", chart_name, chart_version))
            })?;

        match entry.app_version.as_deref().map(str::trim) {
            Some(app_version) if !app_version.is_empty() => Ok(app_version.to_string()),
            _ => Err(SourceError::InvalidResponse(format!(
                "chart {} version {} has no appVersion",
                chart_name, chart_version
            ))),
        }
    }
}
