//! GitHub contents API source tree implementation

use crate::config::DEFAULT_GITHUB_API_URL;
use crate::version::error::SourceError;
use crate::version::source::{SourceTree, TreeEntry, TreeLocation};
use serde::Deserialize;
use tracing::{debug, warn};

/// Entry returned by the GitHub contents API
#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Source tree implementation for the GitHub contents API
pub struct GitHubTree {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubTree {
    /// Creates a new GitHubTree with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("nginx-mesh-config")
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Authenticates requests with the given token
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn contents_url(&self, location: &TreeLocation) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            self.base_url,
            location.owner,
            location.repo,
            location.root.trim_matches('/'),
            location.branch
        )
    }
}

impl Default for GitHubTree {
    fn default() -> Self {
        Self::new(DEFAULT_GITHUB_API_URL)
    }
}

#[async_trait::async_trait]
impl SourceTree for GitHubTree {
    async fn list_entries(&self, location: &TreeLocation) -> Result<Vec<TreeEntry>, SourceError> {
        let url = self.contents_url(location);
        debug!("Listing {}", url);

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(format!(
                "{}/{}@{}:{}",
                location.owner, location.repo, location.branch, location.root
            )));
        }

        // GitHub answers 403 for exhausted quotas on unauthenticated requests
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || (status == reqwest::StatusCode::FORBIDDEN
                && response.headers().contains_key("retry-after"))
        {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(SourceError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(SourceError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let entries: Vec<ContentEntry> = response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub contents response: {}", e);
            SourceError::InvalidResponse(e.to_string())
        })?;

        Ok(entries
            .into_iter()
            .filter(|entry| entry.kind == "file")
            .map(|entry| TreeEntry { name: entry.name })
            .collect())
    }
}
