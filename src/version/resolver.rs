//! Latest chart version resolver
//!
//! Scans a source tree for packaged chart archives, picks the highest
//! version tag and turns it into an application version and a download URL.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::DEFAULT_ARCHIVE_SUFFIX;
use crate::version::dotted::sort_dotted;
use crate::version::error::ResolveError;
use crate::version::index::ChartIndex;
use crate::version::source::{SourceTree, TreeLocation};

/// Query suffix that makes GitHub serve the raw archive instead of the blob page
const RAW_QUERY: &str = "?raw=true";

/// Resolves the newest published chart and its application version.
pub struct ChartVersionResolver {
    tree: Arc<dyn SourceTree>,
    index: Arc<dyn ChartIndex>,
}

impl ChartVersionResolver {
    pub fn new(tree: Arc<dyn SourceTree>, index: Arc<dyn ChartIndex>) -> Self {
        Self { tree, index }
    }

    /// Returns the highest version tag among archives named `<prefix><tag><suffix>`.
    pub async fn resolve_latest(
        &self,
        location: &TreeLocation,
        prefix: &str,
        suffix: &str,
    ) -> Result<String, ResolveError> {
        let entries = self
            .tree
            .list_entries(location)
            .await
            .map_err(ResolveError::SourceUnavailable)?;

        let mut tags: Vec<String> = entries
            .iter()
            .filter_map(|entry| extract_version_tag(&entry.name, prefix, suffix))
            .map(str::to_string)
            .collect();

        debug!(
            "Found {} candidate archives out of {} entries under {}",
            tags.len(),
            entries.len(),
            location.root
        );

        sort_dotted(&mut tags);

        tags.pop().ok_or_else(|| ResolveError::EmptyResult {
            root: location.root.clone(),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        })
    }

    /// Maps a chart version to the application version it deploys.
    pub async fn derive_application_version(
        &self,
        repo_url: &str,
        chart_name: &str,
        chart_version: &str,
    ) -> Result<String, ResolveError> {
        let app_version = self
            .index
            .app_version(repo_url, chart_name, chart_version)
            .await
            .map_err(|source| ResolveError::VersionMapping {
                chart: chart_name.to_string(),
                version: chart_version.to_string(),
                source,
            })?;

        info!(
            "Chart {} {} deploys app version {}",
            chart_name, chart_version, app_version
        );

        Ok(app_version)
    }
}

/// Strips `prefix` and `suffix` from an archive name.
///
/// Returns None when the name doesn't carry both, or when nothing is left in between.
pub fn extract_version_tag<'a>(name: &'a str, prefix: &str, suffix: &str) -> Option<&'a str> {
    name.strip_prefix(prefix)?
        .strip_suffix(suffix)
        .filter(|tag| !tag.is_empty())
}

/// Direct download link of the archive for `version_tag`.
pub fn build_generation_url(raw_tree_base_url: &str, version_tag: &str) -> String {
    format!(
        "{}{}{}{}",
        raw_tree_base_url, version_tag, DEFAULT_ARCHIVE_SUFFIX, RAW_QUERY
    )
}
