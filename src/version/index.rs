//! Chart index trait for mapping chart versions to application versions

#[cfg(test)]
use mockall::automock;

use crate::version::error::SourceError;

/// Trait for looking up chart metadata in a package repository
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ChartIndex: Send + Sync {
    /// Returns the application version a published chart deploys
    ///
    /// # Arguments
    /// * `repo_url` - Base URL of the chart repository
    /// * `chart_name` - Chart name as registered in the repository
    /// * `chart_version` - Packaging version of the chart
    ///
    /// # Returns
    /// * `Ok(String)` - The `appVersion` recorded for that chart version
    /// * `Err(SourceError::NotFound)` - If the chart or version is not in the index
    /// * `Err(SourceError)` - If the index cannot be fetched or parsed
    async fn app_version(
        &self,
        repo_url: &str,
        chart_name: &str,
        chart_version: &str,
    ) -> Result<String, SourceError>;
}
