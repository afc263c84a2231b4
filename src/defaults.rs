//! Startup resolution of the adapter defaults
//!
//! Resolution runs once when the adapter starts. A failure never aborts
//! startup: the error is logged and the version-dependent defaults stay
//! empty, so callers fall back to an explicitly requested version.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;
use tracing::{error, info};

use crate::adapter::GenerationMethod;
use crate::config::{AdapterConfig, DEFAULT_ARCHIVE_SUFFIX, mesh_model_path, workload_path};
use crate::version::error::{ResolveError, SourceError};
use crate::version::resolver::{ChartVersionResolver, build_generation_url};
use crate::version::source::TreeLocation;

/// Outcome of a successful resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// Packaging version of the newest chart
    pub chart_version: String,
    /// Version of the software that chart deploys
    pub app_version: String,
    /// Direct download link of the chart archive
    pub generation_url: String,
}

/// Resolves the newest chart, its app version and its generation URL.
///
/// Single attempt, no retry.
pub async fn resolve(
    resolver: &ChartVersionResolver,
    config: &AdapterConfig,
) -> Result<Resolution, ResolveError> {
    resolve_within(resolver, config, None).await
}

/// Same as [`resolve`], with each remote lookup bounded by `config.fetch.timeout`.
///
/// A stalled listing is a `SourceUnavailable` error; a stalled index lookup
/// is a `VersionMapping` error.
pub async fn resolve_with_timeout(
    resolver: &ChartVersionResolver,
    config: &AdapterConfig,
) -> Result<Resolution, ResolveError> {
    resolve_within(resolver, config, Some(config.fetch.timeout)).await
}

async fn resolve_within(
    resolver: &ChartVersionResolver,
    config: &AdapterConfig,
    timeout_ms: Option<u64>,
) -> Result<Resolution, ResolveError> {
    let location = TreeLocation {
        owner: config.source.owner.clone(),
        repo: config.source.repo.clone(),
        branch: config.source.branch.clone(),
        root: config.source.root.clone(),
    };
    let prefix = config.chart.archive_prefix();

    let chart_version = bounded(
        timeout_ms,
        resolver.resolve_latest(&location, &prefix, DEFAULT_ARCHIVE_SUFFIX),
    )
    .await
    .map_err(|ms| ResolveError::SourceUnavailable(SourceError::Timeout(ms)))??;

    let app_version = bounded(
        timeout_ms,
        resolver.derive_application_version(
            &config.chart.repository,
            &config.chart.name,
            &chart_version,
        ),
    )
    .await
    .map_err(|ms| ResolveError::VersionMapping {
        chart: config.chart.name.clone(),
        version: chart_version.clone(),
        source: SourceError::Timeout(ms),
    })??;

    let generation_url = build_generation_url(
        &config.source.generation_url_base(&prefix),
        &chart_version,
    );

    Ok(Resolution {
        chart_version,
        app_version,
        generation_url,
    })
}

/// Awaits `future`, giving up after `timeout_ms` when one is set.
async fn bounded<F: Future>(timeout_ms: Option<u64>, future: F) -> Result<F::Output, u64> {
    match timeout_ms {
        Some(ms) => tokio::time::timeout(Duration::from_millis(ms), future)
            .await
            .map_err(|_| ms),
        None => Ok(future.await),
    }
}

/// Values the rest of the adapter reads at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterDefaults {
    /// App version of the newest chart; None when resolution failed
    pub version: Option<String>,
    pub chart_version: Option<String>,
    pub generation_url: Option<String>,
    pub generation_method: GenerationMethod,
    pub workload_path: PathBuf,
    pub mesh_model_path: PathBuf,
}

impl AdapterDefaults {
    /// Builds the defaults from a resolution outcome, logging any failure.
    pub fn from_outcome(outcome: Result<Resolution, ResolveError>, working_dir: &Path) -> Self {
        let resolution = match outcome {
            Ok(resolution) => {
                info!(
                    "Resolved chart {} (app version {})",
                    resolution.chart_version, resolution.app_version
                );
                Some(resolution)
            }
            Err(e @ ResolveError::VersionMapping { .. }) => {
                error!("Could not get version: {}", e);
                None
            }
            Err(e) => {
                error!("Could not get chart version: {}", e);
                None
            }
        };

        let mut defaults = Self::unresolved(working_dir);
        if let Some(r) = resolution {
            defaults.version = Some(r.app_version);
            defaults.chart_version = Some(r.chart_version);
            defaults.generation_url = Some(r.generation_url);
        }
        defaults
    }

    /// Defaults with no resolved version; only the static values are set.
    pub fn unresolved(working_dir: &Path) -> Self {
        Self {
            version: None,
            chart_version: None,
            generation_url: None,
            generation_method: GenerationMethod::HelmCharts,
            workload_path: workload_path(working_dir),
            mesh_model_path: mesh_model_path(working_dir),
        }
    }

    /// Whether a default version is available
    pub fn is_resolved(&self) -> bool {
        self.version.is_some()
    }

    /// The version to generate components for.
    ///
    /// A non-empty caller-supplied version wins over the resolved default.
    pub fn effective_version<'a>(&'a self, requested: Option<&'a str>) -> Option<&'a str> {
        requested_version(requested).or(self.version.as_deref())
    }
}

/// The caller-supplied version, unless it is absent or blank.
pub fn requested_version(requested: Option<&str>) -> Option<&str> {
    requested.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::index::{ChartIndex, MockChartIndex};
    use crate::version::source::{MockSourceTree, SourceTree, TreeEntry};
    use rstest::rstest;
    use std::sync::Arc;

    fn listing() -> Vec<TreeEntry> {
        ["nginx-service-mesh-1.2.0.tgz", "nginx-service-mesh-1.10.0.tgz"]
            .iter()
            .map(|name| TreeEntry {
                name: name.to_string(),
            })
            .collect()
    }

    fn index_returning(app_version: &'static str) -> MockChartIndex {
        let mut index = MockChartIndex::new();
        index
            .expect_app_version()
            .returning(move |_, _, _| Ok(app_version.to_string()));
        index
    }

    /// Listing that never answers
    struct StalledTree;

    #[async_trait::async_trait]
    impl SourceTree for StalledTree {
        async fn list_entries(
            &self,
            _location: &TreeLocation,
        ) -> Result<Vec<TreeEntry>, SourceError> {
            std::future::pending().await
        }
    }

    /// Index that never answers
    struct StalledIndex;

    #[async_trait::async_trait]
    impl ChartIndex for StalledIndex {
        async fn app_version(
            &self,
            _repo_url: &str,
            _chart_name: &str,
            _chart_version: &str,
        ) -> Result<String, SourceError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn resolve_returns_latest_chart_app_version_and_url() {
        let mut tree = MockSourceTree::new();
        tree.expect_list_entries()
            .withf(|location| {
                location.owner == "nginxinc"
                    && location.repo == "helm-charts"
                    && location.branch == "master"
                    && location.root == "stable/"
            })
            .returning(|_| Ok(listing()));
        let resolver = ChartVersionResolver::new(Arc::new(tree), Arc::new(index_returning("2.0.1")));

        let result = resolve(&resolver, &AdapterConfig::default()).await.unwrap();

        assert_eq!(
            result,
            Resolution {
                chart_version: "1.10.0".to_string(),
                app_version: "2.0.1".to_string(),
                generation_url: "https://github.com/nginxinc/helm-charts/blob/master/stable/nginx-service-mesh-1.10.0.tgz?raw=true".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn resolve_skips_index_when_listing_fails() {
        let mut tree = MockSourceTree::new();
        tree.expect_list_entries()
            .returning(|_| Err(SourceError::InvalidResponse("boom".to_string())));
        let mut index = MockChartIndex::new();
        index.expect_app_version().never();
        let resolver = ChartVersionResolver::new(Arc::new(tree), Arc::new(index));

        let result = resolve(&resolver, &AdapterConfig::default()).await;

        assert!(matches!(result, Err(ResolveError::SourceUnavailable(_))));
    }

    #[tokio::test]
    async fn resolve_with_timeout_reports_stalled_listing() {
        let resolver =
            ChartVersionResolver::new(Arc::new(StalledTree), Arc::new(MockChartIndex::new()));
        let mut config = AdapterConfig::default();
        config.fetch.timeout = 10;

        let result = resolve_with_timeout(&resolver, &config).await;

        assert!(matches!(
            result,
            Err(ResolveError::SourceUnavailable(SourceError::Timeout(10)))
        ));
    }

    #[tokio::test]
    async fn resolve_with_timeout_reports_stalled_index_as_version_mapping() {
        let mut tree = MockSourceTree::new();
        tree.expect_list_entries().returning(|_| {
            Ok(vec![TreeEntry {
                name: "nginx-service-mesh-1.0.0.tgz".to_string(),
            }])
        });
        let resolver = ChartVersionResolver::new(Arc::new(tree), Arc::new(StalledIndex));
        let mut config = AdapterConfig::default();
        config.fetch.timeout = 10;

        let result = resolve_with_timeout(&resolver, &config).await;

        match result {
            Err(ResolveError::VersionMapping {
                chart,
                version,
                source: SourceError::Timeout(10),
            }) => {
                assert_eq!(chart, "nginx-service-mesh");
                assert_eq!(version, "1.0.0");
            }
            other => panic!("expected index timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn resolve_with_timeout_passes_through_fast_resolution() {
        let mut tree = MockSourceTree::new();
        tree.expect_list_entries().returning(|_| Ok(listing()));
        let resolver = ChartVersionResolver::new(Arc::new(tree), Arc::new(index_returning("2.0.1")));

        let result = resolve_with_timeout(&resolver, &AdapterConfig::default())
            .await
            .unwrap();

        assert_eq!(result.chart_version, "1.10.0");
        assert_eq!(result.app_version, "2.0.1");
    }

    #[test]
    fn from_outcome_populates_defaults_on_success() {
        let defaults = AdapterDefaults::from_outcome(
            Ok(Resolution {
                chart_version: "1.10.0".to_string(),
                app_version: "2.0.1".to_string(),
                generation_url: "https://example.com/chart-1.10.0.tgz?raw=true".to_string(),
            }),
            Path::new("/srv/adapter"),
        );

        assert!(defaults.is_resolved());
        assert_eq!(defaults.version.as_deref(), Some("2.0.1"));
        assert_eq!(defaults.chart_version.as_deref(), Some("1.10.0"));
        assert_eq!(
            defaults.generation_url.as_deref(),
            Some("https://example.com/chart-1.10.0.tgz?raw=true")
        );
        assert_eq!(defaults.generation_method, GenerationMethod::HelmCharts);
        assert_eq!(
            defaults.mesh_model_path,
            PathBuf::from("/srv/adapter/templates/meshmodel/components")
        );
    }

    #[test]
    fn from_outcome_leaves_version_empty_on_failure() {
        let defaults = AdapterDefaults::from_outcome(
            Err(ResolveError::SourceUnavailable(SourceError::NotFound(
                "stable/".to_string(),
            ))),
            Path::new("/srv/adapter"),
        );

        assert!(!defaults.is_resolved());
        assert_eq!(defaults.version, None);
        assert_eq!(defaults.chart_version, None);
        assert_eq!(defaults.generation_url, None);
        assert_eq!(
            defaults.workload_path,
            PathBuf::from("/srv/adapter/templates/oam/workloads")
        );
    }

    #[rstest]
    #[case(Some("1.9.0"), Some("1.9.0"))]
    #[case(Some(" 1.9.0 "), Some(" 1.9.0 "))]
    #[case(Some(""), None)]
    #[case(Some("   "), None)]
    #[case(None, None)]
    fn requested_version_ignores_blank(
        #[case] requested: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(requested_version(requested), expected);
    }

    #[test]
    fn unresolved_keeps_static_defaults() {
        let defaults = AdapterDefaults::unresolved(Path::new("/srv/adapter"));

        assert!(!defaults.is_resolved());
        assert_eq!(defaults.effective_version(Some("")), None);
        assert_eq!(defaults.effective_version(Some("1.9.0")), Some("1.9.0"));
        assert_eq!(defaults.generation_method, GenerationMethod::HelmCharts);
        assert_eq!(
            defaults.workload_path,
            PathBuf::from("/srv/adapter/templates/oam/workloads")
        );
    }

    #[test]
    fn effective_version_prefers_caller_supplied_version() {
        let resolved = AdapterDefaults::from_outcome(
            Ok(Resolution {
                chart_version: "1.10.0".to_string(),
                app_version: "2.0.1".to_string(),
                generation_url: String::new(),
            }),
            Path::new("."),
        );
        let unresolved = AdapterDefaults::from_outcome(
            Err(ResolveError::EmptyResult {
                root: "stable/".to_string(),
                prefix: "nginx-service-mesh-".to_string(),
                suffix: ".tgz".to_string(),
            }),
            Path::new("."),
        );

        assert_eq!(resolved.effective_version(Some("1.9.0")), Some("1.9.0"));
        assert_eq!(resolved.effective_version(None), Some("2.0.1"));
        assert_eq!(resolved.effective_version(Some("  ")), Some("2.0.1"));
        assert_eq!(unresolved.effective_version(Some("1.9.0")), Some("1.9.0"));
        assert_eq!(unresolved.effective_version(None), None);
    }
}
