use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// =============================================================================
// Upstream locations
// =============================================================================

/// Helm repository publishing the NGINX Service Mesh chart
pub const DEFAULT_CHART_REPOSITORY: &str = "https://helm.nginx.com/stable";

/// Chart name registered in the Helm repository
pub const DEFAULT_CHART_NAME: &str = "nginx-service-mesh";

/// Extension of the packaged chart archives in the source tree
pub const DEFAULT_ARCHIVE_SUFFIX: &str = ".tgz";

/// Default base URL for GitHub API
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Default base URL for browsing GitHub repository contents
pub const DEFAULT_GITHUB_WEB_URL: &str = "https://github.com";

// =============================================================================
// Time-related constants
// =============================================================================

/// Timeout for the whole startup resolution in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Adapter build configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AdapterConfig {
    pub source: SourceConfig,
    pub chart: ChartConfig,
    pub fetch: FetchConfig,
}

/// Location of the source tree holding the packaged charts
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceConfig {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub root: String,
    pub api_url: String,
    pub web_url: String,
    /// Optional GitHub token, sent as a bearer token when present
    pub token: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            owner: "nginxinc".to_string(),
            repo: "helm-charts".to_string(),
            branch: "master".to_string(),
            root: "stable/".to_string(),
            api_url: DEFAULT_GITHUB_API_URL.to_string(),
            web_url: DEFAULT_GITHUB_WEB_URL.to_string(),
            token: None,
        }
    }
}

/// Chart identity in the Helm repository
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    pub repository: String,
    pub name: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            repository: DEFAULT_CHART_REPOSITORY.to_string(),
            name: DEFAULT_CHART_NAME.to_string(),
        }
    }
}

/// Network-related configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FetchConfig {
    /// Timeout for startup resolution in milliseconds
    pub timeout: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: FETCH_TIMEOUT_MS,
        }
    }
}

impl AdapterConfig {
    /// Loads the configuration from a JSON file, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ChartConfig {
    /// File name prefix of the chart archives, e.g. `nginx-service-mesh-`
    pub fn archive_prefix(&self) -> String {
        format!("{}-", self.name)
    }
}

impl SourceConfig {
    /// Base URL the generation URL is composed from.
    ///
    /// e.g. `https://github.com/nginxinc/helm-charts/blob/master/stable/nginx-service-mesh-`
    pub fn generation_url_base(&self, archive_prefix: &str) -> String {
        let root = self.root.trim_matches('/');
        let root = if root.is_empty() {
            String::new()
        } else {
            format!("{}/", root)
        };
        format!(
            "{}/{}/{}/blob/{}/{}{}",
            self.web_url.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.branch,
            root,
            archive_prefix
        )
    }
}

/// Returns the path to the data directory for nginx-mesh-config.
/// Uses $XDG_DATA_HOME/nginx-mesh-config if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/nginx-mesh-config,
/// or ./nginx-mesh-config if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("nginx-mesh-config.log")
}

/// File for the JSON log layer; None keeps logging on stderr only.
///
/// An explicit path wins over the default log path.
pub fn log_file(explicit: Option<PathBuf>, use_default: bool) -> Option<PathBuf> {
    explicit.or_else(|| use_default.then(log_path))
}

/// Directory holding the OAM workload definitions.
pub fn workload_path(working_dir: &Path) -> PathBuf {
    working_dir.join("templates").join("oam").join("workloads")
}

/// Directory the generated mesh model components are written to.
pub fn mesh_model_path(working_dir: &Path) -> PathBuf {
    working_dir
        .join("templates")
        .join("meshmodel")
        .join("components")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("nginx-mesh-config")
}
