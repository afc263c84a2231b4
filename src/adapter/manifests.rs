//! CRD extraction configuration for NGINX Service Mesh manifests

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::adapter::catalog::SERVICE_MESH_NAME;

/// Separator between documents of a multi-document manifest
const DOCUMENT_SEPARATOR: &str = "---";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to parse manifest document {index}: {message}")]
    Parse { index: usize, message: String },
}

/// Field paths used to pull component metadata out of a CRD document.
///
/// Paths are dot separated keys; a key may carry `[n]` to index into a list,
/// e.g. `spec.versions[0].name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorPaths {
    pub name_path: String,
    pub id_path: String,
    pub version_path: String,
    pub group_path: String,
    pub spec_path: String,
}

impl Default for ExtractorPaths {
    fn default() -> Self {
        Self {
            name_path: "spec.names.kind".to_string(),
            id_path: "spec.names.kind".to_string(),
            version_path: "spec.versions[0].name".to_string(),
            group_path: "spec.group".to_string(),
            spec_path: "spec.versions[0].schema.openAPIV3Schema.properties.spec".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrdFilter {
    pub paths: ExtractorPaths,
    /// Documents are JSON rather than YAML
    pub is_json: bool,
}

impl CrdFilter {
    pub fn new(paths: ExtractorPaths, is_json: bool) -> Self {
        Self { paths, is_json }
    }

    fn parse(&self, document: &str) -> Result<Value, String> {
        if self.is_json {
            serde_json::from_str(document).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(document).map_err(|e| e.to_string())
        }
    }

    /// Extracts the component described by a parsed document.
    ///
    /// Returns None when the name, version or group is missing.
    pub fn extract(&self, document: &Value) -> Option<CrdComponent> {
        let name = lookup_str(document, &self.paths.name_path)?;
        let version = lookup_str(document, &self.paths.version_path)?;
        let group = lookup_str(document, &self.paths.group_path)?;
        let id = lookup_str(document, &self.paths.id_path).unwrap_or_else(|| name.clone());
        let schema = lookup(document, &self.paths.spec_path)
            .cloned()
            .unwrap_or(Value::Null);

        Some(CrdComponent {
            name,
            id,
            version,
            group,
            schema,
        })
    }
}

/// Structural metadata of one custom resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrdComponent {
    pub name: String,
    pub id: String,
    pub version: String,
    pub group: String,
    pub schema: Value,
}

/// Configuration for generating components from the mesh manifests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestConfig {
    pub name: String,
    pub mesh_version: Option<String>,
    pub crd_filter: CrdFilter,
}

impl ManifestConfig {
    pub fn new(mesh_version: Option<String>) -> Self {
        Self {
            name: SERVICE_MESH_NAME.to_string(),
            mesh_version,
            crd_filter: CrdFilter::new(ExtractorPaths::default(), false),
        }
    }

    /// Splits a multi-document manifest into its documents.
    pub fn extract_crds<'a>(&self, manifest: &'a str) -> Vec<&'a str> {
        manifest.split(DOCUMENT_SEPARATOR).collect()
    }

    /// Extracts a component from every CRD document in the manifest.
    pub fn components(&self, manifest: &str) -> Result<Vec<CrdComponent>, ManifestError> {
        let mut components = Vec::new();

        for (index, document) in self.extract_crds(manifest).into_iter().enumerate() {
            if is_blank(document) {
                continue;
            }

            let value = self
                .crd_filter
                .parse(document)
                .map_err(|message| ManifestError::Parse { index, message })?;

            if value.is_null() {
                continue;
            }

            match self.crd_filter.extract(&value) {
                Some(component) => components.push(component),
                None => debug!("Skipping document {}: not a CRD", index),
            }
        }

        Ok(components)
    }
}

/// Empty or comment-only documents carry nothing to extract.
fn is_blank(document: &str) -> bool {
    document.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

fn lookup_str(value: &Value, path: &str) -> Option<String> {
    lookup(value, path)?.as_str().map(str::to_string)
}

fn lookup<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.').try_fold(value, |current, segment| {
        let (key, indices) = parse_segment(segment)?;
        let mut node = if key.is_empty() {
            current
        } else {
            current.get(key)?
        };
        for index in indices {
            node = node.get(index)?;
        }
        Some(node)
    })
}

/// Splits `versions[0]` into the key and its list indices.
fn parse_segment(segment: &str) -> Option<(&str, Vec<usize>)> {
    let (key, mut rest) = match segment.find('[') {
        Some(start) => segment.split_at(start),
        None => (segment, ""),
    };

    let mut indices = Vec::new();
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[')?;
        let end = inner.find(']')?;
        indices.push(inner[..end].parse().ok()?);
        rest = &inner[end + 1..];
    }

    Some((key, indices))
}
