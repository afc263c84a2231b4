//! Adapter registration data
//!
//! - catalog.rs: Catalog metadata, mesh name and generation method
//! - manifests.rs: CRD extraction paths and manifest splitting

pub mod catalog;
pub mod manifests;

pub use catalog::{GenerationMethod, MeshModelConfig, mesh_model_config};
pub use manifests::{CrdComponent, CrdFilter, ExtractorPaths, ManifestConfig, ManifestError};
