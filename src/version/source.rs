//! Source tree trait for listing packaged chart archives

#[cfg(test)]
use mockall::automock;

use crate::version::error::SourceError;

/// Branch and directory of a hosted repository to list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLocation {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub root: String,
}

/// A file found in the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub name: String,
}

/// Trait for listing the files of a remote source tree
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait SourceTree: Send + Sync {
    /// Lists the files directly under `location.root`
    ///
    /// # Returns
    /// * `Ok(Vec<TreeEntry>)` - File entries; directories are not included
    /// * `Err(SourceError)` - If the listing cannot be retrieved
    async fn list_entries(&self, location: &TreeLocation) -> Result<Vec<TreeEntry>, SourceError>;
}
