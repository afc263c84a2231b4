//! Remote clients for the source tree listing and the chart index

pub mod github;
pub mod helm;

pub use github::GitHubTree;
pub use helm::HelmRepository;
