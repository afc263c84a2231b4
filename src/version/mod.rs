//! Chart version resolution layer
//!
//! This module finds the newest packaged chart in a remote source tree and
//! maps it to the application version it deploys.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ SourceTree  │────▶│  Resolver   │◀────│ ChartIndex  │
//! │  (listing)  │     │ (max + url) │     │ (appVersion)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │                   │
//!        ▼                   ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   GitHub    │     │   Dotted    │     │    Helm     │
//! │  contents   │     │  ordering   │     │ index.yaml  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`source`]: Trait for listing files of a remote source tree
//! - [`index`]: Trait for mapping chart versions to application versions
//! - [`clients`]: GitHub and Helm repository implementations
//! - [`resolver`]: Latest version selection and generation URL
//! - [`dotted`]: Dotted-numeric ordering of version tags
//! - [`error`]: Error types for remote sources and resolution

pub mod clients;
pub mod dotted;
pub mod error;
pub mod index;
pub mod resolver;
pub mod source;
