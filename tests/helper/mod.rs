//! Test helpers for resolution against local mock servers

mod servers;

pub use servers::*;
