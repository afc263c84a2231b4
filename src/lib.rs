pub mod adapter;
pub mod config;
pub mod defaults;
pub mod logging;
pub mod version;
