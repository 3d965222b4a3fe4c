//! Utilities: constants, configuration, unit formatting and URL helpers

pub mod config;
pub mod constants;
pub mod format;
pub mod url;

pub use config::DappConfig;
