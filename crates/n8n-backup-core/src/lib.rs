pub mod app;
pub mod archive;
pub mod commands;
pub mod config;
pub mod error;
pub mod platform;
pub mod prune;
pub mod snapshot;
pub mod store;

pub use app::BackupManager;
pub use config::BackupConfig;
pub use error::{BackupError, Result};

#[cfg(test)]
mod tests;
