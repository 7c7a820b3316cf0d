use crate::config::{self, BackupConfig, ConfigSource};
use crate::error::Result;

pub mod operations;

pub use self::operations::{BackupManager, BackupRunReport};

/// Effective configuration plus where it came from.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// `None` when no config file was found and the defaults apply.
    pub source: Option<ConfigSource>,
    pub config: BackupConfig,
}

pub fn load_runtime_config(config_path: Option<&str>) -> Result<RuntimeConfig> {
    let source = config::resolve_config_path(config_path);
    let config = config::load_or_default(source.as_ref())?;
    Ok(RuntimeConfig { source, config })
}
