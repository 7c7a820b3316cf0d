use crate::commands;
use crate::commands::capture::CaptureOutcome;
use crate::commands::delete::DeleteStats;
use crate::commands::info::SnapshotInfo;
use crate::commands::list::ListEntry;
use crate::commands::prune::PruneStats;
use crate::commands::restore::RestoreStats;
use crate::config::BackupConfig;
use crate::error::Result;

/// Capture followed by the retention pass.
#[derive(Debug, Clone)]
pub struct BackupRunReport {
    pub capture: CaptureOutcome,
    /// `None` when pruning was skipped.
    pub prune: Option<PruneStats>,
}

/// Entry point for callers that hold one configuration, such as a deploy or
/// sync step that wants a safety snapshot before touching live state.
#[derive(Debug, Clone)]
pub struct BackupManager {
    config: BackupConfig,
}

impl BackupManager {
    pub fn new(config: BackupConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BackupConfig {
        &self.config
    }

    pub fn capture(&self) -> Result<CaptureOutcome> {
        commands::capture::run(&self.config)
    }

    /// Capture, then prune down to `max_backups`. Pruning only runs once the
    /// capture has fully succeeded.
    pub fn backup(&self, prune: bool) -> Result<BackupRunReport> {
        let capture = self.capture()?;
        let prune = if prune {
            Some(self.prune()?)
        } else {
            None
        };
        Ok(BackupRunReport { capture, prune })
    }

    pub fn prune(&self) -> Result<PruneStats> {
        commands::prune::run(&self.config.backup_path, self.config.max_backups, false)
    }

    pub fn list(&self) -> Result<Vec<ListEntry>> {
        commands::list::run(&self.config.backup_path)
    }

    pub fn restore(&self, name: &str) -> Result<RestoreStats> {
        commands::restore::run(&self.config, name)
    }

    pub fn info(&self, name: &str) -> Result<SnapshotInfo> {
        commands::info::run(&self.config.backup_path, name)
    }

    pub fn delete(&self, name: &str, dry_run: bool) -> Result<DeleteStats> {
        commands::delete::run(&self.config.backup_path, name, dry_run)
    }
}
