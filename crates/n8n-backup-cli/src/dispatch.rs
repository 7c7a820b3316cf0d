use n8n_backup_core::config::BackupConfig;

use crate::cli::Commands;
use crate::cmd;

/// Capture followed by the retention pass, the action taken without a
/// subcommand.
pub(crate) fn run_default_actions(cfg: &BackupConfig) -> Result<(), Box<dyn std::error::Error>> {
    cmd::backup::run_backup(cfg, false, false)
}

pub(crate) fn dispatch_command(
    command: &Commands,
    cfg: &BackupConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Backup {
            no_compress,
            no_prune,
        } => cmd::backup::run_backup(cfg, *no_compress, *no_prune),
        Commands::List { last } => cmd::list::run_list(cfg, *last),
        Commands::Restore { snapshot } => cmd::restore::run_restore(cfg, snapshot),
        Commands::Prune { keep, dry_run } => cmd::prune::run_prune(cfg, *keep, *dry_run),
        Commands::Info { snapshot } => cmd::info::run_info(cfg, snapshot),
        Commands::Delete { snapshot, dry_run } => {
            cmd::delete::run_delete(cfg, snapshot, *dry_run)
        }
        Commands::Config { .. } => {
            Err("'config' command should be handled before config resolution".into())
        }
    }
}
