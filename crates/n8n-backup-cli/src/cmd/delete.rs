use n8n_backup_core::config::BackupConfig;
use n8n_backup_core::BackupManager;

pub(crate) fn run_delete(
    config: &BackupConfig,
    snapshot_name: &str,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let stats = BackupManager::new(config.clone()).delete(snapshot_name, dry_run)?;

    if dry_run {
        println!(
            "Dry run: would delete {} '{}'",
            stats.kind.as_str(),
            stats.name
        );
    } else {
        println!("Deleted {} '{}'", stats.kind.as_str(), stats.name);
    }

    Ok(())
}
