use n8n_backup_core::config::BackupConfig;
use n8n_backup_core::BackupManager;

use crate::format::format_bytes;

pub(crate) fn run_restore(
    config: &BackupConfig,
    snapshot_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let stats = BackupManager::new(config.clone()).restore(snapshot_name)?;

    for kind in &stats.skipped {
        eprintln!("Warning: {kind} not present in backup, left unchanged");
    }

    println!("Restored from: {}", stats.snapshot_name);
    println!(
        "  {} files, {} dirs, {} symlinks ({})",
        stats.stats.files,
        stats.stats.dirs,
        stats.stats.symlinks,
        format_bytes(stats.stats.total_bytes),
    );

    Ok(())
}
