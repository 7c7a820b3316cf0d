use n8n_backup_core::config::BackupConfig;
use n8n_backup_core::BackupManager;

use crate::format::format_bytes;

pub(crate) fn run_backup(
    config: &BackupConfig,
    no_compress: bool,
    no_prune: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = if no_compress && config.compress_backups {
        let mut cfg = config.clone();
        cfg.compress_backups = false;
        cfg
    } else {
        config.clone()
    };

    let manager = BackupManager::new(config);
    let report = manager.backup(!no_prune)?;
    let capture = &report.capture;

    for kind in &capture.missing_sources {
        eprintln!(
            "Warning: {kind} directory not found: {}",
            manager.config().source_path(*kind).display()
        );
    }

    println!("Backup created: {}", capture.path.display());
    println!(
        "  {} files, {} dirs, {} symlinks ({})",
        capture.stats.files,
        capture.stats.dirs,
        capture.stats.symlinks,
        format_bytes(capture.stats.total_bytes),
    );

    if let Some(prune) = &report.prune {
        if prune.removed_count() > 0 {
            println!(
                "Removed {} old backups (kept {})",
                prune.removed_count(),
                prune.kept
            );
        }
    }

    Ok(())
}
