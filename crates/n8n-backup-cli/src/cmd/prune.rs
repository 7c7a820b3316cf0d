use n8n_backup_core::commands;
use n8n_backup_core::config::BackupConfig;

pub(crate) fn run_prune(
    config: &BackupConfig,
    keep: Option<usize>,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let max_backups = keep.unwrap_or(config.max_backups);

    if dry_run {
        for entry in commands::prune::plan(&config.backup_path, max_backups)? {
            let action = if entry.is_kept() { "keep" } else { "prune" };
            println!("{:<6} {}", action, entry.entry.name);
        }
        println!();
    }

    let stats = commands::prune::run(&config.backup_path, max_backups, dry_run)?;

    if dry_run {
        println!(
            "Dry run: would keep {} and remove {} backups",
            stats.kept,
            stats.removed_count(),
        );
    } else {
        println!(
            "Removed {} backups (kept {})",
            stats.removed_count(),
            stats.kept,
        );
    }

    Ok(())
}
