use comfy_table::Cell;

use n8n_backup_core::config::BackupConfig;
use n8n_backup_core::BackupManager;

use crate::format::format_bytes;
use crate::table::TableStyle;

pub(crate) fn run_list(
    config: &BackupConfig,
    last: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut entries = BackupManager::new(config.clone()).list()?;

    // Newest first, so the N most recent are the head.
    if let Some(n) = last {
        entries.truncate(n);
    }
    if entries.is_empty() {
        println!("No backups found.");
        return Ok(());
    }

    let mut table = TableStyle::for_stdout().with_header(&["Name", "Type", "Size", "Date"]);

    for entry in &entries {
        table.add_row(vec![
            Cell::new(entry.name.clone()),
            Cell::new(entry.kind.as_str()),
            Cell::new(format_bytes(entry.size_bytes)),
            Cell::new(entry.modified_at.format("%Y-%m-%d %H:%M:%S").to_string()),
        ]);
    }
    println!("{table}");

    Ok(())
}
