use n8n_backup_core::config::BackupConfig;
use n8n_backup_core::snapshot::SourceKind;
use n8n_backup_core::BackupManager;

use crate::format::format_bytes;
use crate::table::TableStyle;

pub(crate) fn run_info(
    config: &BackupConfig,
    snapshot_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let info = BackupManager::new(config.clone()).info(snapshot_name)?;
    let style = TableStyle::for_stdout();

    let entry = &info.entry;
    let stored = style.fields(&[
        ("Name", entry.name.clone()),
        ("Type", entry.kind.as_str().to_string()),
        ("Size", format_bytes(entry.size_bytes)),
        (
            "Modified",
            entry.modified_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ),
    ]);
    println!("{stored}");
    println!();

    let meta = &info.metadata;
    let mut rows = vec![
        ("Timestamp", meta.timestamp.clone()),
        ("Version", meta.version.clone()),
        ("Source", meta.source.clone()),
    ];
    for kind in SourceKind::ALL {
        let present = if meta.directories.get(kind) { "yes" } else { "no" };
        rows.push((kind.dir_name(), present.to_string()));
    }
    println!("{}", style.fields(&rows));
    Ok(())
}
