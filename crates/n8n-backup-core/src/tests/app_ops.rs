use crate::app::BackupManager;
use crate::store::scan_store;

use super::helpers::{set_mtime, tree, write_file, Fixture};

#[test]
fn backup_captures_then_prunes() {
    let mut fx = Fixture::populated(true);
    fx.config.max_backups = 2;
    for t in 0..3 {
        fx.capture_at(t);
    }

    let manager = BackupManager::new(fx.config.clone());
    let report = manager.backup(true).unwrap();
    // The fresh capture carries the real clock, so it is the newest entry.
    let prune = report.prune.unwrap();
    assert_eq!(prune.kept, 2);
    assert_eq!(prune.removed_count(), 2);

    let remaining = scan_store(fx.store()).unwrap();
    assert_eq!(remaining.len(), 2);
    assert_eq!(remaining[0].path, report.capture.path);
}

#[test]
fn backup_without_prune_keeps_everything() {
    let mut fx = Fixture::populated(true);
    fx.config.max_backups = 1;
    fx.capture_at(0);

    let manager = BackupManager::new(fx.config.clone());
    let report = manager.backup(false).unwrap();
    assert!(report.prune.is_none());
    assert_eq!(scan_store(fx.store()).unwrap().len(), 2);
}

#[test]
fn manager_round_trip_through_latest() {
    let fx = Fixture::populated(false);
    let manager = BackupManager::new(fx.config.clone());
    let expected = tree(&fx.config.workflows_path);

    let outcome = manager.capture().unwrap();
    set_mtime(&outcome.path, 0);
    write_file(&fx.config.workflows_path.join("scratch.json"), b"{}");

    let listed = manager.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, outcome.snapshot_name);

    let info = manager.info("latest").unwrap();
    assert_eq!(info.entry.name, outcome.snapshot_name);

    manager.restore("latest").unwrap();
    assert_eq!(tree(&fx.config.workflows_path), expected);

    manager.delete(&outcome.snapshot_name, false).unwrap();
    assert!(manager.list().unwrap().is_empty());
}

#[cfg(unix)]
#[test]
fn failed_capture_skips_prune() {
    let mut fx = Fixture::populated(true);
    fx.config.max_backups = 1;
    let older = fx.capture_at(0);
    let newer = fx.capture_at(1);
    super::helpers::make_socket(&fx.config.data_path.join("n8n.sock"));

    let manager = BackupManager::new(fx.config.clone());
    assert!(manager.backup(true).is_err());

    assert!(older.path.exists());
    assert!(newer.path.exists());
}
