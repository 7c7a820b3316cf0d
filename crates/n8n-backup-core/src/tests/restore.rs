use crate::commands::restore;
use crate::error::BackupError;
use crate::platform::fs::STAGING_SUFFIX;
use crate::snapshot::SourceKind;

use super::helpers::{store_names, tree, write_file, Fixture};

fn mutate_live(fx: &Fixture) {
    write_file(
        &fx.config.workflows_path.join("invoice-flow.json"),
        br#"{"name":"invoice","nodes":[]}"#,
    );
    write_file(&fx.config.workflows_path.join("added-later.json"), b"{}");
    std::fs::remove_file(fx.config.credentials_path.join("slack.json")).unwrap();
    std::fs::remove_dir_all(&fx.config.data_path).unwrap();
}

fn assert_no_staging_left(fx: &Fixture) {
    let live_root = fx.config.workflows_path.parent().unwrap();
    for entry in std::fs::read_dir(live_root).unwrap() {
        let name = entry.unwrap().file_name().to_string_lossy().into_owned();
        assert!(!name.ends_with(STAGING_SUFFIX), "leftover staging dir {name}");
    }
}

#[test]
fn directory_snapshot_round_trip() {
    let fx = Fixture::populated(false);
    let before = [
        tree(&fx.config.workflows_path),
        tree(&fx.config.credentials_path),
        tree(&fx.config.data_path),
    ];
    let outcome = fx.capture_at(0);
    mutate_live(&fx);

    let stats = restore::run(&fx.config, &outcome.snapshot_name).unwrap();
    assert!(!stats.extracted_from_archive);
    assert_eq!(stats.restored, SourceKind::ALL.to_vec());
    assert!(stats.skipped.is_empty());

    assert_eq!(tree(&fx.config.workflows_path), before[0]);
    assert_eq!(tree(&fx.config.credentials_path), before[1]);
    assert_eq!(tree(&fx.config.data_path), before[2]);
    assert_no_staging_left(&fx);
}

#[test]
fn archive_snapshot_round_trip() {
    let fx = Fixture::populated(true);
    let before = [
        tree(&fx.config.workflows_path),
        tree(&fx.config.credentials_path),
        tree(&fx.config.data_path),
    ];
    let outcome = fx.capture_at(0);
    mutate_live(&fx);

    let archive_name = format!("{}.tar.gz", outcome.snapshot_name);
    let stats = restore::run(&fx.config, &archive_name).unwrap();
    assert!(stats.extracted_from_archive);
    assert_eq!(stats.snapshot_name, archive_name);

    assert_eq!(tree(&fx.config.workflows_path), before[0]);
    assert_eq!(tree(&fx.config.credentials_path), before[1]);
    assert_eq!(tree(&fx.config.data_path), before[2]);
    assert_no_staging_left(&fx);
}

#[test]
fn archive_extraction_stays_next_to_the_archive() {
    let fx = Fixture::populated(true);
    let outcome = fx.capture_at(0);

    restore::run(&fx.config, &format!("{}.tar.gz", outcome.snapshot_name)).unwrap();
    assert_eq!(
        store_names(fx.store()),
        vec![
            outcome.snapshot_name.clone(),
            format!("{}.tar.gz", outcome.snapshot_name),
        ]
    );

    // A second restore replaces the earlier extraction.
    restore::run(&fx.config, &format!("{}.tar.gz", outcome.snapshot_name)).unwrap();
    assert_eq!(store_names(fx.store()).len(), 2);
}

#[test]
fn bare_name_falls_back_to_archive() {
    let fx = Fixture::populated(true);
    let outcome = fx.capture_at(0);

    let stats = restore::run(&fx.config, &outcome.snapshot_name).unwrap();
    assert!(stats.extracted_from_archive);
    assert_eq!(stats.snapshot_name, format!("{}.tar.gz", outcome.snapshot_name));
}

#[test]
fn latest_restores_newest_entry() {
    let fx = Fixture::populated(false);
    fx.capture_at(0);
    write_file(&fx.config.workflows_path.join("second.json"), b"2");
    let newest = fx.capture_at(1);
    std::fs::remove_file(fx.config.workflows_path.join("second.json")).unwrap();

    let stats = restore::run(&fx.config, "latest").unwrap();
    assert_eq!(stats.snapshot_name, newest.snapshot_name);
    assert!(fx.config.workflows_path.join("second.json").is_file());
}

#[test]
fn missing_snapshot_leaves_live_untouched() {
    let fx = Fixture::populated(false);
    fx.capture_at(0);
    let before = tree(&fx.config.workflows_path);

    let err = restore::run(&fx.config, "n8n-backup-does-not-exist").unwrap_err();
    assert!(matches!(err, BackupError::SnapshotNotFound(ref n) if n == "n8n-backup-does-not-exist"));
    assert_eq!(tree(&fx.config.workflows_path), before);
}

#[test]
fn latest_on_empty_store_is_not_found() {
    let fx = Fixture::populated(false);
    let err = restore::run(&fx.config, "latest").unwrap_err();
    assert!(matches!(err, BackupError::SnapshotNotFound(_)));
}

#[test]
fn path_like_names_are_rejected() {
    let fx = Fixture::populated(false);
    fx.capture_at(0);
    for name in ["..", ".", "", "../backups", "a/b"] {
        let err = restore::run(&fx.config, name).unwrap_err();
        assert!(matches!(err, BackupError::SnapshotNotFound(_)), "{name:?}");
    }
}

#[test]
fn directory_absent_from_snapshot_is_skipped() {
    let fx = Fixture::populated(false);
    std::fs::remove_dir_all(&fx.config.credentials_path).unwrap();
    let outcome = fx.capture_at(0);

    write_file(&fx.config.credentials_path.join("new-secret.json"), b"{}");
    let before = tree(&fx.config.credentials_path);

    let stats = restore::run(&fx.config, &outcome.snapshot_name).unwrap();
    assert_eq!(stats.skipped, vec![SourceKind::Credentials]);
    assert_eq!(
        stats.restored,
        vec![SourceKind::Workflows, SourceKind::Data]
    );
    assert_eq!(tree(&fx.config.credentials_path), before);
}

#[test]
fn restore_creates_missing_live_directories() {
    let fx = Fixture::populated(false);
    let expected = tree(&fx.config.data_path);
    let outcome = fx.capture_at(0);
    std::fs::remove_dir_all(fx.config.data_path.parent().unwrap()).unwrap();

    restore::run(&fx.config, &outcome.snapshot_name).unwrap();
    assert_eq!(tree(&fx.config.data_path), expected);
}

#[cfg(unix)]
#[test]
fn failed_directory_leaves_later_directories_untouched() {
    let fx = Fixture::populated(false);
    let snap_workflows = tree(&fx.config.workflows_path);
    let outcome = fx.capture_at(0);
    super::helpers::make_socket(&outcome.path.join("credentials/agent.sock"));

    mutate_live(&fx);
    write_file(&fx.config.data_path.join("current.db"), b"live");
    let credentials_before = tree(&fx.config.credentials_path);
    let data_before = tree(&fx.config.data_path);

    assert!(restore::run(&fx.config, &outcome.snapshot_name).is_err());

    assert_eq!(tree(&fx.config.workflows_path), snap_workflows);
    assert_eq!(tree(&fx.config.credentials_path), credentials_before);
    assert_eq!(tree(&fx.config.data_path), data_before);
    assert_no_staging_left(&fx);
}

#[test]
fn store_inside_a_live_directory_survives_restore() {
    for compress in [false, true] {
        let mut fx = Fixture::populated(compress);
        let live_data = tree(&fx.config.data_path);
        fx.config.backup_path = fx.config.data_path.join("backups");

        let older = fx.capture_at(0);
        let newer = fx.capture_at(1);
        write_file(&fx.config.data_path.join("database.sqlite"), b"corrupted");

        restore::run(&fx.config, &older.snapshot_name).unwrap();

        assert_eq!(
            std::fs::read(fx.config.data_path.join("database.sqlite")).unwrap(),
            vec![0u8, 1, 2, 255, 254]
        );
        assert!(older.path.exists());
        assert!(newer.path.exists());

        let mut restored = tree(&fx.config.data_path);
        restored.retain(|path, _| !path.starts_with("backups"));
        assert_eq!(restored, live_data);
        assert_no_staging_left(&fx);
    }
}
