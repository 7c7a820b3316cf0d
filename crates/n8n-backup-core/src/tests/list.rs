use crate::commands::list;
use crate::store::EntryKind;

use super::helpers::{instant, Fixture};

#[test]
fn lists_newest_first_with_kinds() {
    let mut fx = Fixture::populated(false);
    let dir = fx.capture_at(0);
    fx.config.compress_backups = true;
    let archive = fx.capture_at(60);

    let entries = list::run(fx.store()).unwrap();
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0].name, format!("{}.tar.gz", archive.snapshot_name));
    assert_eq!(entries[0].kind, EntryKind::Archive);
    assert_eq!(entries[0].modified_at, instant(60));

    assert_eq!(entries[1].name, dir.snapshot_name);
    assert_eq!(entries[1].kind, EntryKind::Directory);
    assert_eq!(entries[1].modified_at, instant(0));
}

#[test]
fn sizes_match_archive_file_and_directory_contents() {
    let mut fx = Fixture::populated(false);
    let dir = fx.capture_at(0);
    fx.config.compress_backups = true;
    let archive = fx.capture_at(1);

    let entries = list::run(fx.store()).unwrap();
    let archive_len = std::fs::metadata(&archive.path).unwrap().len();
    assert_eq!(entries[0].size_bytes, archive_len);

    let metadata_len = std::fs::metadata(dir.path.join("backup-metadata.json"))
        .unwrap()
        .len();
    assert_eq!(entries[1].size_bytes, dir.stats.total_bytes + metadata_len);
}

#[test]
fn missing_store_lists_nothing() {
    let fx = Fixture::empty(true);
    assert!(list::run(fx.store()).unwrap().is_empty());
}
