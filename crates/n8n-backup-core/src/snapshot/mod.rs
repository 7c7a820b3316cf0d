pub mod metadata;

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

pub use self::metadata::{DirectoryFlags, SnapshotMetadata};

/// Prefix shared by every snapshot name in a store.
pub const SNAPSHOT_PREFIX: &str = "n8n-backup-";

/// Suffix of the compressed single-file representation.
pub const ARCHIVE_SUFFIX: &str = ".tar.gz";

/// Descriptor written at the root of every snapshot directory.
pub const METADATA_FILE: &str = "backup-metadata.json";

/// One of the three live directories a snapshot captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Workflows,
    Credentials,
    Data,
}

impl SourceKind {
    /// Capture and restore order.
    pub const ALL: [SourceKind; 3] = [
        SourceKind::Workflows,
        SourceKind::Credentials,
        SourceKind::Data,
    ];

    /// Subdirectory name inside a snapshot.
    pub fn dir_name(self) -> &'static str {
        match self {
            SourceKind::Workflows => "workflows",
            SourceKind::Credentials => "credentials",
            SourceKind::Data => "data",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// ISO 8601 form used in the metadata descriptor (UTC, milliseconds, `Z`).
pub fn iso_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Build the snapshot name for an instant: `n8n-backup-<timestamp>` with
/// every `:` and `.` replaced by `-`.
pub fn snapshot_name(time: DateTime<Utc>) -> String {
    let sanitized: String = iso_timestamp(time)
        .chars()
        .map(|c| if c == ':' || c == '.' { '-' } else { c })
        .collect();
    format!("{SNAPSHOT_PREFIX}{sanitized}")
}

/// Strip the archive suffix, if any, from a store entry file name.
pub fn base_name(entry_name: &str) -> &str {
    entry_name.strip_suffix(ARCHIVE_SUFFIX).unwrap_or(entry_name)
}

pub fn archive_file_name(snapshot_name: &str) -> String {
    format!("{snapshot_name}{ARCHIVE_SUFFIX}")
}
