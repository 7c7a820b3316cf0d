pub(super) const DEFAULT_WORKFLOWS_PATH: &str = "./workflows";
pub(super) const DEFAULT_CREDENTIALS_PATH: &str = "./credentials";
pub(super) const DEFAULT_DATA_PATH: &str = "./data";
pub(super) const DEFAULT_BACKUP_PATH: &str = "./backups";
pub(super) const DEFAULT_MAX_BACKUPS: usize = 10;
pub(super) const DEFAULT_COMPRESS_BACKUPS: bool = true;
