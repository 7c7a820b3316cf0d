use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::types::BackupConfig;
use super::util::expand_tilde;
use crate::error::{BackupError, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "N8N_BACKUP_CONFIG";

/// On-disk YAML layout. Every key is optional and falls back to the
/// built-in default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigDocument {
    #[serde(default)]
    backup_path: Option<String>,
    /// Signed so that negative values produce a readable error instead of a
    /// generic type mismatch.
    #[serde(default)]
    max_backups: Option<i64>,
    #[serde(default)]
    compress_backups: Option<bool>,
    #[serde(default)]
    sources: SourcesDocument,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SourcesDocument {
    #[serde(default)]
    workflows: Option<String>,
    #[serde(default)]
    credentials: Option<String>,
    #[serde(default)]
    data: Option<String>,
}

impl ConfigDocument {
    fn into_config(self, path: &Path) -> Result<BackupConfig> {
        let mut config = BackupConfig::default();

        if let Some(p) = self.backup_path {
            config.backup_path = non_empty_path(&p, "backup_path", path)?;
        }
        if let Some(p) = self.sources.workflows {
            config.workflows_path = non_empty_path(&p, "sources.workflows", path)?;
        }
        if let Some(p) = self.sources.credentials {
            config.credentials_path = non_empty_path(&p, "sources.credentials", path)?;
        }
        if let Some(p) = self.sources.data {
            config.data_path = non_empty_path(&p, "sources.data", path)?;
        }
        if let Some(n) = self.max_backups {
            config.max_backups = usize::try_from(n).map_err(|_| {
                BackupError::Config(format!(
                    "invalid config '{}': max_backups must be zero or greater (got {n})",
                    path.display()
                ))
            })?;
        }
        if let Some(c) = self.compress_backups {
            config.compress_backups = c;
        }

        Ok(config)
    }
}

fn non_empty_path(raw: &str, key: &str, path: &Path) -> Result<PathBuf> {
    if raw.trim().is_empty() {
        return Err(BackupError::ConfigMissing(format!(
            "'{key}' is empty in '{}'",
            path.display()
        )));
    }
    Ok(expand_tilde(raw))
}

/// Parse config text. `path` is only used in error messages.
pub fn parse_config(text: &str, path: &Path) -> Result<BackupConfig> {
    let expanded = expand_env_placeholders(text, path)?;

    let is_blank = expanded
        .lines()
        .all(|line| line.trim().is_empty() || line.trim_start().starts_with('#'));
    if is_blank {
        return Ok(BackupConfig::default());
    }

    let doc: ConfigDocument = serde_yaml::from_str(&expanded).map_err(|e| {
        BackupError::Config(format!("invalid config '{}': {e}", path.display()))
    })?;
    doc.into_config(path)
}

/// Load and parse a config file.
pub fn load_config(path: &Path) -> Result<BackupConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        BackupError::Config(format!("cannot read '{}': {e}", path.display()))
    })?;
    parse_config(&contents, path)
}

/// Load the resolved config file, or the built-in defaults when there is none.
pub fn load_or_default(source: Option<&ConfigSource>) -> Result<BackupConfig> {
    match source {
        Some(source) => load_config(source.path()),
        None => Ok(BackupConfig::default()),
    }
}

/// Expand `${VAR}` and `${VAR:-default}` placeholders in raw config text.
fn expand_env_placeholders(input: &str, path: &Path) -> Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut cursor = 0usize;

    while let Some(offset) = input[cursor..].find("${") {
        let start = cursor + offset;
        out.push_str(&input[cursor..start]);

        let token_start = start + 2;
        let Some(token_end_rel) = input[token_start..].find('}') else {
            return Err(placeholder_error(
                path,
                input,
                start,
                "unterminated environment placeholder",
            ));
        };
        let token_end = token_start + token_end_rel;
        let token = &input[token_start..token_end];
        out.push_str(&resolve_env_token(token, path, input, start)?);
        cursor = token_end + 1;
    }

    out.push_str(&input[cursor..]);
    Ok(out)
}

fn resolve_env_token(token: &str, path: &Path, input: &str, start: usize) -> Result<String> {
    let (name, default) = match token.find(":-") {
        Some(split_at) => (&token[..split_at], Some(&token[split_at + 2..])),
        None => (token, None),
    };

    if !is_valid_env_var_name(name) {
        return Err(placeholder_error(
            path,
            input,
            start,
            format!("invalid environment variable name '{name}'"),
        ));
    }

    match (std::env::var(name), default) {
        (Ok(value), Some(default)) if value.is_empty() => Ok(default.to_string()),
        (Ok(value), _) => Ok(value),
        (Err(std::env::VarError::NotPresent), Some(default)) => Ok(default.to_string()),
        (Err(std::env::VarError::NotPresent), None) => {
            let (line, column) = byte_offset_to_line_col(input, start);
            Err(BackupError::ConfigMissing(format!(
                "environment variable '{name}' is not set (referenced in '{}' at line {line}, column {column})",
                path.display()
            )))
        }
        (Err(std::env::VarError::NotUnicode(_)), _) => Err(placeholder_error(
            path,
            input,
            start,
            format!("environment variable '{name}' is not valid UTF-8"),
        )),
    }
}

fn is_valid_env_var_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first == '_' || first.is_ascii_alphabetic()) {
        return false;
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

fn placeholder_error(
    path: &Path,
    input: &str,
    start: usize,
    message: impl fmt::Display,
) -> BackupError {
    let (line, column) = byte_offset_to_line_col(input, start);
    BackupError::Config(format!(
        "invalid config '{}': {message} at line {line}, column {column}",
        path.display()
    ))
}

fn byte_offset_to_line_col(input: &str, byte_offset: usize) -> (usize, usize) {
    let mut line = 1usize;
    let mut column = 1usize;
    for ch in input[..byte_offset].chars() {
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

// --- Config resolution ---

/// Tracks where the config file was found.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Explicitly passed via `--config`.
    CliArg(PathBuf),
    /// Set via the `N8N_BACKUP_CONFIG` env var.
    EnvVar(PathBuf),
    /// Found by searching standard locations.
    SearchOrder { path: PathBuf, level: &'static str },
}

impl ConfigSource {
    pub fn path(&self) -> &Path {
        match self {
            ConfigSource::CliArg(p) => p,
            ConfigSource::EnvVar(p) => p,
            ConfigSource::SearchOrder { path, .. } => path,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::CliArg(p) => write!(f, "{} (--config)", p.display()),
            ConfigSource::EnvVar(p) => write!(f, "{} ({CONFIG_ENV_VAR})", p.display()),
            ConfigSource::SearchOrder { path, level } => {
                write!(f, "{} ({})", path.display(), level)
            }
        }
    }
}

/// Returns search locations in priority order: project, user, system.
pub fn default_config_search_paths() -> Vec<(PathBuf, &'static str)> {
    let mut paths = vec![(PathBuf::from("n8n-backup.yaml"), "project")];

    #[cfg(windows)]
    let user_config = dirs::config_dir().map(|base| base.join("n8n-backup").join("config.yaml"));

    #[cfg(not(windows))]
    let user_config = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .map(|base| base.join("n8n-backup").join("config.yaml"));

    if let Some(p) = user_config {
        paths.push((p, "user"));
    }

    #[cfg(windows)]
    {
        let program_data = std::env::var_os("PROGRAMDATA")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(r"C:\ProgramData"));
        paths.push((program_data.join("n8n-backup").join("config.yaml"), "system"));
    }

    #[cfg(not(windows))]
    {
        paths.push((PathBuf::from("/etc/n8n-backup/config.yaml"), "system"));
    }

    paths
}

/// Resolve which config file to use.
///
/// Priority: CLI arg > `N8N_BACKUP_CONFIG` env var > first existing file from
/// search paths. Returns `None` if nothing is found, in which case the
/// built-in defaults apply.
pub fn resolve_config_path(cli_config: Option<&str>) -> Option<ConfigSource> {
    if let Some(path) = cli_config {
        return Some(ConfigSource::CliArg(PathBuf::from(path)));
    }

    if let Ok(val) = std::env::var(CONFIG_ENV_VAR) {
        if !val.is_empty() {
            return Some(ConfigSource::EnvVar(PathBuf::from(val)));
        }
    }

    default_config_search_paths()
        .into_iter()
        .find(|(path, _)| path.exists())
        .map(|(path, level)| ConfigSource::SearchOrder { path, level })
}

/// Returns a starter YAML config listing every key with its default.
pub fn minimal_config_template() -> &'static str {
    r#"# n8n-backup configuration file
# Every key is optional; the values below are the built-in defaults.

backup_path: ./backups

# Number of newest backups kept after each run (0 removes all).
max_backups: 10

# Store each backup as <name>.tar.gz instead of a plain directory.
compress_backups: true

sources:
  workflows: ./workflows
  credentials: ./credentials
  data: ./data
"#
}
