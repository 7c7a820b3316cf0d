use std::path::{Path, PathBuf};

use n8n_backup_core::config;

/// Write the starter config to `dest`, or to the project-level location
/// (`./n8n-backup.yaml`) when no destination is given.
pub(crate) fn run_config_generate(dest: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let path = match dest {
        Some(d) => config::expand_tilde(d),
        None => default_destination()?,
    };
    write_template(&path)?;
    println!("Config written to: {}", path.display());
    println!("Edit it to point at your n8n directories and backup location.");
    Ok(())
}

fn default_destination() -> Result<PathBuf, Box<dyn std::error::Error>> {
    config::default_config_search_paths()
        .into_iter()
        .next()
        .map(|(path, _level)| path)
        .ok_or_else(|| "no default config location available".into())
}

fn write_template(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        return Err(format!("file already exists: {}", path.display()).into());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, config::minimal_config_template())?;
    Ok(())
}
