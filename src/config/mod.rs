mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    expand_disk_roots(&mut config);

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./fileforge.toml",
        "~/.config/fileforge/config.toml",
        "/etc/fileforge/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

fn expand_disk_roots(config: &mut Config) {
    for disk in &mut config.disks {
        if let Some(root) = disk.root.to_str() {
            disk.root = PathBuf::from(shellexpand::tilde(root).as_ref());
        }
    }
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.disks.is_empty() {
        anyhow::bail!("At least one disk must be configured");
    }

    let mut names = HashSet::new();
    for disk in &config.disks {
        if disk.name.is_empty() {
            anyhow::bail!("Disk name cannot be empty");
        }
        if !names.insert(disk.name.as_str()) {
            anyhow::bail!("Disk '{}' is configured more than once", disk.name);
        }
        if !disk.root.exists() {
            tracing::warn!("Disk '{}' root does not exist yet: {:?}", disk.name, disk.root);
        }
    }

    if !names.contains(config.default_disk.as_str()) {
        anyhow::bail!(
            "Default disk '{}' is not a configured disk",
            config.default_disk
        );
    }

    if !(1..=100).contains(&config.images.jpeg_quality) {
        anyhow::bail!(
            "JPEG quality must be between 1 and 100, got {}",
            config.images.jpeg_quality
        );
    }

    Ok(())
}
