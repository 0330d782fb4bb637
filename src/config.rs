use std::path::{Path, PathBuf};

use crate::models::Config;

const SAMPLE_CONFIG: &str = include_str!("../config.sample.toml");

/// Load and merge one or more config files. No files means defaults.
pub fn load_all(paths: &[PathBuf]) -> Config {
    let mut config = Config::default();

    for path in paths {
        log::info!("loading config: {}", path.display());
        match read_file(path) {
            Ok(c) => merge(&mut config, c),
            Err(e) => {
                log::error!("error loading config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    config
}

/// Generate sample config file.
pub fn generate_sample(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        return Err("config file already exists".into());
    }
    std::fs::write(path, SAMPLE_CONFIG)?;
    Ok(())
}

/// Load configuration from a given TOML file.
fn read_file(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&content)?;
    Ok(cfg)
}

/// Merge the given src config into the dest config struct.
fn merge(dest: &mut Config, src: Config) {
    if !src.app.preload.is_empty() {
        dest.app.preload = src.app.preload;
    }
    if !src.app.autosave.is_empty() {
        dest.app.autosave = src.app.autosave;
    }
    if src.app.max_results > 0 {
        dest.app.max_results = src.app.max_results;
    }
}
