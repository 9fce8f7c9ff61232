use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use fantom_core::config::Config;

const APP_DIR: &str = "fantom";
const CONFIG_FILE: &str = "config.toml";
const DATA_DIR_ENV: &str = "FANTOM_DATA_DIR";

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Read `config.toml` if present; a missing file means defaults.
pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => Ok(Config::default()),
    }
}

pub fn load_config_from(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = fs::read_to_string(path)?;
    let config = toml::from_str::<Config>(&raw)
        .map_err(|err| format!("invalid config {}: {err}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

pub fn save_config_to(path: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string(config)?)?;
    tracing::debug!(path = %path.display(), "saved config");
    Ok(())
}

/// `FANTOM_DATA_DIR`, then the config file, then the platform data dir.
pub fn data_dir(config: &Config) -> PathBuf {
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|value| !value.is_empty()) {
        return PathBuf::from(dir);
    }
    if let Some(dir) = &config.data_dir {
        return dir.clone();
    }
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".fantom"))
}
