use crate::constants::{DEFAULT_BACKEND_URL, DEFAULT_TIMEOUT_SECS};
use crate::errors::{ParleyError, ParleyResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub backend_url: String,
    pub request_timeout_secs: u64,
    pub speech_command: Option<String>,
    pub voice_language: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            speech_command: None,
            voice_language: "en-US".to_string(),
            log_level: "info".to_string(),
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

pub fn initialize_config() -> ParleyResult<()> {
    let config_path = get_config_path()?;

    // If config exists, load it
    let mut config = if config_path.exists() {
        load_config_file(&config_path)?
    } else {
        let config = Config::default();

        fs::create_dir_all(config_path.parent().unwrap()).map_err(|e| {
            ParleyError::config_error(format!("Failed to create config directory: {}", e))
        })?;

        let config_str = serde_json::to_string_pretty(&config)
            .map_err(|e| ParleyError::config_error(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, config_str)
            .map_err(|e| ParleyError::config_error(format!("Failed to write config file: {}", e)))?;

        config
    };

    // The environment always wins over the file
    if let Ok(url) = env::var("PARLEY_BACKEND_URL") {
        config.backend_url = url;
    }

    validate_config(&config)?;

    *CONFIG.write().unwrap() = config;

    Ok(())
}

fn load_config_file(path: &Path) -> ParleyResult<Config> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| ParleyError::config_error(format!("Failed to read config file: {}", e)))?;

    serde_json::from_str(&config_str)
        .map_err(|e| ParleyError::config_error(format!("Failed to parse config: {}", e)))
}

fn get_config_path() -> ParleyResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ParleyError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("parley").join("config.json"))
}

fn validate_config(config: &Config) -> ParleyResult<()> {
    if config.backend_url.is_empty() {
        return Err(ParleyError::config_error("backend_url is required"));
    }

    if !config.backend_url.starts_with("http") {
        return Err(ParleyError::config_error(
            "backend_url must be an http(s) URL",
        ));
    }

    if config.request_timeout_secs == 0 {
        return Err(ParleyError::config_error(
            "request_timeout_secs must be greater than 0",
        ));
    }

    if config.log_level.is_empty() {
        return Err(ParleyError::config_error("log_level is required"));
    }

    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}
