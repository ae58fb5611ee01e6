use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "TASKDESK_CONFIG_PATH";
pub const API_URL_ENV_VAR: &str = "TASKDESK_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_base_url: Option<String>,
}

/// A config load never aborts the command: a broken file falls back to the
/// defaults and the error is carried alongside for the caller to report.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("taskdesk")
            .join(CONFIG_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("taskdesk")
            .join(CONFIG_FILE_NAME))
    }
}

pub fn load() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

pub fn load_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            return ConfigLoad {
                config: Config::default(),
                error: Some(AppError::io(err.to_string())),
            };
        }
    };

    match serde_json::from_str::<Config>(&content) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(AppError::invalid_data(err.to_string())),
        },
    }
}

/// Resolve the backend base URL. Precedence: command-line flag, then the
/// TASKDESK_API_URL environment value, then the config file, then the
/// default.
pub fn resolve_api_url(flag: Option<&str>, env_value: Option<&str>, config: &Config) -> String {
    for candidate in [flag, env_value, config.api_base_url.as_deref()] {
        if let Some(value) = candidate
            && !value.trim().is_empty()
        {
            return value.trim().to_string();
        }
    }
    DEFAULT_API_URL.to_string()
}
