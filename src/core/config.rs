// src/core/config.rs
use std::env;
use std::path::PathBuf;

use log::LevelFilter;

use crate::models::PasswordSpec;

// Configuration for the toolbox
#[derive(Debug, Clone)]
pub struct Config {
    // Storage
    pub data_dir: PathBuf,

    // Password Generation
    pub default_password_length: usize,

    // Time Conversion
    pub default_timezone: String,

    // Web Interface
    pub web_port: u16,
    pub web_address: String,

    // Logging
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Storage
            data_dir: PathBuf::from("./data"),

            // Password Generation
            default_password_length: PasswordSpec::default().length,

            // Time Conversion
            default_timezone: "UTC".to_string(),

            // Web Interface
            web_port: 5000,
            web_address: "127.0.0.1".to_string(),

            // Logging
            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables. Returns the config
    /// along with warnings raised before the logger exists.
    pub fn load() -> (Self, Vec<String>) {
        Self::load_from(|key| env::var(key).ok())
    }

    pub fn load_from(var: impl Fn(&str) -> Option<String>) -> (Self, Vec<String>) {
        let mut config = Config::default();
        let mut warnings = Vec::new();

        // Storage
        match var("TOOLBOX_DATA_DIR") {
            Some(dir) => config.data_dir = PathBuf::from(dir),
            None => match crate::utils::get_app_data_dir() {
                Some(dir) => config.data_dir = dir,
                None => warnings.push(format!(
                    "Could not determine data directory, using {}",
                    config.data_dir.display()
                )),
            },
        }

        // Password Generation
        if let Some(val) = var("DEFAULT_PASSWORD_LENGTH") {
            match val.parse::<usize>() {
                Ok(length) => {
                    config.default_password_length =
                        length.clamp(PasswordSpec::MIN_LENGTH, PasswordSpec::MAX_LENGTH)
                }
                Err(_) => warnings.push(format!("Ignoring DEFAULT_PASSWORD_LENGTH '{}'", val)),
            }
        }

        // Time Conversion
        if let Some(zone) = var("DEFAULT_TIMEZONE") {
            if crate::tools::time::zone_offset(&zone).is_ok() {
                config.default_timezone = zone;
            } else {
                warnings.push(format!(
                    "Unknown timezone '{}', using {}",
                    zone, config.default_timezone
                ));
            }
        }

        // Web Interface
        if let Some(val) = var("WEB_PORT") {
            match val.parse() {
                Ok(port) => config.web_port = port,
                Err(_) => warnings.push(format!("Ignoring WEB_PORT '{}'", val)),
            }
        }

        if let Some(address) = var("WEB_ADDRESS") {
            config.web_address = address;
        }

        // Logging
        if let Some(level) = var("LOG_LEVEL") {
            match parse_level(&level) {
                Some(filter) => config.log_level = filter,
                None => warnings.push(format!("Unknown LOG_LEVEL '{}'", level)),
            }
        }

        if let Some(file) = var("LOG_FILE") {
            if !file.trim().is_empty() {
                config.log_file = Some(PathBuf::from(file));
            }
        }

        (config, warnings)
    }

    /// Creates the data and log directories, returning a warning for each
    /// one that could not be created.
    pub fn ensure_directories_exist(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.data_dir.exists() {
            if let Err(e) = std::fs::create_dir_all(&self.data_dir) {
                warnings.push(format!("Failed to create data directory: {}", e));
            }
        }

        if let Some(parent) = self.log_file.as_ref().and_then(|f| f.parent()) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    warnings.push(format!("Failed to create log directory: {}", e));
                }
            }
        }

        warnings
    }
}

pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.to_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}
