use crate::constants::{
    AGENT_NAME, DEFAULT_BASE_URL, DEFAULT_QUICK_QUESTIONS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_STATS_INTERVAL_SECS, MAX_QUICK_QUESTIONS,
};
use crate::errors::{CopilotoError, CopilotoResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::RwLock,
    time::Duration,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub agent_name: String,
    pub stats_interval_secs: u64,
    /// 0 disables the timeout.
    pub request_timeout_secs: u64,
    pub quick_questions: Vec<String>,
    pub log_level: String,
    pub log_directory: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            agent_name: AGENT_NAME.to_string(),
            stats_interval_secs: DEFAULT_STATS_INTERVAL_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            quick_questions: DEFAULT_QUICK_QUESTIONS.iter().map(|q| q.to_string()).collect(),
            log_level: "info".to_string(),
            log_directory: default_log_directory(),
        }
    }
}

impl Config {
    pub fn stats_interval(&self) -> Duration {
        Duration::from_secs(self.stats_interval_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

/// Loads the user config (creating it with defaults on first run), applies
/// `.env` / environment overrides and installs it as the global config.
pub fn initialize_config() -> CopilotoResult<()> {
    dotenv::dotenv().ok();

    let config_path = get_config_path()?;
    let mut config = load_or_create(&config_path)?;
    apply_overrides(
        &mut config,
        env::var("COPILOTO_BASE_URL").ok(),
        env::var("COPILOTO_LOG_LEVEL").ok(),
    );
    validate_config(&config)?;

    *CONFIG.write().unwrap_or_else(|e| e.into_inner()) = config;
    Ok(())
}

fn get_config_path() -> CopilotoResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| CopilotoError::config_error("Could not determine config directory"))?;

    Ok(config_dir.join("copiloto").join("config.json"))
}

fn default_log_directory() -> String {
    dirs::data_local_dir()
        .map(|dir| dir.join("copiloto").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
        .to_string_lossy()
        .into_owned()
}

pub fn load_or_create(config_path: &Path) -> CopilotoResult<Config> {
    if config_path.exists() {
        let config_str = fs::read_to_string(config_path).map_err(|e| {
            CopilotoError::config_error(format!("Failed to read config file: {}", e))
        })?;

        let config: Config = serde_json::from_str(&config_str)
            .map_err(|e| CopilotoError::config_error(format!("Failed to parse config: {}", e)))?;

        return Ok(config);
    }

    let config = Config::default();

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CopilotoError::config_error(format!("Failed to create config directory: {}", e))
        })?;
    }

    let config_str = serde_json::to_string_pretty(&config)
        .map_err(|e| CopilotoError::config_error(format!("Failed to serialize config: {}", e)))?;

    fs::write(config_path, config_str)
        .map_err(|e| CopilotoError::config_error(format!("Failed to write config file: {}", e)))?;

    Ok(config)
}

pub fn apply_overrides(config: &mut Config, base_url: Option<String>, log_level: Option<String>) {
    if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
        config.base_url = url.trim().to_string();
    }
    if let Some(level) = log_level.filter(|l| !l.trim().is_empty()) {
        config.log_level = level.trim().to_string();
    }
}

pub fn validate_config(config: &Config) -> CopilotoResult<()> {
    let url = config.base_url.trim();
    if url.is_empty() {
        return Err(CopilotoError::config_error("base_url is required"));
    }

    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(CopilotoError::config_error(
            "base_url must start with http:// or https://",
        ));
    }

    if config.stats_interval_secs == 0 {
        return Err(CopilotoError::config_error(
            "stats_interval_secs must be greater than 0",
        ));
    }

    if config.quick_questions.len() > MAX_QUICK_QUESTIONS {
        return Err(CopilotoError::config_error(format!(
            "at most {} quick questions can be bound to function keys",
            MAX_QUICK_QUESTIONS
        )));
    }

    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap_or_else(|e| e.into_inner()).clone()
}
