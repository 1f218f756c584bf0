use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_seed_path")]
    pub seed_path: PathBuf,

    /// Tera template used instead of the built-in article fragment
    pub template_path: Option<PathBuf>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_seed_concurrency")]
    pub seed_concurrency: usize,
}

fn default_api_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_seed_path() -> PathBuf {
    PathBuf::from("data").join("hackerIpsum.json")
}

fn default_request_timeout() -> u64 {
    30
}

fn default_seed_concurrency() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            seed_path: default_seed_path(),
            template_path: None,
            request_timeout_secs: default_request_timeout(),
            seed_concurrency: default_seed_concurrency(),
        }
    }
}

impl Config {
    /// Load the user config, writing the defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Config::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        if config.seed_concurrency == 0 {
            return Err(AppError::Config(
                "seed_concurrency must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("blog-articles")
            .join("config.toml")
    }
}
