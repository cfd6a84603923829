//! Configuration management
//!
//! Config stored at: ~/.config/rock-ai/config.json
//! The API key comes from `GEMINI_API_KEY` (environment or `.env`) first,
//! then from the config file.

use crate::analyzer::ClientSettings;
use crate::error::{Result, RockAiError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_key: Option<String>,

    /// Gemini REST base URL (without `/models/...`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_detailed_model")]
    pub detailed_model: String,

    #[serde(default = "default_quick_model")]
    pub quick_model: String,

    #[serde(default = "default_detailed_thinking_budget")]
    pub detailed_thinking_budget: u32,

    #[serde(default = "default_quick_thinking_budget")]
    pub quick_thinking_budget: u32,

    #[serde(default)]
    pub temperature: Option<f32>,

    /// Longest edge (px) of the uploaded image
    #[serde(default = "default_max_image_size")]
    pub max_image_size: u32,

    /// Request timeout. `None` keeps the HTTP client default.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// Append `_YYYYmmdd_HHMMSS` to saved JSON file names
    #[serde(default)]
    pub timestamped_output: bool,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_detailed_model() -> String {
    "gemini-2.5-pro".to_string()
}

fn default_quick_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_detailed_thinking_budget() -> u32 {
    32000
}

fn default_quick_thinking_budget() -> u32 {
    8192
}

fn default_max_image_size() -> u32 {
    1024
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            detailed_model: default_detailed_model(),
            quick_model: default_quick_model(),
            detailed_thinking_budget: default_detailed_thinking_budget(),
            quick_thinking_budget: default_quick_thinking_budget(),
            temperature: None,
            max_image_size: default_max_image_size(),
            timeout_seconds: None,
            timestamped_output: false,
        }
    }
}

impl Config {
    /// Load `~/.config/rock-ai/config.json` (defaults when it does not exist)
    /// and let `GEMINI_API_KEY` override its `api_key`
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Ok(Self::load_from(&config_path)?.with_env_api_key(std::env::var(API_KEY_ENV).ok()))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content).map_err(|e| {
                RockAiError::Config(format!("{}: {}", path.display(), e))
            })?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| RockAiError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("rock-ai").join("config.json"))
    }

    /// Replace `api_key` with a non-blank environment value
    pub fn with_env_api_key(mut self, env_value: Option<String>) -> Self {
        if let Some(key) = env_value.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    /// Configured API key, trimmed
    pub fn get_api_key(&self) -> Result<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .ok_or(RockAiError::MissingApiKey)
    }

    /// Settings for the model client. Fails with [`RockAiError::MissingApiKey`]
    /// when no key is configured.
    pub fn client_settings(&self) -> Result<ClientSettings> {
        Ok(ClientSettings {
            api_key: self.get_api_key()?,
            base_url: self.base_url.clone(),
            detailed_model: self.detailed_model.clone(),
            quick_model: self.quick_model.clone(),
            detailed_thinking_budget: self.detailed_thinking_budget,
            quick_thinking_budget: self.quick_thinking_budget,
            temperature: self.temperature,
            timeout_seconds: self.timeout_seconds,
        })
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Base URL:         {}", self.base_url)?;
        writeln!(f, "Detailed model:   {} (thinking {})", self.detailed_model, self.detailed_thinking_budget)?;
        writeln!(f, "Quick model:      {} (thinking {})", self.quick_model, self.quick_thinking_budget)?;
        writeln!(f, "Max image size:   {}px", self.max_image_size)?;
        writeln!(
            f,
            "API key:          {}",
            if self.get_api_key().is_ok() { "set" } else { "not set" }
        )
    }
}
