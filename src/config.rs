use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "agentic-demo.toml";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const API_KEY_PLACEHOLDER: &str = "your-api-key-here";
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant. Be concise and helpful in your responses.";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub provider_label: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: 0.7,
            max_tokens: 500,
            timeout_secs: 30,
            provider_label: "OpenAI".to_string(),
        }
    }
}

impl LlmConfig {
    /// Usable API key, or `None` when the key is missing, blank, or still the
    /// template placeholder.
    pub fn effective_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != API_KEY_PLACEHOLDER)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AgentTimingConfig {
    pub think_delay_ms: u64,
    pub respond_delay_ms: u64,
}

impl Default for AgentTimingConfig {
    fn default() -> Self {
        Self {
            think_delay_ms: 800,
            respond_delay_ms: 500,
        }
    }
}

impl AgentTimingConfig {
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }

    pub fn respond_delay(&self) -> Duration {
        Duration::from_millis(self.respond_delay_ms)
    }

    #[cfg(test)]
    pub fn immediate() -> Self {
        Self {
            think_delay_ms: 0,
            respond_delay_ms: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlannerTimingConfig {
    pub analyze_delay_ms: u64,
    pub auto_start_delay_ms: u64,
    pub high_ms: u64,
    pub medium_ms: u64,
    pub low_ms: u64,
}

impl Default for PlannerTimingConfig {
    fn default() -> Self {
        Self {
            analyze_delay_ms: 800,
            auto_start_delay_ms: 500,
            high_ms: 2000,
            medium_ms: 3000,
            low_ms: 4000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub agent: AgentTimingConfig,
    pub planner: PlannerTimingConfig,
}

impl AppConfig {
    /// Loads `explicit` if given (it must exist), otherwise the default file
    /// in `cwd` when present. The API key env var always wins over the file.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = cwd.join(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env_key(std::env::var(API_KEY_ENV).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    fn apply_env_key(&mut self, env_key: Option<String>) {
        if let Some(key) = env_key.filter(|key| !key.trim().is_empty()) {
            self.llm.api_key = Some(key);
        }
    }
}
