use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Runtime settings for one agent process, loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentConfig {
    /// Model identifier passed through to the endpoint.
    #[serde(default = "default_model")]
    pub model: String,
    /// Model gateway URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Seed text for the initial `system` transcript entry.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    /// Maximum accepted user input length in characters. `0` means unlimited.
    #[serde(default)]
    pub input_limit: usize,
    /// Maximum tool-execution rounds per user turn. `0` means unbounded.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_model() -> String {
    "llama3.1".into()
}

fn default_endpoint() -> String {
    "http://localhost:11434/api/generate".into()
}

fn default_system_prompt() -> String {
    "You are a helpful agent with file tools. To use one, reply with a line \
     of the form: tool: read_file({\"path\":\"main.rs\"})"
        .into()
}

fn default_max_rounds() -> usize {
    8
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            system_prompt: default_system_prompt(),
            input_limit: 0,
            max_rounds: default_max_rounds(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AgentConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let cfg = toml::from_str(&raw)
            .map_err(|err| EngineError::Config(format!("failed to parse configuration: {err}")))?;
        Ok(cfg)
    }
}
