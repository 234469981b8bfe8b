//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use council_application::ports::provider::SamplingParams;
use council_domain::{DeliberationMode, Model};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("{0}")]
    InvalidMode(String),
}

/// Raw council configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Deliberation mode ("classic" or "debate")
    pub mode: Option<String>,
    /// Classic-mode member model names
    pub members: Vec<String>,
    /// Chairman model for synthesis
    pub chairman: Option<Model>,
    /// Debate-mode draft author
    pub proponent: Option<Model>,
    /// Debate-mode auditor
    pub opponent: Option<Model>,
}

impl FileCouncilConfig {
    /// Parse the configured mode, defaulting to classic.
    pub fn parse_mode(&self) -> Result<DeliberationMode, ConfigValidationError> {
        match &self.mode {
            None => Ok(DeliberationMode::Classic),
            Some(s) => s.parse().map_err(ConfigValidationError::InvalidMode),
        }
    }

    /// Member model names parsed into domain models.
    pub fn member_models(&self) -> Vec<Model> {
        self.members
            .iter()
            .filter_map(|name| name.parse().ok())
            .collect()
    }
}

/// Raw behavior configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Timeout in seconds for API calls
    pub timeout_seconds: Option<u64>,
    /// Use the reduced-window sampling preset
    pub speed_optimized: bool,
    /// Context window override (tokens)
    pub context_window: Option<u32>,
    /// Output length cap (tokens)
    pub max_output_tokens: Option<u32>,
    /// Sampling temperature override
    pub temperature: Option<f32>,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            speed_optimized: false,
            context_window: None,
            max_output_tokens: None,
            temperature: None,
        }
    }
}

impl FileBehaviorConfig {
    /// Build sampling parameters from the configured overrides.
    pub fn sampling(&self) -> SamplingParams {
        let mut params = if self.speed_optimized {
            SamplingParams::speed_optimized()
        } else {
            SamplingParams::default()
        };
        if self.context_window.is_some() {
            params.context_window = self.context_window;
        }
        if self.max_output_tokens.is_some() {
            params.max_output_tokens = self.max_output_tokens;
        }
        if self.temperature.is_some() {
            params.temperature = self.temperature;
        }
        params
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format ("full", "answer", "json")
    pub format: Option<String>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show progress indicators
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

/// Ollama endpoint settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOllamaConfig {
    /// Server base URL (default http://localhost:11434)
    pub base_url: Option<String>,
}

/// Raw provider configuration from TOML
///
/// `routing` pins individual models to a provider by name; anything not
/// listed falls back to model-family inference and then `default`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Provider used when no route matches ("ollama", "openai", ...)
    pub default: Option<String>,
    /// Explicit model-name -> provider-name routes
    pub routing: HashMap<String, String>,
    /// Ollama endpoint settings
    pub ollama: FileOllamaConfig,
}

/// Raw log configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLogConfig {
    /// Append deliberation outcomes to this JSONL file
    pub deliberation_log: Option<String>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Council settings
    pub council: FileCouncilConfig,
    /// Behavior settings
    pub behavior: FileBehaviorConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Provider settings
    pub providers: FileProvidersConfig,
    /// Log settings
    pub log: FileLogConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        // Timeout of 0 seconds doesn't make sense
        if let Some(0) = self.behavior.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        for model in &self.council.members {
            if model.trim().is_empty() {
                return Err(ConfigValidationError::EmptyModelName);
            }
        }

        self.council.parse_mode()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[council]
mode = "debate"
members = ["gpt-4o", "claude-3-5-sonnet-20240620"]
chairman = "claude-3-opus-20240229"
proponent = "gpt-4o"
opponent = "claude-3-5-sonnet-20240620"

[behavior]
timeout_seconds = 120
speed_optimized = true

[output]
format = "full"
color = false

[repl]
show_progress = false
history_file = "~/.local/share/llm-council/history.txt"

[providers]
default = "openai"

[providers.routing]
"llama3" = "ollama"

[providers.ollama]
base_url = "http://gpu-box:11434"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.council.parse_mode().unwrap(), DeliberationMode::Debate);
        assert_eq!(config.council.members.len(), 2);
        assert_eq!(config.council.chairman, Some(Model::Claude3Opus));
        assert_eq!(config.council.proponent, Some(Model::Gpt4o));
        assert_eq!(config.behavior.timeout_seconds, Some(120));
        assert!(config.behavior.speed_optimized);
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert_eq!(config.providers.default.as_deref(), Some("openai"));
        assert_eq!(
            config.providers.routing.get("llama3").map(String::as_str),
            Some("ollama")
        );
        assert_eq!(
            config.providers.ollama.base_url.as_deref(),
            Some("http://gpu-box:11434")
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[council]
members = ["gpt-4o"]
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.council.parse_mode().unwrap(), DeliberationMode::Classic);
        assert_eq!(config.council.member_models(), vec![Model::Gpt4o]);
        // Defaults should apply
        assert!(config.output.color);
        assert!(config.repl.show_progress);
        assert!(config.providers.default.is_none());
    }

    #[test]
    fn test_default_config_validates() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let toml_str = r#"
[behavior]
timeout_seconds = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_validate_empty_member_name() {
        let toml_str = r#"
[council]
members = ["gpt-4o", ""]
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyModelName)
        ));
    }

    #[test]
    fn test_validate_bad_mode() {
        let toml_str = r#"
[council]
mode = "tribunal"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidMode(_))
        ));
    }

    #[test]
    fn test_sampling_overrides() {
        let toml_str = r#"
[behavior]
speed_optimized = true
temperature = 0.2
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let sampling = config.behavior.sampling();
        // Speed preset with a single override applied on top
        assert_eq!(sampling.context_window, Some(2048));
        assert_eq!(sampling.max_output_tokens, Some(512));
        assert_eq!(sampling.temperature, Some(0.2));
    }

    #[test]
    fn test_custom_model_name_survives_parsing() {
        let config = FileCouncilConfig {
            members: vec!["qwen2.5-coder".to_string()],
            ..Default::default()
        };
        assert_eq!(
            config.member_models(),
            vec![Model::Custom("qwen2.5-coder".to_string())]
        );
    }
}
