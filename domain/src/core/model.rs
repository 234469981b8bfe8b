//! Model value object representing an LLM model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Available LLM models (Value Object)
///
/// A domain concept identifying the model behind a council seat. The
/// orchestrator never branches on this — only the routing layer does,
/// to pick a provider adapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // OpenAI models
    Gpt4o,
    Gpt4Turbo,
    Gpt35Turbo,
    // Anthropic models
    Claude35Sonnet,
    Claude3Opus,
    Claude3Haiku,
    // Local (Ollama) models
    Llama3,
    Mistral,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt4o => "gpt-4o",
            Model::Gpt4Turbo => "gpt-4-turbo",
            Model::Gpt35Turbo => "gpt-3.5-turbo",
            Model::Claude35Sonnet => "claude-3-5-sonnet-20240620",
            Model::Claude3Opus => "claude-3-opus-20240229",
            Model::Claude3Haiku => "claude-3-haiku-20240307",
            Model::Llama3 => "llama3",
            Model::Mistral => "mistral",
            Model::Custom(s) => s,
        }
    }

    /// Default council seats: two members and a chairman
    pub fn default_members() -> Vec<Model> {
        vec![Model::Gpt4o, Model::Claude35Sonnet]
    }

    /// Default chairman model
    pub fn default_chairman() -> Model {
        Model::Claude3Opus
    }

    /// Check if this is an OpenAI model
    pub fn is_gpt(&self) -> bool {
        matches!(self, Model::Gpt4o | Model::Gpt4Turbo | Model::Gpt35Turbo)
    }

    /// Check if this is an Anthropic model
    pub fn is_claude(&self) -> bool {
        matches!(
            self,
            Model::Claude35Sonnet | Model::Claude3Opus | Model::Claude3Haiku
        )
    }

    /// Check if this is a local Ollama model
    pub fn is_local(&self) -> bool {
        matches!(self, Model::Llama3 | Model::Mistral)
    }
}

impl Default for Model {
    /// Returns the default model (GPT-4o)
    fn default() -> Self {
        Model::Gpt4o
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "gpt-4o" => Model::Gpt4o,
            "gpt-4-turbo" => Model::Gpt4Turbo,
            "gpt-3.5-turbo" => Model::Gpt35Turbo,
            "claude-3-5-sonnet-20240620" => Model::Claude35Sonnet,
            "claude-3-opus-20240229" => Model::Claude3Opus,
            "claude-3-haiku-20240307" => Model::Claude3Haiku,
            "llama3" => Model::Llama3,
            "mistral" => Model::Mistral,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap())
    }
}
