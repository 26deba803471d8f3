//! # Manifest Domain Enums
//!
//! Enumerated values that drive conditional content rules:
//!
//! - [`DeploymentStatus`] gates the publication requirements
//!   (`privacy_considerations`, `use_cases`).
//! - [`LlmProvider`] decides which companion environment variable an
//!   `llm_dependency` block must name.
//!
//! Both parse from the exact lowercase identifiers used in manifests. The
//! rule engine treats a value that fails to parse as carrying no extra
//! requirement; the schema is responsible for rejecting unknown values.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AgmError;

/// Lifecycle stage of an agent, declared by `deployment_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    /// Work in progress. No publication requirements.
    Draft,
    /// Submitted for review.
    Review,
    /// Published and deployable.
    Production,
    /// Retired; kept for reference.
    Deprecated,
}

impl DeploymentStatus {
    /// Status assumed when neither the manifest nor the schema declares one.
    pub const FALLBACK: DeploymentStatus = DeploymentStatus::Draft;

    /// Returns all statuses in lifecycle order.
    pub fn all() -> &'static [DeploymentStatus] {
        &[Self::Draft, Self::Review, Self::Production, Self::Deprecated]
    }

    /// Returns the manifest identifier for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Review => "review",
            Self::Production => "production",
            Self::Deprecated => "deprecated",
        }
    }

    /// Whether manifests at this status must carry privacy considerations
    /// and at least one use case.
    pub fn requires_publication_fields(&self) -> bool {
        matches!(self, Self::Review | Self::Production)
    }
}

impl std::fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentStatus {
    type Err = AgmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "review" => Ok(Self::Review),
            "production" => Ok(Self::Production),
            "deprecated" => Ok(Self::Deprecated),
            other => Err(AgmError::UnknownDeploymentStatus(other.to_string())),
        }
    }
}

/// Provider named by `llm_dependency.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    /// OpenAI hosted API.
    #[serde(rename = "openai")]
    OpenAi,
    /// Anthropic hosted API.
    Anthropic,
    /// Google hosted API.
    Google,
    /// Cohere hosted API.
    Cohere,
    /// Hugging Face inference API.
    HuggingfaceApi,
    /// Self-hosted endpoint reached through a configurable URL.
    LocalApi,
    /// The agent does not call a model.
    None,
    /// Anything else; no companion variables are enforced.
    Other,
}

impl LlmProvider {
    /// Returns all provider types in declaration order.
    pub fn all() -> &'static [LlmProvider] {
        &[
            Self::OpenAi,
            Self::Anthropic,
            Self::Google,
            Self::Cohere,
            Self::HuggingfaceApi,
            Self::LocalApi,
            Self::None,
            Self::Other,
        ]
    }

    /// Returns the manifest identifier for this provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
            Self::Cohere => "cohere",
            Self::HuggingfaceApi => "huggingface_api",
            Self::LocalApi => "local_api",
            Self::None => "none",
            Self::Other => "other",
        }
    }

    /// Hosted providers authenticate with a key read from `apiKeyEnvVar`.
    pub fn requires_api_key(&self) -> bool {
        matches!(
            self,
            Self::OpenAi | Self::Anthropic | Self::Google | Self::Cohere | Self::HuggingfaceApi
        )
    }

    /// Local endpoints are located through `apiEndpointEnvVar`.
    pub fn requires_endpoint(&self) -> bool {
        matches!(self, Self::LocalApi)
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LlmProvider {
    type Err = AgmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            "google" => Ok(Self::Google),
            "cohere" => Ok(Self::Cohere),
            "huggingface_api" => Ok(Self::HuggingfaceApi),
            "local_api" => Ok(Self::LocalApi),
            "none" => Ok(Self::None),
            "other" => Ok(Self::Other),
            other => Err(AgmError::UnknownLlmProvider(other.to_string())),
        }
    }
}
