//! # Error Types
//!
//! Errors raised by the foundational types. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! Manifest-level failures are not errors in this sense: they are reported
//! as [`crate::Diagnostic`] values. `AgmError` covers programming-level
//! misuse such as parsing an unknown enumerated value.

use thiserror::Error;

/// Top-level error type for the agent manifest toolchain.
#[derive(Error, Debug)]
pub enum AgmError {
    /// A string did not name a known deployment status.
    #[error("unknown deployment status: {0:?}")]
    UnknownDeploymentStatus(String),

    /// A string did not name a known LLM provider type.
    #[error("unknown llm dependency type: {0:?}")]
    UnknownLlmProvider(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
