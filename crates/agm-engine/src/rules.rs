//! # Content Rules
//!
//! Semantic checks the schema language cannot express: minimum significant
//! lengths, a required phrase, credentials conditional on the LLM provider,
//! and publication requirements conditional on the deployment status.
//!
//! Rules run in declaration order ([`ContentRule::all`]) and are fully
//! independent: every rule runs regardless of what earlier rules found, so
//! one pass surfaces every problem in a manifest.
//!
//! Rules assume the manifest already passed structural validation, but
//! never rely on it. A field with an unexpected JSON type is treated as
//! absent, which makes the owning rule fail instead of the run.

use agm_core::{
    is_blank, significant_len, DeploymentStatus, LlmProvider, Manifest, StructureValidator,
};
use serde::Serialize;

/// Minimum significant characters in `long_description`.
pub const MIN_LONG_DESCRIPTION: usize = 50;

/// Minimum significant characters in `docker_run_instructions`.
pub const MIN_DOCKER_RUN_INSTRUCTIONS: usize = 100;

/// Minimum significant characters in `privacy_considerations` once an agent
/// is in review or production.
pub const MIN_PRIVACY_CONSIDERATIONS: usize = 30;

/// Phrase `docker_run_instructions` must contain, compared case-insensitively.
pub const DOCKER_RUN_PHRASE: &str = "docker run";

/// One content rule violation, before it is attributed to a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// JSON Pointer to the offending field.
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl Finding {
    fn new(field: &str, message: String) -> Self {
        Self {
            field: field.to_string(),
            message,
        }
    }
}

/// Inputs to the rules that do not come from the manifest itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleContext {
    /// `deployment_status` assumed when the manifest omits it.
    default_status: String,
}

impl Default for RuleContext {
    fn default() -> Self {
        Self::new(DeploymentStatus::FALLBACK.as_str())
    }
}

impl RuleContext {
    /// A context with an explicit default deployment status.
    pub fn new(default_status: impl Into<String>) -> Self {
        Self {
            default_status: default_status.into(),
        }
    }

    /// Take the default deployment status from the schema, falling back to
    /// `draft` when the schema declares none.
    pub fn from_validator<V: StructureValidator + ?Sized>(validator: &V) -> Self {
        validator
            .declared_default("deployment_status")
            .and_then(|v| v.as_str().map(Self::new))
            .unwrap_or_default()
    }

    /// The default deployment status.
    pub fn default_status(&self) -> &str {
        &self.default_status
    }

    /// The manifest's `deployment_status`, or the default when it is absent
    /// or not text.
    pub fn effective_status<'a>(&'a self, manifest: &'a Manifest) -> &'a str {
        manifest
            .text("deployment_status")
            .unwrap_or(&self.default_status)
    }
}

/// The content rules, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentRule {
    /// `name` must contain a non-whitespace character.
    NameNotEmpty,
    /// `long_description` must be substantial.
    LongDescriptionLength,
    /// `docker_image_name` must contain a non-whitespace character.
    DockerImageNotEmpty,
    /// `docker_run_instructions` must be substantial and show a `docker run`.
    DockerRunInstructions,
    /// Hosted providers need `apiKeyEnvVar`; `local_api` needs `apiEndpointEnvVar`.
    LlmCredentials,
    /// Review and production manifests need privacy notes and use cases.
    PublicationReadiness,
}

impl ContentRule {
    /// Every rule in execution order.
    pub fn all() -> &'static [ContentRule] {
        &[
            Self::NameNotEmpty,
            Self::LongDescriptionLength,
            Self::DockerImageNotEmpty,
            Self::DockerRunInstructions,
            Self::LlmCredentials,
            Self::PublicationReadiness,
        ]
    }

    /// Stable identifier of the rule.
    pub fn id(&self) -> &'static str {
        match self {
            Self::NameNotEmpty => "name-not-empty",
            Self::LongDescriptionLength => "long-description-length",
            Self::DockerImageNotEmpty => "docker-image-not-empty",
            Self::DockerRunInstructions => "docker-run-instructions",
            Self::LlmCredentials => "llm-credentials",
            Self::PublicationReadiness => "publication-readiness",
        }
    }

    /// One-line summary of what the rule enforces.
    pub fn description(&self) -> &'static str {
        match self {
            Self::NameNotEmpty => "name must not be empty or whitespace",
            Self::LongDescriptionLength => "long_description must have at least 50 characters",
            Self::DockerImageNotEmpty => "docker_image_name must not be empty or whitespace",
            Self::DockerRunInstructions => {
                "docker_run_instructions must have at least 100 characters and contain \"docker run\""
            }
            Self::LlmCredentials => {
                "llm_dependency must name apiKeyEnvVar for hosted providers and apiEndpointEnvVar for local_api"
            }
            Self::PublicationReadiness => {
                "review and production manifests need privacy_considerations (min 30) and use_cases"
            }
        }
    }

    /// Apply this rule to one manifest.
    pub fn check(&self, manifest: &Manifest, context: &RuleContext) -> Vec<Finding> {
        match self {
            Self::NameNotEmpty => check_name(manifest),
            Self::LongDescriptionLength => check_long_description(manifest),
            Self::DockerImageNotEmpty => check_docker_image(manifest),
            Self::DockerRunInstructions => check_docker_run(manifest),
            Self::LlmCredentials => check_llm_credentials(manifest),
            Self::PublicationReadiness => check_publication(manifest, context),
        }
    }
}

impl std::fmt::Display for ContentRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Run every content rule in order and collect all findings.
pub fn check_content(manifest: &Manifest, context: &RuleContext) -> Vec<Finding> {
    ContentRule::all()
        .iter()
        .flat_map(|rule| rule.check(manifest, context))
        .collect()
}

fn check_name(manifest: &Manifest) -> Vec<Finding> {
    if manifest.text("name").map_or(true, is_blank) {
        vec![Finding::new("/name", "name must not be empty.".to_string())]
    } else {
        Vec::new()
    }
}

fn check_long_description(manifest: &Manifest) -> Vec<Finding> {
    let len = manifest.text("long_description").map_or(0, significant_len);
    if len < MIN_LONG_DESCRIPTION {
        vec![Finding::new(
            "/long_description",
            format!("long_description too short (min {MIN_LONG_DESCRIPTION}), got {len}"),
        )]
    } else {
        Vec::new()
    }
}

fn check_docker_image(manifest: &Manifest) -> Vec<Finding> {
    if manifest.text("docker_image_name").map_or(true, is_blank) {
        vec![Finding::new(
            "/docker_image_name",
            "docker_image_name must not be empty.".to_string(),
        )]
    } else {
        Vec::new()
    }
}

fn check_docker_run(manifest: &Manifest) -> Vec<Finding> {
    let text = manifest.text("docker_run_instructions").unwrap_or("");
    let len = significant_len(text);
    let has_phrase = text.to_lowercase().contains(DOCKER_RUN_PHRASE);
    if len < MIN_DOCKER_RUN_INSTRUCTIONS || !has_phrase {
        vec![Finding::new(
            "/docker_run_instructions",
            format!("docker_run_instructions too short or missing required phrase, got {len} chars."),
        )]
    } else {
        Vec::new()
    }
}

fn check_llm_credentials(manifest: &Manifest) -> Vec<Finding> {
    let Some(llm) = manifest.object("llm_dependency") else {
        return Vec::new();
    };
    let Some(llm_type) = llm.get("type").and_then(|v| v.as_str()) else {
        return Vec::new();
    };
    // Unknown providers carry no credential requirement; the schema enum
    // rejects them.
    let Ok(provider) = llm_type.parse::<LlmProvider>() else {
        return Vec::new();
    };

    let present = |key: &str| {
        llm.get(key)
            .and_then(|v| v.as_str())
            .is_some_and(|s| !is_blank(s))
    };

    let mut findings = Vec::new();
    if provider.requires_api_key() && !present("apiKeyEnvVar") {
        findings.push(Finding::new(
            "/llm_dependency/apiKeyEnvVar",
            format!("apiKeyEnvVar required for llm type {llm_type}."),
        ));
    }
    if provider.requires_endpoint() && !present("apiEndpointEnvVar") {
        findings.push(Finding::new(
            "/llm_dependency/apiEndpointEnvVar",
            "apiEndpointEnvVar required for local_api.".to_string(),
        ));
    }
    findings
}

fn check_publication(manifest: &Manifest, context: &RuleContext) -> Vec<Finding> {
    let status = context.effective_status(manifest);
    let gated = status
        .parse::<DeploymentStatus>()
        .is_ok_and(|s| s.requires_publication_fields());
    if !gated {
        return Vec::new();
    }

    let mut findings = Vec::new();
    let privacy_len = manifest
        .text("privacy_considerations")
        .map_or(0, significant_len);
    if privacy_len < MIN_PRIVACY_CONSIDERATIONS {
        findings.push(Finding::new(
            "/privacy_considerations",
            format!(
                "privacy_considerations required and must be substantial (min {MIN_PRIVACY_CONSIDERATIONS}) for status {status}."
            ),
        ));
    }
    if manifest.array("use_cases").map_or(true, Vec::is_empty) {
        findings.push(Finding::new(
            "/use_cases",
            format!("use_cases must not be empty for status {status}."),
        ));
    }
    findings
}
