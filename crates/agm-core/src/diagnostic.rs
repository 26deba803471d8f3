//! # Diagnostics, Reports, and Run Results
//!
//! A [`Diagnostic`] is one reported failure. A [`Report`] holds every
//! diagnostic for one manifest, in the order they were produced; an empty
//! report is a pass. A [`RunResult`] holds the reports of one validation
//! run and derives the run-wide verdict from them.
//!
//! ## Invariant
//!
//! The run verdict is the OR of per-manifest failures. It is computed from
//! the reports on demand, so a later passing manifest can never mask an
//! earlier failing one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AgmError;
use crate::structure::StructuralError;

/// Which stage of validation produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCategory {
    /// The manifest could not be found, read, or parsed.
    Load,
    /// A schema constraint was violated.
    Schema,
    /// A content rule was violated.
    Content,
}

impl DiagnosticCategory {
    /// Returns the lowercase identifier for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Schema => "schema",
            Self::Content => "content",
        }
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validation failure for one manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Source path of the manifest.
    pub manifest: String,
    /// Stage that produced the failure.
    pub category: DiagnosticCategory,
    /// JSON Pointer to the offending field, when one applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// JSON Pointer to the violated schema keyword, for schema diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// A failure to find, read, or parse the manifest.
    pub fn load(manifest: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            manifest: manifest.into(),
            category: DiagnosticCategory::Load,
            field: None,
            constraint: None,
            message: message.into(),
        }
    }

    /// A schema violation.
    pub fn schema(manifest: impl Into<String>, error: &StructuralError) -> Self {
        Self {
            manifest: manifest.into(),
            category: DiagnosticCategory::Schema,
            field: Some(error.path.clone()),
            constraint: (!error.schema_path.is_empty()).then(|| error.schema_path.clone()),
            message: error.message.clone(),
        }
    }

    /// A content rule violation on `field`.
    pub fn content(
        manifest: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            manifest: manifest.into(),
            category: DiagnosticCategory::Content,
            field: Some(field.into()),
            constraint: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field.as_deref() {
            Some("") => write!(f, "[{}] (root): {}", self.category, self.message)?,
            Some(field) => write!(f, "[{}] {}: {}", self.category, field, self.message)?,
            None => write!(f, "[{}] {}", self.category, self.message)?,
        }
        if let Some(constraint) = &self.constraint {
            write!(f, " (violates {constraint})")?;
        }
        Ok(())
    }
}

/// All diagnostics for one manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Source path of the manifest.
    pub manifest: String,
    /// Diagnostics in production order: load or schema first, then content.
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    /// A report with no diagnostics yet.
    pub fn new(manifest: impl Into<String>) -> Self {
        Self {
            manifest: manifest.into(),
            diagnostics: Vec::new(),
        }
    }

    /// A report carrying the given diagnostics.
    pub fn with_diagnostics(manifest: impl Into<String>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            manifest: manifest.into(),
            diagnostics,
        }
    }

    /// True when the manifest produced no diagnostics.
    pub fn passed(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics of a single category, in order.
    pub fn by_category(
        &self,
        category: DiagnosticCategory,
    ) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics
            .iter()
            .filter(move |d| d.category == category)
    }
}

/// Outcome of one validation run across any number of manifests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    /// One report per validated manifest.
    pub reports: Vec<Report>,
}

impl RunResult {
    /// An empty run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one manifest's report.
    pub fn push(&mut self, report: Report) {
        self.reports.push(report);
    }

    /// True when any manifest failed.
    pub fn has_error(&self) -> bool {
        self.reports.iter().any(|r| !r.passed())
    }

    /// Number of manifests validated.
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    /// Number of manifests that passed.
    pub fn passed_count(&self) -> usize {
        self.reports.iter().filter(|r| r.passed()).count()
    }

    /// Number of manifests that failed.
    pub fn failed_count(&self) -> usize {
        self.total() - self.passed_count()
    }

    /// Reports of failing manifests, in run order.
    pub fn failures(&self) -> impl Iterator<Item = &Report> + '_ {
        self.reports.iter().filter(|r| !r.passed())
    }

    /// Process exit status for this run: 0 when every manifest passed.
    pub fn exit_code(&self) -> u8 {
        u8::from(self.has_error())
    }

    /// Sort reports by manifest path so output is independent of the order
    /// manifests were visited in.
    pub fn sort_by_manifest(&mut self) {
        self.reports.sort_by(|a, b| a.manifest.cmp(&b.manifest));
    }

    /// Pretty-printed JSON rendering of the whole run.
    pub fn to_json_pretty(&self) -> Result<String, AgmError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FromIterator<Report> for RunResult {
    fn from_iter<I: IntoIterator<Item = Report>>(iter: I) -> Self {
        Self {
            reports: iter.into_iter().collect(),
        }
    }
}
