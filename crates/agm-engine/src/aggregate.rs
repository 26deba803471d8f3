//! # Result Aggregation
//!
//! Combines structural and content diagnostics into one [`Report`] per
//! manifest and collects reports into a [`RunResult`].
//!
//! ## Ordering
//!
//! Within a report, schema diagnostics come before content diagnostics and
//! content diagnostics follow rule declaration order. Content rules only run
//! when structural validation passed; a structurally invalid manifest
//! reports its schema violations alone.
//!
//! Across a run, reports are sorted by manifest path so output does not
//! depend on the order manifests were supplied or discovered in.

use std::path::Path;

use agm_core::{Diagnostic, Manifest, Report, RunResult, StructureValidator};

use crate::load::{load_manifest, parse_manifest, LoadError, ManifestLocation, Origin};
use crate::rules::{check_content, RuleContext};

/// Validates manifests against one structural validator and rule context.
#[derive(Debug)]
pub struct Engine<'v, V: ?Sized> {
    validator: &'v V,
    context: RuleContext,
}

impl<'v, V: StructureValidator + ?Sized> Engine<'v, V> {
    /// An engine whose default deployment status comes from the schema.
    pub fn new(validator: &'v V) -> Self {
        Self {
            validator,
            context: RuleContext::from_validator(validator),
        }
    }

    /// An engine with an explicit rule context.
    pub fn with_context(validator: &'v V, context: RuleContext) -> Self {
        Self { validator, context }
    }

    /// The rule context in use.
    pub fn context(&self) -> &RuleContext {
        &self.context
    }

    /// Validate an already-parsed manifest.
    pub fn check_manifest(&self, id: &str, manifest: &Manifest) -> Report {
        let outcome = self.validator.validate_structure(manifest.as_value());
        if !outcome.is_valid() {
            let diagnostics = outcome
                .errors
                .iter()
                .map(|e| Diagnostic::schema(id, e))
                .collect();
            return Report::with_diagnostics(id, diagnostics);
        }

        let diagnostics = check_content(manifest, &self.context)
            .into_iter()
            .map(|f| Diagnostic::content(id, f.field, f.message))
            .collect();
        Report::with_diagnostics(id, diagnostics)
    }

    /// Parse and validate manifest text. `path` names the manifest and
    /// selects the format.
    pub fn check_text(&self, path: &Path, text: &str) -> Report {
        let id = path.display().to_string();
        match parse_manifest(path, text) {
            Ok(manifest) => self.check_manifest(&id, &manifest),
            Err(e) => Report::with_diagnostics(&id, vec![Diagnostic::load(&id, e.to_string())]),
        }
    }

    /// Load and validate one location.
    ///
    /// Returns `None` when a discovered manifest no longer exists; an
    /// explicit location that does not exist yields a failing report.
    pub fn check_location(&self, location: &ManifestLocation) -> Option<Report> {
        let id = location.id();
        let report = match load_manifest(&location.path) {
            Ok(manifest) => self.check_manifest(&id, &manifest),
            Err(LoadError::NotFound) if location.origin == Origin::Discovered => {
                tracing::debug!(manifest = %id, "discovered manifest vanished; skipping");
                return None;
            }
            Err(e) => Report::with_diagnostics(&id, vec![Diagnostic::load(&id, e.to_string())]),
        };

        tracing::debug!(
            manifest = %id,
            diagnostics = report.diagnostics.len(),
            passed = report.passed(),
            "validated manifest"
        );
        Some(report)
    }

    /// Validate every location and aggregate the reports.
    ///
    /// A failure in one manifest never stops the others; the run verdict is
    /// derived from all reports.
    pub fn run(&self, locations: &[ManifestLocation]) -> RunResult {
        let mut result: RunResult = locations
            .iter()
            .filter_map(|location| self.check_location(location))
            .collect();
        result.sort_by_manifest();

        tracing::info!(
            total = result.total(),
            passed = result.passed_count(),
            failed = result.failed_count(),
            "validation run complete"
        );
        result
    }
}

/// Validate a sequence of manifest locations with `validator`.
///
/// Single-file validation is a one-element sequence; batch validation
/// passes every discovered manifest.
pub fn validate_locations<V: StructureValidator + ?Sized>(
    validator: &V,
    locations: &[ManifestLocation],
) -> RunResult {
    Engine::new(validator).run(locations)
}

/// Validate an already-parsed manifest under an explicit rule context.
pub fn validate_manifest<V: StructureValidator + ?Sized>(
    validator: &V,
    context: &RuleContext,
    id: &str,
    manifest: &Manifest,
) -> Report {
    Engine::with_context(validator, context.clone()).check_manifest(id, manifest)
}

/// Validate one manifest's text with `validator`.
pub fn validate_text<V: StructureValidator + ?Sized>(
    validator: &V,
    path: &Path,
    text: &str,
) -> Report {
    Engine::new(validator).check_text(path, text)
}
