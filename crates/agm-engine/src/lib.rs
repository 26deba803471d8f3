//! # agm-engine — Content Rule Engine and Result Aggregation
//!
//! Applies the semantic checks that a JSON Schema cannot express and
//! aggregates every failure of a validation run.
//!
//! ## Architecture
//!
//! - **Rules** (`rules.rs`): the ordered [`ContentRule`] set. Each rule is a
//!   pure function of the manifest and the [`RuleContext`]; all rules run
//!   on every structurally valid manifest.
//!
//! - **Loading** (`load.rs`): reads and parses one manifest, classifying
//!   failures as not-found, unreadable, or unparsable.
//!
//! - **Aggregation** (`aggregate.rs`): runs structural validation, then the
//!   content rules, and folds the results into a [`agm_core::Report`] per
//!   manifest and an [`agm_core::RunResult`] per run.
//!
//! ## Crate Policy
//!
//! - Depends only on `agm-core` internally; structural validation is
//!   injected through [`agm_core::StructureValidator`].
//! - Manifest-level failures become diagnostics. Nothing in this crate
//!   aborts a run because one manifest is broken.

pub mod aggregate;
pub mod load;
pub mod rules;

pub use aggregate::{validate_locations, validate_manifest, validate_text, Engine};
pub use load::{load_manifest, parse_manifest, LoadError, ManifestLocation, Origin};
pub use rules::{check_content, ContentRule, Finding, RuleContext};
