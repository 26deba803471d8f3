//! # agm-cli — Agent Manifest Validator Command Line
//!
//! Provides the `agm` command. Argument parsing, repository-root
//! resolution, manifest discovery and console rendering live here; every
//! validation decision is delegated to `agm-schema` and `agm-engine`.
//!
//! ```bash
//! agm validate agents/web-scraper
//! agm validate --all
//! agm validate --all --format json
//! agm rules
//! ```

pub mod rules;
pub mod validate;

use std::path::{Path, PathBuf};

use agm_schema::SCHEMA_FILE_NAME;

/// Directory under the repository root holding one subdirectory per agent.
pub const AGENTS_DIR: &str = "agents";

/// Output format for subcommands that print results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Resolve a path that may be relative to the repository root.
///
/// Absolute paths are returned as-is. A relative path that exists under
/// `repo_root` resolves there; otherwise it is left relative to the
/// current directory.
pub fn resolve_path(path: &Path, repo_root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let repo_relative = repo_root.join(path);
    if repo_relative.exists() {
        repo_relative
    } else {
        path.to_path_buf()
    }
}

/// Walk up from `start` to the first directory that looks like a
/// repository root: one holding the manifest schema or an `agents/`
/// directory.
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        if dir.join(SCHEMA_FILE_NAME).is_file() || dir.join(AGENTS_DIR).is_dir() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}

/// Display `path` relative to `repo_root` when it lies beneath it.
pub fn display_path(path: &Path, repo_root: &Path) -> String {
    path.strip_prefix(repo_root)
        .unwrap_or(path)
        .display()
        .to_string()
}
