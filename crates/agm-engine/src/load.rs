//! # Manifest Loading
//!
//! Reads one manifest from disk as a scoped acquisition (open, read fully,
//! release) and parses it. Nothing is retried.
//!
//! The format follows the file extension: `.yaml`/`.yml` manifests are
//! parsed as YAML, everything else as JSON. Both produce the same JSON value
//! tree, so schema and content validation are format-agnostic.

use std::io;
use std::path::{Path, PathBuf};

use agm_core::Manifest;
use thiserror::Error;

/// How a manifest location entered the run.
///
/// Ordered so that `Explicit` sorts before `Discovered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Origin {
    /// Named by the caller. A missing file is a failure.
    Explicit,
    /// Found by scanning an agents directory. A missing file is skipped.
    Discovered,
}

/// One manifest to validate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManifestLocation {
    /// Path to the manifest file.
    pub path: PathBuf,
    /// How the location was obtained.
    pub origin: Origin,
}

impl ManifestLocation {
    /// A manifest the caller asked for by path.
    pub fn explicit(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            origin: Origin::Explicit,
        }
    }

    /// A manifest found during directory discovery.
    pub fn discovered(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            origin: Origin::Discovered,
        }
    }

    /// Identifier used for this manifest in diagnostics and reports.
    pub fn id(&self) -> String {
        self.path.display().to_string()
    }
}

/// Failure to obtain a parsed manifest.
#[derive(Error, Debug)]
pub enum LoadError {
    /// No file exists at the path.
    #[error("manifest file does not exist")]
    NotFound,

    /// The file exists but could not be read.
    #[error("cannot read manifest: {0}")]
    Read(#[source] io::Error),

    /// The text is not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The text is not valid YAML.
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::NotFound {
            Self::NotFound
        } else {
            Self::Read(e)
        }
    }
}

/// Whether `path` names a YAML manifest.
fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

/// Parse manifest text, choosing the format from `path`'s extension.
pub fn parse_manifest(path: &Path, text: &str) -> Result<Manifest, LoadError> {
    let value: serde_json::Value = if is_yaml(path) {
        serde_yaml::from_str(text)?
    } else {
        serde_json::from_str(text)?
    };
    Ok(Manifest::new(value))
}

/// Read and parse the manifest at `path`.
pub fn load_manifest(path: &Path) -> Result<Manifest, LoadError> {
    let text = std::fs::read_to_string(path)?;
    parse_manifest(path, &text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_manifest(&dir.path().join("agent.json")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound), "{err}");
        assert_eq!(err.to_string(), "manifest file does not exist");
    }

    #[test]
    fn test_directory_is_unreadable_not_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_manifest(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Read(_)), "{err}");
    }

    #[test]
    fn test_json_parse_error_carries_parser_message() {
        let err = parse_manifest(Path::new("agent.json"), "{ \"name\": ").unwrap_err();
        assert!(matches!(err, LoadError::InvalidJson(_)));
        assert!(err.to_string().starts_with("invalid JSON: "), "{err}");
    }

    #[test]
    fn test_yaml_by_extension() {
        let manifest = parse_manifest(
            Path::new("agents/a/agent.yaml"),
            "name: Example\nuse_cases:\n  - one\n",
        )
        .unwrap();
        assert_eq!(manifest.text("name"), Some("Example"));
        assert_eq!(manifest.array("use_cases").map(Vec::len), Some(1));
    }

    #[test]
    fn test_yaml_text_with_json_extension_is_rejected() {
        let err = parse_manifest(Path::new("agent.json"), "name: Example\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidJson(_)));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse_manifest(Path::new("agent.yml"), "name: [unclosed").unwrap_err();
        assert!(matches!(err, LoadError::InvalidYaml(_)), "{err}");
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.json");
        std::fs::write(&path, br#"{"name": "Example"}"#).unwrap();
        assert_eq!(load_manifest(&path).unwrap().text("name"), Some("Example"));
    }

    #[test]
    fn test_location_constructors() {
        let explicit = ManifestLocation::explicit("agents/a/agent.json");
        assert_eq!(explicit.origin, Origin::Explicit);
        assert_eq!(explicit.id(), "agents/a/agent.json");
        assert_eq!(
            ManifestLocation::discovered("x").origin,
            Origin::Discovered
        );
    }
}
