//! # Validate Subcommand
//!
//! Validates one manifest (`agm validate PATH`) or every manifest under the
//! agents directory (`agm validate --all`). Both modes build a list of
//! [`ManifestLocation`]s and hand it to [`validate_locations`]; this module
//! only decides what to validate and how to print the outcome.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use agm_core::{DiagnosticCategory, Report, RunResult, MANIFEST_FILE_NAME};
use agm_engine::{validate_locations, ManifestLocation};
use agm_schema::{default_schema_path, SchemaValidator};

use crate::{display_path, resolve_path, OutputFormat, AGENTS_DIR};

/// Arguments for the `agm validate` subcommand.
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Manifest file to validate. A directory means its agent.json.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Validate every agent under the agents directory.
    #[arg(long)]
    pub all: bool,

    /// Schema document to validate against.
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Directory scanned by --all.
    #[arg(long, value_name = "DIR", requires = "all")]
    pub agents_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when every manifest passed, 1 when any failed,
/// 2 when no manifest was selected. A schema that cannot be loaded or an
/// agents directory that cannot be scanned is an error.
pub fn run_validate(args: &ValidateArgs, repo_root: &Path) -> Result<u8> {
    if !args.all && args.path.is_none() {
        println!("Usage: agm validate [--all] [PATH]");
        return Ok(2);
    }

    let schema_path = args.schema.as_deref().map_or_else(
        || default_schema_path(repo_root),
        |p| resolve_path(p, repo_root),
    );
    let validator = SchemaValidator::from_file(&schema_path).with_context(|| {
        format!("failed to load manifest schema {}", schema_path.display())
    })?;
    tracing::info!(
        schema = %schema_path.display(),
        schema_id = validator.schema_id().unwrap_or("<none>"),
        "loaded manifest schema"
    );

    let locations = collect_locations(args, repo_root)?;
    let result = validate_locations(&validator, &locations);

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&result, repo_root)?),
        OutputFormat::Json => println!("{}", result.to_json_pretty()?),
    }

    Ok(result.exit_code())
}

/// Build the manifest locations selected by `args`.
///
/// An explicit path and a discovered manifest naming the same file are
/// validated once, as explicit.
fn collect_locations(args: &ValidateArgs, repo_root: &Path) -> Result<Vec<ManifestLocation>> {
    let mut locations = Vec::new();

    if let Some(ref path) = args.path {
        let resolved = resolve_path(path, repo_root);
        let manifest = if resolved.is_dir() {
            resolved.join(MANIFEST_FILE_NAME)
        } else {
            resolved
        };
        locations.push(ManifestLocation::explicit(manifest));
    }

    if args.all {
        let agents_dir = args.agents_dir.as_deref().map_or_else(
            || repo_root.join(AGENTS_DIR),
            |p| resolve_path(p, repo_root),
        );
        locations.extend(
            discover_manifests(&agents_dir)?
                .into_iter()
                .map(ManifestLocation::discovered),
        );
    }

    locations.sort_by(|a, b| (&a.path, a.origin).cmp(&(&b.path, b.origin)));
    locations.dedup_by(|later, kept| later.path == kept.path);
    Ok(locations)
}

/// Find `agent.json` in each immediate subdirectory of `agents_dir`.
///
/// Subdirectories without a manifest are skipped. A missing or unreadable
/// agents directory is an error.
pub fn discover_manifests(agents_dir: &Path) -> Result<Vec<PathBuf>> {
    if !agents_dir.is_dir() {
        bail!("agents directory not found: {}", agents_dir.display());
    }

    let entries = std::fs::read_dir(agents_dir)
        .with_context(|| format!("failed to read agents directory {}", agents_dir.display()))?;

    let mut found = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %agents_dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let manifest = path.join(MANIFEST_FILE_NAME);
        if manifest.is_file() {
            found.push(manifest);
        } else {
            tracing::debug!(agent = %path.display(), "no agent.json; skipping");
        }
    }
    found.sort();
    tracing::debug!(dir = %agents_dir.display(), count = found.len(), "discovered manifests");
    Ok(found)
}

/// Human-readable rendering of a run: one block per manifest, then the
/// summary line.
pub fn render_text(result: &RunResult, repo_root: &Path) -> Result<String> {
    let mut lines = Vec::new();
    for report in &result.reports {
        lines.extend(render_report(report, repo_root)?);
    }
    lines.push(summary_line(result));

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

fn render_report(report: &Report, repo_root: &Path) -> Result<Vec<String>> {
    let shown = display_path(Path::new(&report.manifest), repo_root);
    if report.passed() {
        return Ok(vec![format!("OK: {shown}")]);
    }

    let mut lines = vec![format!("FAIL: {shown}")];
    lines.extend(report.diagnostics.iter().map(|d| format!("  {d}")));

    let structural: Vec<_> = report.by_category(DiagnosticCategory::Schema).collect();
    if !structural.is_empty() {
        let dump = serde_json::to_string_pretty(&structural)
            .context("failed to render structural errors")?;
        lines.push("  Structural errors:".to_string());
        lines.extend(dump.lines().map(|l| format!("  {l}")));
    }
    Ok(lines)
}

/// Final line of a text run.
pub fn summary_line(result: &RunResult) -> String {
    if result.total() == 0 {
        "No agent manifests found.".to_string()
    } else if result.has_error() {
        format!(
            "{} of {} agent manifest(s) failed validation.",
            result.failed_count(),
            result.total()
        )
    } else {
        "All agent manifests are valid!".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agm_core::Diagnostic;
    use agm_schema::SCHEMA_FILE_NAME;
    use serde_json::json;

    fn test_repo_root() -> PathBuf {
        let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        dir.pop(); // crates
        dir.pop(); // repo root
        dir
    }

    /// A scratch repository holding a copy of the real schema.
    fn scratch_repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::copy(
            test_repo_root().join(SCHEMA_FILE_NAME),
            dir.path().join(SCHEMA_FILE_NAME),
        )
        .unwrap();
        dir
    }

    fn write_agent(root: &Path, agent: &str, body: &str) -> PathBuf {
        let dir = root.join(AGENTS_DIR).join(agent);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(MANIFEST_FILE_NAME);
        std::fs::write(&path, body).unwrap();
        path
    }

    fn good_manifest() -> serde_json::Value {
        json!({
            "name": "Inbox Triage",
            "version": "1.2.0",
            "long_description": "Sorts an email inbox into actionable, reference, and ignorable messages.",
            "docker_image_name": "agents/inbox-triage",
            "docker_run_instructions": "Provide IMAP credentials through the environment, then start the agent: docker run --rm --env-file .env agents/inbox-triage:1.2.0"
        })
    }

    #[test]
    fn discover_manifests_finds_shipped_agents() {
        let files = discover_manifests(&test_repo_root().join(AGENTS_DIR)).unwrap();
        assert!(files.len() >= 2, "found {files:?}");
        assert!(files.iter().all(|f| f.ends_with(MANIFEST_FILE_NAME)));
    }

    #[test]
    fn discover_manifests_rejects_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_manifests(&dir.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("agents directory not found"), "{err}");
    }

    #[test]
    fn discover_manifests_rejects_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("agents");
        std::fs::write(&file, b"not a directory").unwrap();
        assert!(discover_manifests(&file).is_err());
    }

    #[test]
    fn discover_manifests_is_sorted_and_skips_incomplete_agents() {
        let dir = tempfile::tempdir().unwrap();
        write_agent(dir.path(), "zeta", "{}");
        write_agent(dir.path(), "alpha", "{}");
        std::fs::create_dir_all(dir.path().join(AGENTS_DIR).join("empty")).unwrap();
        std::fs::write(dir.path().join(AGENTS_DIR).join("README.md"), b"notes").unwrap();

        let files = discover_manifests(&dir.path().join(AGENTS_DIR)).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("alpha/agent.json"));
        assert!(files[1].ends_with("zeta/agent.json"));
    }

    #[test]
    fn collect_locations_resolves_directory_to_manifest() {
        let repo = scratch_repo();
        let manifest = write_agent(repo.path(), "a", "{}");
        let args = ValidateArgs {
            path: Some(PathBuf::from("agents/a")),
            ..Default::default()
        };
        let locations = collect_locations(&args, repo.path()).unwrap();
        assert_eq!(locations, vec![ManifestLocation::explicit(manifest)]);
    }

    #[test]
    fn collect_locations_prefers_explicit_over_discovered() {
        let repo = scratch_repo();
        let a = write_agent(repo.path(), "a", "{}");
        let b = write_agent(repo.path(), "b", "{}");
        let args = ValidateArgs {
            path: Some(b.clone()),
            all: true,
            ..Default::default()
        };
        let locations = collect_locations(&args, repo.path()).unwrap();
        assert_eq!(
            locations,
            vec![
                ManifestLocation::discovered(a),
                ManifestLocation::explicit(b)
            ]
        );
    }

    #[test]
    fn no_mode_selected_is_operational_error() {
        let repo = scratch_repo();
        let code = run_validate(&ValidateArgs::default(), repo.path()).unwrap();
        assert_eq!(code, 2);
    }

    #[test]
    fn unloadable_schema_is_an_error() {
        let repo = tempfile::tempdir().unwrap();
        write_agent(repo.path(), "a", &good_manifest().to_string());
        let args = ValidateArgs {
            all: true,
            ..Default::default()
        };
        let err = run_validate(&args, repo.path()).unwrap_err();
        assert!(
            format!("{err:#}").contains("failed to load manifest schema"),
            "{err:#}"
        );
    }

    #[test]
    fn single_valid_manifest_exits_zero() {
        let repo = scratch_repo();
        write_agent(repo.path(), "inbox", &good_manifest().to_string());
        let args = ValidateArgs {
            path: Some(PathBuf::from("agents/inbox")),
            ..Default::default()
        };
        assert_eq!(run_validate(&args, repo.path()).unwrap(), 0);
    }

    #[test]
    fn missing_explicit_manifest_exits_one() {
        let repo = scratch_repo();
        let args = ValidateArgs {
            path: Some(repo.path().join("agents/ghost/agent.json")),
            ..Default::default()
        };
        assert_eq!(run_validate(&args, repo.path()).unwrap(), 1);
    }

    #[test]
    fn missing_agents_dir_is_an_error() {
        let repo = scratch_repo();
        let args = ValidateArgs {
            all: true,
            ..Default::default()
        };
        let err = run_validate(&args, repo.path()).unwrap_err();
        assert!(
            format!("{err:#}").contains("agents directory not found"),
            "{err:#}"
        );
    }

    #[test]
    fn mistyped_agents_dir_is_an_error() {
        let repo = scratch_repo();
        write_agent(repo.path(), "inbox", &good_manifest().to_string());
        let args = ValidateArgs {
            all: true,
            agents_dir: Some(PathBuf::from("agnets")),
            ..Default::default()
        };
        assert!(run_validate(&args, repo.path()).is_err());
    }

    #[derive(clap::Parser, Debug)]
    struct ValidateCommand {
        #[command(flatten)]
        args: ValidateArgs,
    }

    #[test]
    fn agents_dir_requires_all() {
        use clap::Parser;

        let err = ValidateCommand::try_parse_from(["validate", "--agents-dir", "agents"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let parsed =
            ValidateCommand::try_parse_from(["validate", "--all", "--agents-dir", "agents"])
                .unwrap();
        assert!(parsed.args.all);
        assert_eq!(parsed.args.agents_dir, Some(PathBuf::from("agents")));
    }

    #[test]
    fn mixed_agents_directory_fails_the_run() {
        let repo = scratch_repo();
        write_agent(repo.path(), "good", &good_manifest().to_string());
        write_agent(repo.path(), "malformed", "{\"name\": ");
        let mut review = good_manifest();
        review["deployment_status"] = json!("review");
        review["privacy_considerations"] =
            json!("Message bodies are processed in memory and never stored.");
        review["use_cases"] = json!([]);
        write_agent(repo.path(), "review", &review.to_string());

        let args = ValidateArgs {
            all: true,
            ..Default::default()
        };
        assert_eq!(run_validate(&args, repo.path()).unwrap(), 1);

        let locations = collect_locations(&args, repo.path()).unwrap();
        let validator = SchemaValidator::from_repo_root(repo.path()).unwrap();
        let result = validate_locations(&validator, &locations);
        let text = render_text(&result, repo.path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "OK: agents/good/agent.json");
        assert_eq!(lines[1], "FAIL: agents/malformed/agent.json");
        assert!(lines[2].starts_with("  [load] invalid JSON: "), "{text}");
        assert_eq!(lines[3], "FAIL: agents/review/agent.json");
        assert_eq!(
            lines[4],
            "  [content] /use_cases: use_cases must not be empty for status review."
        );
        assert_eq!(lines[5], "2 of 3 agent manifest(s) failed validation.");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn structural_errors_are_dumped_as_json() {
        let id = "agents/x/agent.json";
        let report = Report::with_diagnostics(
            id,
            vec![Diagnostic::schema(
                id,
                &agm_core::StructuralError {
                    path: String::new(),
                    schema_path: "/required".to_string(),
                    message: "\"name\" is a required property".to_string(),
                },
            )],
        );
        let lines = render_report(&report, Path::new("/repo")).unwrap();
        assert_eq!(lines[0], "FAIL: agents/x/agent.json");
        assert_eq!(
            lines[1],
            "  [schema] (root): \"name\" is a required property (violates /required)"
        );
        assert_eq!(lines[2], "  Structural errors:");
        let dump: String = lines[3..]
            .iter()
            .map(|l| l.trim_start())
            .collect::<Vec<_>>()
            .join("\n");
        let parsed: serde_json::Value = serde_json::from_str(&dump).unwrap();
        assert_eq!(parsed[0]["category"], "schema");
        assert_eq!(parsed[0]["field"], "");
        assert_eq!(parsed[0]["constraint"], "/required");
    }

    #[test]
    fn summary_lines() {
        assert_eq!(summary_line(&RunResult::new()), "No agent manifests found.");
        let ok: RunResult = vec![Report::new("a")].into_iter().collect();
        assert_eq!(summary_line(&ok), "All agent manifests are valid!");
    }
}
