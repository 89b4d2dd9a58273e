//! `spur inspect` - verify the build output against its manifest.

use std::path::PathBuf;

use spur_cache::{ArtifactManifest, ArtifactStore};
use spur_diagnostics::{codes, Diagnostic, DiagnosticSink, Severity, TerminalRenderer};
use tracing::debug;

use crate::project::load_project;
use crate::{GlobalArgs, InspectArgs, ReportFormat};

/// Runs the `spur inspect` command.
///
/// Every artifact listed in the manifest must be present, carry a valid
/// header and match its recorded checksum. Files the manifest does not list
/// are reported as stale and removed with `--prune`. Returns exit code 1 if
/// any artifact is missing or corrupt.
pub fn run(args: &InspectArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let output_dir = match &args.dir {
        Some(dir) => PathBuf::from(dir),
        None => load_project(global)?.output_dir(),
    };

    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!("   Inspecting {}", output_dir.display());
    }

    let manifest = ArtifactManifest::load_strict(&output_dir)?;
    let store = ArtifactStore::new(&output_dir, &manifest.producer_version);
    let sink = DiagnosticSink::new();

    for (name, entry) in &manifest.artifacts {
        match store.read_artifact(name) {
            Some(payload) if manifest.verify(name, &payload) => {
                debug!(artifact = %name, bytes = entry.len, "artifact verified");
            }
            Some(_) => sink.emit(
                Diagnostic::error(codes::CORRUPT_ARTIFACT, "artifact does not match the manifest")
                    .with_subject(name.as_str())
                    .with_note(format!("manifest records checksum {}", entry.checksum)),
            ),
            None => sink.emit(
                Diagnostic::error(codes::CORRUPT_ARTIFACT, "artifact is missing or unreadable")
                    .with_subject(name.as_str())
                    .with_note(format!("expected at {}", store.artifact_path(name).display())),
            ),
        }
    }

    let stale: Vec<_> = store
        .list()?
        .into_iter()
        .filter(|name| !manifest.artifacts.contains_key(name))
        .collect();
    for name in &stale {
        sink.emit(
            Diagnostic::warning(codes::STALE_ARTIFACT, "artifact is not part of the last build")
                .with_subject(name.as_str())
                .with_help("run `spur inspect --prune` to remove it"),
        );
    }
    if args.prune && !stale.is_empty() {
        let removed = store.prune(&manifest)?;
        if !global.quiet && args.format == ReportFormat::Text {
            eprintln!("     Pruned {removed} stale artifact(s)");
        }
    }

    let diagnostics = sink.diagnostics();
    match args.format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(global.color);
            for diag in &diagnostics {
                eprint!("{}", renderer.render(diag));
            }
            if !global.quiet {
                let warnings = diagnostics
                    .iter()
                    .filter(|d| d.severity == Severity::Warning)
                    .count();
                eprintln!(
                    "   Result: {} artifact(s), {} error(s), {} warning(s)",
                    manifest.artifacts.len(),
                    sink.error_count(),
                    warnings
                );
            }
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&diagnostics)?);
        }
    }

    if sink.has_errors() {
        Ok(1)
    } else {
        Ok(0)
    }
}
