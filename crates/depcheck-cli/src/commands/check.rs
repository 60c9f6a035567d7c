//! `depcheck` check command implementation.
//!
//! Reads package.json, runs the consistency check against the sibling
//! `node_modules/`, and prints the findings.
//!
//! Exit codes: 0 when there are no findings, 1 when there are findings,
//! 2 when the check itself could not run.

use depcheck_core::version::REPORT_SCHEMA_VERSION;
use depcheck_core::{validate, CheckOptions, Config, Finding, Severity};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// CLI-level error codes.
pub mod codes {
    pub const MANIFEST_READ_FAILED: &str = "MANIFEST_READ_FAILED";
    pub const OPTIONS_INVALID: &str = "OPTIONS_INVALID";
}

const EXIT_FINDINGS: i32 = 1;
const EXIT_ERROR: i32 = 2;

/// Check result for JSON output (locked format: { ok, check, error? }).
#[derive(Serialize)]
struct CheckJsonResult {
    ok: bool,
    check: Option<CheckReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorInfo>,
}

#[derive(Serialize)]
struct CheckReport {
    schema_version: u32,
    manifest: String,
    findings: Vec<Finding>,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
}

/// Run the check command.
pub fn run(
    config: &Config,
    manifest: Option<&Path>,
    options_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let manifest_path = resolve_manifest_path(config, manifest);
    tracing::debug!(manifest = %manifest_path.display(), "checking manifest");

    let options = match options_path {
        Some(path) => match read_options(&config.cwd.join(path)) {
            Ok(options) => options,
            Err(message) => fail(json, codes::OPTIONS_INVALID, message)?,
        },
        None => CheckOptions::default(),
    };

    let text = match std::fs::read_to_string(&manifest_path) {
        Ok(text) => text,
        Err(e) => fail(
            json,
            codes::MANIFEST_READ_FAILED,
            format!("Failed to read {}: {e}", manifest_path.display()),
        )?,
    };

    let findings = match validate(&manifest_path, &text, &options) {
        Ok(findings) => findings,
        Err(e) => fail(json, e.code(), e.to_string())?,
    };
    tracing::debug!(count = findings.len(), "check complete");

    let has_findings = !findings.is_empty();
    if json {
        let result = CheckJsonResult {
            ok: !has_findings,
            check: Some(CheckReport {
                schema_version: REPORT_SCHEMA_VERSION,
                manifest: manifest_path.to_string_lossy().into_owned(),
                findings,
            }),
            error: None,
        };
        println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
    } else {
        print_human(&manifest_path, &findings);
    }

    if has_findings {
        std::process::exit(EXIT_FINDINGS);
    }
    Ok(())
}

fn resolve_manifest_path(config: &Config, manifest: Option<&Path>) -> PathBuf {
    match manifest {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => config.cwd.join(path),
        None => config.default_manifest_path(),
    }
}

fn read_options(path: &Path) -> std::result::Result<CheckOptions, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read options {}: {e}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| format!("Invalid options JSON in {}: {e}", path.display()))?;
    CheckOptions::from_json(&value)
        .ok_or_else(|| format!("Options in {} must be a JSON object", path.display()))
}

/// Report an error that prevented the check from running and exit.
fn fail<T>(json: bool, code: &'static str, message: String) -> Result<T> {
    tracing::debug!(code, %message, "check failed");
    if json {
        let result = CheckJsonResult {
            ok: false,
            check: None,
            error: Some(ErrorInfo { code, message }),
        };
        println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
    } else {
        eprintln!("error: {code}: {message}");
    }
    std::process::exit(EXIT_ERROR);
}

fn print_human(manifest_path: &Path, findings: &[Finding]) {
    println!("Checked {}", manifest_path.display());

    if findings.is_empty() {
        println!("No issues found.");
        return;
    }

    for finding in findings {
        let sev = match finding.severity {
            Severity::Error => "ERROR",
            Severity::Warn => "WARN ",
        };
        println!("[{sev}] {} {}", finding.code, finding.message);
    }

    let count = |sev: Severity| findings.iter().filter(|f| f.severity == sev).count();
    println!();
    println!(
        "Findings: {} errors, {} warnings",
        count(Severity::Error),
        count(Severity::Warn)
    );
}
