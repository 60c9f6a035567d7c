//! Manifest consistency check.
//!
//! Runs the stages in a fixed order and concatenates their findings:
//!
//! 1. section shape (section declaration order)
//! 2. duplicates against `dependencies` (`devDependencies`, then
//!    `optionalDependencies`; declared order within each)
//! 3. missing installs (`dependencies`, then `devDependencies`; declared
//!    order within each)
//!
//! An empty result is a successful check. Errors are reserved for failures
//! of the installed-package snapshot.

mod duplicates;
mod installs;

use std::path::{Path, PathBuf};

use crate::config::CheckOptions;
use crate::error::CheckError;
use crate::finding::Finding;
use crate::manifest::{parse_manifest, ParsedManifest};
use crate::snapshot::{InstalledSnapshot, NodeModules};

/// Check manifest text against a snapshot.
///
/// # Errors
/// Returns an error only if the snapshot fails.
pub fn check_manifest(
    manifest_text: &str,
    snapshot: &dyn InstalledSnapshot,
    _options: &CheckOptions,
) -> Result<Vec<Finding>, CheckError> {
    let (manifest, mut findings) = match parse_manifest(manifest_text) {
        ParsedManifest::Document {
            manifest,
            shape_findings,
        } => (manifest, shape_findings),
        ParsedManifest::Unusable(finding) => return Ok(vec![finding]),
    };

    findings.extend(duplicates::find_duplicates(&manifest));
    findings.extend(installs::find_missing(&manifest, snapshot)?);
    Ok(findings)
}

/// Check a manifest against the `node_modules/` directory next to it.
///
/// `manifest_path` is only used to locate `node_modules/`; the manifest is
/// not read from disk.
///
/// # Errors
/// Returns an error if `node_modules` cannot be inspected.
pub fn validate(
    manifest_path: &Path,
    manifest_text: &str,
    options: &CheckOptions,
) -> Result<Vec<Finding>, CheckError> {
    let snapshot = NodeModules::for_manifest(manifest_path)?;
    check_manifest(manifest_text, &snapshot, options)
}

/// Async form of [`validate`].
///
/// The filesystem lookups run on tokio's blocking pool.
///
/// # Errors
/// Returns an error if `node_modules` cannot be inspected or the blocking
/// task does not complete.
pub async fn validate_async(
    manifest_path: PathBuf,
    manifest_text: String,
    options: CheckOptions,
) -> Result<Vec<Finding>, CheckError> {
    tokio::task::spawn_blocking(move || validate(&manifest_path, &manifest_text, &options))
        .await
        .map_err(|e| CheckError::Task(e.to_string()))?
}
