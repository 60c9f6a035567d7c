//! Installation presence checks.

use crate::error::CheckError;
use crate::finding::Finding;
use crate::manifest::{Manifest, SectionKind};
use crate::snapshot::InstalledSnapshot;

/// Report enforced dependencies that are not installed.
///
/// Only `dependencies` and `devDependencies` are checked; optional
/// dependencies may be missing without a finding.
pub(crate) fn find_missing(
    manifest: &Manifest,
    snapshot: &dyn InstalledSnapshot,
) -> Result<Vec<Finding>, CheckError> {
    let mut findings = Vec::new();
    for kind in SectionKind::ENFORCED {
        let Some(entries) = manifest.section(kind).entries() else {
            continue;
        };
        for entry in entries {
            if !snapshot.is_installed(&entry.name)? {
                findings.push(Finding::not_installed(kind, &entry.name, &entry.specifier));
            }
        }
    }
    Ok(findings)
}
