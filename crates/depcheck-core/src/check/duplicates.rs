//! Cross-section duplicate detection.

use crate::finding::Finding;
use crate::manifest::{Manifest, SectionKind};
use crate::specifier;

/// Find packages in secondary sections that repeat a primary dependency.
///
/// Secondary sections are visited in fixed order, entries in declared order.
/// Duplicates between two secondary sections are not reported.
pub(crate) fn find_duplicates(manifest: &Manifest) -> Vec<Finding> {
    let primary = manifest.section(SectionKind::Dependencies);
    if primary.entries().is_none() {
        return Vec::new();
    }

    let mut findings = Vec::new();
    for kind in SectionKind::SECONDARY {
        let Some(entries) = manifest.section(kind).entries() else {
            continue;
        };
        for entry in entries {
            let Some(primary_spec) = primary.specifier_of(&entry.name) else {
                continue;
            };
            let mismatch = (!specifier::equivalent(primary_spec, &entry.specifier))
                .then_some((primary_spec, entry.specifier.as_str()));
            findings.push(Finding::duplicate(kind, &entry.name, mismatch));
        }
    }
    findings
}
