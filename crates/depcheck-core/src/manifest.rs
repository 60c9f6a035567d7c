//! Package.json parsing and dependency section validation.
//!
//! Each dependency section is classified once, while parsing, into
//! [`SectionState`]. Later stages only ever look at well-shaped sections and
//! read their entries in declared order.

use serde_json::{Map, Value};

use crate::finding::{Finding, Severity};

/// File name of the manifest.
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// A dependency section of the manifest, identified by its role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Dependencies,
    DevDependencies,
    OptionalDependencies,
}

impl SectionKind {
    /// All sections, in the order their shape is validated.
    pub const ALL: [Self; 3] = [
        Self::Dependencies,
        Self::DevDependencies,
        Self::OptionalDependencies,
    ];

    /// Sections checked against the primary section for duplicates.
    pub const SECONDARY: [Self; 2] = [Self::DevDependencies, Self::OptionalDependencies];

    /// Sections whose packages must be installed.
    pub const ENFORCED: [Self; 2] = [Self::Dependencies, Self::DevDependencies];

    /// Key of the section in package.json.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dependencies => "dependencies",
            Self::DevDependencies => "devDependencies",
            Self::OptionalDependencies => "optionalDependencies",
        }
    }

    /// Whether install presence is enforced for this section.
    #[must_use]
    pub const fn is_enforced(&self) -> bool {
        !matches!(self, Self::OptionalDependencies)
    }

    /// Severity of shape problems in this section.
    #[must_use]
    pub const fn shape_severity(&self) -> Severity {
        if self.is_enforced() {
            Severity::Error
        } else {
            Severity::Warn
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `(name, specifier)` pair inside a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    pub name: String,
    pub specifier: String,
}

impl PackageEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, specifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specifier: specifier.into(),
        }
    }
}

/// Classification of one dependency section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionState {
    /// The key is not in the manifest.
    Absent,
    /// The key is present but its value is not an object.
    Malformed(Value),
    /// The section is an object; entries are in declared order.
    Mapping(Vec<PackageEntry>),
}

impl SectionState {
    /// Entries of a well-shaped section, or `None`.
    #[must_use]
    pub fn entries(&self) -> Option<&[PackageEntry]> {
        match self {
            Self::Mapping(entries) => Some(entries),
            Self::Absent | Self::Malformed(_) => None,
        }
    }

    /// Specifier for `name` in a well-shaped section.
    #[must_use]
    pub fn specifier_of(&self, name: &str) -> Option<&str> {
        self.entries()?
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.specifier.as_str())
    }
}

/// The parsed manifest, reduced to its dependency sections.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    dependencies: SectionState,
    dev_dependencies: SectionState,
    optional_dependencies: SectionState,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            dependencies: SectionState::Absent,
            dev_dependencies: SectionState::Absent,
            optional_dependencies: SectionState::Absent,
        }
    }
}

impl Manifest {
    /// State of a section.
    #[must_use]
    pub fn section(&self, kind: SectionKind) -> &SectionState {
        match kind {
            SectionKind::Dependencies => &self.dependencies,
            SectionKind::DevDependencies => &self.dev_dependencies,
            SectionKind::OptionalDependencies => &self.optional_dependencies,
        }
    }

    fn section_mut(&mut self, kind: SectionKind) -> &mut SectionState {
        match kind {
            SectionKind::Dependencies => &mut self.dependencies,
            SectionKind::DevDependencies => &mut self.dev_dependencies,
            SectionKind::OptionalDependencies => &mut self.optional_dependencies,
        }
    }
}

/// Result of parsing manifest text.
#[derive(Debug, Clone)]
pub enum ParsedManifest {
    /// The root is an object. `shape_findings` holds section shape problems.
    Document {
        manifest: Manifest,
        shape_findings: Vec<Finding>,
    },
    /// The text could not be used at all. Holds the single finding to report.
    Unusable(Finding),
}

/// Parse manifest text and validate the shape of its dependency sections.
///
/// Never fails: unparseable text becomes a single finding.
#[must_use]
pub fn parse_manifest(text: &str) -> ParsedManifest {
    let root: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => return ParsedManifest::Unusable(Finding::invalid_json(&e.to_string())),
    };

    let Some(root) = root.as_object() else {
        return ParsedManifest::Unusable(Finding::not_object());
    };

    let mut manifest = Manifest::default();
    let mut shape_findings = Vec::new();

    for kind in SectionKind::ALL {
        *manifest.section_mut(kind) = classify_section(root, kind, &mut shape_findings);
    }

    ParsedManifest::Document {
        manifest,
        shape_findings,
    }
}

fn classify_section(
    root: &Map<String, Value>,
    kind: SectionKind,
    findings: &mut Vec<Finding>,
) -> SectionState {
    let Some(value) = root.get(kind.as_str()) else {
        return SectionState::Absent;
    };

    let Some(obj) = value.as_object() else {
        findings.push(Finding::section_not_object(kind));
        return SectionState::Malformed(value.clone());
    };

    let mut entries = Vec::with_capacity(obj.len());
    for (name, spec) in obj {
        match spec.as_str() {
            Some(spec) => entries.push(PackageEntry::new(name, spec)),
            None => findings.push(Finding::specifier_not_string(kind, name)),
        }
    }
    SectionState::Mapping(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::codes;

    fn document(text: &str) -> (Manifest, Vec<Finding>) {
        match parse_manifest(text) {
            ParsedManifest::Document {
                manifest,
                shape_findings,
            } => (manifest, shape_findings),
            ParsedManifest::Unusable(f) => panic!("unexpected unusable manifest: {}", f.message),
        }
    }

    #[test]
    fn test_absent_sections() {
        let (manifest, findings) = document(r#"{ "name": "test", "version": "1.0.0" }"#);
        assert!(findings.is_empty());
        for kind in SectionKind::ALL {
            assert_eq!(manifest.section(kind), &SectionState::Absent);
        }
    }

    #[test]
    fn test_declared_order_is_kept() {
        let (manifest, _) = document(
            r#"{
                "dependencies": {
                    "zebra": "1.0.0",
                    "apple": "2.0.0",
                    "@scope/mango": "^3.0.0"
                }
            }"#,
        );
        let names: Vec<&str> = manifest
            .section(SectionKind::Dependencies)
            .entries()
            .unwrap()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, ["zebra", "apple", "@scope/mango"]);
    }

    #[test]
    fn test_string_section_is_malformed() {
        let (manifest, findings) = document(r#"{ "dependencies": "not an object" }"#);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "The dependencies property should be an object if present"
        );
        assert!(matches!(
            manifest.section(SectionKind::Dependencies),
            SectionState::Malformed(Value::String(_))
        ));
    }

    #[test]
    fn test_every_non_object_shape_is_malformed() {
        for raw in ["[]", "null", "42", "true", "\"x\""] {
            let text = format!(r#"{{ "devDependencies": {raw} }}"#);
            let (manifest, findings) = document(&text);
            assert_eq!(findings.len(), 1, "shape {raw}");
            assert_eq!(findings[0].code, codes::SECTION_NOT_OBJECT);
            assert!(manifest.section(SectionKind::DevDependencies).entries().is_none());
        }
    }

    #[test]
    fn test_shape_findings_follow_section_order() {
        let (_, findings) = document(
            r#"{
                "optionalDependencies": 1,
                "devDependencies": [],
                "dependencies": "x"
            }"#,
        );
        let sections: Vec<&str> = findings
            .iter()
            .map(|f| f.section.as_deref().unwrap())
            .collect();
        assert_eq!(
            sections,
            ["dependencies", "devDependencies", "optionalDependencies"]
        );
    }

    #[test]
    fn test_non_string_specifier_is_dropped() {
        let (manifest, findings) = document(
            r#"{
                "dependencies": { "good": "^1.0.0", "bad": 123, "also": null }
            }"#,
        );
        let entries = manifest.section(SectionKind::Dependencies).entries().unwrap();
        assert_eq!(entries, [PackageEntry::new("good", "^1.0.0")]);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].code, codes::SPECIFIER_NOT_STRING);
        assert_eq!(
            findings[0].message,
            "dependencies: The version specifier of bad should be a string"
        );
        assert_eq!(findings[1].package.as_deref(), Some("also"));
    }

    #[test]
    fn test_invalid_json_is_unusable() {
        let ParsedManifest::Unusable(finding) = parse_manifest("not valid json {{{") else {
            panic!("expected unusable manifest");
        };
        assert_eq!(finding.code, codes::MANIFEST_INVALID_JSON);
        assert!(finding
            .message
            .starts_with("The package.json file is not valid JSON: "));
    }

    #[test]
    fn test_non_object_root_is_unusable() {
        let ParsedManifest::Unusable(finding) = parse_manifest("[1, 2, 3]") else {
            panic!("expected unusable manifest");
        };
        assert_eq!(finding.code, codes::MANIFEST_NOT_OBJECT);
    }

    #[test]
    fn test_specifier_of() {
        let (manifest, _) = document(r#"{ "dependencies": { "a": "1.2.3" } }"#);
        let deps = manifest.section(SectionKind::Dependencies);
        assert_eq!(deps.specifier_of("a"), Some("1.2.3"));
        assert_eq!(deps.specifier_of("b"), None);
        assert_eq!(
            manifest.section(SectionKind::DevDependencies).specifier_of("a"),
            None
        );
    }

    #[test]
    fn test_section_roles() {
        assert!(!SectionKind::SECONDARY.contains(&SectionKind::Dependencies));
        assert!(SectionKind::DevDependencies.is_enforced());
        assert!(!SectionKind::OptionalDependencies.is_enforced());
        assert_eq!(SectionKind::OptionalDependencies.to_string(), "optionalDependencies");
    }
}
