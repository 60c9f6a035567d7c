#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

//! Package.json dependency consistency checks.
//!
//! Given a manifest's raw text and the installed-package state next to it,
//! [`validate`] returns the findings for malformed dependency sections,
//! packages repeated across sections, and enforced dependencies that are not
//! installed. This crate has no logging dependency; the CLI owns logging.

pub mod check;
pub mod config;
pub mod error;
pub mod finding;
pub mod manifest;
pub mod snapshot;
pub mod specifier;
pub mod version;

pub use check::{check_manifest, validate, validate_async};
pub use config::{CheckOptions, Config};
pub use error::CheckError;
pub use finding::{codes as finding_codes, Finding, Severity};
pub use manifest::{
    parse_manifest, Manifest, PackageEntry, ParsedManifest, SectionKind, SectionState,
    MANIFEST_FILE_NAME,
};
pub use snapshot::{InMemorySnapshot, InstalledSnapshot, NodeModules, NODE_MODULES};
pub use version::VERSION;
