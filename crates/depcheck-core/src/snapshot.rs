//! Installed-package snapshots.
//!
//! The check only ever asks a snapshot whether a package name is present.
//! Version compatibility of installed packages is not inspected.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::CheckError;

/// Name of the installed-package directory next to the manifest.
pub const NODE_MODULES: &str = "node_modules";

/// A view of which packages are physically installed.
pub trait InstalledSnapshot {
    /// Whether `name` is installed.
    fn is_installed(&self, name: &str) -> Result<bool, CheckError>;
}

/// Snapshot backed by a `node_modules/` directory.
///
/// A package counts as installed when `node_modules/<name>` is a directory
/// (symlinked directories included). A missing `node_modules/` means nothing
/// is installed.
#[derive(Debug, Clone)]
pub struct NodeModules {
    root: PathBuf,
    exists: bool,
}

impl NodeModules {
    /// Open the `node_modules/` directory next to a manifest.
    ///
    /// # Errors
    /// Returns an error if `node_modules` exists but is not a directory or
    /// cannot be inspected.
    pub fn for_manifest(manifest_path: &Path) -> Result<Self, CheckError> {
        let dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));
        Self::open(dir.join(NODE_MODULES))
    }

    /// Open a `node_modules/` directory.
    ///
    /// # Errors
    /// Returns an error if the path exists but is not a directory or cannot
    /// be inspected.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CheckError> {
        let root = root.into();
        let exists = match fs::metadata(&root) {
            Ok(meta) if meta.is_dir() => true,
            Ok(_) => return Err(CheckError::SnapshotNotDirectory { path: root }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => return Err(CheckError::snapshot_read(root, e)),
        };
        Ok(Self { root, exists })
    }

    /// Root directory of this snapshot.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl InstalledSnapshot for NodeModules {
    fn is_installed(&self, name: &str) -> Result<bool, CheckError> {
        if !self.exists || !is_valid_package_dir_name(name) {
            return Ok(false);
        }

        let path = self.root.join(name);
        match fs::metadata(&path) {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CheckError::snapshot_read(path, e)),
        }
    }
}

/// Snapshot holding a fixed set of installed names.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshot {
    installed: HashSet<String>,
}

impl InMemorySnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a package as installed.
    #[must_use]
    pub fn with_package(mut self, name: impl Into<String>) -> Self {
        self.installed.insert(name.into());
        self
    }
}

impl<S: Into<String>> FromIterator<S> for InMemorySnapshot {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            installed: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl InstalledSnapshot for InMemorySnapshot {
    fn is_installed(&self, name: &str) -> Result<bool, CheckError> {
        Ok(self.installed.contains(name))
    }
}

/// Whether `name` maps to a directory directly under `node_modules/`.
///
/// Accepts `name` and `@scope/name`. Rejects anything that could leave the
/// directory.
fn is_valid_package_dir_name(name: &str) -> bool {
    let segment_ok = |s: &str| !s.is_empty() && s != "." && s != ".." && !s.contains('\\');

    if name.starts_with('/') || name.contains(':') {
        return false;
    }

    match name.split_once('/') {
        None => segment_ok(name) && !name.starts_with('@'),
        Some((scope, pkg)) => {
            scope.len() > 1
                && scope.starts_with('@')
                && segment_ok(scope)
                && segment_ok(pkg)
                && !pkg.contains('/')
        }
    }
}
