//! Maps dotted module names to notebooks and package markers on disk.
//!
//! Nothing here is cached: every call checks the filesystem again, so
//! notebooks added or removed between imports are picked up on the next
//! lookup.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Conventions;
use crate::error::{ImportError, Result};
use crate::types::{DottedName, PackageRoot, ResolvedLocation};

#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PackageRoot,
    conventions: Conventions,
}

impl PathResolver {
    pub fn new(root: PackageRoot, conventions: Conventions) -> Self {
        Self { root, conventions }
    }

    pub fn root(&self) -> &PackageRoot {
        &self.root
    }

    /// Resolve `fullname` to a notebook or a package marker.
    ///
    /// A notebook wins over a same-named package directory.
    pub fn resolve(&self, fullname: &str) -> Result<ResolvedLocation> {
        let name = self.check_name(fullname)?;
        let (document, marker) = self.candidates(&name);

        if let Some(document) = document {
            if document.is_file() {
                tracing::debug!(module = fullname, path = %document.display(), "resolved notebook");
                return Ok(ResolvedLocation::Document(document));
            }
        }

        if marker.is_file() {
            tracing::debug!(module = fullname, path = %marker.display(), "resolved package");
            return Ok(ResolvedLocation::Package(marker));
        }

        Err(ImportError::NotFound {
            name: fullname.to_string(),
            path: marker,
        })
    }

    /// Only the root package itself is flagged here; subpackages are found
    /// through their marker files during finder resolution.
    pub fn is_package(&self, fullname: &str) -> bool {
        fullname == self.root.name()
    }

    /// Child directories of `dir` that are packages themselves.
    ///
    /// A package directory that cannot be listed is an error, not an empty
    /// package.
    pub fn submodule_search(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|e| ImportError::UnreadableSource {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let found = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| !self.conventions.is_hidden(&entry.file_name().to_string_lossy()))
            .map(|entry| entry.path())
            .filter(|path| path.is_dir() && path.join(&self.conventions.marker_file).is_file())
            .collect();
        Ok(found)
    }

    fn check_name(&self, fullname: &str) -> Result<DottedName> {
        let invalid = || ImportError::InvalidModule {
            name: fullname.to_string(),
            package: self.root.name().to_string(),
        };

        let name = DottedName::parse(fullname).ok_or_else(invalid)?;
        if name.head() != self.root.name() {
            return Err(invalid());
        }
        Ok(name)
    }

    /// Candidate notebook (absent for the root package) and marker paths.
    fn candidates(&self, name: &DottedName) -> (Option<PathBuf>, PathBuf) {
        let rest = &name.segments()[1..];

        let Some((last, parents)) = rest.split_last() else {
            return (None, self.root.path().join(&self.conventions.marker_file));
        };

        let dir = parents
            .iter()
            .fold(self.root.path().to_path_buf(), |acc, segment| acc.join(segment));
        let document = dir.join(self.conventions.document_file(last));
        let marker = dir.join(last).join(&self.conventions.marker_file);

        (Some(document), marker)
    }
}
