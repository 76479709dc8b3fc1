use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ImportError, Result};

/// Kind tag of a notebook cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Code,
    Markdown,
    Raw,
    #[serde(other)]
    Other,
}

impl BlockKind {
    pub fn is_code(&self) -> bool {
        matches!(self, BlockKind::Code)
    }
}

/// One content unit of a notebook, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
}

impl Block {
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Code, text)
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Markdown, text)
    }
}

/// A dotted module name such as `nbs.child.baby_module`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DottedName(Vec<String>);

impl DottedName {
    /// Parse a dotted name. Returns `None` for empty names or empty segments.
    pub fn parse(name: &str) -> Option<Self> {
        if name.is_empty() {
            return None;
        }

        let segments: Vec<String> = name.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }

        Some(Self(segments))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn head(&self) -> &str {
        &self.0[0]
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// The enclosing package name, `None` for a top-level name.
    pub fn parent(&self) -> Option<DottedName> {
        if self.0.len() < 2 {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }
}

impl fmt::Display for DottedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// A directory of notebooks importable under its own basename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRoot {
    path: PathBuf,
    name: String,
}

impl PackageRoot {
    /// Bind a package root. The directory must exist; `~` is expanded.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = expand_home(path.as_ref());
        if !path.is_dir() {
            return Err(ImportError::RootNotFound { path });
        }

        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            // "." or "..": name the package after the real directory
            None => path
                .canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
                .ok_or_else(|| ImportError::RootNotFound { path: path.clone() })?,
        };

        Ok(Self { path, name })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Outcome of resolving a dotted name under a package root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedLocation {
    /// A leaf module backed by one notebook.
    Document(PathBuf),
    /// A package backed by its marker file.
    Package(PathBuf),
}

impl ResolvedLocation {
    pub fn path(&self) -> &Path {
        match self {
            ResolvedLocation::Document(p) | ResolvedLocation::Package(p) => p,
        }
    }

    pub fn into_path(self) -> PathBuf {
        match self {
            ResolvedLocation::Document(p) | ResolvedLocation::Package(p) => p,
        }
    }

    pub fn is_package(&self) -> bool {
        matches!(self, ResolvedLocation::Package(_))
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
