use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "nbimport.toml";

/// File naming and directive conventions shared by the loader and the converter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Conventions {
    /// Extension of notebook documents, without the dot.
    pub document_extension: String,
    /// Extension of converted source files, without the dot.
    pub source_extension: String,
    /// File whose presence makes a directory a package.
    pub marker_file: String,
    /// Notebook name that tree conversion never converts.
    pub entry_point: String,
    /// Leading character of a line directive; doubled at block start it marks a cell directive.
    pub directive_sigil: char,
    pub hidden_prefix: String,
    /// Directories starting with this prefix are skipped by tree conversion.
    pub reserved_prefix: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            document_extension: "ipynb".to_string(),
            source_extension: "py".to_string(),
            marker_file: "__init__.py".to_string(),
            entry_point: "application.ipynb".to_string(),
            directive_sigil: '%',
            hidden_prefix: ".".to_string(),
            reserved_prefix: "__".to_string(),
        }
    }
}

impl Conventions {
    pub fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == self.document_extension)
    }

    pub fn is_hidden(&self, name: &str) -> bool {
        name.starts_with(&self.hidden_prefix)
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        name.starts_with(&self.reserved_prefix)
    }

    pub fn document_file(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.document_extension)
    }

    pub fn source_file(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.source_extension)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Drop directive lines and cells instead of handing them to a shell transformer.
    pub strip_directives: bool,
    pub conventions: Conventions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strip_directives: true,
            conventions: Conventions::default(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Load an explicit config file, else `nbimport.toml` in `dir` if present, else defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading config");
            return Self::load(&candidate);
        }

        Ok(Self::default())
    }
}
