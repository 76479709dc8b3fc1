use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::EvalError;
use crate::types::DottedName;

use super::Loader;

/// The runtime that actually evaluates module source.
///
/// The host owns module namespaces; `evaluate` runs `source` inside the
/// namespace it created for `module`. Loaders hold no locks while the host
/// evaluates, so a module may import its siblings from its own source.
pub trait Host {
    fn evaluate(&mut self, source: &str, module: &Module) -> Result<(), EvalError>;
}

/// Everything a finder knows about how to load a module.
#[derive(Clone)]
pub struct ModuleSpec {
    pub name: String,
    /// The notebook or marker file backing the module.
    pub origin: PathBuf,
    pub loader: Arc<dyn Loader>,
    /// `Some` for packages, listing where their submodules live.
    pub submodule_search_locations: Option<Vec<PathBuf>>,
}

impl ModuleSpec {
    pub fn is_package(&self) -> bool {
        self.submodule_search_locations.is_some()
    }

    /// Package the module belongs to: itself for packages, else its parent.
    pub fn parent(&self) -> Option<String> {
        if self.is_package() {
            return Some(self.name.clone());
        }
        DottedName::parse(&self.name)
            .and_then(|name| name.parent())
            .map(|parent| parent.to_string())
    }
}

impl fmt::Debug for ModuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleSpec")
            .field("name", &self.name)
            .field("origin", &self.origin)
            .field("submodule_search_locations", &self.submodule_search_locations)
            .finish_non_exhaustive()
    }
}

/// Identity of a module being executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub file: PathBuf,
    pub package: Option<String>,
    pub search_locations: Option<Vec<PathBuf>>,
}

impl Module {
    pub fn from_spec(spec: &ModuleSpec) -> Self {
        Self {
            name: spec.name.clone(),
            file: spec.origin.clone(),
            package: spec.parent(),
            search_locations: spec.submodule_search_locations.clone(),
        }
    }
}
