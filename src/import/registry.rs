use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::Conventions;
use crate::error::Result;
use crate::types::{expand_home, PackageRoot};

use super::{Host, MetaPathFinder, Module, ModuleFinder, ModuleSpec};

/// Ordered list of finders consulted on every import. First match wins.
#[derive(Clone, Default)]
pub struct FinderRegistry {
    finders: Vec<Arc<dyn MetaPathFinder>>,
}

impl FinderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finder. A second finder for an already registered root is
    /// ignored and `false` is returned, so repeated setup never duplicates
    /// resolution.
    pub fn register(&mut self, finder: Arc<dyn MetaPathFinder>) -> bool {
        if self.finders.iter().any(|f| f.root() == finder.root()) {
            tracing::debug!(root = %finder.root().display(), "finder already registered");
            return false;
        }
        tracing::debug!(root = %finder.root().display(), "registering finder");
        self.finders.push(finder);
        true
    }

    /// Remove the finder serving `root`. Returns whether one was removed.
    pub fn unregister(&mut self, root: &Path) -> bool {
        let before = self.finders.len();
        self.finders.retain(|f| f.root() != root);
        self.finders.len() != before
    }

    pub fn len(&self) -> usize {
        self.finders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.finders.is_empty()
    }

    /// Ask each finder in order. Hard errors stop the search.
    pub fn find_spec(&self, fullname: &str) -> Result<Option<ModuleSpec>> {
        for finder in &self.finders {
            if let Some(spec) = finder.find_spec(fullname, None, None)? {
                return Ok(Some(spec));
            }
        }
        Ok(None)
    }

    /// Find, create and execute `fullname`. `Ok(None)` when no finder knows it.
    pub fn load(&self, fullname: &str, host: &mut dyn Host) -> Result<Option<Module>> {
        let Some(spec) = self.find_spec(fullname)? else {
            return Ok(None);
        };

        let module = Module::from_spec(&spec);
        spec.loader.exec_module(&module, host)?;
        Ok(Some(module))
    }
}

static REGISTRY: Lazy<Mutex<FinderRegistry>> = Lazy::new(|| Mutex::new(FinderRegistry::new()));

fn lock() -> MutexGuard<'static, FinderRegistry> {
    REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Snapshot of the process-wide finder list.
///
/// The lock is released before the snapshot is returned, so a module
/// evaluated through `global().load(..)` may import other modules.
pub fn global() -> FinderRegistry {
    lock().clone()
}

/// Append a finder to the process-wide list. See [`FinderRegistry::register`].
pub fn register(finder: Arc<dyn MetaPathFinder>) -> bool {
    lock().register(finder)
}

/// Register a notebook finder for `root` in the process-wide list.
///
/// Returns `Ok(false)` if that root was already installed.
pub fn install(root: impl AsRef<Path>, strip_directives: bool) -> Result<bool> {
    let root = PackageRoot::new(root)?;
    let finder = ModuleFinder::new(root, strip_directives, None, Conventions::default())?;
    Ok(register(Arc::new(finder)))
}

/// Remove the process-wide finder for `root`.
pub fn uninstall(root: impl AsRef<Path>) -> bool {
    lock().unregister(&expand_home(root.as_ref()))
}
