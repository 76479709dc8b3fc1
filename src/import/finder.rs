use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Conventions;
use crate::error::Result;
use crate::extract::CellTransformer;
use crate::types::{PackageRoot, ResolvedLocation};

use super::{Loader, Module, ModuleLoader, ModuleSpec};

/// Finder contract of the host's ordered finder list.
pub trait MetaPathFinder: Send + Sync {
    /// `Ok(None)` means "not mine"; the next finder gets a turn.
    fn find_spec(
        &self,
        fullname: &str,
        path: Option<&[PathBuf]>,
        target: Option<&Module>,
    ) -> Result<Option<ModuleSpec>>;

    /// Directory this finder serves, used to keep registration idempotent.
    fn root(&self) -> &Path;
}

/// Finds notebook modules under one package root.
pub struct ModuleFinder {
    loader: Arc<ModuleLoader>,
}

impl ModuleFinder {
    pub fn new(
        root: PackageRoot,
        strip_directives: bool,
        transformer: Option<Box<dyn CellTransformer>>,
        conventions: Conventions,
    ) -> Result<Self> {
        let loader = ModuleLoader::new(root, strip_directives, transformer, conventions)?;
        Ok(Self::with_loader(loader))
    }

    pub fn with_loader(loader: ModuleLoader) -> Self {
        Self {
            loader: Arc::new(loader),
        }
    }

    pub fn package_name(&self) -> &str {
        self.loader.root().name()
    }
}

impl MetaPathFinder for ModuleFinder {
    fn find_spec(
        &self,
        fullname: &str,
        _path: Option<&[PathBuf]>,
        _target: Option<&Module>,
    ) -> Result<Option<ModuleSpec>> {
        let location = match self.loader.locate(fullname) {
            Ok(location) => location,
            Err(e) if e.is_no_match() => {
                tracing::debug!(module = fullname, reason = %e, "no match");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let submodule_search_locations = match &location {
            ResolvedLocation::Document(_) => None,
            ResolvedLocation::Package(marker) => {
                let dir = marker.parent().unwrap_or(self.loader.root().path());
                Some(self.loader.resolver().submodule_search(dir)?)
            }
        };

        let loader: Arc<dyn Loader> = self.loader.clone();
        Ok(Some(ModuleSpec {
            name: fullname.to_string(),
            origin: location.into_path(),
            loader,
            submodule_search_locations,
        }))
    }

    fn root(&self) -> &Path {
        self.loader.root().path()
    }
}
