use std::path::PathBuf;

use crate::config::Conventions;
use crate::error::{ImportError, Result};
use crate::extract::{CellTransformer, SourceExtractor};
use crate::resolve::PathResolver;
use crate::types::{PackageRoot, ResolvedLocation};

use super::{Host, Module};

/// Source-inspecting loader contract.
pub trait Loader: Send + Sync {
    /// Path of the file backing `fullname`.
    fn filename(&self, fullname: &str) -> Result<PathBuf>;
    /// Source text the module would execute.
    fn source(&self, fullname: &str) -> Result<String>;
    fn is_package(&self, fullname: &str) -> bool;
    /// Evaluate the module's source in the host namespace created for it.
    fn exec_module(&self, module: &Module, host: &mut dyn Host) -> Result<()>;
}

/// Loads notebooks under one package root.
pub struct ModuleLoader {
    resolver: PathResolver,
    extractor: SourceExtractor,
}

impl ModuleLoader {
    pub fn new(
        root: PackageRoot,
        strip_directives: bool,
        transformer: Option<Box<dyn CellTransformer>>,
        conventions: Conventions,
    ) -> Result<Self> {
        let extractor = SourceExtractor::new(strip_directives, transformer, conventions.clone())?;
        Ok(Self::with_extractor(root, extractor, conventions))
    }

    pub fn with_extractor(
        root: PackageRoot,
        extractor: SourceExtractor,
        conventions: Conventions,
    ) -> Self {
        Self {
            resolver: PathResolver::new(root, conventions),
            extractor,
        }
    }

    pub fn root(&self) -> &PackageRoot {
        self.resolver.root()
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn locate(&self, fullname: &str) -> Result<ResolvedLocation> {
        self.resolver.resolve(fullname)
    }
}

impl Loader for ModuleLoader {
    fn filename(&self, fullname: &str) -> Result<PathBuf> {
        self.locate(fullname).map(ResolvedLocation::into_path)
    }

    fn source(&self, fullname: &str) -> Result<String> {
        let path = self.filename(fullname)?;
        self.extractor.extract_from_file(&path)
    }

    fn is_package(&self, fullname: &str) -> bool {
        self.resolver.is_package(fullname)
    }

    fn exec_module(&self, module: &Module, host: &mut dyn Host) -> Result<()> {
        let source = self.extractor.extract_from_file(&module.file)?;
        tracing::debug!(module = %module.name, path = %module.file.display(), "executing module");

        host.evaluate(&source, module).map_err(|cause| {
            // stripped directives shift line numbers, so show the whole source
            tracing::error!(
                module = %module.name,
                path = %module.file.display(),
                error = %cause,
                "error executing module\n{}",
                source
            );
            ImportError::Execution {
                name: module.name.clone(),
                path: module.file.clone(),
                source_text: source,
                cause,
            }
        })
    }
}
