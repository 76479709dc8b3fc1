//! Finder/loader pair that makes notebook directories importable.
//!
//! ```text
//! host import "nbs.child.baby_module"
//!   └── FinderRegistry::find_spec       (ordered, first match wins)
//!         └── ModuleFinder::find_spec    (None for foreign or missing names)
//!               ├── PathResolver::resolve
//!               └── submodule search     (package markers only)
//!   └── ModuleLoader::exec_module
//!         └── SourceExtractor::extract_from_file
//! ```

mod finder;
mod host;
mod loader;
mod registry;

pub use finder::{MetaPathFinder, ModuleFinder};
pub use host::{Host, Module, ModuleSpec};
pub use loader::{Loader, ModuleLoader};
pub use registry::{global, install, register, uninstall, FinderRegistry};
