use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::import::{global, register, Loader, ModuleFinder, ModuleSpec};
use crate::types::PackageRoot;

#[derive(Serialize)]
struct SpecOutput {
    name: String,
    origin: PathBuf,
    package: Option<String>,
    is_package: bool,
    submodule_search_locations: Option<Vec<PathBuf>>,
}

impl From<&ModuleSpec> for SpecOutput {
    fn from(spec: &ModuleSpec) -> Self {
        Self {
            name: spec.name.clone(),
            origin: spec.origin.clone(),
            package: spec.parent(),
            is_package: spec.is_package(),
            submodule_search_locations: spec.submodule_search_locations.clone(),
        }
    }
}

/// Register a finder for `root` in the process-wide list and resolve `module` through it.
fn find(config: &Config, root: &Path, module: &str, keep_directives: bool) -> Result<ModuleSpec> {
    let root = PackageRoot::new(root)?;
    let strip = config.strip_directives && !keep_directives;
    let finder = ModuleFinder::new(root, strip, None, config.conventions.clone())
        .context("Cannot set up notebook finder")?;
    register(Arc::new(finder));

    global()
        .find_spec(module)?
        .with_context(|| format!("No module named '{}'", module))
}

pub fn run_source(config: &Config, root: &Path, module: &str, keep_directives: bool) -> Result<()> {
    let spec = find(config, root, module, keep_directives)?;
    let source = spec.loader.source(module)?;
    print!("{}", source);
    Ok(())
}

pub fn run_spec(config: &Config, root: &Path, module: &str, json: bool) -> Result<()> {
    let spec = find(config, root, module, false)?;
    let output = SpecOutput::from(&spec);

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let kind = if output.is_package { "package" } else { "module" };
    println!("{} {}", style(&output.name).cyan().bold(), style(kind).dim());
    println!("  origin:  {}", style(output.origin.display()).green());
    if let Some(package) = &output.package {
        println!("  package: {}", package);
    }
    if let Some(locations) = &output.submodule_search_locations {
        let mut locations = locations.clone();
        locations.sort();
        println!("  submodule search locations:");
        for location in locations {
            println!("    {}", location.display());
        }
    }

    Ok(())
}
