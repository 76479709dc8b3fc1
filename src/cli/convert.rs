use anyhow::{Context, Result};
use console::{style, Emoji};
use std::path::Path;

use crate::config::Config;
use crate::convert::{convert_one, convert_tree};
use crate::extract::SourceExtractor;

static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "");
static FILE: Emoji<'_, '_> = Emoji("📄 ", "");

fn extractor(config: &Config, keep_directives: bool) -> Result<SourceExtractor> {
    // the command line has no interactive shell to supply a transformer
    let strip = config.strip_directives && !keep_directives;
    SourceExtractor::new(strip, None, config.conventions.clone())
        .context("Cannot extract notebook source")
}

pub fn run_convert(
    config: &Config,
    source: &Path,
    dest: Option<&Path>,
    keep_directives: bool,
    json: bool,
) -> Result<()> {
    let extractor = extractor(config, keep_directives)?;
    let report = convert_tree(source, dest, &extractor)
        .with_context(|| format!("Failed to convert {}", source.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "\n{}Converted package {}\n",
        SUCCESS,
        style(&report.package).cyan().bold()
    );
    for path in &report.converted {
        println!("  {}{}", FILE, style(path.display()).green());
    }
    println!();
    println!("  Directories:     {}", style(report.directories).cyan());
    println!("  Notebooks:       {}", style(report.converted.len()).green());
    println!("  Markers:         {}", style(report.markers.len()).dim());

    Ok(())
}

pub fn run_convert_one(
    config: &Config,
    notebook: &Path,
    dest: Option<&Path>,
    overwrite: bool,
    keep_directives: bool,
) -> Result<()> {
    let extractor = extractor(config, keep_directives)?;
    let written = convert_one(notebook, dest, overwrite, &extractor)
        .with_context(|| format!("Failed to convert {}", notebook.display()))?;

    println!("{}Wrote {}", SUCCESS, style(written.display()).green());
    Ok(())
}
