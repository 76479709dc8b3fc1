use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nbimport")]
#[command(version)]
#[command(about = "Import notebooks as modules and convert notebook trees into packages")]
pub struct Args {
    /// Config file (default: ./nbimport.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a notebook directory tree into a package tree
    Convert {
        /// Notebook directory; its name is the package name
        source: PathBuf,

        /// Output directory (default: convert in place)
        dest: Option<PathBuf>,

        /// Keep directives instead of stripping them
        #[arg(long)]
        keep_directives: bool,

        /// Print the conversion report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a single notebook into a source file
    ConvertOne {
        notebook: PathBuf,

        /// Output directory (default: next to the notebook)
        #[arg(short = 'd', long)]
        dest: Option<PathBuf>,

        /// Replace an existing source file
        #[arg(short = 'f', long)]
        overwrite: bool,

        #[arg(long)]
        keep_directives: bool,
    },

    /// Print the source a module would execute
    Source {
        /// Package root directory
        root: PathBuf,

        /// Dotted module name, e.g. nbs.child.baby_module
        module: String,

        #[arg(long)]
        keep_directives: bool,
    },

    /// Show how a module resolves
    Spec {
        /// Package root directory
        root: PathBuf,

        /// Dotted module name
        module: String,

        #[arg(long)]
        json: bool,
    },
}
