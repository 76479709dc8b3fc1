use anyhow::Result;
use clap::Parser;

use nbimport::cli::{
    init_tracing, run_convert, run_convert_one, run_source, run_spec, Args, Command,
};
use nbimport::config::Config;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let cwd = std::env::current_dir()?;
    let config = Config::discover(args.config.as_deref(), &cwd)?;

    match args.command {
        Command::Convert {
            source,
            dest,
            keep_directives,
            json,
        } => run_convert(&config, &source, dest.as_deref(), keep_directives, json),
        Command::ConvertOne {
            notebook,
            dest,
            overwrite,
            keep_directives,
        } => run_convert_one(&config, &notebook, dest.as_deref(), overwrite, keep_directives),
        Command::Source {
            root,
            module,
            keep_directives,
        } => run_source(&config, &root, &module, keep_directives),
        Command::Spec { root, module, json } => run_spec(&config, &root, &module, json),
    }
}
