mod args;
mod convert;
mod inspect;

pub use args::{Args, Command};
pub use convert::{run_convert, run_convert_one};
pub use inspect::{run_source, run_spec};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the stderr log subscriber. Safe to call more than once.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects debug output.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let default = if verbose { "nbimport=debug" } else { "warn" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .init();
    });
}
