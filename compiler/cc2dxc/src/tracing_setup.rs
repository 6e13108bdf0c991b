//! Tracing subscriber setup for the binary.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber once.
///
/// Logging stays off unless `RUST_LOG` is set or `verbose` is requested;
/// `verbose` without `RUST_LOG` enables `debug` for the cc2dx crates.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) if verbose => EnvFilter::new("cc2dxc=debug,cc2dx_lexer=debug"),
            Err(_) => return,
        };
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}
