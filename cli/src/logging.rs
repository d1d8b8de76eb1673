use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_SETTINGS: &str = "docspec=info,docspec_core=info";

/// Directives used when `RUST_LOG` is unset and `--verbose` is given.
pub const VERBOSE_LOG_SETTINGS: &str = "docspec=debug,docspec_core=debug";

/// Fallback directives for the given verbosity.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_LOG_SETTINGS
    } else {
        DEFAULT_LOG_SETTINGS
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over the verbosity fallback.
pub fn setup_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directives(verbose).into()))
        .with(tracing_subscriber::fmt::layer().with_target(verbose))
        .init()
}
