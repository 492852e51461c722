//! Logging initialisation for the binary.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Filter used when `RUST_LOG` is unset: this crate at info (debug when
/// verbose), everything else at warn. The SMS channel logs at info, so it
/// must stay visible here.
pub fn default_targets(verbose: bool) -> Targets {
    let level_filter = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    Targets::new()
        .with_target("elitekpi", level_filter)
        .with_default(LevelFilter::WARN)
}

/// `verbose` forces debug output for this crate. Otherwise `RUST_LOG`
/// decides when set, falling back to [`default_targets`].
pub fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        None
    } else {
        EnvFilter::try_from_default_env().ok()
    };
    let app_filter = env_filter.is_none().then(|| default_targets(verbose));

    // Logs go to stderr so report output on stdout stays clean.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .with(app_filter)
        .with(env_filter)
        .try_init();
}
