use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber, writing compact lines to stderr.
///
/// `RUST_LOG` takes precedence. Otherwise only warnings are shown, or this
/// crate's debug events too when `verbose` is set. Calling it twice is a no-op.
pub fn init_subscriber(verbose: bool) {
    let default_directives = if verbose {
        "warn,condo_ledger=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact();

    let _ = subscriber.try_init();
}
