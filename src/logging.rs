use tracing_subscriber::EnvFilter;

/// Install the tracing subscriber. `RUST_LOG` wins when set; otherwise only
/// warnings are shown, or everything from this crate at debug with
/// `verbose`. Logs go to stderr so they never mix with menu output.
pub fn init(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("warn,client_admin=debug")
    } else {
        EnvFilter::new("warn")
    };

    // A subscriber may already be installed (tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
