use tracing_subscriber::EnvFilter;

/// Install a human-readable tracing subscriber writing to stderr.
///
/// Intended for test binaries: call it at the top of a scenario to see the
/// per-poll waiter diagnostics. Level defaults to `info` and can be raised
/// via `RUST_LOG`. Safe to call more than once; later calls are no-ops.
pub fn init() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}
