use std::path::PathBuf;
use std::time::Duration;

use crate::waiter::WaitOpts;

/// Harness settings read from the environment.
///
/// - `STRATUS_CLI`: path to the CLI binary under test. Unset means the
///   suite falls back to whatever binary it ships for itself.
/// - `STRATUS_WAIT_SECS` / `STRATUS_POLL_SECS`: override the default wait
///   deadline and poll interval. Unparseable values fall back to defaults.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
  pub cli_bin: Option<PathBuf>,
  pub wait: WaitOpts,
}

impl HarnessConfig {
  pub fn from_env() -> Self {
    let cli_bin = std::env::var_os("STRATUS_CLI").map(PathBuf::from);
    let mut wait = WaitOpts::default();
    if let Some(secs) = parse_secs("STRATUS_WAIT_SECS") {
      wait.max_wait = secs;
    }
    if let Some(secs) = parse_secs("STRATUS_POLL_SECS") {
      wait.interval = secs;
    }
    Self { cli_bin, wait }
  }
}

fn parse_secs(key: &str) -> Option<Duration> {
  let raw = std::env::var(key).ok()?;
  match raw.parse::<u64>() {
    Ok(secs) => Some(Duration::from_secs(secs)),
    Err(_) => {
      tracing::warn!(key, raw, "ignoring unparseable duration override");
      None
    }
  }
}
