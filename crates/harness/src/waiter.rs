use std::time::Duration;

use thiserror::Error;

use crate::client::{CliError, CloudCli};

/// A status query against the system under test.
///
/// Implementations return the current status string for a named resource of
/// a given kind. Query failures (resource absent, transport error) are not
/// retried by the waiter; they abort the wait.
pub trait StatusQuery {
  fn status(&self, resource_type: &str, name: &str) -> Result<String, CliError>;
}

impl StatusQuery for CloudCli {
  fn status(&self, resource_type: &str, name: &str) -> Result<String, CliError> {
    // "volume snapshot" expands to the nested subcommand path.
    let mut args: Vec<&str> = resource_type.split_whitespace().collect();
    args.push("show");
    args.push(name);
    args.extend(["-f", "value", "-c", "status"]);
    Ok(self.run(&args)?.trim_end().to_string())
  }
}

/// Bounds for one wait: total deadline, poll interval, and the statuses that
/// abort the wait immediately because the resource will never recover.
#[derive(Debug, Clone)]
pub struct WaitOpts {
  pub max_wait: Duration,
  pub interval: Duration,
  pub failures: Vec<String>,
}

impl Default for WaitOpts {
  fn default() -> Self {
    Self {
      max_wait: Duration::from_secs(120),
      interval: Duration::from_secs(5),
      failures: vec!["ERROR".to_string()],
    }
  }
}

#[derive(Debug, Error)]
pub enum WaitError {
  #[error("{resource_type} {name} entered failure status {status:?}")]
  StatusCheckFailure {
    resource_type: String,
    name: String,
    status: String,
  },
  #[error(
    "timed out waiting for {resource_type} {name}: wanted {desired:?}, last saw {last_status:?}"
  )]
  Timeout {
    resource_type: String,
    name: String,
    desired: String,
    last_status: String,
  },
  #[error(transparent)]
  Query(#[from] CliError),
}

/// Poll `query` until the resource reports `desired`, a failure status, or
/// the deadline passes.
///
/// The deadline is evaluated after each query, so reaching `desired` on the
/// final poll still succeeds even when that poll lands at or slightly past
/// `max_wait` (the sleep between polls is what advances the clock). Both
/// bounds must be positive; an interval larger than `max_wait` means at most
/// two polls happen.
pub fn wait_for_status(
  query: &impl StatusQuery,
  resource_type: &str,
  name: &str,
  desired: &str,
  opts: &WaitOpts,
) -> Result<(), WaitError> {
  let mut elapsed = Duration::ZERO;
  loop {
    let status = query.status(resource_type, name)?;
    tracing::info!(
      resource_type,
      name,
      desired,
      current = %status,
      "checking resource status"
    );
    if status == desired {
      return Ok(());
    }
    if opts.failures.iter().any(|f| f == &status) {
      return Err(WaitError::StatusCheckFailure {
        resource_type: resource_type.to_string(),
        name: name.to_string(),
        status,
      });
    }
    if elapsed >= opts.max_wait {
      return Err(WaitError::Timeout {
        resource_type: resource_type.to_string(),
        name: name.to_string(),
        desired: desired.to_string(),
        last_status: status,
      });
    }
    std::thread::sleep(opts.interval);
    elapsed += opts.interval;
  }
}
