use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
  #[error("failed to spawn {bin}: {source}")]
  Spawn {
    bin: String,
    #[source]
    source: std::io::Error,
  },
  #[error("`{bin} {args}` exited with {status}: {stderr}")]
  CommandFailed {
    bin: String,
    args: String,
    status: std::process::ExitStatus,
    stderr: String,
  },
  #[error("command output was not valid utf-8: {0}")]
  InvalidUtf8(#[from] std::string::FromUtf8Error),
  #[error("json parse error: {0}")]
  Json(#[from] serde_json::Error),
}

/// One CLI binary under test plus the environment it should run with.
///
/// Every call spawns a fresh process; nothing is shared between invocations
/// except the configured binary path and environment overrides.
#[derive(Debug, Clone)]
pub struct CloudCli {
  bin: PathBuf,
  envs: Vec<(OsString, OsString)>,
}

impl CloudCli {
  pub fn new(bin: impl Into<PathBuf>) -> Self {
    Self {
      bin: bin.into(),
      envs: Vec::new(),
    }
  }

  /// Add an environment variable set on every invocation.
  pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
    self.envs.push((key.into(), value.into()));
    self
  }

  pub fn bin(&self) -> &Path {
    &self.bin
  }

  /// Run the CLI with `args` and return its stdout on success.
  ///
  /// A non-zero exit is an error carrying the captured stderr; stdout is
  /// returned verbatim, trailing newline included.
  pub fn run(&self, args: &[&str]) -> Result<String, CliError> {
    let bin = self.bin.display().to_string();
    tracing::debug!(bin = %bin, args = ?args, "invoking cli");
    let output = Command::new(&self.bin)
      .args(args)
      .envs(self.envs.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str())))
      .output()
      .map_err(|source| CliError::Spawn {
        bin: bin.clone(),
        source,
      })?;
    if !output.status.success() {
      return Err(CliError::CommandFailed {
        bin,
        args: args.join(" "),
        status: output.status,
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
      });
    }
    Ok(String::from_utf8(output.stdout)?)
  }

  /// Run the CLI with `args` plus `-f json` and parse stdout into `T`.
  pub fn run_json<T: DeserializeOwned>(&self, args: &[&str]) -> Result<T, CliError> {
    let mut full: Vec<&str> = args.to_vec();
    full.extend(["-f", "json"]);
    let stdout = self.run(&full)?;
    Ok(serde_json::from_str(&stdout)?)
  }
}
