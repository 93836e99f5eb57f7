use crate::client::{CliError, CloudCli};
use crate::waiter::{WaitError, WaitOpts, wait_for_status};

/// Per-scenario context: the CLI under test, the wait bounds to use by
/// default, and the cleanup commands to run when the scenario ends.
///
/// Passed explicitly into each scenario; nothing is process-global. Cleanup
/// commands run in reverse registration order when the context drops, and a
/// failing cleanup is logged rather than panicking so the remaining ones
/// still run.
#[derive(Debug)]
pub struct TestContext {
  cli: CloudCli,
  wait: WaitOpts,
  cleanups: Vec<Vec<String>>,
}

impl TestContext {
  pub fn new(cli: CloudCli, wait: WaitOpts) -> Self {
    Self {
      cli,
      wait,
      cleanups: Vec::new(),
    }
  }

  pub fn cli(&self) -> &CloudCli {
    &self.cli
  }

  pub fn wait_opts(&self) -> &WaitOpts {
    &self.wait
  }

  /// Register a CLI command to run when the context drops.
  pub fn defer(&mut self, args: &[&str]) {
    self.cleanups.push(args.iter().map(|a| a.to_string()).collect());
  }

  /// Run the CLI and return stdout; see [`CloudCli::run`].
  pub fn run(&self, args: &[&str]) -> Result<String, CliError> {
    self.cli.run(args)
  }

  /// Run the CLI with `-f json` appended and parse stdout into `T`.
  pub fn run_json<T: serde::de::DeserializeOwned>(&self, args: &[&str]) -> Result<T, CliError> {
    self.cli.run_json(args)
  }

  /// Wait for a resource to reach `desired` using the context's wait bounds.
  pub fn wait_for(
    &self,
    resource_type: &str,
    name: &str,
    desired: &str,
  ) -> Result<(), WaitError> {
    wait_for_status(&self.cli, resource_type, name, desired, &self.wait)
  }
}

impl Drop for TestContext {
  fn drop(&mut self) {
    while let Some(args) = self.cleanups.pop() {
      let args: Vec<&str> = args.iter().map(String::as_str).collect();
      if let Err(err) = self.cli.run(&args) {
        tracing::warn!(args = ?args, %err, "cleanup command failed");
      }
    }
  }
}
