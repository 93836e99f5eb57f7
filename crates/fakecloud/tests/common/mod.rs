#![allow(dead_code)]
use std::path::PathBuf;

use stratus_harness::config::HarnessConfig;
use stratus_harness::{CloudCli, TestContext};
use tempfile::TempDir;

/// One functional scenario: an isolated fakecloud state file plus the
/// context driving the CLI under test.
///
/// By default the suite drives the `fakecloud` binary built from this
/// workspace; exporting `STRATUS_CLI` points the same scenarios at an
/// external CLI instead.
pub struct Scenario {
  // Declared before the tempdir so deferred cleanup commands still find the
  // state file when the scenario drops.
  pub ctx: TestContext,
  _state_dir: TempDir,
}

pub fn scenario() -> Scenario {
  scenario_with_settle_ms(0)
}

/// Like [`scenario`], with a simulated provisioning delay so freshly
/// created resources report `creating` for `settle_ms` before `available`.
pub fn scenario_with_settle_ms(settle_ms: u64) -> Scenario {
  stratus_harness::logging::init();
  let config = HarnessConfig::from_env();
  let bin = config.cli_bin.clone().unwrap_or_else(fakecloud_bin);
  let state_dir = tempfile::tempdir().expect("temp dir");
  let cli = CloudCli::new(bin)
    .env("FAKECLOUD_STATE", state_dir.path().join("state.json"))
    .env("FAKECLOUD_SETTLE_MS", settle_ms.to_string());
  Scenario {
    ctx: TestContext::new(cli, config.wait),
    _state_dir: state_dir,
  }
}

fn fakecloud_bin() -> PathBuf {
  assert_cmd::cargo::cargo_bin("fakecloud")
}

/// Fresh unique resource name per call.
pub fn unique_name() -> String {
  uuid::Uuid::new_v4().simple().to_string()
}

/// True when the suite is driving an external binary instead of fakecloud.
pub fn driving_external_cli() -> bool {
  std::env::var_os("STRATUS_CLI").is_some()
}
