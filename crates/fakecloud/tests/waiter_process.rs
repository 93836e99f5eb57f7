//! Waiter behavior across a real process boundary, using fakecloud's
//! simulated provisioning delay. These scenarios are fakecloud-specific and
//! skip themselves when `STRATUS_CLI` points the suite at an external CLI.

mod common;

use std::time::Duration;

use anyhow::Result;
use pretty_assertions::assert_eq;
use stratus_harness::volume::Volume;
use stratus_harness::{WaitError, WaitOpts, wait_for_status};

fn quick_opts() -> WaitOpts {
  WaitOpts {
    max_wait: Duration::from_secs(10),
    interval: Duration::from_millis(100),
    ..WaitOpts::default()
  }
}

#[test]
fn observes_transition_from_creating_to_available() -> Result<()> {
  if common::driving_external_cli() {
    eprintln!("skipping: settle simulation requires fakecloud");
    return Ok(());
  }
  let mut scenario = common::scenario_with_settle_ms(1_500);
  let name = common::unique_name();
  let vol: Volume = scenario
    .ctx
    .run_json(&["volume", "create", "--size", "1", &name])?;
  scenario.ctx.defer(&["volume", "delete", &name]);
  assert_eq!(vol.status, "creating");

  wait_for_status(scenario.ctx.cli(), "volume", &name, "available", &quick_opts())?;

  let vol: Volume = scenario.ctx.run_json(&["volume", "show", &name])?;
  assert_eq!(vol.status, "available");
  Ok(())
}

#[test]
fn errored_volume_fails_fast_without_waiting_out_the_deadline() -> Result<()> {
  if common::driving_external_cli() {
    eprintln!("skipping: settle simulation requires fakecloud");
    return Ok(());
  }
  let mut scenario = common::scenario_with_settle_ms(60_000);
  let name = common::unique_name();
  let _: Volume = scenario
    .ctx
    .run_json(&["volume", "create", "--size", "1", &name])?;
  scenario.ctx.defer(&["volume", "delete", &name]);
  let out = scenario.ctx.run(&["volume", "set", "--state", "ERROR", &name])?;
  assert_eq!(out, "");

  let start = std::time::Instant::now();
  let err = wait_for_status(scenario.ctx.cli(), "volume", &name, "available", &quick_opts())
    .unwrap_err();
  assert!(matches!(err, WaitError::StatusCheckFailure { .. }), "got {err:?}");
  // Short-circuit, not a 10 s deadline run-out.
  assert!(start.elapsed() < Duration::from_secs(5));
  Ok(())
}

#[test]
fn never_settling_volume_times_out_reporting_last_status() -> Result<()> {
  if common::driving_external_cli() {
    eprintln!("skipping: settle simulation requires fakecloud");
    return Ok(());
  }
  let mut scenario = common::scenario_with_settle_ms(60_000);
  let name = common::unique_name();
  let _: Volume = scenario
    .ctx
    .run_json(&["volume", "create", "--size", "1", &name])?;
  scenario.ctx.defer(&["volume", "delete", &name]);

  let opts = WaitOpts {
    max_wait: Duration::from_millis(300),
    interval: Duration::from_millis(100),
    ..WaitOpts::default()
  };
  let err =
    wait_for_status(scenario.ctx.cli(), "volume", &name, "available", &opts).unwrap_err();
  match err {
    WaitError::Timeout { last_status, desired, .. } => {
      assert_eq!(last_status, "creating");
      assert_eq!(desired, "available");
    }
    other => panic!("expected Timeout, got {other:?}"),
  }
  Ok(())
}

#[test]
fn query_error_aborts_the_wait() {
  let scenario = common::scenario();
  let err = wait_for_status(
    scenario.ctx.cli(),
    "volume",
    "does-not-exist",
    "available",
    &quick_opts(),
  )
  .unwrap_err();
  assert!(matches!(err, WaitError::Query(_)), "got {err:?}");
}
