//! Test harness for driving a cloud block-storage CLI from functional tests.
//!
//! The harness does not talk to any control-plane API itself. It shells out
//! to a CLI binary (`CloudCli`), parses its `-f json` output into serde
//! models, and provides the one piece of logic the scenarios share: a
//! blocking status waiter that polls `<resource> show <name>` until the
//! resource reaches a desired status, hits a designated failure status, or
//! runs out the clock.
//!
//! Scenarios receive an explicit [`context::TestContext`] instead of
//! inheriting shared state; cleanup commands registered on the context run
//! in LIFO order when it drops.

pub mod client;
pub mod config;
pub mod context;
pub mod logging;
pub mod volume;
pub mod waiter;

pub use client::{CliError, CloudCli};
pub use context::TestContext;
pub use waiter::{StatusQuery, WaitError, WaitOpts, wait_for_status};
