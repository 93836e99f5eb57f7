use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeRecord {
  pub id: String,
  pub size: u64,
  pub description: Option<String>,
  pub properties: BTreeMap<String, String>,
  pub bootable: bool,
  pub created_at: DateTime<Utc>,
  /// Set by `volume set --state`; wins over the simulated lifecycle.
  #[serde(default)]
  pub status_override: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRecord {
  pub id: String,
  pub volume: String,
  pub size: u64,
  pub created_at: DateTime<Utc>,
  #[serde(default)]
  pub status_override: Option<String>,
}

/// Everything the fake control plane knows, keyed by resource name.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct State {
  #[serde(default)]
  pub volumes: BTreeMap<String, VolumeRecord>,
  #[serde(default)]
  pub snapshots: BTreeMap<String, SnapshotRecord>,
}

/// Simulated provisioning: `creating` until the settle window has passed,
/// then `available`, unless an explicit override is pinned.
pub fn lifecycle_status(
  created_at: DateTime<Utc>,
  status_override: Option<&str>,
  settle: Duration,
) -> String {
  if let Some(status) = status_override {
    return status.to_string();
  }
  if Utc::now() - created_at < settle {
    "creating".to_string()
  } else {
    "available".to_string()
  }
}

impl VolumeRecord {
  pub fn status(&self, settle: Duration) -> String {
    lifecycle_status(self.created_at, self.status_override.as_deref(), settle)
  }
}

impl SnapshotRecord {
  pub fn status(&self, settle: Duration) -> String {
    lifecycle_status(self.created_at, self.status_override.as_deref(), settle)
  }
}

/// Loads and saves [`State`] as JSON at the path named by `FAKECLOUD_STATE`.
#[derive(Debug)]
pub struct Store {
  path: PathBuf,
  settle: Duration,
}

impl Store {
  pub fn from_env() -> Self {
    let path = std::env::var_os("FAKECLOUD_STATE")
      .map(PathBuf::from)
      .unwrap_or_else(|| PathBuf::from(".fakecloud.json"));
    let settle = std::env::var("FAKECLOUD_SETTLE_MS")
      .ok()
      .and_then(|raw| raw.parse::<i64>().ok())
      .map(Duration::milliseconds)
      .unwrap_or_else(Duration::zero);
    Self { path, settle }
  }

  #[cfg(test)]
  pub fn at(path: PathBuf, settle: Duration) -> Self {
    Self { path, settle }
  }

  pub fn settle(&self) -> Duration {
    self.settle
  }

  pub fn load(&self) -> Result<State> {
    if !self.path.exists() {
      return Ok(State::default());
    }
    let raw = fs::read_to_string(&self.path)
      .with_context(|| format!("read state file {}", self.path.display()))?;
    serde_json::from_str(&raw)
      .with_context(|| format!("parse state file {}", self.path.display()))
  }

  pub fn save(&self, state: &State) -> Result<()> {
    if let Some(parent) = self.path.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)
          .with_context(|| format!("create state dir {}", parent.display()))?;
      }
    }
    let raw = serde_json::to_string_pretty(state).context("serialize state")?;
    fs::write(&self.path, raw)
      .with_context(|| format!("write state file {}", self.path.display()))?;
    log::debug!("saved state to {}", self.path.display());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn volume(created_at: DateTime<Utc>) -> VolumeRecord {
    VolumeRecord {
      id: "vol-1".into(),
      size: 1,
      description: None,
      properties: BTreeMap::new(),
      bootable: false,
      created_at,
      status_override: None,
    }
  }

  #[test]
  fn fresh_volume_is_creating_until_settled() {
    let rec = volume(Utc::now());
    assert_eq!(rec.status(Duration::seconds(60)), "creating");
    assert_eq!(rec.status(Duration::zero()), "available");
  }

  #[test]
  fn old_volume_is_available() {
    let rec = volume(Utc::now() - Duration::seconds(120));
    assert_eq!(rec.status(Duration::seconds(60)), "available");
  }

  #[test]
  fn override_wins_over_lifecycle() {
    let mut rec = volume(Utc::now());
    rec.status_override = Some("error".into());
    assert_eq!(rec.status(Duration::seconds(60)), "error");
  }

  #[test]
  fn state_round_trips_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::at(dir.path().join("state.json"), Duration::zero());
    let mut state = State::default();
    state.volumes.insert("v1".into(), volume(Utc::now()));
    store.save(&state).unwrap();
    let loaded = store.load().unwrap();
    assert_eq!(loaded.volumes.len(), 1);
    assert_eq!(loaded.volumes["v1"].size, 1);
  }

  #[test]
  fn missing_state_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::at(dir.path().join("absent.json"), Duration::zero());
    let state = store.load().unwrap();
    assert!(state.volumes.is_empty());
    assert!(state.snapshots.is_empty());
  }
}
