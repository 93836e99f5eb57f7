use anyhow::{Result, bail};
use chrono::Utc;
use clap::Args;
use serde_json::{Value, json};

use crate::FormatArgs;
use crate::output::render;
use crate::state::{SnapshotRecord, Store};

#[derive(Debug, Args)]
pub struct CreateArgs {
  /// Volume to snapshot
  #[arg(long)]
  volume: String,
  /// New snapshot name
  name: String,
  #[command(flatten)]
  format: FormatArgs,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
  /// Snapshot(s) to delete
  #[arg(required = true)]
  names: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
  /// Snapshot to show
  name: String,
  #[command(flatten)]
  format: FormatArgs,
}

fn not_found(name: &str) -> anyhow::Error {
  anyhow::anyhow!("No volume snapshot with a name or ID of '{name}' exists.")
}

fn record_json(name: &str, rec: &SnapshotRecord, store: &Store) -> Value {
  json!({
    "id": rec.id,
    "name": name,
    "volume": rec.volume,
    "size": rec.size,
    "status": rec.status(store.settle()),
    "created_at": rec.created_at.to_rfc3339(),
  })
}

pub fn create(store: &Store, args: CreateArgs) -> Result<()> {
  let mut state = store.load()?;
  if state.snapshots.contains_key(&args.name) {
    bail!("Snapshot with name '{}' already exists.", args.name);
  }
  let size = state
    .volumes
    .get(&args.volume)
    .ok_or_else(|| anyhow::anyhow!("No volume with a name or ID of '{}' exists.", args.volume))?
    .size;
  let rec = SnapshotRecord {
    id: uuid::Uuid::new_v4().to_string(),
    volume: args.volume,
    size,
    created_at: Utc::now(),
    status_override: None,
  };
  let out = render(
    &record_json(&args.name, &rec, store),
    args.format.format,
    &args.format.columns,
  )?;
  state.snapshots.insert(args.name, rec);
  store.save(&state)?;
  print!("{out}");
  Ok(())
}

pub fn delete(store: &Store, args: DeleteArgs) -> Result<()> {
  let mut state = store.load()?;
  for name in &args.names {
    if state.snapshots.remove(name).is_none() {
      bail!(not_found(name));
    }
  }
  store.save(&state)?;
  Ok(())
}

pub fn show(store: &Store, args: ShowArgs) -> Result<()> {
  let state = store.load()?;
  let rec = state
    .snapshots
    .get(&args.name)
    .ok_or_else(|| not_found(&args.name))?;
  let out = render(
    &record_json(&args.name, rec, store),
    args.format.format,
    &args.format.columns,
  )?;
  print!("{out}");
  Ok(())
}
