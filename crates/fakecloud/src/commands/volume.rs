use std::collections::BTreeMap;

use anyhow::{Result, bail};
use chrono::Utc;
use clap::Args;
use serde_json::{Value, json};

use crate::FormatArgs;
use crate::commands::format_properties;
use crate::output::{render, render_list};
use crate::state::{Store, VolumeRecord};

#[derive(Debug, Args)]
pub struct CreateArgs {
  /// Volume size in GB
  #[arg(long)]
  size: Option<u64>,
  /// Volume description
  #[arg(long)]
  description: Option<String>,
  /// Property to set on the volume (repeatable)
  #[arg(long = "property", value_parser = crate::parse_property)]
  properties: Vec<(String, String)>,
  /// Create the volume from an existing snapshot
  #[arg(long)]
  snapshot: Option<String>,
  /// New volume name
  name: String,
  #[command(flatten)]
  format: FormatArgs,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
  /// Volume(s) to delete
  #[arg(required = true)]
  names: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
  /// Include description, properties and bootable columns
  #[arg(long)]
  long: bool,
  /// Only list volumes with this status
  #[arg(long)]
  status: Option<String>,
  #[command(flatten)]
  format: FormatArgs,
}

#[derive(Debug, Args)]
pub struct SetArgs {
  /// Rename the volume
  #[arg(long = "name")]
  new_name: Option<String>,
  /// Resize the volume
  #[arg(long)]
  size: Option<u64>,
  /// Replace the description
  #[arg(long)]
  description: Option<String>,
  /// Property to set or overwrite (repeatable)
  #[arg(long = "property", value_parser = crate::parse_property)]
  properties: Vec<(String, String)>,
  /// Mark the volume bootable
  #[arg(long)]
  bootable: bool,
  /// Mark the volume non-bootable
  #[arg(long = "non-bootable", conflicts_with = "bootable")]
  non_bootable: bool,
  /// Pin the volume status, bypassing the simulated lifecycle
  #[arg(long)]
  state: Option<String>,
  /// Volume to update
  volume: String,
}

#[derive(Debug, Args)]
pub struct UnsetArgs {
  /// Property key to remove (repeatable)
  #[arg(long = "property")]
  properties: Vec<String>,
  /// Volume to update
  volume: String,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
  /// Volume to show
  name: String,
  #[command(flatten)]
  format: FormatArgs,
}

fn not_found(name: &str) -> anyhow::Error {
  anyhow::anyhow!("No volume with a name or ID of '{name}' exists.")
}

fn record_json(name: &str, rec: &VolumeRecord, store: &Store) -> Value {
  json!({
    "id": rec.id,
    "name": name,
    "size": rec.size,
    "description": rec.description,
    "properties": format_properties(&rec.properties),
    "bootable": if rec.bootable { "true" } else { "false" },
    "status": rec.status(store.settle()),
    "created_at": rec.created_at.to_rfc3339(),
  })
}

pub fn create(store: &Store, args: CreateArgs) -> Result<()> {
  let mut state = store.load()?;
  if state.volumes.contains_key(&args.name) {
    bail!("Volume with name '{}' already exists.", args.name);
  }
  let size = match (&args.snapshot, args.size) {
    (Some(snapshot), size) => {
      let parent = state
        .snapshots
        .get(snapshot)
        .ok_or_else(|| anyhow::anyhow!("No volume snapshot with a name or ID of '{snapshot}' exists."))?;
      size.unwrap_or(parent.size)
    }
    (None, Some(size)) => size,
    (None, None) => bail!("Either --size or --snapshot is required."),
  };
  let rec = VolumeRecord {
    id: uuid::Uuid::new_v4().to_string(),
    size,
    description: args.description,
    properties: args.properties.into_iter().collect(),
    bootable: false,
    created_at: Utc::now(),
    status_override: None,
  };
  let out = render(
    &record_json(&args.name, &rec, store),
    args.format.format,
    &args.format.columns,
  )?;
  state.volumes.insert(args.name, rec);
  store.save(&state)?;
  print!("{out}");
  Ok(())
}

pub fn delete(store: &Store, args: DeleteArgs) -> Result<()> {
  let mut state = store.load()?;
  for name in &args.names {
    if state.volumes.remove(name).is_none() {
      bail!(not_found(name));
    }
  }
  store.save(&state)?;
  Ok(())
}

pub fn list(store: &Store, args: ListArgs) -> Result<()> {
  let state = store.load()?;
  let rows: Vec<Value> = state
    .volumes
    .iter()
    .filter_map(|(name, rec)| {
      let status = rec.status(store.settle());
      if let Some(wanted) = &args.status {
        if &status != wanted {
          return None;
        }
      }
      let mut row = json!({
        "ID": rec.id,
        "Display Name": name,
        "Status": status,
        "Size": rec.size,
      });
      if args.long {
        let extra = row.as_object_mut().expect("row is an object");
        extra.insert("Description".into(), json!(rec.description));
        extra.insert("Properties".into(), json!(format_properties(&rec.properties)));
        extra.insert(
          "Bootable".into(),
          json!(if rec.bootable { "true" } else { "false" }),
        );
      }
      Some(row)
    })
    .collect();
  let out = render_list(&rows, args.format.format, &args.format.columns)?;
  print!("{out}");
  Ok(())
}

pub fn set(store: &Store, args: SetArgs) -> Result<()> {
  let mut state = store.load()?;
  let mut rec = state
    .volumes
    .remove(&args.volume)
    .ok_or_else(|| not_found(&args.volume))?;
  if let Some(size) = args.size {
    rec.size = size;
  }
  if let Some(description) = args.description {
    rec.description = Some(description);
  }
  for (key, value) in args.properties {
    rec.properties.insert(key, value);
  }
  if args.bootable {
    rec.bootable = true;
  }
  if args.non_bootable {
    rec.bootable = false;
  }
  if let Some(status) = args.state {
    rec.status_override = Some(status);
  }
  let name = args.new_name.unwrap_or(args.volume);
  if state.volumes.contains_key(&name) {
    bail!("Volume with name '{name}' already exists.");
  }
  state.volumes.insert(name, rec);
  store.save(&state)?;
  Ok(())
}

pub fn unset(store: &Store, args: UnsetArgs) -> Result<()> {
  let mut state = store.load()?;
  let rec = state
    .volumes
    .get_mut(&args.volume)
    .ok_or_else(|| not_found(&args.volume))?;
  for key in &args.properties {
    rec.properties.remove(key);
  }
  store.save(&state)?;
  Ok(())
}

pub fn show(store: &Store, args: ShowArgs) -> Result<()> {
  let state = store.load()?;
  let rec = state.volumes.get(&args.name).ok_or_else(|| not_found(&args.name))?;
  let out = render(
    &record_json(&args.name, rec, store),
    args.format.format,
    &args.format.columns,
  )?;
  print!("{out}");
  Ok(())
}
