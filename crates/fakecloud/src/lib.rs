//! A stand-in for the block-storage CLI the functional suite drives.
//!
//! Implements the subcommand surface the suite needs (`volume create`,
//! `list`, `set`, `unset`, `show`, `delete` and the `volume snapshot`
//! lifecycle) with `-f json` / `-f value -c COLUMN` output. State lives in a
//! JSON file named by `FAKECLOUD_STATE`; a freshly created resource reports
//! `creating` until `FAKECLOUD_SETTLE_MS` has elapsed and `available`
//! afterwards, unless `volume set --state` pinned it.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod commands;
mod output;
mod state;

pub use output::OutputFormat;

/// fakecloud - a simulated block-storage control plane for functional tests.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
  /// Block storage volume commands
  Volume(VolumeArgs),
}

#[derive(Debug, Args)]
struct VolumeArgs {
  #[command(subcommand)]
  command: VolumeCommands,
}

#[derive(Debug, Subcommand)]
enum VolumeCommands {
  /// Create a new volume
  Create(commands::volume::CreateArgs),
  /// Delete one or more volumes
  Delete(commands::volume::DeleteArgs),
  /// List volumes
  List(commands::volume::ListArgs),
  /// Update volume properties
  Set(commands::volume::SetArgs),
  /// Remove volume properties
  Unset(commands::volume::UnsetArgs),
  /// Show a single volume
  Show(commands::volume::ShowArgs),
  /// Volume snapshot commands
  Snapshot(SnapshotArgs),
}

#[derive(Debug, Args)]
struct SnapshotArgs {
  #[command(subcommand)]
  command: SnapshotCommands,
}

#[derive(Debug, Subcommand)]
enum SnapshotCommands {
  /// Snapshot a volume
  Create(commands::snapshot::CreateArgs),
  /// Delete one or more snapshots
  Delete(commands::snapshot::DeleteArgs),
  /// Show a single snapshot
  Show(commands::snapshot::ShowArgs),
}

/// Output format flags shared by every data-emitting subcommand.
#[derive(Debug, Args)]
pub struct FormatArgs {
  /// Output format
  #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Json)]
  pub format: OutputFormat,
  /// Restrict output to the named column(s)
  #[arg(short = 'c', long = "column")]
  pub columns: Vec<String>,
}

/// Parse a `KEY=VALUE` property argument.
pub(crate) fn parse_property(raw: &str) -> Result<(String, String), String> {
  raw
    .split_once('=')
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))
}

pub fn run() -> Result<()> {
  let _ = env_logger::try_init();
  let cli = Cli::parse();
  let store = state::Store::from_env();

  match cli.command {
    Commands::Volume(volume) => match volume.command {
      VolumeCommands::Create(args) => commands::volume::create(&store, args),
      VolumeCommands::Delete(args) => commands::volume::delete(&store, args),
      VolumeCommands::List(args) => commands::volume::list(&store, args),
      VolumeCommands::Set(args) => commands::volume::set(&store, args),
      VolumeCommands::Unset(args) => commands::volume::unset(&store, args),
      VolumeCommands::Show(args) => commands::volume::show(&store, args),
      VolumeCommands::Snapshot(snapshot) => match snapshot.command {
        SnapshotCommands::Create(args) => commands::snapshot::create(&store, args),
        SnapshotCommands::Delete(args) => commands::snapshot::delete(&store, args),
        SnapshotCommands::Show(args) => commands::snapshot::show(&store, args),
      },
    },
  }
}
