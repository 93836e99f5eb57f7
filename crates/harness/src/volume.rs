use serde::Deserialize;

/// `volume create` / `volume show -f json` output.
///
/// `properties` is the CLI's rendered form: `Key='value'` pairs, sorted by
/// key, joined with `", "`. `bootable` is the literal string `"true"` or
/// `"false"`, matching what the CLI prints rather than a JSON boolean.
#[derive(Debug, Clone, Deserialize)]
pub struct Volume {
  pub id: String,
  pub name: String,
  pub size: u64,
  pub description: Option<String>,
  pub properties: String,
  pub bootable: String,
  pub status: String,
}

/// One row of `volume list -f json` output.
#[derive(Debug, Clone, Deserialize)]
pub struct VolumeSummary {
  #[serde(rename = "ID")]
  pub id: String,
  #[serde(rename = "Display Name")]
  pub display_name: String,
  #[serde(rename = "Status")]
  pub status: String,
  #[serde(rename = "Size")]
  pub size: u64,
}

/// `volume snapshot create` / `volume snapshot show -f json` output.
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
  pub id: String,
  pub name: String,
  pub volume: String,
  pub size: u64,
  pub status: String,
}
