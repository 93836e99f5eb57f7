use anyhow::{Result, bail};
use clap::ValueEnum;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
  /// JSON object (or array for list commands)
  Json,
  /// Bare values, one line per column
  Value,
}

/// Render one record, optionally restricted to `columns`.
pub fn render(record: &Value, format: OutputFormat, columns: &[String]) -> Result<String> {
  let record = select_columns(record, columns)?;
  match format {
    OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&record)?)),
    OutputFormat::Value => {
      let Value::Object(map) = &record else {
        bail!("value format expects an object record");
      };
      let mut out = String::new();
      for value in map.values() {
        out.push_str(&bare(value));
        out.push('\n');
      }
      Ok(out)
    }
  }
}

/// Render a list of records. `value` format prints one line per record with
/// the selected columns space-separated.
pub fn render_list(records: &[Value], format: OutputFormat, columns: &[String]) -> Result<String> {
  match format {
    OutputFormat::Json => {
      let selected: Vec<Value> = records
        .iter()
        .map(|r| select_columns(r, columns))
        .collect::<Result<_>>()?;
      Ok(format!("{}\n", serde_json::to_string_pretty(&selected)?))
    }
    OutputFormat::Value => {
      let mut out = String::new();
      for record in records {
        let selected = select_columns(record, columns)?;
        let Value::Object(map) = selected else {
          bail!("value format expects object records");
        };
        let fields: Vec<String> = map.values().map(bare).collect();
        out.push_str(&fields.join(" "));
        out.push('\n');
      }
      Ok(out)
    }
  }
}

fn select_columns(record: &Value, columns: &[String]) -> Result<Value> {
  if columns.is_empty() {
    return Ok(record.clone());
  }
  let Value::Object(map) = record else {
    bail!("column selection expects an object record");
  };
  let mut selected = serde_json::Map::new();
  for column in columns {
    match map.get(column) {
      Some(value) => {
        selected.insert(column.clone(), value.clone());
      }
      None => bail!("unknown column {column:?}"),
    }
  }
  Ok(Value::Object(selected))
}

fn bare(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    Value::Null => String::new(),
    other => other.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use serde_json::json;

  #[test]
  fn value_format_prints_bare_column() {
    let record = json!({"name": "v1", "status": "available"});
    let out = render(&record, OutputFormat::Value, &["status".to_string()]).unwrap();
    assert_eq!(out, "available\n");
  }

  #[test]
  fn json_format_round_trips() {
    let record = json!({"name": "v1", "size": 2});
    let out = render(&record, OutputFormat::Json, &[]).unwrap();
    let back: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(back, record);
  }

  #[test]
  fn unknown_column_is_an_error() {
    let record = json!({"name": "v1"});
    let err = render(&record, OutputFormat::Value, &["nope".to_string()]).unwrap_err();
    assert!(err.to_string().contains("unknown column"));
  }
}
