pub mod snapshot;
pub mod volume;

use std::collections::BTreeMap;

/// Render properties the way the CLI prints them: sorted `Key='value'`
/// pairs joined with ", ".
pub fn format_properties(properties: &BTreeMap<String, String>) -> String {
  properties
    .iter()
    .map(|(k, v)| format!("{k}='{v}'"))
    .collect::<Vec<_>>()
    .join(", ")
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn properties_render_sorted_and_quoted() {
    let props = BTreeMap::from([
      ("Beta".to_string(), "b".to_string()),
      ("Alpha".to_string(), "c".to_string()),
    ]);
    assert_eq!(format_properties(&props), "Alpha='c', Beta='b'");
  }

  #[test]
  fn empty_properties_render_empty() {
    assert_eq!(format_properties(&BTreeMap::new()), "");
  }
}
