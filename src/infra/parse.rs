use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use super::tree::NodeKind;

/// One row of an infrastructure capacity snapshot, before validation.
#[derive(Clone, Debug, Deserialize)]
pub struct RawRecord {
    pub id: String,
    pub kind: NodeKind,
    #[serde(default, rename = "parentId")]
    pub parent_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub weight: u64,
}

/// Accepts either a bare JSON array of records or an object wrapping the
/// array under a `records` key, since both shapes occur in exported
/// inventories.
pub(super) fn parse_snapshot(raw: &str) -> Result<Vec<RawRecord>> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in capacity snapshot")?;

    let records_value = match &parsed {
        Value::Array(_) => &parsed,
        Value::Object(object) => object
            .get("records")
            .ok_or_else(|| anyhow!("snapshot object is missing a \"records\" array"))?,
        _ => return Err(anyhow!("unexpected JSON type in capacity snapshot")),
    };

    let records = Vec::<RawRecord>::deserialize(records_value)
        .context("invalid record entry in capacity snapshot")?;

    if records.is_empty() {
        Err(anyhow!("capacity snapshot contains no records"))
    } else {
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_array_shape() {
        let raw = r#"[
            {"id": "c1", "kind": "cluster", "parentId": null, "name": "east", "weight": 0},
            {"id": "h1", "kind": "host", "parentId": "c1", "name": "esx-01", "weight": 512}
        ]"#;

        let records = parse_snapshot(raw).expect("bare array parses");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, NodeKind::Cluster);
        assert_eq!(records[1].parent_id.as_deref(), Some("c1"));
        assert_eq!(records[1].weight, 512);
    }

    #[test]
    fn parses_wrapped_object_shape() {
        let raw = r#"{"records": [
            {"id": "vm1", "kind": "vm", "parentId": "h1", "name": "web-01", "weight": 64}
        ]}"#;

        let records = parse_snapshot(raw).expect("wrapped object parses");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, NodeKind::Vm);
    }

    #[test]
    fn missing_weight_defaults_to_zero() {
        let raw = r#"[{"id": "c1", "kind": "cluster", "name": "east"}]"#;
        let records = parse_snapshot(raw).expect("weightless record parses");
        assert_eq!(records[0].weight, 0);
        assert_eq!(records[0].parent_id, None);
    }

    #[test]
    fn rejects_empty_and_malformed_snapshots() {
        assert!(parse_snapshot("[]").is_err());
        assert!(parse_snapshot("42").is_err());
        assert!(parse_snapshot("{\"nodes\": []}").is_err());
        assert!(parse_snapshot("not json").is_err());
    }

    #[test]
    fn rejects_unknown_kind() {
        let raw = r#"[{"id": "x", "kind": "rack", "name": "r1", "weight": 1}]"#;
        assert!(parse_snapshot(raw).is_err());
    }
}
