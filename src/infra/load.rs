use std::fs;

use anyhow::{Context, Result};

use super::build::build_hierarchy;
use super::parse::parse_snapshot;
use super::tree::{Diagnostic, Hierarchy};

pub fn load_snapshot(path: &str) -> Result<(Hierarchy, Vec<Diagnostic>)> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read capacity snapshot {path}"))?;
    let records =
        parse_snapshot(&raw).with_context(|| format!("failed to parse capacity snapshot {path}"))?;

    let (tree, diagnostics) = build_hierarchy(&records);
    log::info!(
        "loaded capacity snapshot {path}: {} records, {} nodes kept, {} diagnostics",
        records.len(),
        tree.node_count(),
        diagnostics.len()
    );
    for diagnostic in &diagnostics {
        log::warn!("snapshot {path}: {diagnostic}");
    }

    Ok((tree, diagnostics))
}
