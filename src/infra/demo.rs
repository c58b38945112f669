use super::build::build_hierarchy;
use super::parse::RawRecord;
use super::tree::{Diagnostic, Hierarchy, NodeKind};
use crate::util::stable_fraction;

const GIB: u64 = 1024 * 1024 * 1024;
const SITES: [&str; 4] = ["east", "west", "central", "lab"];

/// Deterministic synthetic inventory used when no snapshot file is given.
/// Sizes are hashed from the node ids, so every run shows the same picture.
pub fn demo_snapshot() -> (Hierarchy, Vec<Diagnostic>) {
    let mut records = Vec::new();

    for (site_index, site) in SITES.iter().enumerate() {
        let cluster_id = format!("cluster-{site}");
        records.push(RawRecord {
            id: cluster_id.clone(),
            kind: NodeKind::Cluster,
            parent_id: None,
            name: format!("{site} cluster"),
            weight: 0,
        });

        let host_count = 3 + (stable_fraction(&cluster_id) * 5.0) as usize;
        for host_number in 1..=host_count {
            let host_id = format!("{site}-esx-{host_number:02}");
            records.push(RawRecord {
                id: host_id.clone(),
                kind: NodeKind::Host,
                parent_id: Some(cluster_id.clone()),
                name: format!("esx-{host_number:02}.{site}"),
                weight: 0,
            });

            let vm_count = 2 + (stable_fraction(&host_id) * 14.0) as usize;
            for vm_number in 1..=vm_count {
                let vm_id = format!("{host_id}-vm-{vm_number:02}");
                let used = 4 + (stable_fraction(&vm_id) * 380.0) as u64;
                records.push(RawRecord {
                    id: vm_id.clone(),
                    kind: NodeKind::Vm,
                    parent_id: Some(host_id.clone()),
                    name: format!("vm-{:02}{}", vm_number, suffix(site_index, vm_number)),
                    weight: used * GIB,
                });
            }
        }
    }

    build_hierarchy(&records)
}

fn suffix(site_index: usize, vm_number: usize) -> &'static str {
    const ROLES: [&str; 5] = ["-web", "-db", "-cache", "-batch", "-ci"];
    ROLES[(site_index + vm_number) % ROLES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_snapshot_is_clean_and_reproducible() {
        let (first, diagnostics) = demo_snapshot();
        let (second, _) = demo_snapshot();

        assert!(diagnostics.is_empty());
        assert_eq!(first.clusters().len(), SITES.len());
        assert_eq!(first.node_count(), second.node_count());
        assert_eq!(first.total_weight(), second.total_weight());
        assert!(first.total_weight() > 0);
    }
}
