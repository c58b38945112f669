use std::collections::HashMap;

use super::parse::RawRecord;
use super::tree::{Diagnostic, Hierarchy, HierarchyNode, NodeKind};

/// Builds a validated arena tree from raw snapshot records. Every rejected
/// record is reported as a [`Diagnostic`]; the rest of the tree still builds.
pub fn build_hierarchy(records: &[RawRecord]) -> (Hierarchy, Vec<Diagnostic>) {
    let mut nodes: Vec<HierarchyNode> = Vec::with_capacity(records.len());
    let mut index_by_id: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut diagnostics = Vec::new();

    // Level order, so a child only ever resolves against parents that made it
    // into the tree. A dropped host thereby drops its vms as orphans too.
    for level in [NodeKind::Cluster, NodeKind::Host, NodeKind::Vm] {
        for record in records.iter().filter(|record| record.kind == level) {
            if index_by_id.contains_key(&record.id) {
                diagnostics.push(Diagnostic::DuplicateId {
                    id: record.id.clone(),
                });
                continue;
            }

            let parent = match level.expected_parent() {
                None => {
                    if let Some(parent_id) = &record.parent_id {
                        diagnostics.push(Diagnostic::ClusterWithParent {
                            id: record.id.clone(),
                            parent_id: parent_id.clone(),
                        });
                    }
                    None
                }
                Some(expected) => {
                    let Some(parent_id) = &record.parent_id else {
                        diagnostics.push(Diagnostic::MissingParent {
                            id: record.id.clone(),
                            kind: level,
                        });
                        continue;
                    };

                    match index_by_id.get(parent_id) {
                        None => {
                            diagnostics.push(Diagnostic::OrphanRecord {
                                id: record.id.clone(),
                                kind: level,
                                parent_id: parent_id.clone(),
                            });
                            continue;
                        }
                        Some(&parent_index) if nodes[parent_index].kind != expected => {
                            diagnostics.push(Diagnostic::WrongParentKind {
                                id: record.id.clone(),
                                parent_id: parent_id.clone(),
                            });
                            continue;
                        }
                        Some(&parent_index) => Some(parent_index),
                    }
                }
            };

            let index = nodes.len();
            index_by_id.insert(record.id.clone(), index);
            nodes.push(HierarchyNode {
                id: record.id.clone(),
                kind: level,
                name: record.name.clone(),
                weight: record.weight,
                parent,
                children: Vec::new(),
            });

            if let Some(parent_index) = parent {
                nodes[parent_index].children.push(index);
            }
        }
    }

    // Children always sit at higher arena indices than their parent, so one
    // reverse sweep rolls weights up from vms through hosts to clusters. A
    // childless non-leaf keeps its independently supplied weight.
    for index in (0..nodes.len()).rev() {
        if nodes[index].children.is_empty() {
            continue;
        }
        nodes[index].weight = nodes[index]
            .children
            .iter()
            .map(|&child| nodes[child].weight)
            .sum();
    }

    // Deterministic sibling order: weight descending, ties by name ascending.
    let sort_keys = nodes
        .iter()
        .map(|node| (node.weight, node.name.clone()))
        .collect::<Vec<_>>();
    let sibling_order = |a: &usize, b: &usize| {
        sort_keys[*b]
            .0
            .cmp(&sort_keys[*a].0)
            .then_with(|| sort_keys[*a].1.cmp(&sort_keys[*b].1))
    };

    let mut clusters = nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.kind == NodeKind::Cluster)
        .map(|(index, _)| index)
        .collect::<Vec<_>>();
    clusters.sort_by(sibling_order);

    let mut child_lists = nodes
        .iter()
        .map(|node| node.children.clone())
        .collect::<Vec<_>>();
    for children in &mut child_lists {
        children.sort_by(sibling_order);
    }
    for (node, children) in nodes.iter_mut().zip(child_lists) {
        node.children = children;
    }

    (
        Hierarchy {
            nodes,
            clusters,
            index_by_id,
        },
        diagnostics,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, kind: NodeKind, parent: Option<&str>, weight: u64) -> RawRecord {
        RawRecord {
            id: id.to_owned(),
            kind,
            parent_id: parent.map(str::to_owned),
            name: id.to_owned(),
            weight,
        }
    }

    fn small_inventory() -> Vec<RawRecord> {
        vec![
            record("c1", NodeKind::Cluster, None, 0),
            record("h1", NodeKind::Host, Some("c1"), 0),
            record("h2", NodeKind::Host, Some("c1"), 0),
            record("vm1", NodeKind::Vm, Some("h1"), 100),
            record("vm2", NodeKind::Vm, Some("h1"), 300),
            record("vm3", NodeKind::Vm, Some("h2"), 50),
        ]
    }

    #[test]
    fn builds_three_level_tree_with_rolled_up_weights() {
        let (tree, diagnostics) = build_hierarchy(&small_inventory());

        assert!(diagnostics.is_empty());
        assert_eq!(tree.node_count(), 6);
        assert_eq!(tree.get("h1").map(|node| node.weight), Some(400));
        assert_eq!(tree.get("h2").map(|node| node.weight), Some(50));
        assert_eq!(tree.get("c1").map(|node| node.weight), Some(450));
        assert_eq!(tree.total_weight(), 450);
    }

    #[test]
    fn children_are_ordered_weight_descending_then_name() {
        let (tree, _) = build_hierarchy(&small_inventory());

        let cluster = tree.get("c1").expect("cluster exists");
        let host_ids = cluster
            .children
            .iter()
            .map(|&child| tree.node(child).id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(host_ids, ["h1", "h2"]);

        let h1 = tree.get("h1").expect("host exists");
        let vm_ids = h1
            .children
            .iter()
            .map(|&child| tree.node(child).id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(vm_ids, ["vm2", "vm1"]);
    }

    #[test]
    fn equal_weight_siblings_tie_break_by_name() {
        let (tree, _) = build_hierarchy(&[
            record("c1", NodeKind::Cluster, None, 0),
            record("hb", NodeKind::Host, Some("c1"), 10),
            record("ha", NodeKind::Host, Some("c1"), 10),
        ]);

        let cluster = tree.get("c1").expect("cluster exists");
        let host_ids = cluster
            .children
            .iter()
            .map(|&child| tree.node(child).id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(host_ids, ["ha", "hb"]);
    }

    #[test]
    fn orphan_host_is_dropped_and_reported_with_its_vms() {
        let mut records = small_inventory();
        records.push(record("h9", NodeKind::Host, Some("missing"), 0));
        records.push(record("vm9", NodeKind::Vm, Some("h9"), 75));

        let (tree, diagnostics) = build_hierarchy(&records);

        assert!(tree.get("h9").is_none());
        assert!(tree.get("vm9").is_none());
        assert_eq!(tree.total_weight(), 450);
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::OrphanRecord {
                    id: "h9".to_owned(),
                    kind: NodeKind::Host,
                    parent_id: "missing".to_owned(),
                },
                Diagnostic::OrphanRecord {
                    id: "vm9".to_owned(),
                    kind: NodeKind::Vm,
                    parent_id: "h9".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn duplicate_ids_keep_the_first_record() {
        let mut records = small_inventory();
        records.push(record("vm1", NodeKind::Vm, Some("h2"), 999));

        let (tree, diagnostics) = build_hierarchy(&records);

        assert_eq!(tree.get("vm1").map(|node| node.weight), Some(100));
        assert!(diagnostics.contains(&Diagnostic::DuplicateId {
            id: "vm1".to_owned()
        }));
    }

    #[test]
    fn vm_under_cluster_is_rejected_as_wrong_parent_kind() {
        let mut records = small_inventory();
        records.push(record("vm8", NodeKind::Vm, Some("c1"), 10));

        let (tree, diagnostics) = build_hierarchy(&records);

        assert!(tree.get("vm8").is_none());
        assert!(diagnostics.contains(&Diagnostic::WrongParentKind {
            id: "vm8".to_owned(),
            parent_id: "c1".to_owned(),
        }));
    }

    #[test]
    fn cluster_with_parent_is_reported_but_kept_at_root() {
        let (tree, diagnostics) = build_hierarchy(&[
            record("c1", NodeKind::Cluster, Some("bogus"), 7),
        ]);

        assert_eq!(tree.clusters().len(), 1);
        assert_eq!(tree.total_weight(), 7);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::ClusterWithParent {
                id: "c1".to_owned(),
                parent_id: "bogus".to_owned(),
            }]
        );
    }

    #[test]
    fn host_without_parent_id_is_dropped() {
        let (tree, diagnostics) =
            build_hierarchy(&[record("h0", NodeKind::Host, None, 12)]);

        assert_eq!(tree.node_count(), 0);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::MissingParent {
                id: "h0".to_owned(),
                kind: NodeKind::Host,
            }]
        );
    }

    #[test]
    fn empty_input_builds_an_empty_tree() {
        let (tree, diagnostics) = build_hierarchy(&[]);
        assert_eq!(tree.node_count(), 0);
        assert!(tree.clusters().is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn path_to_walks_up_to_the_root() {
        let (tree, _) = build_hierarchy(&small_inventory());
        assert_eq!(tree.path_to("vm2"), ["c1", "h1", "vm2"]);
        assert_eq!(tree.path_to("c1"), ["c1"]);
        assert!(tree.path_to("missing").is_empty());
    }
}
