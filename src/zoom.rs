use crate::infra::{Hierarchy, NodeKind};

/// The hierarchy node currently treated as the root of the visible subtree.
/// Id-based so a focus can survive a snapshot reload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ZoomFocus {
    #[default]
    Root,
    Cluster(String),
    Host(String),
}

impl ZoomFocus {
    pub fn node_id(&self) -> Option<&str> {
        match self {
            Self::Root => None,
            Self::Cluster(id) | Self::Host(id) => Some(id),
        }
    }

    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            Self::Root => None,
            Self::Cluster(_) => Some(NodeKind::Cluster),
            Self::Host(_) => Some(NodeKind::Host),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    Node(String),
    Background,
}

/// Computes the focus a click leads to, or `None` when the click is a no-op.
/// Incompatible combinations (a vm, a host outside the focused cluster, an
/// unknown id) are deliberately ignored rather than treated as errors.
pub fn transition(tree: &Hierarchy, focus: &ZoomFocus, target: &ClickTarget) -> Option<ZoomFocus> {
    match target {
        ClickTarget::Background => match focus {
            ZoomFocus::Root => None,
            ZoomFocus::Cluster(_) | ZoomFocus::Host(_) => Some(ZoomFocus::Root),
        },
        ClickTarget::Node(id) => {
            let node = tree.get(id)?;
            match (focus, node.kind) {
                (ZoomFocus::Root, NodeKind::Cluster) => Some(ZoomFocus::Cluster(id.clone())),
                (ZoomFocus::Cluster(cluster_id), NodeKind::Host) => {
                    let parent_id = node.parent.map(|parent| tree.node(parent).id.as_str());
                    if parent_id == Some(cluster_id.as_str()) {
                        Some(ZoomFocus::Host(id.clone()))
                    } else {
                        None
                    }
                }
                // Re-clicking the focused host toggles back out to its cluster.
                (ZoomFocus::Host(host_id), NodeKind::Host) if host_id == id => {
                    let parent = node.parent?;
                    Some(ZoomFocus::Cluster(tree.node(parent).id.clone()))
                }
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{RawRecord, build_hierarchy};

    fn record(id: &str, kind: NodeKind, parent: Option<&str>, weight: u64) -> RawRecord {
        RawRecord {
            id: id.to_owned(),
            kind,
            parent_id: parent.map(str::to_owned),
            name: id.to_owned(),
            weight,
        }
    }

    fn tree() -> Hierarchy {
        let (tree, diagnostics) = build_hierarchy(&[
            record("c1", NodeKind::Cluster, None, 0),
            record("c2", NodeKind::Cluster, None, 0),
            record("h1", NodeKind::Host, Some("c1"), 0),
            record("h2", NodeKind::Host, Some("c2"), 0),
            record("vm1", NodeKind::Vm, Some("h1"), 100),
            record("vm2", NodeKind::Vm, Some("h2"), 100),
        ]);
        assert!(diagnostics.is_empty());
        tree
    }

    fn node(id: &str) -> ClickTarget {
        ClickTarget::Node(id.to_owned())
    }

    #[test]
    fn drill_down_and_background_round_trip() {
        let tree = tree();

        let focus = transition(&tree, &ZoomFocus::Root, &node("c1")).expect("cluster click zooms");
        assert_eq!(focus, ZoomFocus::Cluster("c1".to_owned()));

        let focus = transition(&tree, &focus, &node("h1")).expect("host click drills down");
        assert_eq!(focus, ZoomFocus::Host("h1".to_owned()));

        let focus =
            transition(&tree, &focus, &ClickTarget::Background).expect("background resets");
        assert_eq!(focus, ZoomFocus::Root);
    }

    #[test]
    fn reclicking_the_focused_host_toggles_back_to_its_cluster() {
        let tree = tree();
        let focus = ZoomFocus::Host("h1".to_owned());
        let next = transition(&tree, &focus, &node("h1")).expect("re-click toggles out");
        assert_eq!(next, ZoomFocus::Cluster("c1".to_owned()));
    }

    #[test]
    fn background_in_root_view_is_a_no_op() {
        let tree = tree();
        assert_eq!(transition(&tree, &ZoomFocus::Root, &ClickTarget::Background), None);
    }

    #[test]
    fn incompatible_clicks_are_ignored() {
        let tree = tree();

        // A vm is never a zoom target.
        assert_eq!(transition(&tree, &ZoomFocus::Root, &node("vm1")), None);
        let cluster = ZoomFocus::Cluster("c1".to_owned());
        assert_eq!(transition(&tree, &cluster, &node("vm1")), None);

        // A host outside the focused cluster does not steal focus.
        assert_eq!(transition(&tree, &cluster, &node("h2")), None);

        // Cluster clicks only act in the root view.
        assert_eq!(transition(&tree, &cluster, &node("c2")), None);
        let host = ZoomFocus::Host("h1".to_owned());
        assert_eq!(transition(&tree, &host, &node("c1")), None);

        // A different host is not a toggle target either.
        assert_eq!(transition(&tree, &host, &node("h2")), None);

        // Unknown ids never transition.
        assert_eq!(transition(&tree, &ZoomFocus::Root, &node("missing")), None);
    }

    #[test]
    fn host_click_in_root_view_is_a_no_op() {
        let tree = tree();
        assert_eq!(transition(&tree, &ZoomFocus::Root, &node("h1")), None);
    }
}
