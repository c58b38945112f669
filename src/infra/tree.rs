use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

/// Level of a node in the three-deep infrastructure hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Cluster,
    Host,
    Vm,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Cluster => "cluster",
            Self::Host => "host",
            Self::Vm => "virtual machine",
        }
    }

    /// Absolute depth below the synthetic root.
    pub fn depth(self) -> u8 {
        match self {
            Self::Cluster => 1,
            Self::Host => 2,
            Self::Vm => 3,
        }
    }

    pub(super) fn expected_parent(self) -> Option<Self> {
        match self {
            Self::Cluster => None,
            Self::Host => Some(Self::Cluster),
            Self::Vm => Some(Self::Host),
        }
    }
}

#[derive(Clone, Debug)]
pub struct HierarchyNode {
    pub id: String,
    pub kind: NodeKind,
    pub name: String,
    pub weight: u64,
    /// Arena index of the parent; `None` for clusters, which hang off the
    /// synthetic root represented by the [`Hierarchy`] itself.
    pub parent: Option<usize>,
    /// Ordered arena indices: weight descending, ties by name ascending.
    pub children: Vec<usize>,
}

/// Arena-backed infrastructure tree. Nodes are addressed by arena index
/// internally and by stable string id at the API boundary.
#[derive(Clone, Debug, Default)]
pub struct Hierarchy {
    pub(super) nodes: Vec<HierarchyNode>,
    pub(super) clusters: Vec<usize>,
    pub(super) index_by_id: HashMap<String, usize>,
}

impl Hierarchy {
    pub fn node(&self, index: usize) -> &HierarchyNode {
        &self.nodes[index]
    }

    pub fn get(&self, id: &str) -> Option<&HierarchyNode> {
        self.index_by_id.get(id).map(|&index| &self.nodes[index])
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    /// Cluster arena indices in layout order.
    pub fn clusters(&self) -> &[usize] {
        &self.clusters
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn count_of(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|node| node.kind == kind).count()
    }

    /// Combined weight of the synthetic root, i.e. of all clusters.
    pub fn total_weight(&self) -> u64 {
        self.clusters
            .iter()
            .map(|&cluster| self.nodes[cluster].weight)
            .sum()
    }

    /// Ids from the tree top down to the given node, for breadcrumb rendering.
    pub fn path_to(&self, id: &str) -> Vec<String> {
        let mut path = Vec::new();
        let mut cursor = self.index_of(id);
        while let Some(index) = cursor {
            let node = &self.nodes[index];
            path.push(node.id.clone());
            cursor = node.parent;
        }
        path.reverse();
        path
    }
}

/// Non-fatal per-record finding reported by the hierarchy builder. The
/// offending record is excluded (or adjusted) and the build continues.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("{kind} record {id} references unknown parent {parent_id}; record dropped")]
    OrphanRecord {
        id: String,
        kind: NodeKind,
        parent_id: String,
    },
    #[error("{kind} record {id} has no parent id; record dropped")]
    MissingParent { id: String, kind: NodeKind },
    #[error("record {id} has parent {parent_id} of the wrong kind; record dropped")]
    WrongParentKind { id: String, parent_id: String },
    #[error("duplicate record id {id}; later record dropped")]
    DuplicateId { id: String },
    #[error("cluster record {id} carries parent {parent_id}; attached to the root instead")]
    ClusterWithParent { id: String, parent_id: String },
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.label())
    }
}
