mod build;
mod demo;
mod load;
mod parse;
mod tree;

pub use build::build_hierarchy;
pub use demo::demo_snapshot;
pub use load::load_snapshot;
pub use parse::RawRecord;
pub use tree::{Diagnostic, Hierarchy, HierarchyNode, NodeKind};
