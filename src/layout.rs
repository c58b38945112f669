use thiserror::Error;

use crate::infra::Hierarchy;
use crate::util::percentage_of;
use crate::zoom::ZoomFocus;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    /// Children whose extent along the partition axis falls below this many
    /// device-independent units are folded into one "other" rectangle.
    pub min_extent: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self { min_extent: 12.0 }
    }
}

/// Geometry for one visible node, valid for a single layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutRect {
    /// Arena index of the source node; `None` for a merged "other" aggregate.
    pub node: Option<usize>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Absolute hierarchy depth: 1 cluster, 2 host, 3 vm.
    pub depth: u8,
    pub weight: u64,
    pub percent_of_parent: u8,
    /// Number of siblings folded into this rectangle; 0 for ordinary nodes.
    pub merged_count: usize,
}

impl LayoutRect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("viewport must have positive dimensions, got {width}x{height}")]
    BadViewport { width: f32, height: f32 },
}

#[derive(Clone, Copy)]
struct Area {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

/// Computes one rectangle per visible node of the subtree under `focus`,
/// partitioning the full viewport among the focus's descendants. Pure: the
/// same tree, focus, viewport and params always produce identical geometry.
///
/// The focus node itself is not emitted, so an empty subtree (no children, or
/// a focus id that no longer resolves) yields an empty list rather than an
/// error.
pub fn layout(
    tree: &Hierarchy,
    focus: &ZoomFocus,
    viewport: Viewport,
    params: LayoutParams,
) -> Result<Vec<LayoutRect>, LayoutError> {
    if !(viewport.width > 0.0 && viewport.height > 0.0) {
        return Err(LayoutError::BadViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let full = Area {
        x: 0.0,
        y: 0.0,
        width: viewport.width,
        height: viewport.height,
    };

    let mut rects = Vec::new();
    match focus {
        ZoomFocus::Root => {
            partition(
                tree,
                tree.clusters(),
                tree.total_weight(),
                full,
                1,
                params,
                &mut rects,
            );
        }
        ZoomFocus::Cluster(id) | ZoomFocus::Host(id) => {
            let Some(index) = tree.index_of(id) else {
                return Ok(rects);
            };
            let node = tree.node(index);
            partition(
                tree,
                &node.children,
                node.weight,
                full,
                node.kind.depth() + 1,
                params,
                &mut rects,
            );
        }
    }

    Ok(rects)
}

/// Slice-and-dice step: odd depths stack siblings as horizontal bands, even
/// depths split them into columns. Slot boundaries come from cumulative
/// weight so the siblings tile the parent extent exactly; a zero sibling
/// weight sum falls back to equal slots.
fn partition(
    tree: &Hierarchy,
    children: &[usize],
    parent_weight: u64,
    area: Area,
    depth: u8,
    params: LayoutParams,
    out: &mut Vec<LayoutRect>,
) {
    if children.is_empty() {
        return;
    }

    let stacked = depth % 2 == 1;
    let avail = if stacked { area.height } else { area.width };
    let count = children.len();
    let total: u64 = children.iter().map(|&child| tree.node(child).weight).sum();

    let boundary = |cumulative: u64, slot: usize| -> f32 {
        if total > 0 {
            (f64::from(avail) * cumulative as f64 / total as f64) as f32
        } else {
            avail * slot as f32 / count as f32
        }
    };

    // Children are sorted weight-descending, so everything too narrow to
    // stand alone is a suffix of the sibling list.
    let mut kept = 0usize;
    let mut cumulative = 0u64;
    while kept < count {
        let weight = tree.node(children[kept]).weight;
        let extent = boundary(cumulative + weight, kept + 1) - boundary(cumulative, kept);
        if extent < params.min_extent {
            break;
        }
        cumulative += weight;
        kept += 1;
    }

    cumulative = 0;
    for (slot, &child) in children[..kept].iter().enumerate() {
        let node = tree.node(child);
        let start = boundary(cumulative, slot);
        cumulative += node.weight;
        let end = boundary(cumulative, slot + 1);

        let cell = slice(area, stacked, start, end);
        out.push(LayoutRect {
            node: Some(child),
            x: cell.x,
            y: cell.y,
            width: cell.width,
            height: cell.height,
            depth,
            weight: node.weight,
            percent_of_parent: percentage_of(node.weight, parent_weight),
            merged_count: 0,
        });

        partition(tree, &node.children, node.weight, cell, depth + 1, params, out);
    }

    if kept < count {
        let merged_weight: u64 = children[kept..]
            .iter()
            .map(|&child| tree.node(child).weight)
            .sum();
        let start = boundary(cumulative, kept);
        let cell = slice(area, stacked, start, avail);
        out.push(LayoutRect {
            node: None,
            x: cell.x,
            y: cell.y,
            width: cell.width,
            height: cell.height,
            depth,
            weight: merged_weight,
            percent_of_parent: percentage_of(merged_weight, parent_weight),
            merged_count: count - kept,
        });
    }
}

fn slice(area: Area, stacked: bool, start: f32, end: f32) -> Area {
    if stacked {
        Area {
            x: area.x,
            y: area.y + start,
            width: area.width,
            height: end - start,
        }
    } else {
        Area {
            x: area.x + start,
            y: area.y,
            width: end - start,
            height: area.height,
        }
    }
}
