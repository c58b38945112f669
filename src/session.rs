use crate::infra::Hierarchy;
use crate::layout::{LayoutError, LayoutParams, LayoutRect, Viewport, layout};
use crate::zoom::{ClickTarget, ZoomFocus, transition};

/// Invoked once per recomputation with the freshly computed geometry.
pub type LayoutObserver = Box<dyn FnMut(&[LayoutRect])>;

/// Owns the tree, the zoom focus and the viewport for one visualization
/// session, and keeps exactly one current geometry list. Every accepted
/// event (click, resize, snapshot swap, parameter change) runs a single
/// synchronous layout pass that replaces the previous list outright.
pub struct VizSession {
    tree: Hierarchy,
    focus: ZoomFocus,
    viewport: Viewport,
    params: LayoutParams,
    rects: Vec<LayoutRect>,
    observer: Option<LayoutObserver>,
}

impl VizSession {
    pub fn new(
        tree: Hierarchy,
        viewport: Viewport,
        params: LayoutParams,
    ) -> Result<Self, LayoutError> {
        let rects = layout(&tree, &ZoomFocus::Root, viewport, params)?;
        Ok(Self {
            tree,
            focus: ZoomFocus::Root,
            viewport,
            params,
            rects,
            observer: None,
        })
    }

    pub fn tree(&self) -> &Hierarchy {
        &self.tree
    }

    pub fn current_layout(&self) -> &[LayoutRect] {
        &self.rects
    }

    pub fn current_focus(&self) -> &ZoomFocus {
        &self.focus
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn params(&self) -> LayoutParams {
        self.params
    }

    pub fn set_observer(&mut self, observer: impl FnMut(&[LayoutRect]) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Applies a click event. Returns whether the focus changed; incompatible
    /// clicks are no-ops and skip the layout pass entirely.
    pub fn click(&mut self, target: &ClickTarget) -> bool {
        let Some(next) = transition(&self.tree, &self.focus, target) else {
            return false;
        };
        self.focus = next;
        // The stored viewport was validated by new/resize, so this holds.
        self.recompute().is_ok()
    }

    /// Recomputes against a new viewport without changing the focus. A bad
    /// viewport fails the pass and leaves the previous geometry in place.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), LayoutError> {
        let rects = layout(&self.tree, &self.focus, viewport, self.params)?;
        self.viewport = viewport;
        self.install(rects);
        Ok(())
    }

    pub fn set_params(&mut self, params: LayoutParams) {
        if params == self.params {
            return;
        }
        self.params = params;
        let _ = self.recompute();
    }

    /// Swaps in a new snapshot. The focus survives when the focused id still
    /// resolves to a node of the same kind, otherwise it resets to the root.
    pub fn replace_snapshot(&mut self, tree: Hierarchy) {
        self.tree = tree;

        let survives = match (self.focus.node_id(), self.focus.kind()) {
            (Some(id), Some(kind)) => self.tree.get(id).is_some_and(|node| node.kind == kind),
            _ => true,
        };
        if !survives {
            self.focus = ZoomFocus::Root;
        }

        let _ = self.recompute();
    }

    fn recompute(&mut self) -> Result<(), LayoutError> {
        let rects = layout(&self.tree, &self.focus, self.viewport, self.params)?;
        self.install(rects);
        Ok(())
    }

    fn install(&mut self, rects: Vec<LayoutRect>) {
        self.rects = rects;
        if let Some(observer) = &mut self.observer {
            observer(&self.rects);
        }
    }
}
