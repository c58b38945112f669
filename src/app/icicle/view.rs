use std::collections::HashSet;

use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, StrokeKind, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::layout::LayoutRect;
use crate::util::format_capacity;

use super::super::ViewModel;
use super::{merged_fill, node_fill};

const BACKGROUND: Color32 = Color32::from_rgb(19, 23, 29);
const OUTLINE: Color32 = Color32::from_rgb(14, 17, 22);
const LABEL: Color32 = Color32::from_rgb(235, 238, 242);
const LABEL_DIM: Color32 = Color32::from_rgb(196, 202, 210);
const MATCH_ACCENT: Color32 = Color32::from_rgb(255, 214, 90);

impl ViewModel {
    pub(in crate::app) fn draw_icicle(&mut self, ui: &mut Ui) {
        let canvas = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(canvas, Sense::click());

        self.sync_viewport(canvas.size());

        let painter = ui.painter_at(canvas);
        painter.rect_filled(canvas, 0.0, BACKGROUND);

        let matches = self.search_matches();
        let first_level = self.first_visible_depth();
        let cell_of = |item: &LayoutRect| {
            egui::Rect::from_min_size(
                canvas.min + vec2(item.x, item.y),
                vec2(item.width, item.height),
            )
        };

        // Fills front to back, so leaf cells end up on top of their parents.
        for item in self.session.current_layout() {
            let fill = if item.node.is_none() {
                merged_fill(item.depth)
            } else {
                node_fill(item.depth, item.percent_of_parent as f32 / 100.0)
            };
            painter.rect_filled(cell_of(item), 0.0, fill);
        }

        // Strokes back to front, so group boundaries stay visible over the
        // leaf fills. Search matches get an accent outline on top.
        for item in self.session.current_layout().iter().rev() {
            let width = if item.depth == first_level { 2.0 } else { 1.0 };
            painter.rect_stroke(
                cell_of(item),
                0.0,
                Stroke::new(width, OUTLINE),
                StrokeKind::Inside,
            );
        }
        if let Some(matches) = &matches {
            for item in self.session.current_layout() {
                if item.node.is_some_and(|index| matches.contains(&index)) {
                    painter.rect_stroke(
                        cell_of(item),
                        0.0,
                        Stroke::new(2.0, MATCH_ACCENT),
                        StrokeKind::Inside,
                    );
                }
            }
        }

        for item in self.session.current_layout() {
            self.draw_cell_label(&painter, cell_of(item), item, first_level);
        }

        self.handle_canvas_input(canvas, &response);
    }

    fn draw_cell_label(
        &self,
        painter: &egui::Painter,
        cell: egui::Rect,
        item: &LayoutRect,
        first_level: u8,
    ) {
        let is_group = item.depth == first_level;
        let is_leaf = match item.node {
            None => true,
            Some(index) => self.session.tree().node(index).children.is_empty(),
        };
        if !is_group && !is_leaf {
            return;
        }
        if cell.width() < 64.0 || cell.height() < 16.0 {
            return;
        }

        let clipped = painter.with_clip_rect(cell.intersect(painter.clip_rect()));
        let font = if is_group {
            FontId::proportional(13.0)
        } else {
            FontId::proportional(11.0)
        };

        let name = match item.node {
            Some(index) => self.session.tree().node(index).name.clone(),
            None => format!("+{} more", item.merged_count),
        };
        clipped.text(
            cell.min + vec2(6.0, 4.0),
            Align2::LEFT_TOP,
            name,
            font,
            LABEL,
        );

        if cell.height() < 34.0 {
            return;
        }
        let mut annotations = Vec::new();
        if self.show_capacity_labels {
            annotations.push(format_capacity(item.weight, 1));
        }
        if self.show_percent_labels {
            annotations.push(format!("{}%", item.percent_of_parent));
        }
        if !annotations.is_empty() {
            clipped.text(
                cell.min + vec2(6.0, 20.0),
                Align2::LEFT_TOP,
                annotations.join(" · "),
                FontId::proportional(11.0),
                LABEL_DIM,
            );
        }
    }

    /// Arena indices of nodes matching the search box, or `None` when the
    /// query is empty.
    fn search_matches(&self) -> Option<HashSet<usize>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        let tree = self.session.tree();
        let matches = (0..tree.node_count())
            .filter(|&index| {
                let node = tree.node(index);
                matcher.fuzzy_match(&node.name, query).is_some()
                    || matcher.fuzzy_match(&node.id, query).is_some()
            })
            .collect::<HashSet<_>>();
        Some(matches)
    }
}
