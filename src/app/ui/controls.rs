use eframe::egui::{self, Ui};

use crate::layout::LayoutParams;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Icicle Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search (name or id)")
            .on_hover_text("Fuzzy-highlight matching rectangles without changing the layout.");
        ui.text_edit_singleline(&mut self.search);

        ui.separator();

        let threshold_slider = ui
            .add(
                egui::Slider::new(&mut self.min_extent, 2.0..=64.0)
                    .text("Merge threshold")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text(
                "Slices thinner than this many pixels fold into an \"other\" rectangle.",
            );
        if threshold_slider.changed() {
            self.session.set_params(LayoutParams {
                min_extent: self.min_extent,
            });
        }

        ui.checkbox(&mut self.show_capacity_labels, "Capacity labels")
            .on_hover_text("Annotate rectangles with their used capacity.");
        ui.checkbox(&mut self.show_percent_labels, "Percent-of-parent labels")
            .on_hover_text("Annotate rectangles with their share of the parent.");

        ui.separator();

        egui::CollapsingHeader::new(format!("Diagnostics ({})", self.diagnostics.len()))
            .default_open(!self.diagnostics.is_empty())
            .show(ui, |ui| {
                if self.diagnostics.is_empty() {
                    ui.label("No records were rejected.");
                    return;
                }
                egui::ScrollArea::vertical()
                    .max_height(220.0)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for diagnostic in &self.diagnostics {
                            ui.label(diagnostic.to_string());
                        }
                    });
            });
    }
}
