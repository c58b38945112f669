use eframe::egui::{self, Align, Context, Layout};

use crate::infra::NodeKind;
use crate::util::format_capacity;
use crate::zoom::{ClickTarget, ZoomFocus};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        snapshot_label: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("capviz");
                    ui.separator();
                    self.draw_breadcrumb(ui);
                    ui.separator();
                    ui.label(format!("snapshot: {snapshot_label}"));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload snapshot"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let tree = self.session.tree();
                        ui.label(format!(
                            "{} clusters · {} hosts · {} vms · {}",
                            tree.count_of(NodeKind::Cluster),
                            tree.count_of(NodeKind::Host),
                            tree.count_of(NodeKind::Vm),
                            format_capacity(tree.total_weight(), 1),
                        ));
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_icicle(ui));
    }

    /// Focus trail in the top bar. "overview" reads as a background click;
    /// clicking the focused host crumb toggles back out to its cluster.
    fn draw_breadcrumb(&mut self, ui: &mut egui::Ui) {
        let mut clicked = None;
        let at_root = matches!(self.session.current_focus(), ZoomFocus::Root);

        if ui.selectable_label(at_root, "overview").clicked() && !at_root {
            clicked = Some(ClickTarget::Background);
        }

        if let Some(focused_id) = self.session.current_focus().node_id().map(str::to_owned) {
            let crumbs = self
                .session
                .tree()
                .path_to(&focused_id)
                .into_iter()
                .map(|id| {
                    let name = self
                        .session
                        .tree()
                        .get(&id)
                        .map_or_else(|| id.clone(), |node| node.name.clone());
                    (id, name)
                })
                .collect::<Vec<_>>();

            for (id, name) in crumbs {
                ui.label("›");
                let is_focused = id == focused_id;
                if ui.selectable_label(is_focused, name).clicked() {
                    clicked = Some(ClickTarget::Node(id));
                }
            }
        }

        if let Some(target) = clicked {
            self.session.click(&target);
        }
    }
}
