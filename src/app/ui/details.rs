use eframe::egui::{self, Align, Layout, Ui};

use crate::util::{format_capacity, percentage_of};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Details");
        ui.separator();

        let tree = self.session.tree();
        let Some(index) = self.inspected.filter(|&index| index < tree.node_count()) else {
            ui.label("Hover a rectangle to inspect it.");
            return;
        };

        let node = tree.node(index);
        ui.strong(node.name.as_str());
        ui.label(format!("{} · {}", node.kind.label(), node.id));
        ui.add_space(6.0);

        ui.label(format!("capacity used: {}", format_capacity(node.weight, 2)));
        let parent_weight = match node.parent {
            Some(parent) => tree.node(parent).weight,
            None => tree.total_weight(),
        };
        ui.label(format!(
            "{}% of parent",
            percentage_of(node.weight, parent_weight)
        ));

        let trail = tree
            .path_to(&node.id)
            .iter()
            .map(|id| tree.get(id).map_or(id.as_str(), |node| node.name.as_str()).to_owned())
            .collect::<Vec<_>>()
            .join(" › ");
        ui.label(trail);

        if node.children.is_empty() {
            return;
        }

        ui.add_space(8.0);
        ui.strong(format!("{} children", node.children.len()));
        egui::ScrollArea::vertical()
            .max_height(280.0)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for &child in &node.children {
                    let child_node = tree.node(child);
                    ui.horizontal(|ui| {
                        ui.label(child_node.name.as_str());
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            ui.label(format!(
                                "{} ({}%)",
                                format_capacity(child_node.weight, 1),
                                percentage_of(child_node.weight, node.weight),
                            ));
                        });
                    });
                }
            });
    }
}
