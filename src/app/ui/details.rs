use dreamspace::engine::Input;
use eframe::egui::{self, RichText, Ui};

use super::super::ViewModel;
use super::super::render_utils::type_color;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Node Details");
        ui.add_space(6.0);

        let shown_id = self
            .engine
            .centered_node()
            .map(str::to_owned)
            .or_else(|| self.hovered.clone());
        let Some(shown_id) = shown_id else {
            ui.label("Hover a node to inspect it, click to focus it.");
            return;
        };
        let Some(node) = self.engine.node(&shown_id) else {
            ui.label("This node is no longer in the vault.");
            return;
        };

        let node_type = node.metadata.node_type.clone();
        let related = node.metadata.related_nodes.clone();
        let extra = node
            .metadata
            .extra
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect::<Vec<_>>();
        let is_centered = self.engine.centered_node() == Some(shown_id.as_str());
        let scale = node.render_scale();

        ui.label(RichText::new(shown_id.as_str()).strong());
        if is_centered {
            ui.small("focused");
        }
        ui.add_space(6.0);

        if node_type.is_empty() {
            ui.label("Type: untyped");
        } else {
            ui.horizontal(|ui| {
                ui.label("Type:");
                ui.label(RichText::new(node_type.as_str()).color(type_color(&node_type)));
            });
        }
        ui.label(format!("Scale: {scale:.2}"));

        if !extra.is_empty() {
            ui.separator();
            ui.label(RichText::new("Metadata").strong());
            for line in &extra {
                ui.small(line.as_str());
            }
        }

        ui.separator();
        ui.label(RichText::new(format!("Related nodes ({})", related.len())).strong());
        if related.is_empty() {
            ui.label("No related nodes listed.");
            return;
        }

        let mut pending = None;
        egui::ScrollArea::vertical()
            .id_salt("related_nodes_scroll")
            .max_height(320.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for id in &related {
                    if self.engine.node(id).is_some() {
                        if ui.link(id.as_str()).on_hover_text("Focus this node").clicked() {
                            pending = Some(id.clone());
                        }
                    } else {
                        ui.weak(format!("{id} (missing)"));
                    }
                }
            });

        if let Some(id) = pending {
            self.dispatch(Input::Select(id));
        }
    }
}
