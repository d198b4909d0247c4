use std::path::Path;

use dreamspace::config::Config;
use dreamspace::engine::{EngineState, Node};
use dreamspace::search::FuzzySearch;
use eframe::egui::{self, Align, Context, Layout};

use super::super::camera::OrbitCamera;
use super::super::{ViewModel, ViewScratch};

impl ViewModel {
    pub(in crate::app) fn new(nodes: Vec<Node>, config: Config) -> Self {
        let engine = EngineState::new(nodes, config.layout);
        let display_positions = engine.nodes().iter().map(|node| node.position).collect();

        Self {
            engine,
            search: FuzzySearch::new(config.search.max_results),
            search_text: String::new(),
            camera: OrbitCamera::default(),
            hovered: None,
            display_positions,
            view_scratch: ViewScratch::default(),
            animate_transitions: true,
            show_labels: true,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        vault_path: &Path,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("dreamspace");
                    ui.separator();
                    ui.label(format!("vault: {}", vault_path.display()));
                    ui.label(format!("nodes: {}", self.engine.nodes().len()));
                    ui.label(format!("layout: {}", self.engine.layout_mode().label()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload vault"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(centered) = self.engine.centered_node() {
                            ui.label(format!("focus: {centered}"));
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                if is_loading {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Rescanning vault...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                } else {
                    self.draw_graph(ui);
                }
            });
    }
}
