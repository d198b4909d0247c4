use dreamspace::engine::{Input, LayoutMode, Viewport};
use dreamspace::util::truncate_label;
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Stroke, Ui, vec2};

use super::super::ViewModel;
use super::super::render_utils::{
    blend_color, draw_background, screen_radius, type_color,
};

const LABEL_CHARS: usize = 28;
const CENTERED_COLOR: Color32 = Color32::from_rgb(245, 206, 93);

impl ViewModel {
    fn update_screen_space(&mut self, rect: egui::Rect) {
        let aspect = f64::from(rect.width() / rect.height().max(1.0));
        let camera = self.camera.engine_camera(aspect);
        let viewport = Viewport::new(f64::from(rect.width()), f64::from(rect.height()));
        let focal_length = self.camera.focal_length(viewport.height);
        let near = self.camera.near;

        let scratch = &mut self.view_scratch;
        scratch.screen_positions.clear();
        scratch.screen_radii.clear();
        scratch.depths.clear();
        scratch.draw_order.clear();

        for (index, (node, &shown)) in self
            .engine
            .nodes()
            .iter()
            .zip(&self.display_positions)
            .enumerate()
        {
            let depth = self.camera.depth_of(shown);
            let (x, y) = viewport.to_pixels(camera.project(shown));
            scratch
                .screen_positions
                .push(Pos2::new(rect.left() + x as f32, rect.top() + y as f32));
            scratch.depths.push(depth);
            if depth <= near {
                scratch.screen_radii.push(0.0);
                continue;
            }
            scratch
                .screen_radii
                .push(screen_radius(node.render_scale(), depth, focal_length));
            scratch.draw_order.push(index);
        }

        // far to near
        let depths = &scratch.depths;
        scratch
            .draw_order
            .sort_by(|a, b| depths[*b].total_cmp(&depths[*a]));
    }

    fn refresh_view_scales(&mut self, rect: egui::Rect) {
        if self.engine.layout_mode() != LayoutMode::Sphere {
            return;
        }
        let aspect = f64::from(rect.width() / rect.height().max(1.0));
        let camera = self.camera.engine_camera(aspect);
        let viewport = Viewport::new(f64::from(rect.width()), f64::from(rect.height()));
        let updates = self.engine.tick(&camera, &viewport);
        if !updates.is_empty() {
            self.engine.commit_view_scales(&updates);
        }
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let delta_seconds = f64::from(
            ui.ctx()
                .input(|input| input.stable_dt)
                .clamp(1.0 / 240.0, 1.0 / 20.0),
        );
        let transitioning = self.step_display_positions(delta_seconds);

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);

        self.handle_camera_input(ui, &response);
        self.refresh_view_scales(rect);
        self.update_screen_space(rect);

        if transitioning || response.dragged() {
            ui.ctx().request_repaint();
        }

        if self.engine.nodes().is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No node repositories in this vault.",
                FontId::proportional(14.0),
                Color32::from_gray(200),
            );
            return;
        }

        let scratch = &self.view_scratch;
        let visible = Self::visible_indices(
            rect,
            &scratch.draw_order,
            &scratch.screen_positions,
            &scratch.screen_radii,
        );
        let hovered = Self::hovered_index(
            ui,
            &visible,
            &scratch.screen_positions,
            &scratch.screen_radii,
        );
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let nodes = self.engine.nodes();
        let centered = self.engine.centered_node();
        let focus_active = centered.is_some();
        let related_to_focus = |id: &str| {
            centered
                .and_then(|focus| self.engine.node(focus))
                .is_some_and(|focus| focus.metadata.relates_to(id))
        };

        for &index in &visible {
            let node = &nodes[index];
            let position = scratch.screen_positions[index];
            let radius = scratch.screen_radii[index];
            let is_centered = centered == Some(node.id.as_str());
            let is_hovered = hovered == Some(index);

            let border = type_color(&node.metadata.node_type);
            let mut fill = blend_color(Color32::from_rgb(18, 22, 28), border, 0.35);
            if is_hovered {
                fill = blend_color(fill, Color32::from_rgb(255, 164, 101), 0.6);
            } else if focus_active && !is_centered && !related_to_focus(&node.id) {
                fill = blend_color(fill, Color32::BLACK, 0.45);
            }

            painter.circle_filled(position, radius, fill);
            painter.circle_stroke(
                position,
                radius,
                Stroke::new((radius * 0.12).clamp(1.0, 3.0), border),
            );
            if is_centered {
                painter.circle_stroke(
                    position,
                    radius + 5.0,
                    Stroke::new(1.6, CENTERED_COLOR.gamma_multiply(0.8)),
                );
            }

            if node.is_flipped {
                painter.text(
                    position,
                    Align2::CENTER_CENTER,
                    format!(
                        "{}\n{} related",
                        if node.metadata.node_type.is_empty() {
                            "untyped"
                        } else {
                            node.metadata.node_type.as_str()
                        },
                        node.metadata.related_nodes.len()
                    ),
                    FontId::proportional((radius * 0.28).clamp(10.0, 18.0)),
                    Color32::from_gray(240),
                );
                continue;
            }

            let should_draw_label =
                is_centered || is_hovered || (self.show_labels && radius > 6.0);
            if should_draw_label {
                painter.text(
                    position + vec2(radius + 5.0, 0.0),
                    Align2::LEFT_CENTER,
                    truncate_label(&node.id, LABEL_CHARS),
                    FontId::proportional(12.0),
                    Color32::from_gray(238),
                );
            }
        }

        self.hovered = hovered.map(|index| nodes[index].id.clone());

        if let Some(id) = &self.hovered {
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                id,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if response.clicked_by(egui::PointerButton::Primary)
            && let Some(id) = self.hovered.clone()
        {
            self.dispatch(Input::Select(id));
        }
    }
}
