use dreamspace::engine::Input;
use dreamspace::search::SearchProvider;
use eframe::egui::{self, Context, Key, Modifiers, Pos2, Rect, Ui};
use tracing::debug;

use super::super::ViewModel;
use super::super::render_utils::circle_visible;

impl ViewModel {
    pub(in crate::app) fn dispatch(&mut self, input: Input) {
        debug!(?input, "dispatch");
        let next = self.engine.apply(input);
        let transitioned = next.history() != self.engine.history();
        self.engine = next;
        if transitioned {
            self.camera.reset();
        }
    }

    pub(in crate::app) fn submit_search(&mut self) {
        let term = self.search_text.trim().to_owned();
        let matches = self.search.search(&term, self.engine.nodes());
        self.dispatch(Input::Search { term, matches });
    }

    pub(in crate::app) fn handle_shortcuts(&mut self, ctx: &Context) {
        // text fields keep their own keys
        if ctx.memory(|memory| memory.focused().is_some()) {
            return;
        }

        let (escape, redo, undo) = ctx.input_mut(|input| {
            let escape = input.consume_key(Modifiers::NONE, Key::Escape);
            let redo = input.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z)
                || input.consume_key(Modifiers::COMMAND, Key::Y);
            let undo = !redo && input.consume_key(Modifiers::COMMAND, Key::Z);
            (escape, redo, undo)
        });

        if escape {
            self.dispatch(Input::Escape);
        }
        if redo {
            self.dispatch(Input::Redo);
        }
        if undo {
            self.dispatch(Input::Undo);
        }
    }

    pub(in crate::app) fn handle_camera_input(
        &mut self,
        ui: &Ui,
        response: &egui::Response,
    ) {
        if response.dragged_by(egui::PointerButton::Primary)
            || response.dragged_by(egui::PointerButton::Secondary)
        {
            let delta = response.drag_delta();
            self.camera.orbit(f64::from(delta.x), f64::from(delta.y));
        }

        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() > f32::EPSILON {
            self.camera.zoom(f64::from(scroll));
        }
    }

    pub(in crate::app) fn visible_indices(
        rect: Rect,
        draw_order: &[usize],
        screen_positions: &[Pos2],
        screen_radii: &[f32],
    ) -> Vec<usize> {
        draw_order
            .iter()
            .copied()
            .filter(|&index| circle_visible(rect, screen_positions[index], screen_radii[index]))
            .collect()
    }

    pub(in crate::app) fn hovered_index(
        ui: &Ui,
        visible_indices: &[usize],
        screen_positions: &[Pos2],
        screen_radii: &[f32],
    ) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        // later entries are drawn on top
        visible_indices
            .iter()
            .rev()
            .copied()
            .find(|&index| screen_positions[index].distance(pointer) <= screen_radii[index])
    }
}
