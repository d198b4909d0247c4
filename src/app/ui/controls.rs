use dreamspace::engine::{CommandKind, Input, LayoutMode};
use eframe::egui::{self, Key, RichText, Ui};

use super::super::ViewModel;

const HISTORY_ROWS: usize = 12;

fn describe(kind: &CommandKind) -> String {
    match kind {
        CommandKind::NodeSelect(id) => format!("focus {id}"),
        CommandKind::Escape { recenter: Some(id) } => format!("back to sphere at {id}"),
        CommandKind::Escape { recenter: None } => "back to sphere".to_owned(),
        CommandKind::Search { term, .. } if term.trim().is_empty() => "clear search".to_owned(),
        CommandKind::Search { term, matches } => {
            format!("search \"{term}\" ({} found)", matches.len())
        }
    }
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Navigation");
        ui.add_space(6.0);

        ui.label(RichText::new("Search").strong());
        let search_box = ui
            .add(
                egui::TextEdit::singleline(&mut self.search_text)
                    .hint_text("node id or type")
                    .desired_width(f32::INFINITY),
            )
            .on_hover_text("Press Enter to lay matches out in a honeycomb.");
        let submitted =
            search_box.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter));

        let mut search_clicked = false;
        let mut clear_clicked = false;
        ui.horizontal(|ui| {
            search_clicked = ui.button("Search").clicked();
            clear_clicked = ui
                .add_enabled(
                    !self.search_text.is_empty()
                        || self.engine.layout_mode() == LayoutMode::Honeycomb,
                    egui::Button::new("Clear search"),
                )
                .clicked();
        });
        if submitted || search_clicked {
            self.submit_search();
        }
        if clear_clicked {
            self.search_text.clear();
            self.submit_search();
        }

        ui.separator();

        ui.horizontal(|ui| {
            if ui
                .button("Back")
                .on_hover_text("Return to the sphere (Esc).")
                .clicked()
            {
                self.dispatch(Input::Escape);
            }
            if ui
                .add_enabled(self.engine.can_undo(), egui::Button::new("Undo"))
                .on_hover_text("Ctrl/Cmd+Z")
                .clicked()
            {
                self.dispatch(Input::Undo);
            }
            if ui
                .add_enabled(self.engine.can_redo(), egui::Button::new("Redo"))
                .on_hover_text("Ctrl/Cmd+Shift+Z or Ctrl/Cmd+Y")
                .clicked()
            {
                self.dispatch(Input::Redo);
            }
        });

        ui.separator();

        ui.checkbox(&mut self.animate_transitions, "Animate transitions")
            .on_hover_text("Glide nodes to their new places instead of jumping.");
        ui.checkbox(&mut self.show_labels, "Show labels")
            .on_hover_text("Label every node large enough to read.");
        if ui.button("Reset camera").clicked() {
            self.camera.reset();
        }

        ui.separator();
        self.draw_history(ui);
    }

    fn draw_history(&self, ui: &mut Ui) {
        let history = self.engine.history();
        ui.label(RichText::new(format!("History ({})", history.len())).strong());
        if history.is_empty() {
            ui.label("Nothing yet. Click a node or search.");
            return;
        }

        egui::ScrollArea::vertical()
            .id_salt("history_scroll")
            .max_height(260.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for command in history.entries().iter().rev().take(HISTORY_ROWS) {
                    ui.label(format!("#{}  {}", command.timestamp, describe(&command.kind)));
                }
                for command in history.redo_stack().iter().rev() {
                    ui.weak(format!("#{}  {} (undone)", command.timestamp, describe(&command.kind)));
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_commands() {
        assert_eq!(describe(&CommandKind::NodeSelect("Garden".into())), "focus Garden");
        assert_eq!(
            describe(&CommandKind::Escape { recenter: None }),
            "back to sphere"
        );
        assert_eq!(
            describe(&CommandKind::Search {
                term: "gar".into(),
                matches: vec!["Garden".into()],
            }),
            "search \"gar\" (1 found)"
        );
        assert_eq!(
            describe(&CommandKind::Search {
                term: " ".into(),
                matches: Vec::new(),
            }),
            "clear search"
        );
    }
}
