//! Editor-state rendering: one egui widget per field archetype.

use forms_core::{DateTimeParts, EditorState};

pub fn editor_ui(ui: &mut egui::Ui, id: egui::Id, editor: &mut EditorState) {
    match editor {
        // View mode shows a regular text box; edits here are never written
        // back.
        EditorState::ViewText(buffer) | EditorState::Text(buffer) => {
            ui.add(egui::TextEdit::singleline(buffer).desired_width(220.0));
        }
        EditorState::Choice {
            selected, options, ..
        } => {
            let current = options.get(*selected).cloned().unwrap_or_default();
            egui::ComboBox::from_id_salt(id)
                .selected_text(current)
                .show_ui(ui, |ui| {
                    for (index, option) in options.iter().enumerate() {
                        ui.selectable_value(selected, index, option);
                    }
                });
        }
        EditorState::Number { buffer, .. } => {
            ui.add(egui::TextEdit::singleline(buffer).desired_width(120.0));
        }
        EditorState::DateTime(parts) => date_time_ui(ui, parts),
    }
}

// Component order mirrors the classic dd-MM-yyyy HH:mm:ss picker format.
fn date_time_ui(ui: &mut egui::Ui, parts: &mut DateTimeParts) {
    ui.horizontal(|ui| {
        ui.add(egui::DragValue::new(&mut parts.day).range(1..=31));
        ui.label("-");
        ui.add(egui::DragValue::new(&mut parts.month).range(1..=12));
        ui.label("-");
        ui.add(egui::DragValue::new(&mut parts.year).range(1..=9999));
        ui.add_space(8.0);
        ui.add(egui::DragValue::new(&mut parts.hour).range(0..=23));
        ui.label(":");
        ui.add(egui::DragValue::new(&mut parts.minute).range(0..=59));
        ui.label(":");
        ui.add(egui::DragValue::new(&mut parts.second).range(0..=59));
    });
}
