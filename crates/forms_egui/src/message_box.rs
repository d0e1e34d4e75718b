//! Asynchronous message box: an egui window whose buttons resolve a
//! one-shot outcome cell.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use forms_core::{DialogButtons, DialogIcon, DialogOutcome, DialogTicket, OutcomeCell};

use crate::host::{DialogEnv, DialogHandle, DialogWindow};
use crate::style;

static NEXT_DIALOG_SERIAL: AtomicU64 = AtomicU64::new(0);

pub(crate) fn next_dialog_id(kind: &'static str) -> egui::Id {
    let serial = NEXT_DIALOG_SERIAL.fetch_add(1, Ordering::Relaxed);
    egui::Id::new((kind, serial))
}

pub struct MessageDialog {
    text: String,
    caption: String,
    buttons: DialogButtons,
    icon: DialogIcon,
    text_scale: Option<f32>,
    cell: Arc<OutcomeCell>,
    id: egui::Id,
    focus_claimed: bool,
}

impl MessageDialog {
    pub fn new(
        text: impl Into<String>,
        caption: impl Into<String>,
        buttons: DialogButtons,
        icon: DialogIcon,
    ) -> (Self, DialogTicket) {
        let (cell, ticket) = OutcomeCell::new();
        let dialog = Self {
            text: text.into(),
            caption: caption.into(),
            buttons,
            icon,
            text_scale: None,
            cell,
            id: next_dialog_id("message_dialog"),
            focus_claimed: false,
        };
        (dialog, ticket)
    }

    pub fn with_text_scale(mut self, text_scale: f32) -> Self {
        self.text_scale = Some(text_scale);
        self
    }
}

impl DialogWindow for MessageDialog {
    fn show(&mut self, ctx: &egui::Context, env: &DialogEnv) -> bool {
        if self.cell.is_resolved() {
            return false;
        }

        let (frame, text_color) = style::tinted_frame(ctx, self.icon);
        let mut open = true;
        egui::Window::new(self.caption.clone())
            .id(self.id)
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .frame(frame)
            .show(ctx, |ui| {
                style::apply_text_scale(ui, self.text_scale);
                if let Some(color) = text_color {
                    ui.style_mut().visuals.override_text_color = Some(color);
                }
                ui.label(&self.text);
                ui.separator();
                ui.horizontal(|ui| {
                    for &outcome in self.buttons.outcomes() {
                        let button = ui.button(env.strings.button_label(outcome));
                        if !self.focus_claimed && outcome == self.buttons.default_focus() {
                            button.request_focus();
                        }
                        if button.clicked() {
                            self.cell.resolve(outcome);
                        }
                    }
                    self.focus_claimed = true;
                });
            });

        if !open {
            // closed from the title bar without a button click
            self.cell.resolve(DialogOutcome::None);
        }
        !self.cell.is_resolved()
    }
}

/// Opens a message box on the host and returns a ticket resolving to the
/// clicked outcome, or `DialogOutcome::None` when the window is closed.
pub fn show_dialog(
    handle: &DialogHandle,
    text: impl Into<String>,
    caption: impl Into<String>,
    buttons: DialogButtons,
    icon: DialogIcon,
) -> DialogTicket {
    let (dialog, ticket) = MessageDialog::new(text, caption, buttons, icon);
    handle.open(Box::new(dialog));
    ticket
}
