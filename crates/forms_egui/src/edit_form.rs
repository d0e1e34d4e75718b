//! Generated edit-object window: schema bindings rendered as a two-column
//! grid with a mode-dependent submit button.

use forms_core::{
    DialogButtons, DialogIcon, EditMode, EditSession, Editable, FormError, FormOptions, FormTicket,
};
use tracing::error;

use crate::host::{DialogEnv, DialogHandle, DialogWindow};
use crate::message_box::{next_dialog_id, MessageDialog};
use crate::{style, widgets};

pub struct EditFormWindow<T: Editable> {
    session: EditSession<T>,
    caption: String,
    text_scale: Option<f32>,
    id: egui::Id,
}

impl<T: Editable> EditFormWindow<T> {
    /// Fails fast on an empty caption or any binding-construction error; no
    /// window exists until construction succeeds.
    pub fn new(
        mode: EditMode,
        value: T,
        caption: impl Into<String>,
        options: FormOptions,
    ) -> Result<(Self, FormTicket<T>), FormError> {
        let caption = caption.into();
        if caption.trim().is_empty() {
            return Err(FormError::Precondition(
                "caption must not be empty".to_string(),
            ));
        }
        let (session, ticket) = EditSession::new(mode, value, &options)?;
        let window = Self {
            session,
            caption,
            text_scale: options.text_scale,
            id: next_dialog_id("edit_form"),
        };
        Ok((window, ticket))
    }
}

impl<T: Editable + Send> DialogWindow for EditFormWindow<T> {
    fn show(&mut self, ctx: &egui::Context, env: &DialogEnv) -> bool {
        self.session.mark_shown();

        let mut open = true;
        let mut submit = false;
        let grid_id = self.id.with("fields");
        let row_id = self.id;
        let text_scale = self.text_scale;
        let session = &mut self.session;
        egui::Window::new(self.caption.clone())
            .id(self.id)
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                style::apply_text_scale(ui, text_scale);
                egui::Grid::new(grid_id)
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        for (row, binding) in session.bindings_mut().iter_mut().enumerate() {
                            ui.label(binding.label().to_string());
                            widgets::editor_ui(ui, row_id.with(row), binding.editor_mut());
                            ui.end_row();
                        }
                    });
                if let Some(label) = env.strings.submit_label(session.mode()) {
                    ui.separator();
                    if ui.button(label).clicked() {
                        submit = true;
                    }
                }
            });

        if submit {
            if let Err(err) = self.session.commit() {
                error!(%err, "failed to apply edit form bindings");
                // fire-and-forget: nobody awaits the error notification
                let (dialog, _ticket) = MessageDialog::new(
                    err.to_string(),
                    env.strings.error_caption.clone(),
                    DialogButtons::Ok,
                    DialogIcon::Error,
                );
                env.handle.open(Box::new(dialog));
                // the form stays open so the user can repair or cancel
            }
        }
        if !open {
            self.session.cancel();
        }
        !self.session.phase().is_terminal()
    }
}

/// Builds an edit form for `value`, opens it on the host, and returns a
/// ticket resolving to the edited value plus a saved flag.
pub fn build_edit_form<T>(
    handle: &DialogHandle,
    mode: EditMode,
    value: T,
    caption: impl Into<String>,
    options: FormOptions,
) -> Result<FormTicket<T>, FormError>
where
    T: Editable + Send + 'static,
{
    let (window, ticket) = EditFormWindow::new(mode, value, caption, options)?;
    handle.open(Box::new(window));
    Ok(ticket)
}
