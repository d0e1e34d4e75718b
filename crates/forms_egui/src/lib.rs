//! egui rendering layer: the dialog host driven by the frame loop, message
//! box windows, and generated edit-form windows.

pub mod edit_form;
pub mod host;
pub mod message_box;
pub mod style;
pub mod widgets;

pub use edit_form::{build_edit_form, EditFormWindow};
pub use host::{DialogEnv, DialogHandle, DialogHost, DialogWindow};
pub use message_box::{show_dialog, MessageDialog};
