//! Core semantics for asynchronous dialogs and schema-driven edit forms:
//! one-shot outcome cells, field schemas and bindings, the edit-session
//! lifecycle, and the UI-thread dispatcher. Rendering lives in `forms_egui`.

pub mod binding;
pub mod error;
pub mod form;
pub mod invoke;
pub mod outcome;
pub mod schema;
pub mod strings;

pub use binding::{build_bindings, DateTimeParts, EditorState, FieldBinding};
pub use error::{ApplyError, FormError};
pub use form::{EditSession, FormOptions, FormPhase, FormResult, FormTicket};
pub use invoke::{ui_channel, InvokeError, InvokeTicket, UiDispatcher, UiQueue};
pub use outcome::{DialogButtons, DialogIcon, DialogOutcome, DialogTicket, OutcomeCell};
pub use schema::{
    choice_of, parse_choice, ConstrainedChoice, EditMode, Editable, FieldDef, FieldValue,
    NumberValue,
};
pub use strings::DialogStrings;
