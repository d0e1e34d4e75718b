//! Error taxonomy for form construction and commit.

use thiserror::Error;

/// Errors surfaced by binding construction and commit. Construction-time
/// variants abort the form build; `Apply` is caught at the form boundary and
/// reported to the user while the form stays open.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("precondition violated: {0}")]
    Precondition(String),
    #[error("field '{field}': no editor for {kind} values")]
    UnsupportedType { field: String, kind: &'static str },
    #[error("field '{field}': value '{value}' is outside its allowed set")]
    Constraint { field: String, value: String },
    #[error("field '{field}': {source}")]
    Apply {
        field: String,
        #[source]
        source: ApplyError,
    },
}

/// Failure while writing an edited value back to the target object.
#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("unknown choice '{0}'")]
    UnknownChoice(String),
    #[error("'{input}' is not a valid number: {reason}")]
    BadNumber { input: String, reason: String },
    #[error("date/time components do not form a valid date")]
    BadDateTime,
    #[error("value '{value}' is outside its allowed set")]
    Constraint { value: String },
    #[error("expected a {expected} value, got {actual}")]
    KindMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("{0}")]
    Other(String),
}
