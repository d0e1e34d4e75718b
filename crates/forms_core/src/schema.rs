//! Field schemas: the compile-time replacement for reflective member
//! enumeration. A type opts in by declaring an ordered list of accessors
//! over a small dynamic value model.

use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::error::ApplyError;

/// How a generated form treats its bindings and labels its submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    View,
    Add,
    Edit,
}

/// A string value constrained to a closed set of allowed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstrainedChoice {
    pub selected: String,
    pub allowed: Vec<String>,
}

impl ConstrainedChoice {
    pub fn new(selected: impl Into<String>, allowed: Vec<String>) -> Self {
        Self {
            selected: selected.into(),
            allowed,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.allowed.contains(&self.selected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberValue {
    Int(i64),
    Float(f64),
}

impl Display for NumberValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberValue::Int(value) => write!(f, "{value}"),
            NumberValue::Float(value) => write!(f, "{value}"),
        }
    }
}

/// Dynamic value model carried between a field accessor and its editor.
/// `Opaque` values render in View mode but have no editor.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Choice {
        selected: String,
        options: Vec<String>,
    },
    Constrained(ConstrainedChoice),
    Number(NumberValue),
    DateTime(NaiveDateTime),
    Opaque(serde_json::Value),
}

impl FieldValue {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Choice { .. } => "choice",
            FieldValue::Constrained(_) => "constrained choice",
            FieldValue::Number(_) => "number",
            FieldValue::DateTime(_) => "date/time",
            FieldValue::Opaque(_) => "opaque",
        }
    }

    /// View-mode rendering: the value serialized to JSON. Exact bytes are
    /// not part of the contract.
    pub fn view_text(&self) -> String {
        let rendered = match self {
            FieldValue::Text(text) => serde_json::to_string(text),
            FieldValue::Choice { selected, .. } => serde_json::to_string(selected),
            FieldValue::Constrained(choice) => serde_json::to_string(choice),
            FieldValue::Number(NumberValue::Int(value)) => serde_json::to_string(value),
            FieldValue::Number(NumberValue::Float(value)) => serde_json::to_string(value),
            FieldValue::DateTime(value) => serde_json::to_string(value),
            FieldValue::Opaque(value) => serde_json::to_string(value),
        };
        rendered.unwrap_or_else(|err| format!("<unrenderable: {err}>"))
    }

    pub fn into_text(self) -> Result<String, ApplyError> {
        match self {
            FieldValue::Text(text) => Ok(text),
            other => Err(mismatch("text", &other)),
        }
    }

    pub fn into_choice_label(self) -> Result<String, ApplyError> {
        match self {
            FieldValue::Choice { selected, .. } => Ok(selected),
            other => Err(mismatch("choice", &other)),
        }
    }

    pub fn into_constrained(self) -> Result<ConstrainedChoice, ApplyError> {
        match self {
            FieldValue::Constrained(choice) => Ok(choice),
            other => Err(mismatch("constrained choice", &other)),
        }
    }

    pub fn into_number(self) -> Result<NumberValue, ApplyError> {
        match self {
            FieldValue::Number(value) => Ok(value),
            other => Err(mismatch("number", &other)),
        }
    }

    pub fn into_int(self) -> Result<i64, ApplyError> {
        match self.into_number()? {
            NumberValue::Int(value) => Ok(value),
            NumberValue::Float(_) => Err(ApplyError::KindMismatch {
                expected: "integer",
                actual: "float",
            }),
        }
    }

    pub fn into_float(self) -> Result<f64, ApplyError> {
        match self.into_number()? {
            NumberValue::Float(value) => Ok(value),
            NumberValue::Int(value) => Ok(value as f64),
        }
    }

    pub fn into_date_time(self) -> Result<NaiveDateTime, ApplyError> {
        match self {
            FieldValue::DateTime(value) => Ok(value),
            other => Err(mismatch("date/time", &other)),
        }
    }
}

fn mismatch(expected: &'static str, actual: &FieldValue) -> ApplyError {
    ApplyError::KindMismatch {
        expected,
        actual: actual.kind(),
    }
}

pub type GetFn<T> = fn(&T) -> FieldValue;
pub type SetFn<T> = fn(&mut T, FieldValue) -> Result<(), ApplyError>;

/// Declared mapping of one member: display-order name plus accessor pair.
/// `set: None` marks a member that can only be rendered, never edited.
pub struct FieldDef<T> {
    pub name: &'static str,
    pub get: GetFn<T>,
    pub set: Option<SetFn<T>>,
}

/// Compile-time schema declaration; the ordered field list drives form
/// generation.
pub trait Editable: Sized {
    fn fields() -> Vec<FieldDef<Self>>;
}

/// Builds a `FieldValue::Choice` from an enum value using its strum-derived
/// variant labels.
pub fn choice_of<E>(value: E) -> FieldValue
where
    E: IntoEnumIterator + Display,
{
    FieldValue::Choice {
        selected: value.to_string(),
        options: E::iter().map(|variant| variant.to_string()).collect(),
    }
}

/// Parses a choice label back into its enum value.
pub fn parse_choice<E>(label: &str) -> Result<E, ApplyError>
where
    E: FromStr,
{
    E::from_str(label).map_err(|_| ApplyError::UnknownChoice(label.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use strum::{Display, EnumIter, EnumString};

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
    enum Lamp {
        Off,
        Dim,
        Bright,
    }

    #[test]
    fn choice_of_selects_the_current_variant() {
        let value = choice_of(Lamp::Dim);
        assert_eq!(
            value,
            FieldValue::Choice {
                selected: "Dim".to_string(),
                options: vec!["Off".to_string(), "Dim".to_string(), "Bright".to_string()],
            }
        );
    }

    #[test]
    fn parse_choice_round_trips_every_variant() {
        for lamp in [Lamp::Off, Lamp::Dim, Lamp::Bright] {
            let parsed: Lamp = parse_choice(&lamp.to_string()).expect("parse");
            assert_eq!(parsed, lamp);
        }
        assert!(parse_choice::<Lamp>("Blinding").is_err());
    }

    #[test]
    fn view_text_serializes_values_to_json() {
        assert_eq!(FieldValue::Text("x".to_string()).view_text(), "\"x\"");
        assert_eq!(FieldValue::Number(NumberValue::Int(-3)).view_text(), "-3");
        let when = NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|d| d.and_hms_opt(3, 4, 5))
            .expect("valid date");
        assert_eq!(
            FieldValue::DateTime(when).view_text(),
            "\"2024-01-02T03:04:05\""
        );
        let constrained =
            ConstrainedChoice::new("eu", vec!["eu".to_string(), "us".to_string()]);
        assert_eq!(
            FieldValue::Constrained(constrained).view_text(),
            "{\"selected\":\"eu\",\"allowed\":[\"eu\",\"us\"]}"
        );
    }

    #[test]
    fn constrained_choice_validates_membership() {
        let good = ConstrainedChoice::new("a", vec!["a".to_string(), "b".to_string()]);
        assert!(good.is_valid());
        let bad = ConstrainedChoice::new("c", vec!["a".to_string(), "b".to_string()]);
        assert!(!bad.is_valid());
    }

    #[test]
    fn typed_extraction_rejects_kind_mismatches() {
        let err = FieldValue::Text("x".to_string())
            .into_number()
            .expect_err("mismatch");
        assert!(matches!(err, ApplyError::KindMismatch { .. }));
    }
}
