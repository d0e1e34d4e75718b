//! Field bindings: one (editor state, commit function) pair per selected
//! schema field, built once per form instance.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{ApplyError, FormError};
use crate::schema::{ConstrainedChoice, EditMode, Editable, FieldValue, NumberValue, SetFn};

/// Date-time editor components. Kept apart from `chrono` types so partially
/// edited (and possibly invalid) component combinations never have to be a
/// `NaiveDateTime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl DateTimeParts {
    pub fn from_naive(value: NaiveDateTime) -> Self {
        Self {
            year: value.year(),
            month: value.month(),
            day: value.day(),
            hour: value.hour(),
            minute: value.minute(),
            second: value.second(),
        }
    }

    /// `None` when the components do not name a real instant (Feb 30 etc).
    pub fn to_naive(self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|date| date.and_hms_opt(self.hour, self.minute, self.second))
    }
}

/// Editor state constructed once from a field's current value. The UI layer
/// mutates these in place; commit parses them back into field values.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorState {
    /// Read-only serialized value (View mode). The widget shows an editable
    /// text box, but edits here are never written back.
    ViewText(String),
    Text(String),
    Choice {
        selected: usize,
        options: Vec<String>,
        constrained: bool,
    },
    Number {
        buffer: String,
        float: bool,
    },
    DateTime(DateTimeParts),
}

/// One field of a generated form: display label, editor state, and the
/// write-back accessor. View-mode bindings carry no accessor at all.
pub struct FieldBinding<T> {
    name: &'static str,
    label: String,
    editor: EditorState,
    set: Option<SetFn<T>>,
}

impl<T> FieldBinding<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorState {
        &mut self.editor
    }

    /// Applies the editor's current state back to the target. View bindings
    /// are a no-op by construction.
    pub fn commit(&self, target: &mut T) -> Result<(), FormError> {
        let Some(set) = self.set else {
            return Ok(());
        };
        let value = self.parse_editor()?;
        set(target, value).map_err(|source| FormError::Apply {
            field: self.name.to_string(),
            source,
        })
    }

    fn parse_editor(&self) -> Result<FieldValue, FormError> {
        let apply = |source: ApplyError| FormError::Apply {
            field: self.name.to_string(),
            source,
        };
        match &self.editor {
            EditorState::ViewText(_) => Err(apply(ApplyError::Other(
                "view-only editor cannot produce a value".to_string(),
            ))),
            EditorState::Text(buffer) => Ok(FieldValue::Text(buffer.clone())),
            EditorState::Choice {
                selected,
                options,
                constrained,
            } => {
                let label = options
                    .get(*selected)
                    .cloned()
                    .ok_or_else(|| apply(ApplyError::UnknownChoice(format!("#{selected}"))))?;
                if *constrained {
                    let candidate = ConstrainedChoice {
                        selected: label,
                        allowed: options.clone(),
                    };
                    // Membership is re-checked on write even though the combo
                    // box only offers allowed values.
                    if !candidate.is_valid() {
                        return Err(FormError::Constraint {
                            field: self.name.to_string(),
                            value: candidate.selected,
                        });
                    }
                    Ok(FieldValue::Constrained(candidate))
                } else {
                    Ok(FieldValue::Choice {
                        selected: label,
                        options: options.clone(),
                    })
                }
            }
            EditorState::Number { buffer, float } => {
                let parsed = if *float {
                    buffer
                        .trim()
                        .parse::<f64>()
                        .map(NumberValue::Float)
                        .map_err(|err| (buffer.clone(), err.to_string()))
                } else {
                    buffer
                        .trim()
                        .parse::<i64>()
                        .map(NumberValue::Int)
                        .map_err(|err| (buffer.clone(), err.to_string()))
                };
                parsed
                    .map(FieldValue::Number)
                    .map_err(|(input, reason)| apply(ApplyError::BadNumber { input, reason }))
            }
            EditorState::DateTime(parts) => parts
                .to_naive()
                .map(FieldValue::DateTime)
                .ok_or_else(|| apply(ApplyError::BadDateTime)),
        }
    }
}

/// Builds bindings for `target` in schema declaration order, optionally
/// restricted to `field_filter` and relabeled via `name_overrides`.
///
/// Fails fast: unknown requested names are a precondition violation, a
/// constrained value outside its allowed set is a constraint violation, and
/// value kinds without an editor are unsupported in Add/Edit mode.
pub fn build_bindings<T: Editable>(
    target: &T,
    mode: EditMode,
    field_filter: Option<&[String]>,
    name_overrides: &HashMap<String, String>,
) -> Result<Vec<FieldBinding<T>>, FormError> {
    let schema = T::fields();
    if let Some(filter) = field_filter {
        for requested in filter {
            if !schema.iter().any(|def| def.name == requested.as_str()) {
                return Err(FormError::Precondition(format!(
                    "requested field '{requested}' does not exist"
                )));
            }
        }
    }

    let mut bindings = Vec::new();
    for def in schema {
        if let Some(filter) = field_filter {
            if !filter.iter().any(|name| name.as_str() == def.name) {
                continue;
            }
        }
        let label = name_overrides
            .get(def.name)
            .cloned()
            .unwrap_or_else(|| def.name.to_string());
        let value = (def.get)(target);

        let binding = if mode == EditMode::View {
            FieldBinding {
                name: def.name,
                label,
                editor: EditorState::ViewText(value.view_text()),
                set: None,
            }
        } else {
            let set = def.set.ok_or(FormError::UnsupportedType {
                field: def.name.to_string(),
                kind: "read-only",
            })?;
            FieldBinding {
                name: def.name,
                label,
                editor: editor_for(def.name, value)?,
                set: Some(set),
            }
        };
        bindings.push(binding);
    }
    Ok(bindings)
}

fn editor_for(field: &'static str, value: FieldValue) -> Result<EditorState, FormError> {
    match value {
        FieldValue::Text(text) => Ok(EditorState::Text(text)),
        FieldValue::Choice { selected, options } => {
            let index = options
                .iter()
                .position(|option| *option == selected)
                .ok_or_else(|| FormError::Constraint {
                    field: field.to_string(),
                    value: selected.clone(),
                })?;
            Ok(EditorState::Choice {
                selected: index,
                options,
                constrained: false,
            })
        }
        FieldValue::Constrained(choice) => {
            if !choice.is_valid() {
                return Err(FormError::Constraint {
                    field: field.to_string(),
                    value: choice.selected,
                });
            }
            let index = choice
                .allowed
                .iter()
                .position(|option| *option == choice.selected)
                .unwrap_or(0);
            Ok(EditorState::Choice {
                selected: index,
                options: choice.allowed,
                constrained: true,
            })
        }
        FieldValue::Number(NumberValue::Int(value)) => Ok(EditorState::Number {
            buffer: value.to_string(),
            float: false,
        }),
        FieldValue::Number(NumberValue::Float(value)) => Ok(EditorState::Number {
            buffer: value.to_string(),
            float: true,
        }),
        FieldValue::DateTime(value) => Ok(EditorState::DateTime(DateTimeParts::from_naive(value))),
        FieldValue::Opaque(_) => Err(FormError::UnsupportedType {
            field: field.to_string(),
            kind: "opaque",
        }),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn date_time_parts_round_trip() {
        let when = NaiveDate::from_ymd_opt(2025, 12, 31)
            .and_then(|d| d.and_hms_opt(23, 59, 58))
            .expect("valid date");
        let parts = DateTimeParts::from_naive(when);
        assert_eq!(parts.to_naive(), Some(when));
    }

    #[test]
    fn impossible_dates_are_rejected() {
        let parts = DateTimeParts {
            year: 2025,
            month: 2,
            day: 30,
            hour: 0,
            minute: 0,
            second: 0,
        };
        assert_eq!(parts.to_naive(), None);
    }

    #[test]
    fn out_of_range_constrained_value_fails_before_any_editor_exists() {
        let value = FieldValue::Constrained(ConstrainedChoice::new(
            "mars",
            vec!["eu".to_string(), "us".to_string()],
        ));
        let err = editor_for("region", value).expect_err("constraint");
        assert!(matches!(err, FormError::Constraint { .. }));
    }

    #[test]
    fn opaque_values_have_no_editor() {
        let err = editor_for("blob", FieldValue::Opaque(serde_json::json!([1, 2])))
            .expect_err("unsupported");
        assert!(matches!(err, FormError::UnsupportedType { .. }));
    }

    #[test]
    fn number_editor_keeps_the_numeric_flavor() {
        let int = editor_for("seats", FieldValue::Number(NumberValue::Int(4))).expect("editor");
        assert_eq!(
            int,
            EditorState::Number {
                buffer: "4".to_string(),
                float: false,
            }
        );
        let float =
            editor_for("gain", FieldValue::Number(NumberValue::Float(2.5))).expect("editor");
        assert_eq!(
            float,
            EditorState::Number {
                buffer: "2.5".to_string(),
                float: true,
            }
        );
    }
}
