use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use strum::{Display, EnumIter, EnumString};

use crate::binding::{EditorState, FieldBinding};
use crate::error::FormError;
use crate::form::{EditSession, FormOptions, FormPhase};
use crate::schema::{
    choice_of, parse_choice, ConstrainedChoice, EditMode, Editable, FieldDef, FieldValue,
    NumberValue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
enum Status {
    A,
    B,
}

#[derive(Debug, Clone, PartialEq)]
struct Device {
    status: Status,
    name: String,
    region: ConstrainedChoice,
    port: i64,
    gain: f64,
    seen_at: NaiveDateTime,
    serials: Vec<u32>,
}

impl Editable for Device {
    fn fields() -> Vec<FieldDef<Self>> {
        vec![
            FieldDef {
                name: "status",
                get: |d| choice_of(d.status),
                set: Some(|d, v| {
                    d.status = parse_choice(&v.into_choice_label()?)?;
                    Ok(())
                }),
            },
            FieldDef {
                name: "name",
                get: |d| FieldValue::Text(d.name.clone()),
                set: Some(|d, v| {
                    d.name = v.into_text()?;
                    Ok(())
                }),
            },
            FieldDef {
                name: "region",
                get: |d| FieldValue::Constrained(d.region.clone()),
                set: Some(|d, v| {
                    d.region = v.into_constrained()?;
                    Ok(())
                }),
            },
            FieldDef {
                name: "port",
                get: |d| FieldValue::Number(NumberValue::Int(d.port)),
                set: Some(|d, v| {
                    d.port = v.into_int()?;
                    Ok(())
                }),
            },
            FieldDef {
                name: "gain",
                get: |d| FieldValue::Number(NumberValue::Float(d.gain)),
                set: Some(|d, v| {
                    d.gain = v.into_float()?;
                    Ok(())
                }),
            },
            FieldDef {
                name: "seen_at",
                get: |d| FieldValue::DateTime(d.seen_at),
                set: Some(|d, v| {
                    d.seen_at = v.into_date_time()?;
                    Ok(())
                }),
            },
            FieldDef {
                name: "serials",
                get: |d| FieldValue::Opaque(serde_json::json!(d.serials)),
                set: None,
            },
        ]
    }
}

fn device() -> Device {
    Device {
        status: Status::A,
        name: "x".to_string(),
        region: ConstrainedChoice::new("eu", vec!["eu".to_string(), "us".to_string()]),
        port: 8443,
        gain: 0.5,
        seen_at: NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|d| d.and_hms_opt(12, 30, 0))
            .expect("valid date"),
        serials: vec![7, 11],
    }
}

fn editable_fields() -> Vec<String> {
    ["status", "name", "region", "port", "gain", "seen_at"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn edit_options() -> FormOptions {
    FormOptions {
        field_filter: Some(editable_fields()),
        ..FormOptions::default()
    }
}

fn set_text(binding: &mut FieldBinding<Device>, text: &str) {
    match binding.editor_mut() {
        EditorState::Text(buffer) | EditorState::Number { buffer, .. } => {
            *buffer = text.to_string();
        }
        other => panic!("expected a text-backed editor, got {other:?}"),
    }
}

fn select(binding: &mut FieldBinding<Device>, label: &str) {
    match binding.editor_mut() {
        EditorState::Choice {
            selected, options, ..
        } => {
            *selected = options
                .iter()
                .position(|o| o == label)
                .expect("label present");
        }
        other => panic!("expected a choice editor, got {other:?}"),
    }
}

#[test]
fn edit_commit_applies_bindings_in_declared_order() {
    let (mut session, mut ticket) =
        EditSession::new(EditMode::Edit, device(), &edit_options()).expect("session");
    session.mark_shown();

    let names: Vec<_> = session.bindings().iter().map(|b| b.name()).collect();
    assert_eq!(
        names,
        vec!["status", "name", "region", "port", "gain", "seen_at"]
    );

    select(&mut session.bindings_mut()[0], "B");
    set_text(&mut session.bindings_mut()[1], "y");
    session.commit().expect("commit");
    assert_eq!(session.phase(), FormPhase::Committed);

    let result = ticket.try_result().expect("resolved").expect("delivered");
    assert!(result.saved);
    assert_eq!(result.value.status, Status::B);
    assert_eq!(result.value.name, "y");
    // untouched editors wrote back their original values
    assert_eq!(result.value.port, 8443);
    assert_eq!(result.value.seen_at, device().seen_at);
}

#[test]
fn unchanged_choice_round_trips_the_current_value() {
    let (mut session, mut ticket) =
        EditSession::new(EditMode::Edit, device(), &edit_options()).expect("session");
    session.mark_shown();

    match session.bindings()[0].editor() {
        EditorState::Choice {
            selected, options, ..
        } => assert_eq!(options[*selected], "A"),
        other => panic!("expected choice editor, got {other:?}"),
    }

    session.commit().expect("commit");
    let result = ticket.try_result().expect("resolved").expect("delivered");
    assert_eq!(result.value, device());
}

#[test]
fn view_bindings_never_write_back() {
    let mut target = device();
    let (mut session, _ticket) =
        EditSession::new(EditMode::View, device(), &FormOptions::default()).expect("session");

    for binding in session.bindings_mut() {
        match binding.editor_mut() {
            EditorState::ViewText(buffer) => *buffer = "tampered".to_string(),
            other => panic!("view mode must render text, got {other:?}"),
        }
    }
    for binding in session.bindings() {
        binding.commit(&mut target).expect("no-op");
    }
    assert_eq!(target, device());
}

#[test]
fn view_mode_renders_every_field_including_opaque_ones() {
    let (session, _ticket) =
        EditSession::new(EditMode::View, device(), &FormOptions::default()).expect("session");
    assert_eq!(session.bindings().len(), 7);
    let serials = session
        .bindings()
        .iter()
        .find(|b| b.name() == "serials")
        .expect("binding");
    assert_eq!(serials.editor(), &EditorState::ViewText("[7,11]".to_string()));
}

#[test]
fn opaque_fields_are_unsupported_in_edit_mode() {
    let err = EditSession::new(EditMode::Edit, device(), &FormOptions::default())
        .map(|_| ())
        .expect_err("unsupported");
    assert!(matches!(
        err,
        FormError::UnsupportedType { ref field, .. } if field == "serials"
    ));
}

#[test]
fn unknown_requested_field_fails_fast() {
    let options = FormOptions {
        field_filter: Some(vec!["status".to_string(), "nonsense".to_string()]),
        ..FormOptions::default()
    };
    let err = EditSession::new(EditMode::Edit, device(), &options)
        .map(|_| ())
        .expect_err("precondition");
    assert!(matches!(err, FormError::Precondition(_)));
}

#[test]
fn out_of_range_constrained_value_aborts_construction() {
    let mut bad = device();
    bad.region = ConstrainedChoice::new("mars", vec!["eu".to_string(), "us".to_string()]);
    let err = EditSession::new(EditMode::Edit, bad, &edit_options())
        .map(|_| ())
        .expect_err("constraint");
    assert!(matches!(
        err,
        FormError::Constraint { ref field, ref value } if field == "region" && value == "mars"
    ));
}

#[test]
fn name_overrides_change_labels_but_not_names() {
    let options = FormOptions {
        field_filter: Some(vec!["name".to_string()]),
        name_overrides: HashMap::from([("name".to_string(), "Display name".to_string())]),
        ..FormOptions::default()
    };
    let (session, _ticket) =
        EditSession::new(EditMode::Edit, device(), &options).expect("session");
    assert_eq!(session.bindings()[0].name(), "name");
    assert_eq!(session.bindings()[0].label(), "Display name");
}

#[test]
fn failed_commit_keeps_the_form_open_and_earlier_writes_applied() {
    let (mut session, mut ticket) =
        EditSession::new(EditMode::Edit, device(), &edit_options()).expect("session");
    session.mark_shown();

    set_text(&mut session.bindings_mut()[1], "renamed");
    set_text(&mut session.bindings_mut()[3], "not-a-number");

    let err = session.commit().expect_err("bad number");
    assert!(matches!(err, FormError::Apply { ref field, .. } if field == "port"));
    assert_eq!(session.phase(), FormPhase::Shown);
    assert!(ticket.try_result().is_none());

    // user repairs the input and retries
    set_text(&mut session.bindings_mut()[3], "9000");
    session.commit().expect("commit");
    let result = ticket.try_result().expect("resolved").expect("delivered");
    assert_eq!(result.value.name, "renamed");
    assert_eq!(result.value.port, 9000);
}

#[test]
fn cancel_discards_pending_edits() {
    let (mut session, mut ticket) =
        EditSession::new(EditMode::Edit, device(), &edit_options()).expect("session");
    session.mark_shown();
    set_text(&mut session.bindings_mut()[1], "never applied");

    session.cancel();
    assert_eq!(session.phase(), FormPhase::Cancelled);
    let result = ticket.try_result().expect("resolved").expect("delivered");
    assert!(!result.saved);
    assert_eq!(result.value, device());
}

#[test]
fn terminal_state_is_reached_exactly_once() {
    let (mut session, mut ticket) =
        EditSession::new(EditMode::Edit, device(), &edit_options()).expect("session");
    session.mark_shown();
    session.commit().expect("commit");

    session.cancel(); // no-op after commit
    assert_eq!(session.phase(), FormPhase::Committed);
    assert!(session.commit().is_err());

    let result = ticket.try_result().expect("resolved").expect("delivered");
    assert!(result.saved);
    assert!(ticket.try_result().expect("closed").is_none());
}

#[tokio::test]
async fn awaiting_caller_resumes_once_the_form_commits() {
    let (mut session, ticket) =
        EditSession::new(EditMode::Edit, device(), &edit_options()).expect("session");
    session.mark_shown();
    let waiter = tokio::spawn(ticket.result());

    select(&mut session.bindings_mut()[0], "B");
    session.commit().expect("commit");
    drop(session);

    let result = waiter.await.expect("join").expect("delivered");
    assert!(result.saved);
    assert_eq!(result.value.status, Status::B);
}
