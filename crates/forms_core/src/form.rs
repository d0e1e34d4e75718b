//! Edit-session lifecycle: bindings plus the Created → Shown → terminal
//! state machine, and the one-shot result ticket handed to the caller.

use std::collections::HashMap;

use tokio::sync::oneshot;
use tracing::debug;

use crate::binding::{build_bindings, FieldBinding};
use crate::error::FormError;
use crate::schema::{EditMode, Editable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Created,
    Shown,
    Committed,
    Cancelled,
}

impl FormPhase {
    /// Terminal phases are reached exactly once; disposal is the session
    /// being dropped afterwards.
    pub fn is_terminal(self) -> bool {
        matches!(self, FormPhase::Committed | FormPhase::Cancelled)
    }
}

/// Per-form configuration: optional text scaling, a field name filter, and
/// display-name overrides.
#[derive(Debug, Clone, Default)]
pub struct FormOptions {
    pub text_scale: Option<f32>,
    pub field_filter: Option<Vec<String>>,
    pub name_overrides: HashMap<String, String>,
}

/// Delivered to the awaiting caller when the form reaches a terminal state.
/// `saved` is false when the window was closed or cancelled.
#[derive(Debug)]
pub struct FormResult<T> {
    pub value: T,
    pub saved: bool,
}

/// Future-like handle resolving to the edited value.
pub struct FormTicket<T> {
    rx: oneshot::Receiver<FormResult<T>>,
}

impl<T> FormTicket<T> {
    /// `None` when the form was torn down before reaching a terminal state
    /// (host dropped).
    pub async fn result(self) -> Option<FormResult<T>> {
        self.rx.await.ok()
    }

    /// Blocking variant for plain worker threads outside a runtime.
    pub fn result_blocking(self) -> Option<FormResult<T>> {
        self.rx.blocking_recv().ok()
    }

    /// Non-blocking poll for UI-side callers. Yields `Some(None)` once when
    /// the form was torn down without a result.
    pub fn try_result(&mut self) -> Option<Option<FormResult<T>>> {
        match self.rx.try_recv() {
            Ok(result) => Some(Some(result)),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(None),
        }
    }
}

/// An in-flight edit form: the target value, its bindings, and the phase of
/// the lifecycle. Created per invocation, never reused.
pub struct EditSession<T: Editable> {
    target: Option<T>,
    mode: EditMode,
    bindings: Vec<FieldBinding<T>>,
    phase: FormPhase,
    reply: Option<oneshot::Sender<FormResult<T>>>,
}

impl<T: Editable> EditSession<T> {
    /// Builds every binding up front; any construction failure aborts the
    /// session before a window exists.
    pub fn new(
        mode: EditMode,
        value: T,
        options: &FormOptions,
    ) -> Result<(Self, FormTicket<T>), FormError> {
        let bindings = build_bindings(
            &value,
            mode,
            options.field_filter.as_deref(),
            &options.name_overrides,
        )?;
        let (tx, rx) = oneshot::channel();
        let session = Self {
            target: Some(value),
            mode,
            bindings,
            phase: FormPhase::Created,
            reply: Some(tx),
        };
        Ok((session, FormTicket { rx }))
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn bindings(&self) -> &[FieldBinding<T>] {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut [FieldBinding<T>] {
        &mut self.bindings
    }

    pub fn mark_shown(&mut self) {
        if self.phase == FormPhase::Created {
            self.phase = FormPhase::Shown;
        }
    }

    /// Applies every binding in declared order. On failure the session stays
    /// open (bindings already applied keep their values) and the error is
    /// returned for the boundary to report.
    pub fn commit(&mut self) -> Result<(), FormError> {
        if self.phase.is_terminal() {
            return Err(FormError::Precondition(
                "form already reached a terminal state".to_string(),
            ));
        }
        let target = self.target.as_mut().ok_or_else(|| {
            FormError::Precondition("form target already taken".to_string())
        })?;
        for binding in &self.bindings {
            binding.commit(target)?;
        }
        self.phase = FormPhase::Committed;
        self.deliver(true);
        Ok(())
    }

    /// Closing the window or pressing cancel: no bindings are applied.
    pub fn cancel(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        self.phase = FormPhase::Cancelled;
        self.deliver(false);
    }

    fn deliver(&mut self, saved: bool) {
        let (Some(reply), Some(value)) = (self.reply.take(), self.target.take()) else {
            return;
        };
        if reply.send(FormResult { value, saved }).is_err() {
            debug!(saved, "edit form caller went away before the result arrived");
        }
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
