//! Dialog outcomes, the six canonical button sets, and the one-shot
//! completion cell a dialog resolves into.

use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

/// Result of a dialog interaction. Produced exactly once per dialog
/// instance; `None` means the window was closed without a button click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogOutcome {
    Ok,
    Cancel,
    Yes,
    No,
    Abort,
    Retry,
    Ignore,
    None,
}

/// The closed set of button combinations a message dialog can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogButtons {
    Ok,
    OkCancel,
    YesNo,
    YesNoCancel,
    RetryCancel,
    AbortRetryIgnore,
}

impl DialogButtons {
    /// Buttons in on-screen order. Each entry is the outcome produced when
    /// that button is clicked.
    pub fn outcomes(self) -> &'static [DialogOutcome] {
        match self {
            DialogButtons::Ok => &[DialogOutcome::Ok],
            DialogButtons::OkCancel => &[DialogOutcome::Ok, DialogOutcome::Cancel],
            DialogButtons::YesNo => &[DialogOutcome::Yes, DialogOutcome::No],
            DialogButtons::YesNoCancel => {
                &[DialogOutcome::Yes, DialogOutcome::No, DialogOutcome::Cancel]
            }
            DialogButtons::RetryCancel => &[DialogOutcome::Retry, DialogOutcome::Cancel],
            DialogButtons::AbortRetryIgnore => {
                &[DialogOutcome::Abort, DialogOutcome::Retry, DialogOutcome::Ignore]
            }
        }
    }

    /// Which button receives keyboard focus when the dialog first shows.
    pub fn default_focus(self) -> DialogOutcome {
        match self {
            DialogButtons::Ok | DialogButtons::OkCancel => DialogOutcome::Ok,
            DialogButtons::YesNo | DialogButtons::YesNoCancel => DialogOutcome::Yes,
            DialogButtons::RetryCancel => DialogOutcome::Retry,
            DialogButtons::AbortRetryIgnore => DialogOutcome::Ignore,
        }
    }
}

/// Icon kind selecting the dialog's window tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogIcon {
    None,
    Information,
    Question,
    Warning,
    Error,
}

/// Single-resolution result cell: the first writer wins and every later
/// attempt is a no-op.
pub struct OutcomeCell {
    slot: Mutex<Option<oneshot::Sender<DialogOutcome>>>,
}

impl OutcomeCell {
    pub fn new() -> (Arc<Self>, DialogTicket) {
        let (tx, rx) = oneshot::channel();
        let cell = Arc::new(Self {
            slot: Mutex::new(Some(tx)),
        });
        (cell, DialogTicket { rx })
    }

    /// Resolves the cell. Returns `true` when this call claimed it; repeated
    /// calls return `false` and leave the delivered outcome untouched.
    pub fn resolve(&self, outcome: DialogOutcome) -> bool {
        let Some(tx) = self.slot.lock().expect("outcome cell lock").take() else {
            return false;
        };
        // The awaiting side may already be gone; the claim still counts.
        let _ = tx.send(outcome);
        true
    }

    pub fn is_resolved(&self) -> bool {
        self.slot.lock().expect("outcome cell lock").is_none()
    }
}

/// Future-like handle resolving to a dialog's outcome.
pub struct DialogTicket {
    rx: oneshot::Receiver<DialogOutcome>,
}

impl DialogTicket {
    /// Suspends the caller until the dialog resolves. A dialog torn down
    /// without ever resolving (host dropped) yields `DialogOutcome::None`.
    pub async fn outcome(self) -> DialogOutcome {
        self.rx.await.unwrap_or(DialogOutcome::None)
    }

    /// Blocking variant for plain worker threads outside a runtime.
    pub fn outcome_blocking(self) -> DialogOutcome {
        self.rx.blocking_recv().unwrap_or(DialogOutcome::None)
    }

    /// Non-blocking poll for UI-side callers that cannot await. Returns
    /// `Some` exactly once the dialog has resolved (or its window was torn
    /// down, which reads as `DialogOutcome::None`).
    pub fn try_outcome(&mut self) -> Option<DialogOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(DialogOutcome::None),
        }
    }
}
