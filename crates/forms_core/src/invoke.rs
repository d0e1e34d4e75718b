//! Cross-thread invocation onto the UI thread: a channel handoff between the
//! calling task and the frame loop, instead of the fixed-interval poll such
//! helpers usually hide.

use std::thread::{self, ThreadId};

use crossbeam_channel::{unbounded, Receiver, Sender};
use thiserror::Error;
use tokio::sync::oneshot;

type Job = Box<dyn FnOnce() + Send>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvokeError {
    #[error("ui thread is gone")]
    UiGone,
}

/// Creates the queue/dispatcher pair. Must be called on the UI thread: the
/// calling thread becomes the inline fast path for later invokes.
pub fn ui_channel() -> (UiQueue, UiDispatcher) {
    let (tx, rx) = unbounded();
    let dispatcher = UiDispatcher {
        tx,
        ui_thread: thread::current().id(),
    };
    (UiQueue { rx }, dispatcher)
}

/// Cloneable, thread-safe handle for queueing closures onto the UI thread.
#[derive(Clone)]
pub struct UiDispatcher {
    tx: Sender<Job>,
    ui_thread: ThreadId,
}

impl UiDispatcher {
    /// Runs `job` on the UI thread and resolves the returned ticket with its
    /// value. Calls made on the UI thread itself run inline.
    pub fn invoke<R, F>(&self, job: F) -> InvokeTicket<R>
    where
        R: Send + 'static,
        F: FnOnce() -> R + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        if thread::current().id() == self.ui_thread {
            let _ = tx.send(job());
        } else {
            let boxed: Job = Box::new(move || {
                let _ = tx.send(job());
            });
            // A closed queue leaves the ticket unresolved; it reads as UiGone.
            let _ = self.tx.send(boxed);
        }
        InvokeTicket { rx }
    }
}

/// Receiving side, owned by the UI thread and drained once per frame.
pub struct UiQueue {
    rx: Receiver<Job>,
}

impl UiQueue {
    /// Runs every queued job. Returns how many jobs ran.
    pub fn drain(&self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            ran += 1;
        }
        ran
    }
}

/// Future-like handle resolving to the marshaled closure's return value.
pub struct InvokeTicket<R> {
    rx: oneshot::Receiver<R>,
}

impl<R> InvokeTicket<R> {
    pub async fn wait(self) -> Result<R, InvokeError> {
        self.rx.await.map_err(|_| InvokeError::UiGone)
    }

    pub fn wait_blocking(self) -> Result<R, InvokeError> {
        self.rx.blocking_recv().map_err(|_| InvokeError::UiGone)
    }
}
