//! Dialog host: accepts windows from any thread, runs marshaled UI jobs,
//! and renders every live dialog once per frame.

use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use forms_core::{ui_channel, DialogStrings, UiDispatcher, UiQueue};
use tracing::warn;

/// A window driven by the host until it reports completion.
pub trait DialogWindow: Send {
    /// Renders one frame. Returns `false` once the window reached its
    /// terminal state and should be dropped.
    fn show(&mut self, ctx: &egui::Context, env: &DialogEnv) -> bool;
}

/// Shared per-frame context handed to every window.
pub struct DialogEnv {
    pub strings: DialogStrings,
    pub handle: DialogHandle,
}

/// Cloneable, thread-safe handle for opening dialogs on the host.
#[derive(Clone)]
pub struct DialogHandle {
    tx: Sender<Box<dyn DialogWindow>>,
    dispatcher: UiDispatcher,
}

impl DialogHandle {
    pub fn open(&self, window: Box<dyn DialogWindow>) {
        if self.tx.send(window).is_err() {
            warn!("dialog host is gone; dropping dialog window");
        }
    }

    /// Marshals closures onto the host's thread; see `UiDispatcher`.
    pub fn dispatcher(&self) -> &UiDispatcher {
        &self.dispatcher
    }
}

/// Owned by the egui app; `run` is called once per `update`.
pub struct DialogHost {
    windows: Vec<Box<dyn DialogWindow>>,
    incoming: Receiver<Box<dyn DialogWindow>>,
    queue: UiQueue,
    env: DialogEnv,
}

impl DialogHost {
    /// Must be constructed on the UI thread: the dispatcher's inline fast
    /// path binds to the calling thread.
    pub fn new(strings: DialogStrings) -> (Self, DialogHandle) {
        let (queue, dispatcher) = ui_channel();
        let (tx, incoming) = unbounded();
        let handle = DialogHandle { tx, dispatcher };
        let host = Self {
            windows: Vec::new(),
            incoming,
            queue,
            env: DialogEnv {
                strings,
                handle: handle.clone(),
            },
        };
        (host, handle)
    }

    pub fn handle(&self) -> DialogHandle {
        self.env.handle.clone()
    }

    pub fn open_count(&self) -> usize {
        self.windows.len()
    }

    /// Per-frame tick: run marshaled jobs, accept newly opened windows,
    /// render live ones, drop finished ones.
    pub fn run(&mut self, ctx: &egui::Context) {
        self.queue.drain();
        while let Ok(window) = self.incoming.try_recv() {
            self.windows.push(window);
        }
        let env = &self.env;
        self.windows.retain_mut(|window| window.show(ctx, env));
        if !self.windows.is_empty() {
            // outcomes can arrive from other threads between frames
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
