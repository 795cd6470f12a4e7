//! Tracking callable — the capability plugins forward positional commands to.
//!
//! Plugins hold an `Arc<dyn Tracker>` resolved once at startup instead of
//! reading an ambient global, so hosts and tests can substitute their own.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;

use crate::types::Command;

/// The external tracking library's command function (`ga(...)`).
pub trait Tracker: Send + Sync {
    fn call(&self, command: Command);

    /// Commands buffered but not yet taken over by the loaded library.
    fn pending(&self) -> Vec<Command> {
        Vec::new()
    }
}

/// No-op tracker for hosts that have tracking disabled.
pub struct NoOpTracker;

impl Tracker for NoOpTracker {
    fn call(&self, _command: Command) {}
}

/// Pre-load stub: buffers commands until the real library takes over.
/// Mirrors the library's `q` queue and `l` load timestamp.
pub struct CommandQueue {
    queue: Mutex<Vec<Command>>,
    loaded_at: i64,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(Vec::new()),
            loaded_at: Utc::now().timestamp_millis(),
        }
    }

    /// Epoch millis at which the stub was installed.
    pub fn loaded_at(&self) -> i64 {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Hand every buffered command, in issue order, to the loaded library.
    pub fn drain(&self) -> Vec<Command> {
        std::mem::take(&mut *self.queue.lock())
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracker for CommandQueue {
    fn call(&self, command: Command) {
        self.queue.lock().push(command);
    }

    fn pending(&self) -> Vec<Command> {
        self.queue.lock().clone()
    }
}

/// In-memory tracker that records commands for testing.
#[derive(Default)]
pub struct CaptureTracker {
    commands: Mutex<Vec<Command>>,
}

impl CaptureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<Command> {
        self.commands.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.commands.lock().len()
    }

    pub fn count_hit_type(&self, hit_type: &str) -> usize {
        self.commands
            .lock()
            .iter()
            .filter(|c| c.name() == Some("send") && c.hit_type() == Some(hit_type))
            .count()
    }

    /// Fire every recorded hit callback, as the library does once hits land.
    /// Returns how many callbacks ran.
    pub fn complete_all(&self) -> usize {
        let callbacks: Vec<_> = self
            .commands
            .lock()
            .iter()
            .flat_map(|c| c.hit_callbacks().cloned().collect::<Vec<_>>())
            .collect();
        for callback in &callbacks {
            callback();
        }
        callbacks.len()
    }

    pub fn clear(&self) {
        self.commands.lock().clear();
    }
}

impl Tracker for CaptureTracker {
    fn call(&self, command: Command) {
        self.commands.lock().push(command);
    }
}

pub fn noop_tracker() -> Arc<dyn Tracker> {
    Arc::new(NoOpTracker)
}

pub fn capture_tracker() -> Arc<CaptureTracker> {
    Arc::new(CaptureTracker::new())
}
