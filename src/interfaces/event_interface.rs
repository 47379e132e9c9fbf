// src/interfaces/event_interface.rs
//! Event sink interface
//!
//! Observers learn about rollup state transitions through an event sink.
//! The rollup calls the sink synchronously after each successful
//! transition; delivery beyond that call is the observer's concern.

use std::sync::{Arc, Mutex};

use crate::rollup::optimistic_rollup::RollupEvent;

/// Interface for observers of rollup state transitions
pub trait EventSink: Send + Sync {
    /// Record one event
    fn emit(&mut self, event: RollupEvent);
}

/// Sink that forwards events to the log
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&mut self, event: RollupEvent) {
        match &event {
            RollupEvent::StateRootCommitted { index, root } => {
                log::info!("event: state root {} committed at index {}", hex::encode(root), index);
            }
            RollupEvent::ChallengeOpened { root, challenger } => {
                log::info!("event: challenge opened against {} by {}", hex::encode(root), challenger);
            }
            RollupEvent::ChallengeResolved { root, outcome } => {
                log::info!("event: challenge against {} resolved as {}", hex::encode(root), outcome);
            }
        }
    }
}

/// Sink that records events into shared memory
///
/// The handle can be cloned before the sink is handed to the rollup, so a
/// test can assert on everything emitted afterwards.
pub struct RecordingEventSink {
    /// Events recorded so far
    events: Arc<Mutex<Vec<RollupEvent>>>,
}

impl RecordingEventSink {
    /// Create a sink with an empty recording
    pub fn new() -> Self {
        RecordingEventSink {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a handle sharing this sink's recording
    pub fn handle(&self) -> RecordingEventSink {
        RecordingEventSink {
            events: Arc::clone(&self.events),
        }
    }

    /// Snapshot of the events recorded so far
    pub fn recorded(&self) -> Vec<RollupEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&mut self, event: RollupEvent) {
        self.events.lock().unwrap().push(event);
    }
}
