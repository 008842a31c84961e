//! Diagnostic trace sinks.
//!
//! A sink observes combinator invocations and never influences parse
//! results. It is injected per parse (see [`crate::parse_with_trace`]) and
//! travels inside the [`Context`](crate::parser::Context).

use std::cell::RefCell;

use crate::position::Position;

/// Longest remaining-input snippet [`LogTrace`] writes per event.
const SNIPPET_LEN: usize = 24;

pub trait Trace {
    fn record(&self, event: &str, position: Position, remaining: &str);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl Trace for NoTrace {
    fn record(&self, _event: &str, _position: Position, _remaining: &str) {}
}

/// Forwards every event to the `log` facade at trace level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl Trace for LogTrace {
    fn record(&self, event: &str, position: Position, remaining: &str) {
        log::trace!("{event} at {position}: {:?}", snippet(remaining));
    }
}

fn snippet(remaining: &str) -> &str {
    match remaining.char_indices().nth(SNIPPET_LEN) {
        Some((end, _)) => &remaining[..end],
        None => remaining,
    }
}

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    pub event: String,
    pub position: Position,
    pub remaining: String,
}

/// Keeps every event in memory, in invocation order.
#[derive(Debug, Default)]
pub struct Recorder {
    events: RefCell<Vec<TraceEvent>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.borrow().clone()
    }

    /// Names of the recorded events, in order.
    pub fn event_names(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .map(|e| e.event.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl Trace for Recorder {
    fn record(&self, event: &str, position: Position, remaining: &str) {
        self.events.borrow_mut().push(TraceEvent {
            event: event.to_string(),
            position,
            remaining: remaining.to_string(),
        });
    }
}
