//! Event tracing for debugging the bubble.
//!
//! Provides a ring buffer of recent transitions. The replay command dumps
//! it so a pointer script can be inspected step by step.

use std::collections::VecDeque;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::state::StateTransition;

/// Maximum number of events to keep in the trace buffer
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// A single entry in the event log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub sequence: u64,
    pub timestamp_ms: u64,
    pub event_type: String,
    pub details: String,
}

/// Event tracer with ring buffer storage
pub struct EventTracer {
    entries: VecDeque<EventLogEntry>,
    max_entries: usize,
    sequence: u64,
    start_time: Instant,
}

impl EventTracer {
    /// Create a new event tracer with default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    /// Create a new event tracer with specified capacity
    pub fn with_capacity(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
            sequence: 0,
            start_time: Instant::now(),
        }
    }

    /// Get the current timestamp in milliseconds since tracer start
    fn timestamp(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    /// Trace a state transition
    pub fn trace_transition(&mut self, transition: &StateTransition) {
        let details = match transition {
            StateTransition::AnchorPressed { at } => format!("at=({:.1},{:.1})", at.x, at.y),
            StateTransition::DragAbandoned { frame } => {
                format!("frame=({:.1},{:.1})", frame.x, frame.y)
            }
            StateTransition::DragStarted { at } => format!("at=({:.1},{:.1})", at.x, at.y),
            StateTransition::DragEnded { edge, frame } => {
                format!("edge={} frame=({:.1},{:.1})", edge, frame.x, frame.y)
            }
            StateTransition::Clicked => String::new(),
            StateTransition::AnchorReclamped { from, to } => format!(
                "({:.1},{:.1})->({:.1},{:.1})",
                from.x, from.y, to.x, to.y
            ),
            StateTransition::PanelShown { frame, anchor_edge } => format!(
                "anchor_edge={} frame=({:.1},{:.1} {:.0}x{:.0})",
                anchor_edge, frame.x, frame.y, frame.width, frame.height
            ),
            StateTransition::PanelHidden => String::new(),
            StateTransition::ScreensChanged { count } => format!("count={}", count),
        };
        log::debug!("{} {}", transition.kind(), details);
        self.add_entry(transition.kind().to_string(), details);
    }

    /// Add an entry to the trace buffer
    fn add_entry(&mut self, event_type: String, details: String) {
        // Remove oldest entry if at capacity
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }

        self.sequence += 1;
        self.entries.push_back(EventLogEntry {
            sequence: self.sequence,
            timestamp_ms: self.timestamp(),
            event_type,
            details,
        });
    }

    /// Get the last N entries
    pub fn get_last(&self, n: usize) -> Vec<EventLogEntry> {
        let start = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(start).cloned().collect()
    }

    /// Get all entries
    pub fn get_all(&self) -> Vec<EventLogEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Event types in order, handy for assertions
    pub fn event_types(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.event_type.as_str()).collect()
    }

    /// Clear the trace buffer
    pub fn clear(&mut self) {
        self.entries.clear();
        self.sequence = 0;
    }

    /// Get the number of entries in the buffer
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EventTracer {
    fn default() -> Self {
        Self::new()
    }
}
