//! Pointer-event scripts.
//!
//! A script is a JSON document describing the displays and a sequence of
//! input events. Replaying it drives a [`BubbleApp`] against a
//! [`RecordingHost`] and reports what happened, which makes geometry bugs
//! reproducible without a window server.
//!
//! ```json
//! {
//!   "screens": [{ "name": "main", "primary": true,
//!                 "frame": {"x": 0, "y": 0, "width": 1440, "height": 900},
//!                 "visible_frame": {"x": 0, "y": 0, "width": 1440, "height": 875} }],
//!   "events": [
//!     { "type": "press", "x": 1390, "y": 450 },
//!     { "type": "move", "x": 200, "y": 300 },
//!     { "type": "release", "x": 200, "y": 300 }
//!   ]
//! }
//! ```

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::anchor::AnchorSignal;
use crate::app::BubbleApp;
use crate::config::BubbleConfig;
use crate::host::{HostCommand, RecordingHost};
use crate::screen::{Screen, ScreenSet};
use crate::state::{AnchorPhase, PanelState};
use crate::tracing::EventLogEntry;
use crate::types::{Point, Rect};

/// Displays plus the input to feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayScript {
    pub screens: Vec<Screen>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

/// One input event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    Press { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Release { x: f64, y: f64 },
    /// Menu-bar item click
    StatusItem,
    SpaceChanged,
    /// Replace the display configuration
    Screens { screens: Vec<Screen> },
}

/// Final state after a replay
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub bubble: Rect,
    pub phase: AnchorPhase,
    pub panel: PanelState,
    pub signals: Vec<AnchorSignal>,
    pub commands: Vec<HostCommand>,
    pub event_log: Vec<EventLogEntry>,
}

pub fn parse_script(text: &str) -> Result<ReplayScript> {
    let script: ReplayScript =
        serde_json::from_str(text).context("Failed to parse replay script")?;
    ensure!(!script.screens.is_empty(), "Replay script must define at least one screen");
    Ok(script)
}

pub fn load_script(path: &Path) -> Result<ReplayScript> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read replay script {:?}", path))?;
    parse_script(&text)
}

/// Feed every event of `script` to a fresh app
pub fn replay(script: &ReplayScript, config: BubbleConfig) -> ReplayReport {
    let mut app = BubbleApp::new(
        config,
        ScreenSet::new(script.screens.clone()),
        RecordingHost::new(),
    );

    let signals = Rc::new(RefCell::new(Vec::new()));
    let sink = signals.clone();
    app.anchor_mut()
        .subscribe(move |signal| sink.borrow_mut().push(*signal));

    for (i, event) in script.events.iter().enumerate() {
        log::debug!("Replaying event {}: {:?}", i, event);
        match event {
            ScriptEvent::Press { x, y } => app.pointer_down(Point::new(*x, *y)),
            ScriptEvent::Move { x, y } => app.pointer_dragged(Point::new(*x, *y)),
            ScriptEvent::Release { x, y } => app.pointer_up(Point::new(*x, *y)),
            ScriptEvent::StatusItem => app.status_item_clicked(),
            ScriptEvent::SpaceChanged => app.active_space_changed(),
            ScriptEvent::Screens { screens } => app.screens_changed(ScreenSet::new(screens.clone())),
        }
    }

    let signals = signals.borrow().clone();
    let event_log = app.tracer().get_all();
    let bubble = app.anchor().current_frame();
    let phase = app.anchor().phase();
    let panel = app.panel_state();
    let commands = app.into_host().commands;

    ReplayReport {
        bubble,
        phase,
        panel,
        signals,
        commands,
        event_log,
    }
}
