//! State machine types for the bubble and its companion panel.
//!
//! This module formalizes the state machines driven by pointer input:
//! - Anchor press/drag phase
//! - Companion panel visibility
//!
//! Transitions are plain data so they can be traced and serialized.

use serde::{Deserialize, Serialize};

use crate::types::{Edge, Point, Rect};

/// Anchor pointer phase
///
/// ```text
///              press
///   ┌──────┐ ────────► ┌────────────────────────┐
///   │ Idle │           │ PressedNotYetDragging  │
///   └──────┘ ◄──────── └───────────┬────────────┘
///      ▲    release (clicked)      │ move beyond threshold
///      │                           ▼ (drag_started)
///      │                     ┌──────────┐
///      └──────────────────── │ Dragging │
///        release (snap,      └──────────┘
///        drag_ended)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorPhase {
    /// No pointer sequence in progress
    #[default]
    Idle,
    /// Pointer is down but has not yet moved past the drag threshold
    PressedNotYetDragging,
    /// Pointer is down and the anchor follows it
    Dragging,
}

/// Companion panel visibility
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelState {
    /// Panel has never been created
    Uncreated,
    /// Panel exists but is ordered out
    Hidden,
    /// Panel is on screen at `frame`, attached opposite `anchor_edge`
    Shown { frame: Rect, anchor_edge: Edge },
}

impl PanelState {
    pub fn is_visible(&self) -> bool {
        matches!(self, PanelState::Shown { .. })
    }
}

/// State transition events that can be traced
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum StateTransition {
    /// Pointer went down on the anchor
    AnchorPressed { at: Point },
    /// Press began while a drag was still active (release was lost)
    DragAbandoned { frame: Rect },
    /// Pointer moved past the threshold
    DragStarted { at: Point },
    /// Drag finished and the anchor snapped to an edge
    DragEnded { edge: Edge, frame: Rect },
    /// Press/release without crossing the threshold
    Clicked,
    /// Anchor was moved to keep it inside a new visible area
    AnchorReclamped { from: Rect, to: Rect },
    /// Companion panel was placed and shown
    PanelShown { frame: Rect, anchor_edge: Edge },
    /// Companion panel was hidden
    PanelHidden,
    /// Display configuration changed
    ScreensChanged { count: usize },
}

impl StateTransition {
    /// Short snake_case name for log output
    pub fn kind(&self) -> &'static str {
        match self {
            StateTransition::AnchorPressed { .. } => "anchor_pressed",
            StateTransition::DragAbandoned { .. } => "drag_abandoned",
            StateTransition::DragStarted { .. } => "drag_started",
            StateTransition::DragEnded { .. } => "drag_ended",
            StateTransition::Clicked => "clicked",
            StateTransition::AnchorReclamped { .. } => "anchor_reclamped",
            StateTransition::PanelShown { .. } => "panel_shown",
            StateTransition::PanelHidden => "panel_hidden",
            StateTransition::ScreensChanged { .. } => "screens_changed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_phase_serialization() {
        let json = serde_json::to_string(&AnchorPhase::PressedNotYetDragging).unwrap();
        assert_eq!(json, "\"pressed_not_yet_dragging\"");

        let parsed: AnchorPhase = serde_json::from_str("\"dragging\"").unwrap();
        assert_eq!(parsed, AnchorPhase::Dragging);
        assert_eq!(AnchorPhase::default(), AnchorPhase::Idle);
    }

    #[test]
    fn test_panel_state_visibility() {
        assert!(!PanelState::Uncreated.is_visible());
        assert!(!PanelState::Hidden.is_visible());
        let shown = PanelState::Shown {
            frame: Rect::new(0.0, 0.0, 320.0, 260.0),
            anchor_edge: Edge::Right,
        };
        assert!(shown.is_visible());
    }

    #[test]
    fn test_state_transition_serialization() {
        let transition = StateTransition::DragEnded {
            edge: Edge::Left,
            frame: Rect::new(0.0, 300.0, 60.0, 60.0),
        };
        let json = serde_json::to_string(&transition).unwrap();
        assert!(json.contains("drag_ended"));
        assert!(json.contains("\"left\""));
        assert_eq!(transition.kind(), "drag_ended");
    }
}
