//! Anchor controller: the draggable bubble.
//!
//! A single pointer sequence (press, moves, release) is classified at
//! release time as either a click or a drag, depending only on whether
//! the pointer ever moved past the drag threshold. Drags keep the anchor
//! inside the visible area and end by snapping flush to the nearest edge.
//!
//! The visible area is passed in on every call and never cached, so a
//! display reconfiguration mid-drag is picked up on the next move.
//!
//! Events are assumed to arrive in order. If the platform drops a
//! release the controller stays in `Dragging` until the next press.

use serde::{Deserialize, Serialize};

use crate::signal::{Signal, SubscriptionId};
use crate::state::AnchorPhase;
use crate::types::{nearest_edge, Edge, Point, Rect, Vector};

/// Default per-axis displacement needed to turn a press into a drag
pub const DEFAULT_DRAG_THRESHOLD: f64 = 3.0;

/// Signals emitted to whoever drives the companion panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorSignal {
    Clicked,
    DragStarted,
    DragEnded,
}

/// Result of feeding a pointer move to the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// No press in progress
    Ignored,
    /// Pressed but still within the threshold
    BelowThreshold,
    /// Threshold crossed on this move; the anchor now sits at `frame`
    DragStarted { frame: Rect },
    /// Anchor followed the pointer to `frame`
    Moved { frame: Rect },
}

/// Result of feeding a pointer release to the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseOutcome {
    /// No press in progress
    Ignored,
    /// The sequence never crossed the threshold
    Clicked,
    /// A drag ended and the anchor snapped flush to `edge`
    Snapped { edge: Edge, frame: Rect },
}

/// Owns the anchor frame and the press/drag/release state machine
#[derive(Debug)]
pub struct AnchorController {
    frame: Rect,
    phase: AnchorPhase,
    /// Pointer location at press time
    press_origin: Point,
    /// Pointer location relative to the frame origin at press time
    press_offset: Vector,
    drag_threshold: f64,
    signals: Signal<AnchorSignal>,
}

impl AnchorController {
    pub fn new(frame: Rect, drag_threshold: f64) -> Self {
        let size = frame.size().sanitized();
        Self {
            frame: Rect::from_origin_size(frame.origin(), size),
            phase: AnchorPhase::Idle,
            press_origin: Point::default(),
            press_offset: Vector::default(),
            drag_threshold: if drag_threshold.is_finite() && drag_threshold >= 0.0 {
                drag_threshold
            } else {
                DEFAULT_DRAG_THRESHOLD
            },
            signals: Signal::new(),
        }
    }

    pub fn current_frame(&self) -> Rect {
        self.frame
    }

    pub fn phase(&self) -> AnchorPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == AnchorPhase::Dragging
    }

    pub fn drag_threshold(&self) -> f64 {
        self.drag_threshold
    }

    /// Register a listener for `clicked`, `drag_started` and `drag_ended`
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&AnchorSignal) + 'static,
    {
        self.signals.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.signals.unsubscribe(id)
    }

    /// Programmatic positioning; the size is kept
    pub fn set_origin(&mut self, origin: Point) {
        self.frame = self.frame.with_origin(origin);
    }

    /// Pointer went down on the anchor
    pub fn on_press(&mut self, at: Point) {
        if self.phase == AnchorPhase::Dragging {
            log::warn!("Press while still dragging; previous release was lost");
        }
        self.phase = AnchorPhase::PressedNotYetDragging;
        self.press_origin = at;
        self.press_offset = at.offset_from(self.frame.origin());
        log::debug!(
            "Anchor pressed at ({:.1},{:.1}), offset ({:.1},{:.1})",
            at.x,
            at.y,
            self.press_offset.dx,
            self.press_offset.dy
        );
    }

    /// Pointer moved while down. `visible` is the current visible area of
    /// the screen the anchor is on.
    pub fn on_move(&mut self, at: Point, visible: &Rect) -> MoveOutcome {
        let started = match self.phase {
            AnchorPhase::Idle => return MoveOutcome::Ignored,
            AnchorPhase::PressedNotYetDragging => {
                if !at.offset_from(self.press_origin).exceeds(self.drag_threshold) {
                    return MoveOutcome::BelowThreshold;
                }
                self.phase = AnchorPhase::Dragging;
                self.signals.emit(&AnchorSignal::DragStarted);
                true
            }
            AnchorPhase::Dragging => false,
        };

        let moved = self.frame.with_origin(at.minus(self.press_offset));
        self.frame = moved.clamped_into(visible);

        if started {
            MoveOutcome::DragStarted { frame: self.frame }
        } else {
            MoveOutcome::Moved { frame: self.frame }
        }
    }

    /// Pointer released; decides between click and drag
    pub fn on_release(&mut self, at: Point, visible: &Rect) -> ReleaseOutcome {
        let phase = std::mem::take(&mut self.phase);
        match phase {
            AnchorPhase::Idle => {
                log::debug!("Release at ({:.1},{:.1}) without press, ignoring", at.x, at.y);
                ReleaseOutcome::Ignored
            }
            AnchorPhase::PressedNotYetDragging => {
                self.signals.emit(&AnchorSignal::Clicked);
                ReleaseOutcome::Clicked
            }
            AnchorPhase::Dragging => {
                let edge = self.snap_to_nearest_edge(visible);
                self.signals.emit(&AnchorSignal::DragEnded);
                ReleaseOutcome::Snapped {
                    edge,
                    frame: self.frame,
                }
            }
        }
    }

    /// Move the anchor flush against the edge of `visible` nearest to its
    /// center. The cross axis is only clamped, never snapped.
    pub fn snap_to_nearest_edge(&mut self, visible: &Rect) -> Edge {
        // The visible area may have shrunk since the last move
        let mut frame = self.frame.clamped_into(visible);
        let edge = nearest_edge(&frame, visible);
        match edge {
            Edge::Left => frame.x = visible.min_x(),
            Edge::Right => frame.x = visible.max_x() - frame.width,
            Edge::Bottom => frame.y = visible.min_y(),
            Edge::Top => frame.y = visible.max_y() - frame.height,
        }
        log::info!(
            "Anchor snapped to {} edge at ({:.1},{:.1})",
            edge,
            frame.x,
            frame.y
        );
        self.frame = frame;
        edge
    }

    /// Pull the anchor back inside `visible` (after a display change).
    /// Returns the previous frame if it moved.
    pub fn reclamp(&mut self, visible: &Rect) -> Option<Rect> {
        let clamped = self.frame.clamped_into(visible);
        if clamped == self.frame {
            return None;
        }
        let previous = self.frame;
        self.frame = clamped;
        Some(previous)
    }
}
