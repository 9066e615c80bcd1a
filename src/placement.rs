//! Companion panel placement.
//!
//! The panel is attached beside the anchor, on the side facing away from
//! the screen edge the anchor is nearest to:
//!
//! ```text
//!   anchor on right edge        anchor on bottom edge
//!   ┌────────┐ ┌──┐                   ┌────────┐
//!   │ panel  │ │A │                   │ panel  │
//!   │        │ └──┘                   └────────┘
//!   └────────┘                              ┌──┐
//!                                           │A │
//!                                           └──┘
//! ```
//!
//! Left/right placements share the anchor's top; top/bottom placements
//! share its right side. The result is then clamped into the visible area.

use crate::types::{nearest_edge, Edge, Point, Rect, Size};

/// Default gap between anchor and panel
pub const DEFAULT_PADDING: f64 = 8.0;

/// A computed panel frame plus the anchor edge it was derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub frame: Rect,
    pub anchor_edge: Edge,
}

impl Placement {
    pub fn origin(&self) -> Point {
        self.frame.origin()
    }
}

/// Pure, stateless placement of a companion panel relative to an anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementEngine {
    /// Gap between anchor and panel
    pub padding: f64,
    /// Inset from the visible area used when clamping (0 = flush)
    pub screen_margin: f64,
}

impl PlacementEngine {
    pub fn new(padding: f64, screen_margin: f64) -> Self {
        Self {
            padding,
            screen_margin,
        }
    }

    /// Compute the panel frame for `companion` next to `anchor` inside `visible`
    pub fn place(&self, anchor: Rect, companion: Size, visible: Rect) -> Rect {
        self.place_detailed(anchor, companion, visible).frame
    }

    /// Like [`place`](Self::place), also reporting the anchor edge used
    pub fn place_detailed(&self, anchor: Rect, companion: Size, visible: Rect) -> Placement {
        let size = companion.sanitized();
        let edge = nearest_edge(&anchor, &visible);

        let origin = match edge {
            // Anchor on the right edge: panel to its left
            Edge::Right => Point::new(
                anchor.min_x() - size.width - self.padding,
                anchor.max_y() - size.height,
            ),
            Edge::Left => Point::new(anchor.max_x() + self.padding, anchor.max_y() - size.height),
            // Anchor on the top edge: panel below
            Edge::Top => Point::new(
                anchor.max_x() - size.width,
                anchor.min_y() - size.height - self.padding,
            ),
            Edge::Bottom => Point::new(anchor.max_x() - size.width, anchor.max_y() + self.padding),
        };

        let bounds = visible.inset(self.screen_margin);
        if size.width > bounds.width || size.height > bounds.height {
            log::warn!(
                "Panel {:.0}x{:.0} does not fit visible area {:.0}x{:.0}",
                size.width,
                size.height,
                bounds.width,
                bounds.height
            );
        }
        let frame = Rect::from_origin_size(origin, size).clamped_into(&bounds);
        log::debug!(
            "Placed panel at ({:.1},{:.1}) for anchor on {} edge",
            frame.x,
            frame.y,
            edge
        );

        Placement {
            frame,
            anchor_edge: edge,
        }
    }
}

impl Default for PlacementEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PADDING, 0.0)
    }
}
