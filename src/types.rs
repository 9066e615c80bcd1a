//! Shared geometry types used across the anchor, placement and screen modules.
//!
//! Coordinates follow the desktop convention: origin at the bottom-left,
//! y grows upwards. All values are in screen points.

use serde::{Deserialize, Serialize};

/// A point in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset from `origin` to this point
    pub fn offset_from(&self, origin: Point) -> Vector {
        Vector::new(self.x - origin.x, self.y - origin.y)
    }

    /// Translate this point backwards by `v`
    pub fn minus(&self, v: Vector) -> Point {
        Point::new(self.x - v.dx, self.y - v.dy)
    }
}

/// A displacement between two points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// True if either axis moved further than `threshold`
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.dx.abs() > threshold || self.dy.abs() > threshold
    }
}

/// Width and height of a window
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Same size with negative or non-finite dimensions collapsed to zero
    pub fn sanitized(self) -> Self {
        Self {
            width: non_negative(self.width),
            height: non_negative(self.height),
        }
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

/// A rectangle representing geometry
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Same rectangle moved to `origin`
    pub fn with_origin(&self, origin: Point) -> Self {
        Self { x: origin.x, y: origin.y, ..*self }
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Center X coordinate
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Center Y coordinate
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    /// Half-open containment test, used for hit-testing screens
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.min_x() && p.x < self.max_x() && p.y >= self.min_y() && p.y < self.max_y()
    }

    /// True if `other` lies entirely inside this rectangle (edges may touch)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min_x() >= self.min_x()
            && other.max_x() <= self.max_x()
            && other.min_y() >= self.min_y()
            && other.max_y() <= self.max_y()
    }

    /// Shrink by `margin` on every side; never produces a negative size
    pub fn inset(&self, margin: f64) -> Self {
        let margin = non_negative(margin);
        Self {
            x: self.x + margin,
            y: self.y + margin,
            width: (self.width - 2.0 * margin).max(0.0),
            height: (self.height - 2.0 * margin).max(0.0),
        }
    }

    /// Move this rectangle so it lies inside `bounds`, without resizing.
    ///
    /// Each axis is clamped independently: first against the minimum edge,
    /// then against the maximum edge. A rectangle larger than `bounds` ends
    /// up flush with the maximum edge and overflows the minimum one.
    pub fn clamped_into(&self, bounds: &Rect) -> Self {
        let mut r = *self;
        if r.min_x() < bounds.min_x() {
            r.x = bounds.min_x();
        }
        if r.max_x() > bounds.max_x() {
            r.x = bounds.max_x() - r.width;
        }
        if r.min_y() < bounds.min_y() {
            r.y = bounds.min_y();
        }
        if r.max_y() > bounds.max_y() {
            r.y = bounds.max_y() - r.height;
        }
        r
    }
}

/// A screen edge that an anchor or companion is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Left,
    Right,
    Bottom,
    Top,
}

impl Edge {
    /// Edges in tie-break priority order
    pub const PRIORITY: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Bottom, Edge::Top];

    pub fn opposite(self) -> Edge {
        match self {
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
            Edge::Bottom => Edge::Top,
            Edge::Top => Edge::Bottom,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Right => "right",
            Edge::Bottom => "bottom",
            Edge::Top => "top",
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distance from the center of `frame` to each edge of `visible`, in priority order
pub fn edge_distances(frame: &Rect, visible: &Rect) -> [(Edge, f64); 4] {
    let (cx, cy) = (frame.center_x(), frame.center_y());
    [
        (Edge::Left, (cx - visible.min_x()).abs()),
        (Edge::Right, (visible.max_x() - cx).abs()),
        (Edge::Bottom, (cy - visible.min_y()).abs()),
        (Edge::Top, (visible.max_y() - cy).abs()),
    ]
}

/// The edge of `visible` closest to the center of `frame`.
///
/// Ties resolve to the first edge in [`Edge::PRIORITY`]
/// (left, right, bottom, top).
pub fn nearest_edge(frame: &Rect, visible: &Rect) -> Edge {
    let distances = edge_distances(frame, visible);
    let mut best = distances[0];
    for candidate in &distances[1..] {
        // Strict comparison keeps the earlier edge on ties
        if candidate.1 < best.1 {
            best = *candidate;
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(rect.center_x(), 50.0);
        assert_eq!(rect.center_y(), 50.0);

        let rect = Rect::new(10.0, 20.0, 100.0, 200.0);
        assert_eq!(rect.center(), Point::new(60.0, 120.0));
    }

    #[test]
    fn test_clamp_inside_is_noop() {
        let bounds = Rect::new(0.0, 0.0, 1440.0, 900.0);
        let r = Rect::new(100.0, 100.0, 60.0, 60.0);
        assert_eq!(r.clamped_into(&bounds), r);
    }

    #[test]
    fn test_clamp_each_axis() {
        let bounds = Rect::new(0.0, 25.0, 1440.0, 850.0);

        let r = Rect::new(-30.0, 10.0, 60.0, 60.0).clamped_into(&bounds);
        assert_eq!((r.x, r.y), (0.0, 25.0));

        let r = Rect::new(1400.0, 850.0, 60.0, 60.0).clamped_into(&bounds);
        assert_eq!((r.x, r.y), (1380.0, 815.0));
        assert!(bounds.contains_rect(&r));
    }

    #[test]
    fn test_clamp_oversized_prefers_max_edge() {
        let bounds = Rect::new(0.0, 0.0, 200.0, 200.0);
        let r = Rect::new(-10.0, 50.0, 300.0, 100.0).clamped_into(&bounds);
        assert_eq!(r.x, -100.0);
        assert_eq!(r.max_x(), 200.0);
        assert_eq!(r.width, 300.0);
    }

    #[test]
    fn test_nearest_edge_each_side() {
        let visible = Rect::new(0.0, 0.0, 1440.0, 900.0);
        assert_eq!(nearest_edge(&Rect::new(10.0, 400.0, 60.0, 60.0), &visible), Edge::Left);
        assert_eq!(nearest_edge(&Rect::new(1380.0, 400.0, 60.0, 60.0), &visible), Edge::Right);
        assert_eq!(nearest_edge(&Rect::new(700.0, 5.0, 60.0, 60.0), &visible), Edge::Bottom);
        assert_eq!(nearest_edge(&Rect::new(700.0, 830.0, 60.0, 60.0), &visible), Edge::Top);
    }

    #[test]
    fn test_nearest_edge_ties_follow_priority() {
        // Centered in a square: all four distances equal
        let visible = Rect::new(0.0, 0.0, 400.0, 400.0);
        let centered = Rect::new(170.0, 170.0, 60.0, 60.0);
        assert_eq!(nearest_edge(&centered, &visible), Edge::Left);

        // Right and top tie, right wins
        let corner = Rect::new(340.0, 340.0, 60.0, 60.0);
        assert_eq!(nearest_edge(&corner, &visible), Edge::Right);

        // Bottom and top tie on a wide screen, bottom wins
        let wide = Rect::new(0.0, 0.0, 2000.0, 400.0);
        let mid = Rect::new(970.0, 170.0, 60.0, 60.0);
        assert_eq!(nearest_edge(&mid, &wide), Edge::Bottom);
    }

    #[test]
    fn test_size_sanitized() {
        assert_eq!(Size::new(-5.0, f64::NAN).sanitized(), Size::new(0.0, 0.0));
        assert_eq!(Size::new(320.0, 260.0).sanitized(), Size::new(320.0, 260.0));
    }

    #[test]
    fn test_inset_never_negative() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0).inset(8.0);
        assert_eq!(r, Rect::new(8.0, 8.0, 0.0, 0.0));
    }

    #[test]
    fn test_edge_serialization() {
        let json = serde_json::to_string(&Edge::Bottom).unwrap();
        assert_eq!(json, "\"bottom\"");
        assert_eq!(Edge::Left.opposite(), Edge::Right);
    }
}
