//! Multi-display support.
//!
//! Screens are supplied by the platform layer and may be replaced at any
//! time. Lookups always go through the current set, so callers get the
//! visible area as it is now rather than a cached copy.

use serde::{Deserialize, Serialize};

use crate::types::{Point, Rect};

/// A physical display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    /// Display name (e.g., "Built-in Retina Display")
    pub name: String,
    /// Whether this is the main display
    #[serde(default)]
    pub primary: bool,
    /// Full bounds in global coordinates
    pub frame: Rect,
    /// Bounds minus menu bar and dock
    pub visible_frame: Rect,
}

impl Screen {
    pub fn new(name: impl Into<String>, primary: bool, frame: Rect, visible_frame: Rect) -> Self {
        Self {
            name: name.into(),
            primary,
            frame,
            visible_frame,
        }
    }
}

/// Anything that can answer "what is the visible area around this frame right now"
pub trait VisibleAreaSource {
    fn visible_area_for(&self, frame: &Rect) -> Rect;
}

/// The set of connected displays
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenSet {
    screens: Vec<Screen>,
}

impl ScreenSet {
    pub fn new(screens: Vec<Screen>) -> Self {
        if screens.is_empty() {
            log::warn!("Screen set is empty; visible area will be zero-sized");
        }
        for screen in &screens {
            log::info!(
                "Screen '{}': {}x{}+{}+{} {}",
                screen.name,
                screen.frame.width,
                screen.frame.height,
                screen.frame.x,
                screen.frame.y,
                if screen.primary { "(primary)" } else { "" }
            );
        }
        Self { screens }
    }

    /// Convenience for a single display whose visible area is `visible`
    pub fn single(visible: Rect) -> Self {
        Self::new(vec![Screen::new("main", true, visible, visible)])
    }

    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// The primary display, or the first one if none is marked primary
    pub fn primary(&self) -> Option<&Screen> {
        self.screens
            .iter()
            .find(|s| s.primary)
            .or_else(|| self.screens.first())
    }

    /// Find the screen containing a point
    pub fn screen_at(&self, p: Point) -> Option<&Screen> {
        self.screens.iter().find(|s| s.frame.contains_point(p))
    }

    /// The screen a window belongs to: the one containing its center,
    /// else the primary (or first) screen.
    pub fn screen_for(&self, frame: &Rect) -> Option<&Screen> {
        self.screen_at(frame.center()).or_else(|| self.primary())
    }
}

impl VisibleAreaSource for ScreenSet {
    fn visible_area_for(&self, frame: &Rect) -> Rect {
        self.screen_for(frame)
            .map(|s| s.visible_frame)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dual() -> ScreenSet {
        ScreenSet::new(vec![
            Screen::new(
                "laptop",
                true,
                Rect::new(0.0, 0.0, 1440.0, 900.0),
                Rect::new(0.0, 70.0, 1440.0, 805.0),
            ),
            Screen::new(
                "external",
                false,
                Rect::new(1440.0, 0.0, 2560.0, 1440.0),
                Rect::new(1440.0, 0.0, 2560.0, 1415.0),
            ),
        ])
    }

    #[test]
    fn test_primary_fallback_to_first() {
        let set = ScreenSet::new(vec![Screen::new(
            "only",
            false,
            Rect::new(0.0, 0.0, 800.0, 600.0),
            Rect::new(0.0, 0.0, 800.0, 600.0),
        )]);
        assert_eq!(set.primary().map(|s| s.name.as_str()), Some("only"));
        assert!(ScreenSet::default().primary().is_none());
    }

    #[test]
    fn test_screen_at() {
        let set = dual();
        assert_eq!(set.screen_at(Point::new(100.0, 100.0)).unwrap().name, "laptop");
        assert_eq!(set.screen_at(Point::new(1440.0, 100.0)).unwrap().name, "external");
        assert!(set.screen_at(Point::new(-1.0, 100.0)).is_none());
    }

    #[test]
    fn test_visible_area_follows_anchor_center() {
        let set = dual();
        let on_laptop = Rect::new(1400.0, 400.0, 60.0, 60.0);
        assert_eq!(set.visible_area_for(&on_laptop), Rect::new(0.0, 70.0, 1440.0, 805.0));

        let on_external = Rect::new(1420.0, 400.0, 60.0, 60.0);
        assert_eq!(
            set.visible_area_for(&on_external),
            Rect::new(1440.0, 0.0, 2560.0, 1415.0)
        );
    }

    #[test]
    fn test_off_screen_frame_falls_back_to_primary() {
        let set = dual();
        let below_external = Rect::new(3000.0, -500.0, 60.0, 60.0);
        assert_eq!(set.screen_for(&below_external).unwrap().name, "laptop");

        let no_primary = ScreenSet::new(
            set.screens()
                .iter()
                .cloned()
                .map(|s| Screen { primary: false, ..s })
                .collect(),
        );
        assert_eq!(no_primary.screen_for(&below_external).unwrap().name, "laptop");
    }

    #[test]
    fn test_empty_set_gives_zero_area() {
        let set = ScreenSet::default();
        assert_eq!(set.visible_area_for(&Rect::new(0.0, 0.0, 60.0, 60.0)), Rect::default());
    }
}
