//! Platform window collaborator.
//!
//! The geometry core never talks to a window system directly. It asks a
//! [`WindowHost`] to move, show and hide the two windows it manages.

use serde::{Deserialize, Serialize};

use crate::types::Rect;

/// The windows the app manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowRole {
    /// The draggable anchor
    Bubble,
    /// The companion panel
    Panel,
}

/// Window operations the platform layer must provide
pub trait WindowHost {
    /// Set a window's frame, optionally animated
    fn set_frame(&mut self, window: WindowRole, frame: Rect, animate: bool);

    /// Order the window in and bring it to the front
    fn show(&mut self, window: WindowRole);

    /// Order the window out
    fn hide(&mut self, window: WindowRole);

    /// Raise an already visible window (e.g., after a space change)
    fn order_front(&mut self, window: WindowRole);
}

/// A single recorded host call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum HostCommand {
    SetFrame {
        window: WindowRole,
        frame: Rect,
        animate: bool,
    },
    Show {
        window: WindowRole,
    },
    Hide {
        window: WindowRole,
    },
    OrderFront {
        window: WindowRole,
    },
}

/// Host that records every call; used for headless replay and tests
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    pub commands: Vec<HostCommand>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last frame set for `window`, if any
    pub fn last_frame(&self, window: WindowRole) -> Option<Rect> {
        self.commands.iter().rev().find_map(|c| match c {
            HostCommand::SetFrame { window: w, frame, .. } if *w == window => Some(*frame),
            _ => None,
        })
    }

    /// Whether `window` is currently ordered in
    pub fn is_shown(&self, window: WindowRole) -> bool {
        self.commands
            .iter()
            .rev()
            .find_map(|c| match c {
                HostCommand::Show { window: w } if *w == window => Some(true),
                HostCommand::Hide { window: w } if *w == window => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl WindowHost for RecordingHost {
    fn set_frame(&mut self, window: WindowRole, frame: Rect, animate: bool) {
        self.commands.push(HostCommand::SetFrame {
            window,
            frame,
            animate,
        });
    }

    fn show(&mut self, window: WindowRole) {
        self.commands.push(HostCommand::Show { window });
    }

    fn hide(&mut self, window: WindowRole) {
        self.commands.push(HostCommand::Hide { window });
    }

    fn order_front(&mut self, window: WindowRole) {
        self.commands.push(HostCommand::OrderFront { window });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_host_tracks_visibility() {
        let mut host = RecordingHost::new();
        assert!(!host.is_shown(WindowRole::Panel));

        host.show(WindowRole::Panel);
        host.show(WindowRole::Bubble);
        assert!(host.is_shown(WindowRole::Panel));

        host.hide(WindowRole::Panel);
        assert!(!host.is_shown(WindowRole::Panel));
        assert!(host.is_shown(WindowRole::Bubble));
    }

    #[test]
    fn test_last_frame_per_window() {
        let mut host = RecordingHost::new();
        host.set_frame(WindowRole::Bubble, Rect::new(0.0, 0.0, 60.0, 60.0), false);
        host.set_frame(WindowRole::Panel, Rect::new(68.0, 0.0, 320.0, 260.0), true);
        host.set_frame(WindowRole::Bubble, Rect::new(10.0, 0.0, 60.0, 60.0), true);

        assert_eq!(
            host.last_frame(WindowRole::Bubble),
            Some(Rect::new(10.0, 0.0, 60.0, 60.0))
        );
        assert_eq!(
            host.last_frame(WindowRole::Panel),
            Some(Rect::new(68.0, 0.0, 320.0, 260.0))
        );
    }

    #[test]
    fn test_host_command_serialization() {
        let cmd = HostCommand::Hide {
            window: WindowRole::Panel,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(json, r#"{"op":"hide","window":"panel"}"#);
    }
}
