//! promptly - floating prompt bubble geometry.
//!
//! A small square anchor can be dragged anywhere inside a screen's visible
//! area and snaps to the nearest edge when released. A companion panel is
//! attached beside it, on the side facing away from that edge.
//!
//! The crate is windowing-system agnostic: platform code feeds pointer
//! events and display changes in, and receives frame updates through the
//! [`host::WindowHost`] trait.

pub mod anchor;
pub mod app;
pub mod config;
pub mod host;
pub mod placement;
pub mod screen;
pub mod script;
pub mod signal;
pub mod state;
pub mod styles;
pub mod tracing;
pub mod types;

pub use anchor::{AnchorController, AnchorSignal};
pub use app::BubbleApp;
pub use placement::PlacementEngine;
pub use types::{Edge, Point, Rect, Size};
