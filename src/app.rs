//! The bubble application: anchor, companion panel and screens wired together.
//!
//! Pointer events go to the [`AnchorController`]; its outcomes drive the
//! companion panel:
//! - click toggles the panel (placing it first when showing)
//! - drag start hides the panel
//! - drag end only moves the anchor to its snapped frame
//!
//! Every geometry decision queries the current [`ScreenSet`], so display
//! changes are honoured immediately.

use crate::anchor::{AnchorController, MoveOutcome, ReleaseOutcome};
use crate::config::BubbleConfig;
use crate::host::{WindowHost, WindowRole};
use crate::placement::{Placement, PlacementEngine};
use crate::screen::{ScreenSet, VisibleAreaSource};
use crate::state::{PanelState, StateTransition};
use crate::tracing::EventTracer;
use crate::types::{Point, Rect};

/// Where the anchor starts: inset from the right edge, vertically centered
pub fn initial_anchor_frame(config: &BubbleConfig, visible: &Rect) -> Rect {
    let size = config.bubble_size;
    Rect::new(
        visible.max_x() - size - config.start_margin,
        visible.center_y() - size / 2.0,
        size,
        size,
    )
    .clamped_into(visible)
}

/// Bubble, companion panel and displays, driven by platform events
pub struct BubbleApp<H: WindowHost> {
    config: BubbleConfig,
    screens: ScreenSet,
    anchor: AnchorController,
    placement: PlacementEngine,
    panel: PanelState,
    host: H,
    tracer: EventTracer,
}

impl<H: WindowHost> BubbleApp<H> {
    /// Create the anchor on the primary screen and show it
    pub fn new(config: BubbleConfig, screens: ScreenSet, mut host: H) -> Self {
        let visible = screens
            .primary()
            .map(|s| s.visible_frame)
            .unwrap_or_default();
        let frame = initial_anchor_frame(&config, &visible);
        log::info!(
            "Bubble starting at ({:.1},{:.1}) size {:.0}",
            frame.x,
            frame.y,
            frame.width
        );

        host.set_frame(WindowRole::Bubble, frame, false);
        host.show(WindowRole::Bubble);

        Self {
            anchor: AnchorController::new(frame, config.drag_threshold),
            placement: config.placement_engine(),
            tracer: EventTracer::with_capacity(config.trace_capacity),
            panel: PanelState::Uncreated,
            config,
            screens,
            host,
        }
    }

    pub fn config(&self) -> &BubbleConfig {
        &self.config
    }

    pub fn anchor(&self) -> &AnchorController {
        &self.anchor
    }

    /// Mutable access, e.g. to subscribe to anchor signals
    pub fn anchor_mut(&mut self) -> &mut AnchorController {
        &mut self.anchor
    }

    pub fn panel_state(&self) -> PanelState {
        self.panel
    }

    pub fn screens(&self) -> &ScreenSet {
        &self.screens
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn tracer(&self) -> &EventTracer {
        &self.tracer
    }

    /// Visible area of the screen the anchor is on right now
    pub fn visible_area(&self) -> Rect {
        self.screens.visible_area_for(&self.anchor.current_frame())
    }

    fn trace(&mut self, transition: StateTransition) {
        self.tracer.trace_transition(&transition);
    }

    pub fn pointer_down(&mut self, at: Point) {
        if self.anchor.is_dragging() {
            let frame = self.anchor.current_frame();
            self.trace(StateTransition::DragAbandoned { frame });
        }
        self.anchor.on_press(at);
        self.trace(StateTransition::AnchorPressed { at });
    }

    pub fn pointer_dragged(&mut self, at: Point) {
        let visible = self.visible_area();
        match self.anchor.on_move(at, &visible) {
            MoveOutcome::DragStarted { frame } => {
                self.trace(StateTransition::DragStarted { at });
                self.hide_panel();
                self.host.set_frame(WindowRole::Bubble, frame, false);
            }
            MoveOutcome::Moved { frame } => {
                self.host.set_frame(WindowRole::Bubble, frame, false);
            }
            MoveOutcome::BelowThreshold | MoveOutcome::Ignored => {}
        }
    }

    pub fn pointer_up(&mut self, at: Point) {
        let visible = self.visible_area();
        match self.anchor.on_release(at, &visible) {
            ReleaseOutcome::Clicked => {
                self.trace(StateTransition::Clicked);
                self.toggle_panel();
            }
            ReleaseOutcome::Snapped { edge, frame } => {
                self.host.set_frame(WindowRole::Bubble, frame, true);
                self.trace(StateTransition::DragEnded { edge, frame });
            }
            ReleaseOutcome::Ignored => {}
        }
    }

    /// Menu-bar status item behaves like a click on the bubble
    pub fn status_item_clicked(&mut self) {
        self.toggle_panel();
    }

    pub fn toggle_panel(&mut self) {
        if self.panel.is_visible() {
            self.hide_panel();
        } else {
            self.show_panel();
        }
    }

    /// Where the panel would go for the anchor's current frame
    pub fn compute_panel_placement(&self) -> Placement {
        self.placement.place_detailed(
            self.anchor.current_frame(),
            self.config.panel_size,
            self.visible_area(),
        )
    }

    pub fn show_panel(&mut self) {
        let placement = self.compute_panel_placement();
        self.host.set_frame(WindowRole::Panel, placement.frame, true);
        self.host.show(WindowRole::Panel);
        self.panel = PanelState::Shown {
            frame: placement.frame,
            anchor_edge: placement.anchor_edge,
        };
        self.trace(StateTransition::PanelShown {
            frame: placement.frame,
            anchor_edge: placement.anchor_edge,
        });
    }

    pub fn hide_panel(&mut self) {
        if !self.panel.is_visible() {
            return;
        }
        self.host.hide(WindowRole::Panel);
        self.panel = PanelState::Hidden;
        self.trace(StateTransition::PanelHidden);
    }

    /// Display configuration changed: keep the anchor on screen and
    /// re-place a visible panel.
    pub fn screens_changed(&mut self, screens: ScreenSet) {
        self.screens = screens;
        let count = self.screens.len();
        self.trace(StateTransition::ScreensChanged { count });

        let visible = self.visible_area();
        if let Some(from) = self.anchor.reclamp(&visible) {
            let to = self.anchor.current_frame();
            self.host.set_frame(WindowRole::Bubble, to, true);
            self.trace(StateTransition::AnchorReclamped { from, to });
        }

        if self.panel.is_visible() {
            let placement = self.compute_panel_placement();
            self.host.set_frame(WindowRole::Panel, placement.frame, true);
            self.panel = PanelState::Shown {
                frame: placement.frame,
                anchor_edge: placement.anchor_edge,
            };
        }
    }

    /// Keep both windows in front after switching spaces
    pub fn active_space_changed(&mut self) {
        self.host.order_front(WindowRole::Bubble);
        if self.panel.is_visible() {
            self.host.order_front(WindowRole::Panel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostCommand, RecordingHost};
    use crate::types::Edge;

    fn app() -> BubbleApp<RecordingHost> {
        BubbleApp::new(
            BubbleConfig::default(),
            ScreenSet::single(Rect::new(0.0, 0.0, 1440.0, 900.0)),
            RecordingHost::new(),
        )
    }

    fn click(app: &mut BubbleApp<RecordingHost>) {
        let c = app.anchor().current_frame().center();
        app.pointer_down(c);
        app.pointer_up(c);
    }

    #[test]
    fn test_initial_position() {
        let app = app();
        assert_eq!(
            app.anchor().current_frame(),
            Rect::new(1360.0, 420.0, 60.0, 60.0)
        );
        assert!(app.host().is_shown(WindowRole::Bubble));
        assert_eq!(app.panel_state(), PanelState::Uncreated);
    }

    #[test]
    fn test_initial_position_clamped_on_tiny_screen() {
        let visible = Rect::new(0.0, 0.0, 50.0, 100.0);
        let frame = initial_anchor_frame(&BubbleConfig::default(), &visible);
        assert_eq!(frame.max_x(), 50.0);
        assert!(frame.min_y() >= 0.0);
    }

    #[test]
    fn test_click_toggles_panel() {
        let mut app = app();

        click(&mut app);
        match app.panel_state() {
            PanelState::Shown { frame, anchor_edge } => {
                assert_eq!(anchor_edge, Edge::Right);
                assert_eq!(frame, Rect::new(1032.0, 220.0, 320.0, 260.0));
            }
            other => panic!("Expected shown panel, got {:?}", other),
        }
        assert!(app.host().is_shown(WindowRole::Panel));

        click(&mut app);
        assert_eq!(app.panel_state(), PanelState::Hidden);
        assert!(!app.host().is_shown(WindowRole::Panel));
    }

    #[test]
    fn test_drag_hides_panel_and_snaps() {
        let mut app = app();
        click(&mut app);
        assert!(app.panel_state().is_visible());

        app.pointer_down(Point::new(1390.0, 450.0));
        app.pointer_dragged(Point::new(1000.0, 880.0));
        assert_eq!(app.panel_state(), PanelState::Hidden);
        app.pointer_up(Point::new(1000.0, 880.0));

        // Center (1000,870) is nearest the top edge
        assert_eq!(app.anchor().current_frame(), Rect::new(970.0, 840.0, 60.0, 60.0));
        let last = app.host().commands.last().cloned();
        assert_eq!(
            last,
            Some(HostCommand::SetFrame {
                window: WindowRole::Bubble,
                frame: Rect::new(970.0, 840.0, 60.0, 60.0),
                animate: true,
            })
        );
        assert_eq!(
            app.tracer().event_types(),
            vec![
                "anchor_pressed",
                "clicked",
                "panel_shown",
                "anchor_pressed",
                "drag_started",
                "panel_hidden",
                "drag_ended"
            ]
        );
    }

    #[test]
    fn test_status_item_toggles() {
        let mut app = app();
        app.status_item_clicked();
        assert!(app.panel_state().is_visible());
        app.status_item_clicked();
        assert!(!app.panel_state().is_visible());
    }

    #[test]
    fn test_screen_change_reclamps_and_replaces_panel() {
        let mut app = app();
        click(&mut app);

        app.screens_changed(ScreenSet::single(Rect::new(0.0, 0.0, 1280.0, 800.0)));

        assert_eq!(app.anchor().current_frame(), Rect::new(1220.0, 420.0, 60.0, 60.0));
        match app.panel_state() {
            PanelState::Shown { frame, .. } => {
                assert_eq!(frame, Rect::new(892.0, 220.0, 320.0, 260.0));
            }
            other => panic!("Expected shown panel, got {:?}", other),
        }
    }

    #[test]
    fn test_space_change_orders_front() {
        let mut app = app();
        app.active_space_changed();
        assert_eq!(
            app.host().commands.last(),
            Some(&HostCommand::OrderFront {
                window: WindowRole::Bubble
            })
        );

        app.show_panel();
        app.active_space_changed();
        assert_eq!(
            app.host().commands.last(),
            Some(&HostCommand::OrderFront {
                window: WindowRole::Panel
            })
        );
    }

    #[test]
    fn test_hide_when_hidden_is_noop() {
        let mut app = app();
        let before = app.host().commands.len();
        app.hide_panel();
        assert_eq!(app.host().commands.len(), before);
        assert!(app.tracer().is_empty());
    }
}
