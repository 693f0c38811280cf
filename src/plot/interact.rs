//! Pointer interaction state machine
//!
//! Disambiguates click from drag, pans against the press-time viewport
//! snapshot, and zooms around the cursor. A pick (glyph hit) is
//! delivered just before the press of the same gesture and suppresses
//! it, so clicking a coin never also starts a pan.

use tracing::debug;

use crate::plot::viewport::{ScrollDirection, Viewport, DEFAULT_ZOOM_STEP};

/// Pointer button as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
    Other,
}

/// One input event, with positions already resolved to data space.
///
/// A position of `None` means the cursor was outside the drawable
/// area; such events are dropped without effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// A glyph half was hit; arrives before the press of the gesture
    Pick { row: usize },
    Press {
        button: Button,
        pos: Option<(f64, f64)>,
    },
    Motion { pos: Option<(f64, f64)> },
    Release,
    Scroll {
        direction: ScrollDirection,
        pos: Option<(f64, f64)>,
    },
}

/// What the caller should do after an event
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Outcome {
    /// The viewport changed and the scene needs a redraw
    pub repaint: bool,
    /// A row was picked and should be shown to the user
    pub inspect: Option<usize>,
}

/// Press-time context a drag is measured against. Motion pans relative
/// to this snapshot, never the live viewport, so repeated motion events
/// within one drag are idempotent rather than cumulative.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    origin: (f64, f64),
    snapshot: Viewport,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Phase {
    #[default]
    Idle,
    /// Pressed but not yet moved
    PendingDrag(DragState),
    Dragging(DragState),
}

/// Consumes pointer events and drives the viewport
#[derive(Debug)]
pub struct InteractionController {
    phase: Phase,
    /// Set by a pick; the very next primary press is dropped entirely
    suppressed_once: bool,
    zoom_step: f64,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM_STEP)
    }
}

impl InteractionController {
    pub fn new(zoom_step: f64) -> Self {
        Self {
            phase: Phase::Idle,
            suppressed_once: false,
            zoom_step,
        }
    }

    /// Handle one event, mutating the viewport as needed.
    pub fn handle_event(&mut self, event: PointerEvent, viewport: &mut Viewport) -> Outcome {
        match event {
            PointerEvent::Pick { row } => {
                self.suppressed_once = true;
                debug!("Picked row {}, suppressing next press", row);
                Outcome {
                    repaint: false,
                    inspect: Some(row),
                }
            }

            PointerEvent::Press { button, pos } => {
                if button != Button::Primary {
                    return Outcome::default();
                }
                if self.suppressed_once {
                    // The toolkit delivers a press for the same gesture
                    // that just picked; drop it so the click doesn't
                    // also start a pan.
                    self.suppressed_once = false;
                    debug!("Press suppressed after pick");
                    return Outcome::default();
                }
                if let Some(origin) = pos {
                    self.phase = Phase::PendingDrag(DragState {
                        origin,
                        snapshot: *viewport,
                    });
                }
                Outcome::default()
            }

            PointerEvent::Motion { pos } => {
                let drag = match self.phase {
                    Phase::PendingDrag(drag) | Phase::Dragging(drag) => drag,
                    Phase::Idle => return Outcome::default(),
                };
                let Some((x, y)) = pos else {
                    return Outcome::default();
                };

                self.phase = Phase::Dragging(drag);
                let dx = x - drag.origin.0;
                let dy = y - drag.origin.1;
                *viewport = drag.snapshot;
                viewport.pan_by(-dx, -dy);
                Outcome {
                    repaint: true,
                    inspect: None,
                }
            }

            PointerEvent::Release => {
                if !matches!(self.phase, Phase::Idle) {
                    debug!("Drag ended");
                }
                self.phase = Phase::Idle;
                Outcome::default()
            }

            PointerEvent::Scroll { direction, pos } => {
                let Some((x, y)) = pos else {
                    return Outcome::default();
                };
                let factor = direction.zoom_factor(self.zoom_step);
                if factor == 1.0 {
                    return Outcome::default();
                }
                viewport.zoom_around(x, y, factor);
                Outcome {
                    repaint: true,
                    inspect: None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            x_min: 0.0,
            x_max: 10.0,
            y_min: 0.0,
            y_max: 10.0,
        }
    }

    fn press_at(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Press {
            button: Button::Primary,
            pos: Some((x, y)),
        }
    }

    fn motion_to(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Motion { pos: Some((x, y)) }
    }

    #[test]
    fn test_drag_shifts_against_snapshot() {
        let mut vp = viewport();
        let mut ctl = InteractionController::default();

        ctl.handle_event(press_at(2.0, 2.0), &mut vp);
        let out = ctl.handle_event(motion_to(3.0, 4.0), &mut vp);

        assert!(out.repaint);
        assert_eq!((vp.x_min, vp.x_max), (-1.0, 9.0));
        assert_eq!((vp.y_min, vp.y_max), (-2.0, 8.0));
    }

    #[test]
    fn test_drag_is_not_cumulative() {
        let mut vp = viewport();
        let mut ctl = InteractionController::default();

        ctl.handle_event(press_at(2.0, 2.0), &mut vp);
        // Many intermediate motions; only the last one determines the
        // net translation from the press-time snapshot.
        for i in 0..10 {
            ctl.handle_event(motion_to(2.0 + i as f64 * 0.1, 2.0), &mut vp);
        }
        ctl.handle_event(motion_to(3.0, 4.0), &mut vp);

        assert_eq!((vp.x_min, vp.x_max), (-1.0, 9.0));
        assert_eq!((vp.y_min, vp.y_max), (-2.0, 8.0));
    }

    #[test]
    fn test_pick_suppresses_next_press() {
        let mut vp = viewport();
        let mut ctl = InteractionController::default();

        let out = ctl.handle_event(PointerEvent::Pick { row: 0 }, &mut vp);
        assert_eq!(out.inspect, Some(0));

        // The press and motion of the picking gesture must not pan
        ctl.handle_event(press_at(5.0, 5.0), &mut vp);
        ctl.handle_event(motion_to(6.0, 6.0), &mut vp);
        assert_eq!(vp, viewport());

        // The suppression is consumed; the next gesture drags again
        ctl.handle_event(press_at(5.0, 5.0), &mut vp);
        ctl.handle_event(motion_to(6.0, 6.0), &mut vp);
        assert_ne!(vp, viewport());
    }

    #[test]
    fn test_release_ends_drag() {
        let mut vp = viewport();
        let mut ctl = InteractionController::default();

        ctl.handle_event(press_at(2.0, 2.0), &mut vp);
        ctl.handle_event(motion_to(3.0, 3.0), &mut vp);
        ctl.handle_event(PointerEvent::Release, &mut vp);

        let after_release = vp;
        let out = ctl.handle_event(motion_to(8.0, 8.0), &mut vp);
        assert!(!out.repaint);
        assert_eq!(vp, after_release);
    }

    #[test]
    fn test_secondary_press_ignored() {
        let mut vp = viewport();
        let mut ctl = InteractionController::default();

        ctl.handle_event(
            PointerEvent::Press {
                button: Button::Secondary,
                pos: Some((2.0, 2.0)),
            },
            &mut vp,
        );
        ctl.handle_event(motion_to(3.0, 3.0), &mut vp);
        assert_eq!(vp, viewport());
    }

    #[test]
    fn test_out_of_bounds_events_dropped() {
        let mut vp = viewport();
        let mut ctl = InteractionController::default();

        ctl.handle_event(
            PointerEvent::Press {
                button: Button::Primary,
                pos: None,
            },
            &mut vp,
        );
        ctl.handle_event(motion_to(3.0, 3.0), &mut vp);
        assert_eq!(vp, viewport());

        let out = ctl.handle_event(
            PointerEvent::Scroll {
                direction: ScrollDirection::Up,
                pos: None,
            },
            &mut vp,
        );
        assert!(!out.repaint);
        assert_eq!(vp, viewport());
    }

    #[test]
    fn test_motion_outside_keeps_drag_alive() {
        let mut vp = viewport();
        let mut ctl = InteractionController::default();

        ctl.handle_event(press_at(2.0, 2.0), &mut vp);
        ctl.handle_event(PointerEvent::Motion { pos: None }, &mut vp);
        assert_eq!(vp, viewport());

        // Back inside, the drag resumes from the original snapshot
        ctl.handle_event(motion_to(3.0, 4.0), &mut vp);
        assert_eq!((vp.x_min, vp.y_min), (-1.0, -2.0));
    }

    #[test]
    fn test_scroll_zooms_around_cursor() {
        let mut vp = viewport();
        let mut ctl = InteractionController::default();

        let out = ctl.handle_event(
            PointerEvent::Scroll {
                direction: ScrollDirection::Up,
                pos: Some((5.0, 5.0)),
            },
            &mut vp,
        );
        assert!(out.repaint);
        assert!((vp.x_min - 0.8333).abs() < 1e-3);
        assert!((vp.x_max - 9.1667).abs() < 1e-3);
    }

    #[test]
    fn test_other_scroll_direction_ignored() {
        let mut vp = viewport();
        let mut ctl = InteractionController::default();

        let out = ctl.handle_event(
            PointerEvent::Scroll {
                direction: ScrollDirection::Other,
                pos: Some((5.0, 5.0)),
            },
            &mut vp,
        );
        assert!(!out.repaint);
        assert_eq!(vp, viewport());
    }
}
