// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input events and their translation into viewport operations.

use kurbo::{Point, Size};
use seatmap_view2d::{InputProfile, ViewportController};
use smallvec::SmallVec;

use crate::settings::EngineConfig;

/// Active touch points in surface pixels.
pub type Touches = SmallVec<[Point; 2]>;

/// A raw input event from the rendering surface. Positions are in pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Mouse wheel step. Positive `delta_y` scrolls away from the user.
    Wheel {
        /// Vertical scroll delta; only its sign is used.
        delta_y: f64,
        /// Pointer position.
        position: Point,
    },
    /// Primary button pressed.
    PointerDown {
        /// Pointer position.
        position: Point,
    },
    /// Pointer moved.
    PointerMove {
        /// Pointer position.
        position: Point,
    },
    /// Primary button released.
    PointerUp,
    /// Pointer left the surface.
    PointerLeave,
    /// One or more fingers touched down; `touches` lists every active touch.
    TouchStart {
        /// Active touches.
        touches: Touches,
    },
    /// Active touches moved.
    TouchMove {
        /// Active touches.
        touches: Touches,
    },
    /// One or more fingers lifted; `touches` lists the ones still down.
    TouchEnd {
        /// Remaining touches.
        touches: Touches,
    },
    /// The platform cancelled the touch sequence.
    TouchCancel,
    /// The rendering surface changed size.
    Resize {
        /// New size in pixels.
        size: Size,
    },
}

/// Translates [`InputEvent`]s into [`ViewportController`] calls.
///
/// One touch pans and two touches pinch. Whenever the number of touches
/// changes the current gesture is dropped and a new one starts from the
/// current positions, so lifting a finger mid-pinch never jumps the window.
/// Three or more touches are ignored until the count drops again.
#[derive(Clone, Debug)]
pub struct GestureRouter {
    wheel_zoom_out: f64,
    wheel_zoom_in: f64,
    touch_count: usize,
    profile: InputProfile,
}

impl Default for GestureRouter {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl GestureRouter {
    /// Creates a router with the given wheel zoom factors.
    #[must_use]
    pub fn new(wheel_zoom_out: f64, wheel_zoom_in: f64) -> Self {
        Self {
            wheel_zoom_out,
            wheel_zoom_in,
            touch_count: 0,
            profile: InputProfile::Pointer,
        }
    }

    /// Creates a router from the wheel factors in `config`.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.wheel_zoom_out, config.wheel_zoom_in)
    }

    /// Input profile of the most recent event.
    #[must_use]
    pub fn profile(&self) -> InputProfile {
        self.profile
    }

    /// Applies `event` to `view`. Returns `true` if the window changed.
    pub fn apply(&mut self, view: &mut ViewportController, event: &InputEvent) -> bool {
        match event {
            InputEvent::Wheel { delta_y, position } => {
                self.profile = InputProfile::Pointer;
                let factor = if *delta_y > 0.0 {
                    self.wheel_zoom_out
                } else if *delta_y < 0.0 {
                    self.wheel_zoom_in
                } else {
                    return false;
                };
                let changed = view.zoom_at_view_point(factor, *position);
                if !changed {
                    tracing::trace!(factor, width = view.window().width(), "wheel zoom rejected");
                }
                changed
            }
            InputEvent::PointerDown { position } => {
                self.profile = InputProfile::Pointer;
                view.cancel_gesture();
                if !view.begin_pan(*position) {
                    tracing::trace!(?position, "pan start rejected");
                }
                false
            }
            InputEvent::PointerMove { position } => view.continue_pan(*position),
            InputEvent::PointerUp => {
                view.end_pan();
                false
            }
            InputEvent::PointerLeave => {
                view.cancel_gesture();
                false
            }
            InputEvent::TouchStart { touches } | InputEvent::TouchEnd { touches } => {
                self.profile = InputProfile::Touch;
                self.restart_touch(view, touches);
                false
            }
            InputEvent::TouchMove { touches } => {
                self.profile = InputProfile::Touch;
                if touches.len() != self.touch_count {
                    self.restart_touch(view, touches);
                    return false;
                }
                match touches.as_slice() {
                    [one] => view.continue_pan(*one),
                    [a, b] => {
                        let origin = view.view_ratio(a.midpoint(*b));
                        let changed = view.continue_pinch(a.distance(*b), origin);
                        if !changed {
                            tracing::trace!(distance = a.distance(*b), "pinch step rejected");
                        }
                        changed
                    }
                    _ => false,
                }
            }
            InputEvent::TouchCancel => {
                self.touch_count = 0;
                view.cancel_gesture();
                false
            }
            InputEvent::Resize { size } => {
                view.set_surface_size(*size);
                false
            }
        }
    }

    fn restart_touch(&mut self, view: &mut ViewportController, touches: &[Point]) {
        view.cancel_gesture();
        self.touch_count = touches.len();
        let started = match touches {
            [] => true,
            [one] => view.begin_pan(*one),
            [a, b] => view.begin_pinch(a.distance(*b)),
            _ => true,
        };
        if !started {
            tracing::trace!(touches = touches.len(), "touch gesture start rejected");
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};
    use seatmap_view2d::{InputProfile, ViewportController};

    use super::{GestureRouter, InputEvent, Touches};

    fn setup() -> (GestureRouter, ViewportController) {
        let view = ViewportController::new(Size::new(1400.0, 2600.0), Size::new(700.0, 1300.0));
        (GestureRouter::default(), view)
    }

    fn pts(points: &[(f64, f64)]) -> Touches {
        points.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn wheel(delta_y: f64, x: f64, y: f64) -> InputEvent {
        InputEvent::Wheel {
            delta_y,
            position: Point::new(x, y),
        }
    }

    fn down(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerDown {
            position: Point::new(x, y),
        }
    }

    fn moved(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerMove {
            position: Point::new(x, y),
        }
    }

    #[test]
    fn wheel_sign_picks_factor() {
        let (mut router, mut view) = setup();
        assert!(router.apply(&mut view, &wheel(-3.0, 350.0, 650.0)));
        assert!((view.window().width() - 1260.0).abs() < 1e-9);
        assert!(router.apply(&mut view, &wheel(3.0, 350.0, 650.0)));
        assert!((view.window().width() - 1386.0).abs() < 1e-9);
        let before = view.window();
        assert!(!router.apply(&mut view, &wheel(0.0, 350.0, 650.0)));
        assert_eq!(view.window(), before);
    }

    #[test]
    fn wheel_zoom_keeps_pointer_point_fixed() {
        let (mut router, mut view) = setup();
        let pointer = Point::new(140.0, 1040.0);
        let world_before = view.view_to_world_point(pointer).unwrap();
        router.apply(&mut view, &wheel(-1.0, pointer.x, pointer.y));
        let world_after = view.view_to_world_point(pointer).unwrap();
        assert!((world_before - world_after).hypot() < 1e-9);
    }

    #[test]
    fn pointer_drag_and_leave() {
        let (mut router, mut view) = setup();
        router.apply(&mut view, &down(100.0, 100.0));
        assert!(router.apply(&mut view, &moved(110.0, 100.0)));
        assert_eq!(view.window().x0, -20.0);
        router.apply(&mut view, &InputEvent::PointerLeave);
        assert!(!view.is_gesture_active());
        let before = view.window();
        assert!(!router.apply(&mut view, &moved(400.0, 400.0)));
        assert_eq!(view.window(), before);
    }

    #[test]
    fn pointer_move_without_down_is_ignored() {
        let (mut router, mut view) = setup();
        assert!(!router.apply(&mut view, &moved(5.0, 5.0)));
        assert_eq!(view.window(), Rect::new(0.0, 0.0, 1400.0, 2600.0));
    }

    #[test]
    fn two_finger_spread_zooms_in() {
        let (mut router, mut view) = setup();
        let start = InputEvent::TouchStart {
            touches: pts(&[(300.0, 650.0), (400.0, 650.0)]),
        };
        router.apply(&mut view, &start);
        assert!(view.is_pinching());
        assert_eq!(router.profile(), InputProfile::Touch);
        let spread = InputEvent::TouchMove {
            touches: pts(&[(275.0, 650.0), (425.0, 650.0)]),
        };
        assert!(router.apply(&mut view, &spread));
        // raw = 100 / 150, damped = 1 + (raw - 1) * 0.8
        let expected = 1400.0 * (1.0 + (100.0 / 150.0 - 1.0) * 0.8);
        assert!((view.window().width() - expected).abs() < 1e-9);
    }

    #[test]
    fn lifting_a_finger_restarts_as_pan() {
        let (mut router, mut view) = setup();
        let start = InputEvent::TouchStart {
            touches: pts(&[(300.0, 650.0), (400.0, 650.0)]),
        };
        router.apply(&mut view, &start);
        let lift = InputEvent::TouchEnd {
            touches: pts(&[(400.0, 650.0)]),
        };
        router.apply(&mut view, &lift);
        assert!(view.is_panning());
        assert!(!view.is_pinching());

        let before = view.window();
        let drag = InputEvent::TouchMove {
            touches: pts(&[(410.0, 650.0)]),
        };
        assert!(router.apply(&mut view, &drag));
        assert_eq!(view.window().x0, before.x0 - 20.0);

        let all_up = InputEvent::TouchEnd { touches: pts(&[]) };
        router.apply(&mut view, &all_up);
        assert!(!view.is_gesture_active());
    }

    #[test]
    fn touch_cancel_resets() {
        let (mut router, mut view) = setup();
        let start = InputEvent::TouchStart {
            touches: pts(&[(1.0, 1.0)]),
        };
        router.apply(&mut view, &start);
        router.apply(&mut view, &InputEvent::TouchCancel);
        assert!(!view.is_gesture_active());
    }

    #[test]
    fn resize_changes_pan_ratio() {
        let (mut router, mut view) = setup();
        let resize = InputEvent::Resize {
            size: Size::new(1400.0, 2600.0),
        };
        router.apply(&mut view, &resize);
        router.apply(&mut view, &down(0.0, 0.0));
        router.apply(&mut view, &moved(10.0, 0.0));
        assert_eq!(view.window().x0, -10.0);
        assert_eq!(router.profile(), InputProfile::Pointer);
    }
}
