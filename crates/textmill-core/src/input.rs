//! Pointer input state shared between frames.
//!
//! The shell translates toolkit events into [`PointerEvent`]s once per frame;
//! the rest of the app queries [`InputState`] instead of the toolkit.

use std::collections::HashSet;
use std::time::Instant;

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event fed in by the shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
}

const DOUBLE_CLICK_TIME_MS: u128 = 500;
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Pointer state accumulated over the current frame.
#[derive(Debug, Clone)]
pub struct InputState {
    pub pointer_position: Point,
    pressed_buttons: HashSet<MouseButton>,
    just_pressed_buttons: HashSet<MouseButton>,
    just_released_buttons: HashSet<MouseButton>,
    last_press_time: Option<Instant>,
    last_press_position: Option<Point>,
    double_click: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            pointer_position: Point::ZERO,
            pressed_buttons: HashSet::new(),
            just_pressed_buttons: HashSet::new(),
            just_released_buttons: HashSet::new(),
            last_press_time: None,
            last_press_position: None,
            double_click: false,
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the per-frame sets. Call before feeding this frame's events.
    pub fn begin_frame(&mut self) {
        self.just_pressed_buttons.clear();
        self.just_released_buttons.clear();
        self.double_click = false;
    }

    pub fn handle_event(&mut self, event: &PointerEvent) {
        match event {
            PointerEvent::Down { position, button } => {
                self.pointer_position = *position;
                self.pressed_buttons.insert(*button);
                self.just_pressed_buttons.insert(*button);
                if *button == MouseButton::Left {
                    self.detect_double_click(*position, Instant::now());
                }
            }
            PointerEvent::Up { position, button } => {
                self.pointer_position = *position;
                self.pressed_buttons.remove(button);
                self.just_released_buttons.insert(*button);
            }
            PointerEvent::Move { position } => {
                self.pointer_position = *position;
            }
        }
    }

    fn detect_double_click(&mut self, position: Point, now: Instant) {
        if let (Some(last_time), Some(last_position)) =
            (self.last_press_time, self.last_press_position)
        {
            let close_in_time = now.duration_since(last_time).as_millis() <= DOUBLE_CLICK_TIME_MS;
            let close_in_space = position.distance(last_position) <= DOUBLE_CLICK_DISTANCE;
            if close_in_time && close_in_space {
                self.double_click = true;
                // A triple click should not read as two doubles.
                self.last_press_time = None;
                self.last_press_position = None;
                return;
            }
        }
        self.last_press_time = Some(now);
        self.last_press_position = Some(position);
    }

    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    pub fn just_pressed(&self, button: MouseButton) -> bool {
        self.just_pressed_buttons.contains(&button)
    }

    pub fn just_released(&self, button: MouseButton) -> bool {
        self.just_released_buttons.contains(&button)
    }

    /// Whether a left double-click landed this frame.
    pub fn double_clicked(&self) -> bool {
        self.double_click
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(state: &mut InputState, x: f64, y: f64) {
        state.handle_event(&PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        });
        state.handle_event(&PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        });
    }

    #[test]
    fn press_and_release_tracking() {
        let mut state = InputState::new();
        state.begin_frame();
        state.handle_event(&PointerEvent::Down {
            position: Point::new(10.0, 20.0),
            button: MouseButton::Left,
        });
        assert!(state.is_pressed(MouseButton::Left));
        assert!(state.just_pressed(MouseButton::Left));
        assert!(!state.is_pressed(MouseButton::Right));

        state.begin_frame();
        assert!(!state.just_pressed(MouseButton::Left));
        state.handle_event(&PointerEvent::Up {
            position: Point::new(10.0, 20.0),
            button: MouseButton::Left,
        });
        assert!(!state.is_pressed(MouseButton::Left));
        assert!(state.just_released(MouseButton::Left));
    }

    #[test]
    fn two_quick_presses_make_a_double_click() {
        let mut state = InputState::new();
        state.begin_frame();
        press(&mut state, 100.0, 100.0);
        assert!(!state.double_clicked());
        press(&mut state, 102.0, 101.0);
        assert!(state.double_clicked());
    }

    #[test]
    fn distant_presses_do_not_double_click() {
        let mut state = InputState::new();
        state.begin_frame();
        press(&mut state, 100.0, 100.0);
        press(&mut state, 160.0, 100.0);
        assert!(!state.double_clicked());
    }

    #[test]
    fn third_press_does_not_chain_another_double() {
        let mut state = InputState::new();
        state.begin_frame();
        press(&mut state, 100.0, 100.0);
        press(&mut state, 100.0, 100.0);
        assert!(state.double_clicked());
        state.begin_frame();
        press(&mut state, 100.0, 100.0);
        assert!(!state.double_clicked());
    }

    #[test]
    fn double_click_clears_at_frame_boundary() {
        let mut state = InputState::new();
        state.begin_frame();
        press(&mut state, 100.0, 100.0);
        press(&mut state, 100.0, 100.0);
        assert!(state.double_clicked());
        state.begin_frame();
        assert!(!state.double_clicked());
    }
}
