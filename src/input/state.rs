//! Input state management
//!
//! Polls keyboard and touch (macroquad) and the gamepad, combining them into
//! the simulation's `Controls`.

use macroquad::prelude::*;

use crate::game::Controls;
use super::Gamepad;

/// Keys for each direction
const LEFT_KEYS: [KeyCode; 2] = [KeyCode::Left, KeyCode::A];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::Right, KeyCode::D];

/// Unified input state for keyboard, touch and gamepad
pub struct InputState {
    gamepad: Gamepad,
}

impl InputState {
    pub fn new() -> Self {
        Self { gamepad: Gamepad::new() }
    }

    /// Call once per frame before reading controls
    pub fn poll(&mut self) {
        self.gamepad.poll();
    }

    /// Directions held this frame, from any source
    pub fn controls(&self) -> Controls {
        let keyboard = Controls {
            left: LEFT_KEYS.iter().any(|&k| is_key_down(k)),
            right: RIGHT_KEYS.iter().any(|&k| is_key_down(k)),
        };

        let held = touches()
            .into_iter()
            .filter(|t| !matches!(t.phase, TouchPhase::Ended | TouchPhase::Cancelled))
            .map(|t| t.position.x);
        let touch = touch_controls(held, screen_width() / 2.0);

        let (pad_left, pad_right) = self.gamepad.horizontal();

        Controls {
            left: keyboard.left || touch.left || pad_left,
            right: keyboard.right || touch.right || pad_right,
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Touches on the left half steer left, the rest steer right.
pub fn touch_controls(xs: impl IntoIterator<Item = f32>, half_width: f32) -> Controls {
    xs.into_iter().fold(Controls::default(), |mut c, x| {
        if x < half_width {
            c.left = true;
        } else {
            c.right = true;
        }
        c
    })
}
