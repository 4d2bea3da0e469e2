//! Gamepad support
//!
//! Native: gilrs, first connected pad wins
//! WASM: no gamepad; keyboard and touch only

/// Stick deflection that counts as a held direction
const STICK_THRESHOLD: f32 = 0.5;

/// Horizontal direction from a D-pad pair and a stick x value.
pub fn horizontal(dpad_left: bool, dpad_right: bool, stick_x: f32) -> (bool, bool) {
    (
        dpad_left || stick_x < -STICK_THRESHOLD,
        dpad_right || stick_x > STICK_THRESHOLD,
    )
}

#[cfg(target_arch = "wasm32")]
mod platform {
    pub struct Gamepad;

    impl Gamepad {
        pub fn new() -> Self {
            Self
        }

        pub fn poll(&mut self) {}

        pub fn horizontal(&self) -> (bool, bool) {
            (false, false)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use gilrs::{Axis, Button, Gilrs};
    use tracing::{info, warn};

    pub struct Gamepad {
        /// None when the platform backend failed to start
        gilrs: Option<Gilrs>,
    }

    impl Gamepad {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(gilrs) => Some(gilrs),
                Err(e) => {
                    warn!(error = %e, "gamepad support unavailable");
                    None
                }
            };
            Self { gilrs }
        }

        pub fn poll(&mut self) {
            let Some(gilrs) = self.gilrs.as_mut() else { return };
            while let Some(event) = gilrs.next_event() {
                match event.event {
                    gilrs::EventType::Connected => info!(id = %event.id, "gamepad connected"),
                    gilrs::EventType::Disconnected => info!(id = %event.id, "gamepad disconnected"),
                    _ => {}
                }
            }
        }

        fn active(&self) -> Option<gilrs::Gamepad<'_>> {
            self.gilrs.as_ref()?.gamepads().next().map(|(_, gp)| gp)
        }

        /// (left, right) held on the first connected pad
        pub fn horizontal(&self) -> (bool, bool) {
            let Some(gp) = self.active() else { return (false, false) };
            super::horizontal(
                gp.is_pressed(Button::DPadLeft),
                gp.is_pressed(Button::DPadRight),
                gp.value(Axis::LeftStickX),
            )
        }
    }
}

pub use platform::Gamepad;

impl Default for Gamepad {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stick_threshold() {
        assert_eq!(horizontal(false, false, 0.0), (false, false));
        assert_eq!(horizontal(false, false, 0.4), (false, false));
        assert_eq!(horizontal(false, false, -0.8), (true, false));
        assert_eq!(horizontal(false, false, 0.9), (false, true));
    }

    #[test]
    fn test_dpad_overrides_stick() {
        assert_eq!(horizontal(true, false, 0.9), (true, true));
        assert_eq!(horizontal(false, true, 0.0), (false, true));
    }
}
