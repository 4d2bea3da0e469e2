//! Input handling with gamepad support
//!
//! Keyboard (arrows or A/D), touch (screen halves) and gamepad (D-pad or
//! left stick) all map to the same two held directions.
//!
//! Native: Uses gilrs crate for cross-platform gamepad input
//! WASM: Keyboard and touch only

mod gamepad;
mod state;

pub use gamepad::Gamepad;
pub use state::*;
