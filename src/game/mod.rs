//! Game Simulation Module
//!
//! The platform-jumper core: generation, physics, collision, camera and
//! session lifecycle. Nothing in here touches the window, GPU or audio
//! device, so all of it runs headless under `cargo test`.
//!
//! Key concepts:
//! - Entity: Generational id for platforms (coins point back by id)
//! - Body: Shared position/size/render hints embedded in every object
//! - World: Explicit simulation context passed into every update
//! - Event: Outgoing notifications (jumps, coins, death) for the frontend
//! - Session: Owns the World and player, runs the per-frame step

pub mod entity;
pub mod body;
pub mod event;
pub mod platform;
pub mod generator;
pub mod player;
pub mod world;
pub mod session;
pub mod drawable;

pub use event::GameEvent;
pub use session::{Phase, Session};
pub use drawable::{Drawable, SpriteId};

/// Horizontal input for one frame, as seen by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
}
