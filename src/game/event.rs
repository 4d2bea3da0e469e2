//! Game events
//!
//! The simulation never talks to audio or any other output directly. It
//! pushes `GameEvent`s while stepping, and the frontend drains the queue once
//! per frame:
//! 1. Player lands on a jumpy platform -> `Jump(SpecialType::Jumpy)`
//! 2. Audio maps it to the power-up sound
//!
//! Anything else that wants to react (particles, haptics) can read the same
//! queue without the simulation knowing about it.

use super::entity::Entity;
use super::platform::SpecialType;

/// A queue for events of a single type.
/// Events are collected during a step and drained by the frontend.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Take every queued event, leaving the queue empty
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Something that happened during a simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A fresh session began (title screen up)
    RunStarted,
    /// The player bounced off a platform of this type
    Jump(SpecialType),
    /// A breakable platform shattered under the player
    PlatformBroken { platform: Entity },
    /// The coin riding on `platform` was picked up
    CoinCollected { platform: Entity },
    /// The player fell below the lowest platform
    Died { score: u32 },
    /// All entities of the run were torn down
    RunEnded,
}
