//! Simulation context
//!
//! The World is everything a step mutates besides the player itself:
//! - The active platform set (in creation order) and their entity ids
//! - Camera height, best height, coin count
//! - The title-screen flag
//! - The outgoing event queue
//!
//! It is passed explicitly into every update call and reset in place when a
//! new run begins.

use tracing::debug;

use super::entity::{Entity, EntityAllocator};
use super::event::{EventQueue, GameEvent};
use super::platform::{Platform, PlatformSpec};

pub struct World {
    entities: EntityAllocator,

    /// Live platforms, oldest first
    pub platforms: Vec<Platform>,

    /// Scroll offset: world y drawn at the bottom of the screen
    pub camera_height: f32,

    /// Highest camera height reached this run (drives the score)
    pub max_height: f32,

    pub coins: u32,

    /// Platforms below `camera_height - keep_alive_height` are pruned
    pub keep_alive_height: f32,

    /// Title screen up: the player hangs in place and bounces do nothing
    pub show_title: bool,

    pub events: EventQueue<GameEvent>,
}

impl World {
    pub fn new(keep_alive_height: f32) -> Self {
        Self {
            entities: EntityAllocator::new(),
            platforms: Vec::new(),
            camera_height: 0.0,
            max_height: 0.0,
            coins: 0,
            keep_alive_height,
            show_title: true,
            events: EventQueue::new(),
        }
    }

    /// Wipe all run state. Pending events are kept so the frontend still
    /// sees whatever happened in the step that triggered the reset.
    pub fn reset(&mut self) {
        self.clear_platforms();
        self.camera_height = 0.0;
        self.max_height = 0.0;
        self.coins = 0;
        self.show_title = true;
    }

    // =========================================================================
    // Platforms
    // =========================================================================

    pub fn spawn_platform(&mut self, spec: PlatformSpec) -> Entity {
        let id = self.entities.allocate();
        self.platforms.push(Platform::new(id, spec));
        id
    }

    /// Remove a platform (and its coin) by id.
    pub fn despawn_platform(&mut self, id: Entity) -> Option<Platform> {
        if !self.entities.free(id) {
            return None;
        }
        let index = self.platforms.iter().position(|p| p.id == id)?;
        Some(self.platforms.remove(index))
    }

    pub fn is_alive(&self, id: Entity) -> bool {
        self.entities.is_alive(id)
    }

    pub fn platform(&self, id: Entity) -> Option<&Platform> {
        if !self.is_alive(id) {
            return None;
        }
        self.platforms.iter().find(|p| p.id == id)
    }

    /// Drop every platform whose bottom is below the keep-alive window.
    /// Returns how many were removed.
    pub fn prune_platforms(&mut self) -> usize {
        let floor = self.camera_height - self.keep_alive_height;
        let before = self.platforms.len();
        let entities = &mut self.entities;
        self.platforms.retain(|p| {
            let keep = p.body.y >= floor;
            if !keep {
                entities.free(p.id);
            }
            keep
        });
        let removed = before - self.platforms.len();
        if removed > 0 {
            debug!(removed, floor, "pruned platforms");
        }
        removed
    }

    pub fn clear_platforms(&mut self) {
        self.platforms.clear();
        self.entities.clear();
    }

    /// Height of the topmost platform
    pub fn frontier(&self) -> Option<f32> {
        self.platforms.iter().map(|p| p.body.y).reduce(f32::max)
    }

    /// Height of the lowest platform
    pub fn lowest(&self) -> Option<f32> {
        self.platforms.iter().map(|p| p.body.y).reduce(f32::min)
    }

    pub fn platform_count(&self) -> u32 {
        self.entities.alive_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::platform::PlatformSkin;

    fn at(y: f32) -> PlatformSpec {
        PlatformSpec::fixed(0.2, y, 0.2, 0.035, PlatformSkin::Brown)
    }

    #[test]
    fn test_spawn_and_despawn() {
        let mut world = World::new(2.5);
        let a = world.spawn_platform(at(0.0));
        let b = world.spawn_platform(at(1.0));
        assert_eq!(world.platform_count(), 2);

        let removed = world.despawn_platform(a).unwrap();
        assert_eq!(removed.id, a);
        assert!(world.despawn_platform(a).is_none());
        assert!(world.platform(a).is_none());
        assert!(world.platform(b).is_some());
        assert_eq!(world.platform_count(), 1);
    }

    #[test]
    fn test_prune_removes_exactly_platforms_below_window() {
        let mut world = World::new(2.5);
        for y in [0.0, 1.0, 2.4, 2.5, 2.6, 4.0, 7.0] {
            world.spawn_platform(at(y));
        }
        world.camera_height = 5.0;

        let removed = world.prune_platforms();
        assert_eq!(removed, 3);
        let left: Vec<f32> = world.platforms.iter().map(|p| p.body.y).collect();
        assert_eq!(left, vec![2.5, 2.6, 4.0, 7.0]);
        assert_eq!(world.platform_count(), 4);
    }

    #[test]
    fn test_frontier_and_lowest() {
        let mut world = World::new(2.5);
        assert!(world.frontier().is_none());
        world.spawn_platform(at(1.0));
        world.spawn_platform(at(3.0));
        world.spawn_platform(at(2.0));
        assert_eq!(world.frontier(), Some(3.0));
        assert_eq!(world.lowest(), Some(1.0));
    }

    #[test]
    fn test_reset() {
        let mut world = World::new(2.5);
        let id = world.spawn_platform(at(1.0));
        world.camera_height = 4.0;
        world.max_height = 4.5;
        world.coins = 3;
        world.show_title = false;
        world.events.send(GameEvent::RunEnded);

        world.reset();
        assert!(world.platforms.is_empty());
        assert!(!world.is_alive(id));
        assert_eq!(world.camera_height, 0.0);
        assert_eq!(world.max_height, 0.0);
        assert_eq!(world.coins, 0);
        assert!(world.show_title);
        assert_eq!(world.events.len(), 1);
    }
}
