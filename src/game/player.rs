//! The bouncing player
//!
//! Per tick:
//! 1. Horizontal input moves the player at a constant speed, clamped to the
//!    screen
//! 2. Semi-implicit Euler: position first, then gravity into velocity
//! 3. If falling onto a platform's top band, snap to its top and bounce
//! 4. Drag the camera up behind the player

use tracing::debug;

use crate::config::PlayerConfig;
use super::body::Body;
use super::event::GameEvent;
use super::platform::{Platform, SpecialType};
use super::world::World;
use super::Controls;

/// Z-index for the player sprite (drawn above platforms and coins)
pub const PLAYER_Z_INDEX: i32 = 100;

/// Extra camera slack on top of one jump height
const CAMERA_PADDING: f32 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: Body,
    /// Vertical velocity, positive is up
    pub velocity: f32,
    pub move_speed: f32,
    pub gravity: f32,
    pub jump_power: f32,
    pub jumpy_multiplier: f32,
}

impl Player {
    pub fn new(config: &PlayerConfig) -> Self {
        let body = Body::new(config.start_x, config.start_y, config.width, config.height)
            .with_offset(0.0, config.sprite_offset_y)
            .with_z_index(PLAYER_Z_INDEX);
        Self {
            body,
            velocity: 0.0,
            move_speed: config.move_speed,
            gravity: config.gravity,
            jump_power: config.jump_power,
            jumpy_multiplier: config.jumpy_multiplier,
        }
    }

    /// Apex height of a standard bounce.
    pub fn max_jump_height(&self) -> f32 {
        (self.jump_power * self.jump_power) / (2.0 * -self.gravity)
    }

    /// Rising pose vs falling pose
    pub fn is_rising(&self) -> bool {
        self.velocity > 0.0
    }

    pub fn update(&mut self, dt: f32, controls: Controls, world: &mut World) {
        if controls.left {
            self.body.x -= self.move_speed * dt;
            self.body.mirror_x = true;
        }
        if controls.right {
            self.body.x += self.move_speed * dt;
            self.body.mirror_x = false;
        }

        if world.show_title {
            self.velocity = 0.0;
        }

        // Order matters for feel: move with the old velocity, then accelerate
        self.body.y += self.velocity * dt;
        self.velocity += self.gravity * dt;

        self.body.x = self.body.x.clamp(0.0, 1.0 - self.body.width);

        if let Some(index) = self.landing_platform(&world.platforms) {
            self.body.y = world.platforms[index].body.top();
            self.bounce(index, world);
        }

        world.camera_height = self.track_camera(world.camera_height);
    }

    /// Pick the platform the player is landing on this tick, if any.
    ///
    /// A platform qualifies when the player is not rising, overlaps it
    /// horizontally and has its feet inside the platform's top band. When
    /// several qualify the highest top wins (first in set order on ties), so
    /// the player always ends up resting on the upper surface.
    pub fn landing_platform(&self, platforms: &[Platform]) -> Option<usize> {
        if self.velocity > 0.0 {
            return None;
        }

        let mut best: Option<(usize, f32)> = None;
        for (i, platform) in platforms.iter().enumerate() {
            let p = &platform.body;
            let qualifies = self.body.overlaps_x(p)
                && self.body.y >= p.y
                && self.body.y <= p.top();
            if !qualifies {
                continue;
            }
            match best {
                Some((_, top)) if top >= p.top() => {}
                _ => best = Some((i, p.top())),
            }
        }
        best.map(|(i, _)| i)
    }

    /// React to landing on `platforms[index]`. Does nothing on the title
    /// screen.
    pub fn bounce(&mut self, index: usize, world: &mut World) {
        if world.show_title {
            return;
        }

        let platform = &world.platforms[index];
        let special = platform.special;
        match special {
            SpecialType::None => {
                self.velocity = self.jump_power;
            }
            SpecialType::Breakable => {
                let id = platform.id;
                world.despawn_platform(id);
                world.events.send(GameEvent::PlatformBroken { platform: id });
                debug!(?id, "platform broke");
                self.velocity = self.jump_power;
            }
            SpecialType::Jumpy => {
                self.velocity = self.jump_power * self.jumpy_multiplier;
            }
        }
        world.events.send(GameEvent::Jump(special));
    }

    /// New camera height given the current one.
    ///
    /// The camera keeps one padded jump height of room below the player. It
    /// rises with the player; it only sinks once the player has dropped more
    /// than that padding below where the camera already is.
    pub fn track_camera(&self, camera_height: f32) -> f32 {
        let padding = self.max_jump_height() + CAMERA_PADDING;
        let target = self.body.y - CAMERA_PADDING - padding;

        let mut height = camera_height;
        if target < height - padding {
            height = target + padding;
        }
        height.max(target)
    }
}
