//! Procedural platform generation
//!
//! Keeps a gapless strip of platforms above the camera. Every property of a
//! new platform is a draw against a curve over its height `y`, so the climb
//! gets narrower, busier and more treacherous the higher the player goes.
//!
//! The generator holds no state of its own: it reads the frontier from the
//! `World` and appends to it.

use rand::Rng;
use tracing::debug;

use crate::config::{PlayerConfig, WorldConfig};
use super::platform::{PlatformSkin, PlatformSpec, SpecialType};
use super::world::World;

/// Where the starting ledge begins (slightly off-screen left)
pub const BOOTSTRAP_START_X: f32 = -0.1;

/// Curve breakpoints
pub mod curves {
    pub const MIN_WIDTH: f32 = 0.07;
    pub const BASE_WIDTH: f32 = 0.2;
    pub const WIDTH_SHRINK_HEIGHT: f32 = 850.0;
    pub const WIDTH_JITTER: f32 = 0.05;

    /// Platforms start at most this far from the right edge
    pub const X_SPAN: f32 = 1.0 - 0.2;

    /// Vertical gap as a fraction of the max jump height
    pub const GAP_MIN: f32 = 0.2;
    pub const GAP_MAX: f32 = 1.0;

    pub const SKIN_START: f32 = 10.0;
    pub const SKIN_END: f32 = 300.0;

    pub const MOVE_START: f32 = 1.0;
    pub const MOVE_END: f32 = 300.0;
    pub const MOVE_CHANCE_CAP: f32 = 0.9;
    pub const SPEED_MIN: f32 = 0.2;
    pub const SPEED_MAX: f32 = 0.5;
    pub const SPEED_MIX_BASE: f32 = 0.04;
    pub const SPEED_MIX_OFFSET: f32 = 15.0;
    pub const SPEED_MIX_HEIGHT: f32 = 800.0;
    pub const SPEED_MIX_CAP: f32 = 0.8;

    pub const RANGE_MIN: f32 = 0.1;
    pub const RANGE_MAX: f32 = 0.9;

    pub const BREAKABLE_START: f32 = 5.0;
    pub const BREAKABLE_END: f32 = 600.0;
    pub const BREAKABLE_CAP: f32 = 0.9;
}

/// Linear map from 0 at `start` to 1 at `end`. Unclamped; callers clamp.
fn ramp(y: f32, start: f32, end: f32) -> f32 {
    (y - start) / (end - start)
}

pub fn platform_width<R: Rng + ?Sized>(rng: &mut R, y: f32) -> f32 {
    use curves::*;
    (BASE_WIDTH - y / WIDTH_SHRINK_HEIGHT).max(MIN_WIDTH) + rng.gen::<f32>() * WIDTH_JITTER
}

pub fn platform_x<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>() * curves::X_SPAN
}

/// Distance from the current frontier to the next platform.
pub fn platform_gap<R: Rng + ?Sized>(rng: &mut R, max_jump_height: f32) -> f32 {
    use curves::*;
    max_jump_height * GAP_MIN + rng.gen::<f32>() * max_jump_height * (GAP_MAX - GAP_MIN)
}

pub fn platform_skin<R: Rng + ?Sized>(rng: &mut R, y: f32) -> PlatformSkin {
    use curves::*;
    if y < SKIN_START {
        return PlatformSkin::Brown;
    }
    if y > SKIN_END {
        return PlatformSkin::Green;
    }
    if rng.gen::<f32>() < ramp(y, SKIN_START, SKIN_END) {
        PlatformSkin::Green
    } else {
        PlatformSkin::Brown
    }
}

/// Zero for a still platform.
pub fn move_speed<R: Rng + ?Sized>(rng: &mut R, y: f32) -> f32 {
    use curves::*;
    if y < MOVE_START {
        return 0.0;
    }

    let chance = ramp(y, MOVE_START, MOVE_END).min(MOVE_CHANCE_CAP);
    if rng.gen::<f32>() > chance {
        return 0.0;
    }

    let height_mix = ((y - SPEED_MIX_OFFSET) / SPEED_MIX_HEIGHT).min(SPEED_MIX_CAP);
    let mix = SPEED_MIX_BASE + height_mix * (rng.gen::<f32>() * 0.5 + 0.5);
    SPEED_MIN + (SPEED_MAX - SPEED_MIN) * mix
}

pub fn move_range<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    use curves::*;
    rng.gen::<f32>() * (RANGE_MAX - RANGE_MIN) + RANGE_MIN
}

pub fn special_type<R: Rng + ?Sized>(rng: &mut R, y: f32, jumpy_chance: f32) -> SpecialType {
    use curves::*;
    if rng.gen::<f32>() < jumpy_chance {
        return SpecialType::Jumpy;
    }
    if y < BREAKABLE_START {
        return SpecialType::None;
    }
    let chance = ramp(y, BREAKABLE_START, BREAKABLE_END).min(BREAKABLE_CAP);
    if rng.gen::<f32>() < chance {
        SpecialType::Breakable
    } else {
        SpecialType::None
    }
}

/// Roll every property of a platform at height `y`.
pub fn roll_platform<R: Rng + ?Sized>(rng: &mut R, y: f32, world: &WorldConfig) -> PlatformSpec {
    let skin = platform_skin(rng, y);
    let x = platform_x(rng);
    let width = platform_width(rng, y);
    let special = special_type(rng, y, world.jumpy_chance);
    let coin_offset = if rng.gen::<f32>() < world.coin_chance {
        Some(PlatformSpec::coin_offset_for(width, rng.gen::<f32>()))
    } else {
        None
    };

    PlatformSpec {
        x,
        y,
        width,
        height: world.platform_height,
        skin,
        special,
        move_speed: move_speed(rng, y),
        move_range: move_range(rng),
        coin_offset,
    }
}

/// Lay the starting ledge: plain platforms edge to edge along y = 0.
pub fn bootstrap<R: Rng + ?Sized>(rng: &mut R, world: &mut World, config: &WorldConfig) -> usize {
    let mut x = BOOTSTRAP_START_X;
    let mut count = 0;
    while x < 1.0 {
        let width = platform_width(rng, 0.0);
        let skin = platform_skin(rng, 0.0);
        world.spawn_platform(PlatformSpec::fixed(x, 0.0, width, config.platform_height, skin));
        x += width;
        count += 1;
    }
    debug!(count, "laid starting ledge");
    count
}

/// Grow the strip until its frontier is `generation_lookahead` above the
/// camera. Bootstraps first if the world is empty. Returns how many
/// platforms were added.
pub fn extend<R: Rng + ?Sized>(
    rng: &mut R,
    world: &mut World,
    config: &WorldConfig,
    player: &PlayerConfig,
) -> usize {
    let mut added = 0;
    if world.platforms.is_empty() {
        added += bootstrap(rng, world, config);
    }

    let max_jump = player.max_jump_height();
    let target = world.camera_height + config.generation_lookahead;
    while let Some(top) = world.frontier().filter(|&top| top < target) {
        let y = top + platform_gap(rng, max_jump);
        world.spawn_platform(roll_platform(rng, y, config));
        added += 1;
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    fn generated_world(camera: f32) -> World {
        let mut world = World::new(WorldConfig::default().keep_alive_height);
        world.camera_height = camera;
        extend(&mut rng(), &mut world, &WorldConfig::default(), &PlayerConfig::default());
        world
    }

    #[test]
    fn test_bootstrap_covers_screen() {
        let mut world = World::new(2.5);
        let count = bootstrap(&mut rng(), &mut world, &WorldConfig::default());

        assert_eq!(count, world.platforms.len());
        let first = &world.platforms[0].body;
        assert!((first.x - BOOTSTRAP_START_X).abs() < 1e-6);

        for pair in world.platforms.windows(2) {
            // Edge to edge, no gaps
            assert!((pair[0].body.right() - pair[1].body.x).abs() < 1e-5);
        }
        for p in &world.platforms {
            assert_eq!(p.body.y, 0.0);
            assert_eq!(p.special, SpecialType::None);
            assert_eq!(p.skin, PlatformSkin::Brown);
            assert_eq!(p.move_speed, 0.0);
            assert!(p.coin.is_none());
            assert!(p.body.x >= BOOTSTRAP_START_X && p.body.x < 1.0);
        }
        assert!(world.platforms.last().unwrap().body.right() >= 1.0);
    }

    #[test]
    fn test_gaps_are_jumpable() {
        let player = PlayerConfig::default();
        let max_jump = player.max_jump_height();
        let world = generated_world(400.0);

        let above_ledge: Vec<f32> = world
            .platforms
            .iter()
            .map(|p| p.body.y)
            .skip_while(|&y| y == 0.0)
            .collect();
        assert!(above_ledge.len() > 1000);

        let mut prev = 0.0;
        for y in above_ledge {
            let gap = y - prev;
            assert!(gap >= 0.2 * max_jump - 1e-4, "gap {} too small", gap);
            assert!(gap <= max_jump + 1e-4, "gap {} too large", gap);
            prev = y;
        }
    }

    #[test]
    fn test_width_floor_and_horizontal_span() {
        let world = generated_world(900.0);
        for p in &world.platforms {
            assert!(p.body.width >= curves::MIN_WIDTH);
            if p.body.y > 0.0 {
                assert!(p.body.x >= 0.0 && p.body.x <= curves::X_SPAN);
            }
        }
    }

    #[test]
    fn test_extend_reaches_lookahead() {
        let world = generated_world(5.0);
        let top = world.frontier().unwrap();
        assert!(top >= 5.0 + 3.0);
        assert!(top < 5.0 + 3.0 + PlayerConfig::default().max_jump_height() + 1e-4);
    }

    #[test]
    fn test_extend_is_idempotent_at_frontier() {
        let mut world = generated_world(2.0);
        let count = world.platforms.len();

        let added = extend(&mut rng(), &mut world, &WorldConfig::default(), &PlayerConfig::default());
        assert_eq!(added, 0);
        assert_eq!(world.platforms.len(), count);
    }

    #[test]
    fn test_low_platforms_are_tame() {
        let mut r = rng();
        for _ in 0..500 {
            assert_eq!(move_speed(&mut r, 0.5), 0.0);
            assert_eq!(platform_skin(&mut r, 9.0), PlatformSkin::Brown);
            assert_ne!(special_type(&mut r, 4.0, 0.05), SpecialType::Breakable);
        }
    }

    #[test]
    fn test_skin_blends_between_brown_and_green() {
        let mut r = rng();
        let y = (curves::SKIN_START + curves::SKIN_END) / 2.0;
        let green = (0..2000)
            .filter(|_| platform_skin(&mut r, y) == PlatformSkin::Green)
            .count();
        assert!(green > 850 && green < 1150, "green = {}", green);
    }

    #[test]
    fn test_high_platforms_change() {
        let mut r = rng();
        let mut breakable = 0;
        let mut moving = 0;
        for _ in 0..1000 {
            assert_eq!(platform_skin(&mut r, 301.0), PlatformSkin::Green);
            if special_type(&mut r, 700.0, 0.05) == SpecialType::Breakable {
                breakable += 1;
            }
            let speed = move_speed(&mut r, 700.0);
            if speed > 0.0 {
                moving += 1;
                assert!(speed >= curves::SPEED_MIN && speed <= curves::SPEED_MAX);
            }
        }
        // ~0.95 * 0.9 breakable, 0.9 moving
        assert!(breakable > 780 && breakable < 920, "breakable = {}", breakable);
        assert!(moving > 850 && moving < 950, "moving = {}", moving);
    }

    #[test]
    fn test_jumpy_chance_is_flat() {
        let mut r = rng();
        let jumpy = (0..10_000)
            .filter(|_| special_type(&mut r, 0.0, 0.05) == SpecialType::Jumpy)
            .count();
        assert!(jumpy > 400 && jumpy < 600, "jumpy = {}", jumpy);
    }

    #[test]
    fn test_move_range_bounds() {
        let mut r = rng();
        for _ in 0..1000 {
            let range = move_range(&mut r);
            assert!((curves::RANGE_MIN..curves::RANGE_MAX).contains(&range));
        }
    }

    #[test]
    fn test_coin_chance() {
        let mut r = rng();
        let config = WorldConfig::default();
        let coins = (0..10_000)
            .filter(|_| roll_platform(&mut r, 50.0, &config).coin_offset.is_some())
            .count();
        assert!(coins > 600 && coins < 900, "coins = {}", coins);
    }
}
