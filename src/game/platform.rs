//! Platforms and the coins riding on them
//!
//! A platform optionally owns one coin. The coin keeps its parent's `Entity`
//! for events; it never holds a reference, so removing the platform simply
//! drops the coin with it.

use super::body::Body;
use super::entity::Entity;

/// Behaviour modifier applied when the player bounces off a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecialType {
    #[default]
    None,
    /// Power jump pad
    Jumpy,
    /// Shatters on the first bounce
    Breakable,
}

/// Cosmetic base colour of a plain platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformSkin {
    Brown,
    Green,
}

/// Coin size (square)
pub const COIN_SIZE: f32 = 0.05;
/// Seconds each coin frame stays on screen
pub const COIN_FRAME_TIME: f32 = 0.1;
/// Frames in the coin spin animation
pub const COIN_FRAME_COUNT: u8 = 6;
/// Horizontal margin kept between a coin and its platform's edges
const COIN_MARGIN: f32 = 0.04;

/// Everything the generator decides about a platform before it exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub skin: PlatformSkin,
    pub special: SpecialType,
    pub move_speed: f32,
    pub move_range: f32,
    /// Coin x relative to the platform's left edge, if it carries one
    pub coin_offset: Option<f32>,
}

impl PlatformSpec {
    /// A still, plain platform.
    pub fn fixed(x: f32, y: f32, width: f32, height: f32, skin: PlatformSkin) -> Self {
        Self {
            x,
            y,
            width,
            height,
            skin,
            special: SpecialType::None,
            move_speed: 0.0,
            move_range: 0.0,
            coin_offset: None,
        }
    }

    /// Where a coin sits on a platform of this width, given a unit draw.
    pub fn coin_offset_for(width: f32, roll: f32) -> f32 {
        roll * (width - 2.0 * COIN_MARGIN) + COIN_MARGIN
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub body: Body,
    /// Owning platform
    pub platform: Entity,
    /// Current animation frame, 0..COIN_FRAME_COUNT
    pub frame: u8,
    accum_time: f32,
}

impl Coin {
    pub fn new(platform: Entity, x: f32, y: f32) -> Self {
        Self {
            body: Body::new(x, y, COIN_SIZE, COIN_SIZE).with_z_index(1),
            platform,
            frame: 0,
            accum_time: 0.0,
        }
    }

    /// Advance the spin animation.
    pub fn update(&mut self, dt: f32) {
        self.accum_time += dt;
        if self.accum_time >= COIN_FRAME_TIME {
            self.accum_time = 0.0;
            self.frame = (self.frame + 1) % COIN_FRAME_COUNT;
        }
    }

    pub fn touches(&self, player: &Body) -> bool {
        self.body.overlaps(player)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub id: Entity,
    pub body: Body,
    pub skin: PlatformSkin,
    pub special: SpecialType,
    /// Signed horizontal speed; the sign is the current direction
    pub move_speed: f32,
    pub move_range: f32,
    pub start_x: f32,
    pub coin: Option<Coin>,
    coin_offset: f32,
}

impl Platform {
    pub fn new(id: Entity, spec: PlatformSpec) -> Self {
        let body = Body::new(spec.x, spec.y, spec.width, spec.height);
        let coin_offset = spec.coin_offset.unwrap_or(0.0);
        let coin = spec
            .coin_offset
            .map(|offset| Coin::new(id, body.x + offset, body.top()));

        Self {
            id,
            body,
            skin: spec.skin,
            special: spec.special,
            move_speed: spec.move_speed,
            move_range: spec.move_range,
            start_x: spec.x,
            coin,
            coin_offset,
        }
    }

    /// Move one tick and service the coin.
    ///
    /// Screen edges win over the travel range: a platform pushed past an edge
    /// always turns back inward. Returns true if the coin was collected by
    /// `player` this tick (the coin is gone afterwards).
    pub fn update(&mut self, dt: f32, player: &Body) -> bool {
        let b = &mut self.body;
        if b.x < 0.0 {
            self.move_speed = self.move_speed.abs();
        } else if b.right() > 1.0 {
            self.move_speed = -self.move_speed.abs();
        } else if b.x - self.start_x >= self.move_range {
            self.move_speed = -self.move_speed.abs();
        } else if self.start_x - b.x >= self.move_range {
            self.move_speed = self.move_speed.abs();
        }
        b.x += self.move_speed * dt;

        let Some(coin) = self.coin.as_mut() else { return false };
        coin.body.x = self.body.x + self.coin_offset;
        coin.body.y = self.body.top();
        coin.update(dt);

        if coin.touches(player) {
            self.coin = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Player body well away from any platform in these tests
    const AWAY: Body = Body {
        x: 0.0,
        y: -10.0,
        width: 0.1,
        height: 0.1,
        offset_x: 0.0,
        offset_y: 0.0,
        z_index: 0,
        mirror_x: false,
    };

    fn moving(x: f32, width: f32, speed: f32, range: f32) -> Platform {
        let mut spec = PlatformSpec::fixed(x, 1.0, width, 0.035, PlatformSkin::Brown);
        spec.move_speed = speed;
        spec.move_range = range;
        Platform::new(Entity::new(0, 0), spec)
    }

    #[test]
    fn test_platform_stays_within_range() {
        let mut p = moving(0.4, 0.1, 0.5, 0.1);
        let dt = 1.0 / 60.0;
        let step = 0.5 * dt;
        for _ in 0..2000 {
            p.update(dt, &AWAY);
            assert!(p.body.x >= 0.3 - step - 1e-4, "x = {}", p.body.x);
            assert!(p.body.x <= 0.5 + step + 1e-4, "x = {}", p.body.x);
        }
    }

    #[test]
    fn test_edge_overrides_range() {
        // Range would allow travel off the right edge; the edge bounces first
        let mut p = moving(0.7, 0.2, 0.5, 0.9);
        let dt = 1.0 / 60.0;
        for _ in 0..600 {
            p.update(dt, &AWAY);
            assert!(p.body.right() <= 1.0 + 0.5 * dt + 1e-4);
            assert!(p.body.x >= -0.5 * dt - 1e-4);
        }
    }

    #[test]
    fn test_left_edge_turns_platform_right() {
        let mut p = moving(-0.05, 0.2, -0.3, 0.5);
        p.update(0.1, &AWAY);
        assert!(p.move_speed > 0.0);
        assert!(p.body.x > -0.05);
    }

    #[test]
    fn test_coin_follows_platform() {
        let mut spec = PlatformSpec::fixed(0.2, 2.0, 0.2, 0.035, PlatformSkin::Green);
        spec.move_speed = 0.3;
        spec.move_range = 0.5;
        spec.coin_offset = Some(0.05);
        let mut p = Platform::new(Entity::new(3, 1), spec);

        assert!(!p.update(0.1, &AWAY));
        let coin = p.coin.as_ref().unwrap();
        assert!((coin.body.x - (p.body.x + 0.05)).abs() < 1e-6);
        assert!((coin.body.y - p.body.top()).abs() < 1e-6);
        assert_eq!(coin.platform, Entity::new(3, 1));
    }

    #[test]
    fn test_coin_collected_on_overlap() {
        let mut spec = PlatformSpec::fixed(0.2, 2.0, 0.2, 0.035, PlatformSkin::Brown);
        spec.coin_offset = Some(0.1);
        let mut p = Platform::new(Entity::new(0, 0), spec);

        let far = Body::new(0.8, 0.0, 0.1, 0.1);
        assert!(!p.update(0.0, &far));
        assert!(p.coin.is_some());

        let coin_body = p.coin.as_ref().unwrap().body;
        let player = Body::new(coin_body.x - 0.02, coin_body.y - 0.02, 0.1, 0.1);
        assert!(p.update(0.0, &player));
        assert!(p.coin.is_none());
    }

    #[test]
    fn test_coin_animation_cycles() {
        let mut coin = Coin::new(Entity::NULL, 0.0, 0.0);
        for expected in [1, 2, 3, 4, 5, 0, 1] {
            coin.update(COIN_FRAME_TIME);
            assert_eq!(coin.frame, expected);
        }

        // Sub-frame steps accumulate
        let mut coin = Coin::new(Entity::NULL, 0.0, 0.0);
        coin.update(0.04);
        coin.update(0.04);
        assert_eq!(coin.frame, 0);
        coin.update(0.04);
        assert_eq!(coin.frame, 1);
    }

    #[test]
    fn test_coin_offset_respects_margins() {
        assert!((PlatformSpec::coin_offset_for(0.2, 0.0) - 0.04).abs() < 1e-6);
        assert!((PlatformSpec::coin_offset_for(0.2, 1.0) - 0.16).abs() < 1e-6);
    }
}
