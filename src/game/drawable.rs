//! Renderer-facing view of the simulation
//!
//! The renderer never sees game types. Each frame the session flattens its
//! live entities into `Drawable`s, so an object is on screen exactly while
//! it exists in the simulation.

use super::body::Body;
use super::platform::{Platform, PlatformSkin, SpecialType};
use super::player::Player;

/// Which sprite to draw. Resolved to a tileset rect by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    GreenPlatform,
    BrownPlatform,
    /// Jumpy platform
    YellowPlatform,
    /// Breakable platform
    IcePlatform,
    KnightJump,
    KnightFall,
    /// Coin animation frame
    Coin(u8),
}

impl SpriteId {
    pub fn platform(platform: &Platform) -> Self {
        match (platform.special, platform.skin) {
            (SpecialType::Jumpy, _) => SpriteId::YellowPlatform,
            (SpecialType::Breakable, _) => SpriteId::IcePlatform,
            (SpecialType::None, PlatformSkin::Green) => SpriteId::GreenPlatform,
            (SpecialType::None, PlatformSkin::Brown) => SpriteId::BrownPlatform,
        }
    }

    pub fn knight(player: &Player) -> Self {
        if player.is_rising() {
            SpriteId::KnightJump
        } else {
            SpriteId::KnightFall
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawable {
    pub body: Body,
    /// None draws the placeholder fill
    pub sprite: Option<SpriteId>,
}

impl Drawable {
    pub fn new(body: Body, sprite: Option<SpriteId>) -> Self {
        Self { body, sprite }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerConfig;
    use crate::game::entity::Entity;
    use crate::game::platform::PlatformSpec;

    #[test]
    fn test_special_type_overrides_skin() {
        let mut spec = PlatformSpec::fixed(0.0, 0.0, 0.2, 0.035, PlatformSkin::Green);
        assert_eq!(SpriteId::platform(&Platform::new(Entity::NULL, spec)), SpriteId::GreenPlatform);

        spec.special = SpecialType::Jumpy;
        assert_eq!(SpriteId::platform(&Platform::new(Entity::NULL, spec)), SpriteId::YellowPlatform);

        spec.special = SpecialType::Breakable;
        spec.skin = PlatformSkin::Brown;
        assert_eq!(SpriteId::platform(&Platform::new(Entity::NULL, spec)), SpriteId::IcePlatform);
    }

    #[test]
    fn test_knight_pose() {
        let mut player = Player::new(&PlayerConfig::default());
        player.velocity = 1.0;
        assert_eq!(SpriteId::knight(&player), SpriteId::KnightJump);
        player.velocity = 0.0;
        assert_eq!(SpriteId::knight(&player), SpriteId::KnightFall);
    }
}
