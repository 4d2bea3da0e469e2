//! Sound effects and music
//!
//! Driven entirely by `GameEvent`s: the main loop drains the session's event
//! queue into `AudioPlayer::handle`. Missing sounds are skipped silently.

use macroquad::audio::{play_sound, play_sound_once, stop_sound, PlaySoundParams, Sound};
use tracing::trace;

use crate::game::event::GameEvent;
use crate::game::platform::SpecialType;

const MUSIC_VOLUME: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundId {
    Music,
    Jump,
    JumpBreak,
    JumpPower,
    Die,
    Coin,
}

impl SoundId {
    pub const ALL: [SoundId; 6] = [
        SoundId::Music,
        SoundId::Jump,
        SoundId::JumpBreak,
        SoundId::JumpPower,
        SoundId::Die,
        SoundId::Coin,
    ];

    /// Path relative to the asset root
    pub fn path(self) -> &'static str {
        match self {
            SoundId::Music => "assets/music/time_for_adventure.ogg",
            SoundId::Jump => "assets/sounds/jump.wav",
            SoundId::JumpBreak => "assets/sounds/tap.wav",
            SoundId::JumpPower => "assets/sounds/power_up.wav",
            SoundId::Die => "assets/sounds/explosion.wav",
            SoundId::Coin => "assets/sounds/coin.wav",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One-shot sound for an event. Music is handled separately.
pub fn sound_for(event: &GameEvent) -> Option<SoundId> {
    match event {
        GameEvent::Jump(SpecialType::None) => Some(SoundId::Jump),
        GameEvent::Jump(SpecialType::Breakable) => Some(SoundId::JumpBreak),
        GameEvent::Jump(SpecialType::Jumpy) => Some(SoundId::JumpPower),
        GameEvent::CoinCollected { .. } => Some(SoundId::Coin),
        GameEvent::Died { .. } => Some(SoundId::Die),
        GameEvent::PlatformBroken { .. } | GameEvent::RunStarted | GameEvent::RunEnded => None,
    }
}

/// Loaded sounds, one slot per `SoundId`
#[derive(Default)]
pub struct SoundBank {
    sounds: [Option<Sound>; SoundId::ALL.len()],
}

impl SoundBank {
    pub fn insert(&mut self, id: SoundId, sound: Sound) {
        self.sounds[id.index()] = Some(sound);
    }

    pub fn get(&self, id: SoundId) -> Option<&Sound> {
        self.sounds[id.index()].as_ref()
    }
}

pub struct AudioPlayer {
    bank: SoundBank,
    music_playing: bool,
}

impl AudioPlayer {
    pub fn new(bank: SoundBank) -> Self {
        Self { bank, music_playing: false }
    }

    pub fn handle(&mut self, event: &GameEvent) {
        match event {
            GameEvent::RunStarted => self.start_music(),
            GameEvent::RunEnded => self.stop_music(),
            _ => {}
        }

        if let Some(id) = sound_for(event) {
            if let Some(sound) = self.bank.get(id) {
                trace!(?id, "play");
                play_sound_once(sound);
            }
        }
    }

    fn start_music(&mut self) {
        if self.music_playing {
            return;
        }
        if let Some(music) = self.bank.get(SoundId::Music) {
            play_sound(music, PlaySoundParams { looped: true, volume: MUSIC_VOLUME });
            self.music_playing = true;
        }
    }

    fn stop_music(&mut self) {
        if !self.music_playing {
            return;
        }
        if let Some(music) = self.bank.get(SoundId::Music) {
            stop_sound(music);
        }
        self.music_playing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::Entity;

    #[test]
    fn test_jump_sounds_by_platform() {
        assert_eq!(sound_for(&GameEvent::Jump(SpecialType::None)), Some(SoundId::Jump));
        assert_eq!(sound_for(&GameEvent::Jump(SpecialType::Breakable)), Some(SoundId::JumpBreak));
        assert_eq!(sound_for(&GameEvent::Jump(SpecialType::Jumpy)), Some(SoundId::JumpPower));
    }

    #[test]
    fn test_other_event_sounds() {
        let coin = GameEvent::CoinCollected { platform: Entity::NULL };
        assert_eq!(sound_for(&coin), Some(SoundId::Coin));
        assert_eq!(sound_for(&GameEvent::Died { score: 40 }), Some(SoundId::Die));
        assert_eq!(sound_for(&GameEvent::PlatformBroken { platform: Entity::NULL }), None);
        assert_eq!(sound_for(&GameEvent::RunStarted), None);
    }

    #[test]
    fn test_sound_ids_index_their_slot() {
        for (i, id) in SoundId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }
}
