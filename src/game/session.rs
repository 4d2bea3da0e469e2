//! Game session and per-frame step
//!
//! A session cycles Title -> Running -> Ended -> (restart delay) -> Title.
//! The Session owns the World, the player and the RNG; the frontend feeds it
//! a `dt` and the current controls once per frame and drains
//! `world.events` afterwards.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::GameConfig;
use super::drawable::{Drawable, SpriteId};
use super::event::GameEvent;
use super::generator;
use super::player::Player;
use super::world::World;
use super::Controls;

/// Points per collected coin
pub const COIN_SCORE: u32 = 25;
/// Points per unit of height climbed
pub const HEIGHT_SCORE: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Waiting for the first horizontal input
    Title,
    Running,
    /// Run is over; a fresh session starts in `restart_in` seconds
    Ended { restart_in: f32 },
}

pub struct Session {
    config: GameConfig,
    rng: StdRng,
    pub world: World,
    /// None between game over and restart
    pub player: Option<Player>,
    /// Pending restart countdown. At most one can exist.
    restart_in: Option<f32>,
    score: u32,
    runs: u32,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let world = World::new(config.world.keep_alive_height);
        let mut session = Self {
            rng: StdRng::seed_from_u64(seed),
            config,
            world,
            player: None,
            restart_in: None,
            score: 0,
            runs: 0,
        };
        session.reset();
        session
    }

    pub fn phase(&self) -> Phase {
        match self.restart_in {
            Some(restart_in) => Phase::Ended { restart_in },
            None if self.world.show_title => Phase::Title,
            None => Phase::Running,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Runs started so far, including the current one
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Begin a fresh run on the title screen. Everything from the previous
    /// run is discarded.
    pub fn reset(&mut self) {
        self.world.reset();
        self.player = Some(Player::new(&self.config.player));
        self.restart_in = None;
        self.score = 0;
        self.runs += 1;
        self.world.events.send(GameEvent::RunStarted);
        info!(run = self.runs, "session started");
    }

    /// Advance the session by `dt` seconds.
    ///
    /// The restart countdown runs on wall-clock `dt`; only the simulation
    /// sees it clamped to `max_frame_dt`.
    pub fn step(&mut self, dt: f32, controls: Controls) {
        let elapsed = dt.max(0.0);
        let dt = elapsed.min(self.config.session.max_frame_dt);

        if let Some(remaining) = self.restart_in.as_mut() {
            *remaining -= elapsed;
            if *remaining <= 0.0 {
                info!("restarting");
                self.reset();
            }
            return;
        }

        let Some(player) = self.player.as_mut() else { return };
        let world = &mut self.world;

        world.prune_platforms();
        generator::extend(&mut self.rng, world, &self.config.world, &self.config.player);

        player.update(dt, controls, world);

        let World { platforms, coins, events, .. } = &mut *world;
        for platform in platforms.iter_mut() {
            if platform.update(dt, &player.body) {
                *coins += 1;
                events.send(GameEvent::CoinCollected { platform: platform.id });
                debug!(coins = *coins, "coin collected");
            }
        }

        let fell = world
            .lowest()
            .is_some_and(|lowest| player.body.y < lowest - self.config.session.death_margin);
        if fell {
            self.end_run();
            return;
        }

        world.max_height = world.max_height.max(world.camera_height);
        self.score = (world.max_height * HEIGHT_SCORE).floor() as u32 + world.coins * COIN_SCORE;

        if world.show_title && (controls.left || controls.right) {
            world.show_title = false;
            debug!("title dismissed");
        }
    }

    /// Tear the run down and schedule the restart. Idempotent.
    fn end_run(&mut self) {
        if self.restart_in.is_some() {
            return;
        }

        info!(
            score = self.score,
            height = self.world.max_height,
            coins = self.world.coins,
            "game over"
        );
        self.world.events.send(GameEvent::Died { score: self.score });
        self.world.clear_platforms();
        self.player = None;
        self.world.events.send(GameEvent::RunEnded);
        self.restart_in = Some(self.config.session.restart_delay);
    }

    /// Everything to draw this frame, back to front.
    pub fn drawables(&self) -> Vec<Drawable> {
        let mut out = Vec::with_capacity(self.world.platforms.len() * 2 + 1);
        for platform in &self.world.platforms {
            out.push(Drawable::new(platform.body, Some(SpriteId::platform(platform))));
            if let Some(coin) = &platform.coin {
                out.push(Drawable::new(coin.body, Some(SpriteId::Coin(coin.frame))));
            }
        }
        if let Some(player) = &self.player {
            out.push(Drawable::new(player.body, Some(SpriteId::knight(player))));
        }
        out.sort_by_key(|d| d.body.z_index);
        out
    }
}
