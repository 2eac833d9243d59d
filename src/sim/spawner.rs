//! Zombie spawner with time-based difficulty scaling
//!
//! Spawn frequency steps up 20% every 30 seconds, unbounded. Enemies enter
//! from a uniformly chosen screen edge, offset outside the visible area so
//! they walk on-screen instead of popping in.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::ZombieKind;
use crate::consts::*;

/// Spawn-frequency multiplier for a given elapsed game time
#[inline]
pub fn difficulty_multiplier(elapsed: f32) -> f32 {
    1.0 + (elapsed / DIFFICULTY_STEP_SECS).floor() * DIFFICULTY_STEP
}

/// Effective seconds between spawns at a given elapsed game time
#[inline]
pub fn spawn_interval(elapsed: f32) -> f32 {
    SPAWN_INTERVAL / difficulty_multiplier(elapsed)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Gameplay seconds this spawner has observed
    pub elapsed: f32,
    /// Accumulator toward the next spawn
    pub spawn_timer: f32,
    pub zombies_spawned: u32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner {
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            spawn_timer: 0.0,
            zombies_spawned: 0,
        }
    }

    /// Advance by `dt`; true when a zombie is due this tick
    pub fn should_spawn(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.spawn_timer += dt;

        if self.spawn_timer >= spawn_interval(self.elapsed) {
            self.spawn_timer = 0.0;
            true
        } else {
            false
        }
    }

    /// Pick variant and entry position for the next zombie
    pub fn spawn(&mut self, rng: &mut Pcg32) -> (ZombieKind, Vec2) {
        self.zombies_spawned += 1;
        (self.choose_kind(rng), Self::spawn_position(rng))
    }

    /// Uniform choice among the four edges; the coordinate along the edge
    /// is uniform in screen bounds, the other sits one margin outside
    pub fn spawn_position(rng: &mut Pcg32) -> Vec2 {
        match rng.random_range(0..4u8) {
            0 => Vec2::new(rng.random_range(0.0..=ARENA_WIDTH), -SPAWN_MARGIN),
            1 => Vec2::new(ARENA_WIDTH + SPAWN_MARGIN, rng.random_range(0.0..=ARENA_HEIGHT)),
            2 => Vec2::new(rng.random_range(0.0..=ARENA_WIDTH), ARENA_HEIGHT + SPAWN_MARGIN),
            _ => Vec2::new(-SPAWN_MARGIN, rng.random_range(0.0..=ARENA_HEIGHT)),
        }
    }

    /// Variant weights by elapsed time:
    /// under 30s only basic; 30-60s basic 0.7 / fast 0.3;
    /// past 60s basic 0.5 / fast 0.3 / tank 0.2
    fn choose_kind(&self, rng: &mut Pcg32) -> ZombieKind {
        if self.elapsed < 30.0 {
            return ZombieKind::Basic;
        }

        let roll: f32 = rng.random();
        if self.elapsed < 60.0 {
            if roll < 0.7 {
                ZombieKind::Basic
            } else {
                ZombieKind::Fast
            }
        } else if roll < 0.5 {
            ZombieKind::Basic
        } else if roll < 0.8 {
            ZombieKind::Fast
        } else {
            ZombieKind::Tank
        }
    }
}
