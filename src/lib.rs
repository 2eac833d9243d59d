//! Void Survivors - a top-down survival action game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawning, leveling)
//!
//! Rendering, audio, and input devices are external collaborators: a frontend
//! feeds a [`sim::TickInput`] into [`sim::tick`] each frame and reads the
//! public fields of [`sim::GameState`] back out to draw.

pub mod sim;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (the visible play area, pixels)
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;
    /// Enemies spawn this far outside the visible edge and walk in
    pub const SPAWN_MARGIN: f32 = 50.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    pub const PLAYER_SPEED: f32 = 250.0;
    pub const PLAYER_PICKUP_RADIUS: f32 = 100.0;
    /// Damage immunity window after a hit (seconds)
    pub const PLAYER_HIT_INVULN: f32 = 0.5;

    /// Zombie base stats (variant tables scale from these)
    pub const ZOMBIE_SIZE: f32 = 32.0;
    pub const ZOMBIE_BASE_HEALTH: f32 = 30.0;
    pub const ZOMBIE_BASE_SPEED: f32 = 90.0;

    /// Spawner: base seconds between spawns at difficulty 1.0
    pub const SPAWN_INTERVAL: f32 = 1.0;
    /// Difficulty steps up every this many seconds of play
    pub const DIFFICULTY_STEP_SECS: f32 = 30.0;
    /// Spawn-frequency increase per difficulty step (+20%)
    pub const DIFFICULTY_STEP: f32 = 0.2;

    /// Boss encounter
    pub const BOSS_SPAWN_TIME: f32 = 150.0;
    pub const BOSS_SIZE: f32 = 64.0;
    pub const BOSS_HEALTH: f32 = 2000.0;
    pub const BOSS_DAMAGE: f32 = 30.0;
    pub const BOSS_EXP_VALUE: u32 = 500;
    /// Seconds between boss minion batches
    pub const BOSS_MINION_COOLDOWN: f32 = 5.0;
    /// Fast-variant zombies per minion batch
    pub const BOSS_MINION_COUNT: usize = 3;
    /// Minions appear within this offset of the boss center (both axes)
    pub const BOSS_MINION_OFFSET: f32 = 80.0;

    /// Experience / leveling
    pub const EXP_BASE_VALUE: u32 = 10;
    pub const EXP_TO_LEVEL: u32 = 100;
    pub const EXP_GROWTH_FACTOR: f32 = 1.5;
    /// Speed at which an attracted gem homes in on the player
    pub const GEM_ATTRACTION_SPEED: f32 = 400.0;
    /// Capture distance at which a gem is collected
    pub const GEM_COLLECT_DIST: f32 = 10.0;

    /// Bullets
    pub const BULLET_SPEED: f32 = 500.0;
    pub const BULLET_DAMAGE: f32 = 20.0;
    pub const BULLET_RADIUS: f32 = 5.0;
    /// Bullets despawn this far outside the arena
    pub const BULLET_DESPAWN_MARGIN: f32 = 50.0;

    /// Auto gun
    pub const GUN_BASE_FIRE_RATE: f32 = 3.0;
    /// Total angular spread of a multi-bullet volley (degrees)
    pub const GUN_SPREAD_DEGREES: f32 = 15.0;
    /// Spread bullets aim at a point this far along their own bearing
    pub const GUN_SHOOT_DISTANCE: f32 = 500.0;

    /// Orbiting disc
    pub const DISC_ORBIT_RADIUS: f32 = 80.0;
    pub const DISC_ROTATION_SPEED: f32 = 180.0; // degrees per second
    pub const DISC_DAMAGE: f32 = 15.0;
    pub const DISC_SIZE: f32 = 12.0;
    /// Minimum seconds between disc hits on the same target
    pub const DISC_HIT_DELAY: f32 = 0.5;

    /// Particles
    pub const DEATH_PARTICLES_ZOMBIE: usize = 15;
    pub const DEATH_PARTICLES_BOSS: usize = 40;
    pub const DEATH_PARTICLE_GRAVITY: f32 = 400.0;
    /// Per-tick chance of an ambient void particle near the player
    pub const VOID_PARTICLE_CHANCE: f32 = 0.3;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(mut angle: f32) -> f32 {
    angle %= 360.0;
    if angle < 0.0 {
        angle += 360.0;
    }
    angle
}
