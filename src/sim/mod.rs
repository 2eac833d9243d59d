//! Deterministic survival simulation
//!
//! Everything in here is pure state-in, state-out: a [`GameState`] seeded
//! once, advanced by [`tick`] with a [`TickInput`] snapshot each frame.
//! Identical seed and input sequence reproduce the session exactly, which
//! is what the tests lean on. No rendering, audio, or IO lives here.

pub mod collision;
pub mod experience;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod upgrades;
pub mod weapons;

pub use collision::{Aabb, circle_hits_box};
pub use experience::ExperienceState;
pub use spawner::{Spawner, difficulty_multiplier, spawn_interval};
pub use state::{
    Bullet, ExpGem, GamePhase, GameState, Particle, Player, Zombie, ZombieKind,
};
pub use tick::{GameEvent, TickInput, tick};
pub use upgrades::{CATALOG, UpgradeDef, UpgradeEffect};
pub use weapons::{Weapon, WeaponKind};
