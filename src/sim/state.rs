//! Game state and core simulation types
//!
//! Everything the orchestrator owns lives here: the player, enemy and
//! projectile collections, pickups, particles, and the session singletons
//! (spawner, experience). State is serializable for snapshotting; the RNG
//! is part of the state so a snapshot replays identically.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::experience::ExperienceState;
use super::spawner::Spawner;
use super::weapons::Weapon;
use crate::consts::*;

/// Current phase of gameplay
///
/// `Playing` is the only phase in which the simulation clock advances;
/// every other phase freezes entity ticking entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting on the title screen
    MainMenu,
    /// Active gameplay
    Playing,
    /// Frozen while the player picks a level-up reward
    UpgradeSelection,
    /// Frozen by the pause toggle
    Paused,
    /// Run ended; restart or quit
    GameOver,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub max_health: f32,
    pub health: f32,
    pub speed: f32,
    pub pickup_radius: f32,
    /// While positive, incoming damage is ignored
    pub invulnerable_time: f32,
    pub alive: bool,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            max_health: PLAYER_MAX_HEALTH,
            health: PLAYER_MAX_HEALTH,
            speed: PLAYER_SPEED,
            pickup_radius: PLAYER_PICKUP_RADIUS,
            invulnerable_time: 0.0,
            alive: true,
        }
    }

    pub fn rect(&self) -> Aabb {
        Aabb::from_center_size(self.pos, Vec2::splat(PLAYER_SIZE))
    }

    /// Move from a held-key direction vector (normalized here, so diagonals
    /// are no faster than cardinals)
    pub fn apply_input(&mut self, dir: Vec2, dt: f32) {
        if !self.alive {
            return;
        }
        self.pos += dir.normalize_or_zero() * self.speed * dt;
    }

    /// Keep the collision box inside the arena
    pub fn clamp_to_arena(&mut self) {
        let half = PLAYER_SIZE / 2.0;
        self.pos = self.pos.clamp(
            Vec2::splat(half),
            Vec2::new(ARENA_WIDTH - half, ARENA_HEIGHT - half),
        );
    }

    /// Apply contact damage. Returns true if this hit killed the player.
    /// Ignored entirely while the invulnerability window is open.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.alive || self.invulnerable_time > 0.0 {
            return false;
        }
        self.health -= amount;
        self.invulnerable_time = PLAYER_HIT_INVULN;
        if self.health <= 0.0 {
            self.health = 0.0;
            self.alive = false;
            return true;
        }
        false
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn update(&mut self, dt: f32) {
        if self.invulnerable_time > 0.0 {
            self.invulnerable_time = (self.invulnerable_time - dt).max(0.0);
        }
    }
}

/// Closed set of enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZombieKind {
    Basic,
    Fast,
    Tank,
    Boss,
}

impl ZombieKind {
    pub fn max_health(&self) -> f32 {
        match self {
            ZombieKind::Basic => ZOMBIE_BASE_HEALTH,
            ZombieKind::Fast => ZOMBIE_BASE_HEALTH * 0.5,
            ZombieKind::Tank => ZOMBIE_BASE_HEALTH * 3.0,
            ZombieKind::Boss => BOSS_HEALTH,
        }
    }

    pub fn speed(&self) -> f32 {
        match self {
            ZombieKind::Basic => ZOMBIE_BASE_SPEED,
            ZombieKind::Fast => ZOMBIE_BASE_SPEED * 1.8,
            ZombieKind::Tank => ZOMBIE_BASE_SPEED * 0.6,
            ZombieKind::Boss => ZOMBIE_BASE_SPEED * 0.8,
        }
    }

    /// Contact damage dealt to the player
    pub fn damage(&self) -> f32 {
        match self {
            ZombieKind::Basic => 10.0,
            ZombieKind::Fast => 8.0,
            ZombieKind::Tank => 20.0,
            ZombieKind::Boss => BOSS_DAMAGE,
        }
    }

    /// Experience awarded on death
    pub fn exp_value(&self) -> u32 {
        match self {
            ZombieKind::Basic => EXP_BASE_VALUE,
            ZombieKind::Fast => EXP_BASE_VALUE * 3 / 2,
            ZombieKind::Tank => EXP_BASE_VALUE * 3,
            ZombieKind::Boss => BOSS_EXP_VALUE,
        }
    }

    pub fn size(&self) -> f32 {
        match self {
            ZombieKind::Boss => BOSS_SIZE,
            _ => ZOMBIE_SIZE,
        }
    }

    /// Renderer palette index for body color and death particles
    pub fn palette_index(&self) -> u32 {
        match self {
            ZombieKind::Basic => 0,
            ZombieKind::Fast => 1,
            ZombieKind::Tank => 2,
            ZombieKind::Boss => 3,
        }
    }
}

/// Minion-spawning countdown carried only by the boss variant
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MinionClock {
    pub timer: f32,
    pub cooldown: f32,
}

impl Default for MinionClock {
    fn default() -> Self {
        Self {
            timer: 0.0,
            cooldown: BOSS_MINION_COOLDOWN,
        }
    }
}

/// An enemy that chases the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zombie {
    pub id: u32,
    pub kind: ZombieKind,
    pub pos: Vec2,
    pub max_health: f32,
    pub health: f32,
    pub speed: f32,
    pub damage: f32,
    pub exp_value: u32,
    pub alive: bool,
    /// Present only on the boss variant
    pub minions: Option<MinionClock>,
}

impl Zombie {
    pub fn new(id: u32, kind: ZombieKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            max_health: kind.max_health(),
            health: kind.max_health(),
            speed: kind.speed(),
            damage: kind.damage(),
            exp_value: kind.exp_value(),
            alive: true,
            minions: if kind == ZombieKind::Boss {
                Some(MinionClock::default())
            } else {
                None
            },
        }
    }

    pub fn rect(&self) -> Aabb {
        Aabb::from_center_size(self.pos, Vec2::splat(self.kind.size()))
    }

    /// Chase: re-aim directly at the player's current center every tick
    pub fn update(&mut self, dt: f32, player_pos: Vec2) {
        if !self.alive {
            return;
        }
        let dir = (player_pos - self.pos).normalize_or_zero();
        self.pos += dir * self.speed * dt;

        if let Some(clock) = &mut self.minions {
            clock.timer += dt;
        }
    }

    /// Returns true if this damage killed the zombie. Damage to an already
    /// dead zombie is a no-op; death is permanent.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.alive {
            return false;
        }
        self.health -= amount;
        if self.health <= 0.0 {
            self.health = 0.0;
            self.alive = false;
            return true;
        }
        false
    }

    /// Boss only: consume the minion clock if its cooldown has elapsed
    pub fn should_spawn_minions(&mut self) -> bool {
        match &mut self.minions {
            Some(clock) if clock.timer >= clock.cooldown => {
                clock.timer = 0.0;
                true
            }
            _ => false,
        }
    }
}

/// A projectile fired by the auto gun
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: f32,
    /// Extra targets this bullet may pass through before dying
    pub pierce: u32,
    /// Targets struck so far
    pub hits: u32,
    pub alive: bool,
}

impl Bullet {
    /// Direction is computed once at creation, toward `target`
    pub fn new(id: u32, start: Vec2, target: Vec2, damage: f32, pierce: u32) -> Self {
        Self {
            id,
            pos: start,
            vel: (target - start).normalize_or_zero() * BULLET_SPEED,
            radius: BULLET_RADIUS,
            damage,
            pierce,
            hits: 0,
            alive: true,
        }
    }

    /// Advance and despawn once past the arena margin
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;

        let m = BULLET_DESPAWN_MARGIN;
        if self.pos.x < -m
            || self.pos.x > ARENA_WIDTH + m
            || self.pos.y < -m
            || self.pos.y > ARENA_HEIGHT + m
        {
            self.alive = false;
        }
    }

    /// Record an impact; the bullet dies once it has struck more targets
    /// than its pierce allowance
    pub fn register_hit(&mut self) {
        self.hits += 1;
        if self.hits > self.pierce {
            self.alive = false;
        }
    }
}

/// Experience pickup dropped where an enemy died
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpGem {
    pub id: u32,
    pub pos: Vec2,
    pub value: u32,
    /// Latches true once the player comes within pickup radius
    pub attracted: bool,
    pub vel: Vec2,
}

impl ExpGem {
    pub fn new(id: u32, pos: Vec2, value: u32) -> Self {
        Self {
            id,
            pos,
            value,
            attracted: false,
            vel: Vec2::ZERO,
        }
    }

    /// Move toward the player while attracted. Returns true once within
    /// capture distance (collected).
    pub fn update(&mut self, dt: f32, player_pos: Vec2, pickup_radius: f32) -> bool {
        let to_player = player_pos - self.pos;
        let distance = to_player.length();

        if distance < pickup_radius {
            self.attracted = true;
        }

        if self.attracted && distance > 5.0 {
            self.vel = to_player.normalize_or_zero() * GEM_ATTRACTION_SPEED;
            self.pos += self.vel * dt;
        }

        distance < GEM_COLLECT_DIST
    }
}

/// Palette index for ambient void particles
pub const VOID_PARTICLE_COLOR: u32 = 4;

/// A visual particle (not gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at birth, counts down to 0
    pub life: f32,
    /// Life lost per second (1 / max lifetime)
    pub fade: f32,
    pub size: f32,
    /// Downward acceleration; zero for drifting void motes
    pub gravity: f32,
    /// Renderer palette index
    pub color: u32,
}

impl Particle {
    /// Ambient drifting mote near the player
    pub fn void_drift(rng: &mut Pcg32, origin: Vec2) -> Self {
        let offset = Vec2::new(rng.random_range(-50.0..=50.0), rng.random_range(-50.0..=50.0));
        Self {
            pos: origin + offset,
            vel: Vec2::new(rng.random_range(-80.0..=80.0), rng.random_range(-80.0..=80.0)),
            life: 1.0,
            fade: 1.0 / rng.random_range(1.5..=3.0),
            size: rng.random_range(2.0..=8.0),
            gravity: 0.0,
            color: VOID_PARTICLE_COLOR,
        }
    }

    /// One spark of a death burst: random bearing, falls under gravity
    pub fn death_spark(rng: &mut Pcg32, pos: Vec2, color: u32) -> Self {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(100.0..=300.0);
        Self {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: 1.0,
            fade: 1.0 / rng.random_range(0.3..=0.8),
            size: rng.random_range(3.0..=7.0),
            gravity: DEATH_PARTICLE_GRAVITY,
            color,
        }
    }

    /// Returns false once expired
    pub fn update(&mut self, dt: f32) -> bool {
        self.pos += self.vel * dt;
        self.vel.y += self.gravity * dt;
        self.life -= dt * self.fade;
        self.life > 0.0
    }
}

/// Complete session state
///
/// The orchestrator thread exclusively owns this; collections are ordered
/// because iteration order decides collision tie-breaks. Renderer and HUD
/// collaborators read the public fields directly each frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Session RNG; every random draw in the sim goes through this
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Accumulated gameplay seconds (frozen outside `Playing`)
    pub elapsed: f32,
    pub kills: u32,
    pub player: Player,
    pub spawner: Spawner,
    pub experience: ExperienceState,
    pub weapons: Vec<Weapon>,
    pub zombies: Vec<Zombie>,
    /// The boss is checked after the zombie list each tick, so it gets its
    /// own slot rather than a position in the list
    pub boss: Option<Zombie>,
    /// The boss arrives exactly once per session
    pub boss_spawned: bool,
    pub bullets: Vec<Bullet>,
    pub gems: Vec<ExpGem>,
    /// Visual only, excluded from snapshots
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Catalog indices of the upgrade cards currently on offer
    pub offered: Vec<usize>,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::MainMenu,
            elapsed: 0.0,
            kills: 0,
            player: Player::new(Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0)),
            spawner: Spawner::new(),
            experience: ExperienceState::new(),
            weapons: Weapon::starting_loadout(),
            zombies: Vec::new(),
            boss: None,
            boss_spawned: false,
            bullets: Vec::new(),
            gems: Vec::new(),
            particles: Vec::new(),
            offered: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a stable entity handle (used for collision bookkeeping,
    /// never reused within a session)
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reinitialize the whole session in place with fresh RNG draws,
    /// keeping external references to the state valid. Enters `Playing`
    /// directly (restart is only reachable from `GameOver`).
    pub fn reset_session(&mut self) {
        let seed = self.rng.random();
        *self = Self::new(seed);
        self.phase = GamePhase::Playing;
    }
}
