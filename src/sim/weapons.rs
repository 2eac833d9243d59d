//! Player weapons
//!
//! A closed set of two strategies: the auto gun spawns homing-aimed bullets
//! at the nearest live target, the orbiting disc deals contact damage along
//! a derived orbit. Both level up through fixed, finite effect tables; past
//! the last table entry an upgrade changes nothing.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::circle_hits_box;
use super::state::{Bullet, GameState, Zombie};
use crate::consts::*;
use crate::wrap_degrees;

/// Weapon kind tag, used by the upgrade catalog to match equipped weapons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponKind {
    AutoGun,
    OrbitingDisc,
}

/// A weapon equipped by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Weapon {
    AutoGun(AutoGun),
    OrbitingDisc(OrbitingDisc),
}

impl Weapon {
    /// The loadout every session starts with
    pub fn starting_loadout() -> Vec<Weapon> {
        vec![
            Weapon::AutoGun(AutoGun::new()),
            Weapon::OrbitingDisc(OrbitingDisc::new()),
        ]
    }

    pub fn kind(&self) -> WeaponKind {
        match self {
            Weapon::AutoGun(_) => WeaponKind::AutoGun,
            Weapon::OrbitingDisc(_) => WeaponKind::OrbitingDisc,
        }
    }

    pub fn level(&self) -> u32 {
        match self {
            Weapon::AutoGun(g) => g.level,
            Weapon::OrbitingDisc(d) => d.level,
        }
    }

    /// Increment level and apply that level's table entry
    pub fn upgrade(&mut self) {
        match self {
            Weapon::AutoGun(g) => g.upgrade(),
            Weapon::OrbitingDisc(d) => d.upgrade(),
        }
    }

    /// Advance one tick. The gun appends into `state.bullets`; the disc
    /// damages targets directly and never spawns projectiles.
    pub fn update(&mut self, dt: f32, state: &mut GameState) {
        match self {
            Weapon::AutoGun(g) => g.update(dt, state),
            Weapon::OrbitingDisc(d) => d.update(dt, state),
        }
    }
}

/// All live targets in scan order: zombie list first, then the boss
fn live_targets(state: &GameState) -> impl Iterator<Item = &Zombie> {
    state
        .zombies
        .iter()
        .chain(state.boss.iter())
        .filter(|z| z.alive)
}

/// Automatically fires at the nearest live enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoGun {
    pub level: u32,
    /// Shots per second
    pub fire_rate: f32,
    pub damage: f32,
    /// Bullets per volley; above 1 they fan out in a fixed spread
    pub bullet_count: u32,
    /// Pierce allowance handed to each bullet
    pub pierce: u32,
    /// Accumulates even when there is nothing to shoot
    pub shoot_timer: f32,
}

impl Default for AutoGun {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoGun {
    pub fn new() -> Self {
        Self {
            level: 1,
            fire_rate: GUN_BASE_FIRE_RATE,
            damage: BULLET_DAMAGE,
            bullet_count: 1,
            pierce: 0,
            shoot_timer: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, state: &mut GameState) {
        self.shoot_timer += dt;
        if self.shoot_timer < 1.0 / self.fire_rate {
            return;
        }

        let origin = state.player.pos;
        // Squared distance is enough for ordering
        let nearest = live_targets(state)
            .min_by(|a, b| {
                a.pos
                    .distance_squared(origin)
                    .partial_cmp(&b.pos.distance_squared(origin))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|z| z.pos);

        // No live target: hold fire, keep accumulating
        let Some(target) = nearest else { return };
        self.shoot_timer = 0.0;

        if self.bullet_count == 1 {
            let id = state.next_entity_id();
            state
                .bullets
                .push(Bullet::new(id, origin, target, self.damage, self.pierce));
            return;
        }

        // Fan the volley symmetrically around the bearing to the target;
        // each bullet aims at a point projected along its own bearing
        let bearing = (target - origin).to_angle();
        let spread = GUN_SPREAD_DEGREES.to_radians();
        let step = spread / (self.bullet_count - 1) as f32;
        let start = bearing - spread / 2.0;

        for i in 0..self.bullet_count {
            let angle = start + i as f32 * step;
            let aim = origin + Vec2::from_angle(angle) * GUN_SHOOT_DISTANCE;
            let id = state.next_entity_id();
            state
                .bullets
                .push(Bullet::new(id, origin, aim, self.damage, self.pierce));
        }
    }

    fn upgrade(&mut self) {
        self.level += 1;
        match self.level {
            2 => self.fire_rate = 4.0,
            3 => self.bullet_count = 2,
            4 => self.fire_rate = 5.0,
            5 => self.bullet_count = 3,
            6 => self.damage = BULLET_DAMAGE * 1.5,
            7 => self.fire_rate = 6.0,
            _ => {} // table exhausted
        }
    }
}

/// Discs orbiting the player, damaging enemies on contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitingDisc {
    pub level: u32,
    pub disc_count: u32,
    pub orbit_radius: f32,
    /// Degrees per second
    pub rotation_speed: f32,
    pub damage: f32,
    /// Disc collision radius
    pub size: f32,
    /// Current orbit angle in degrees, wrapped to [0, 360)
    pub angle: f32,
    /// Per-target hit cooldowns keyed by entity id, pruned every tick
    pub hit_cooldowns: HashMap<u32, f32>,
}

impl Default for OrbitingDisc {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitingDisc {
    pub fn new() -> Self {
        Self {
            level: 1,
            disc_count: 1,
            orbit_radius: DISC_ORBIT_RADIUS,
            rotation_speed: DISC_ROTATION_SPEED,
            damage: DISC_DAMAGE,
            size: DISC_SIZE,
            angle: 0.0,
            hit_cooldowns: HashMap::new(),
        }
    }

    /// Disc centers are always derived from the current angle, never stored
    pub fn disc_positions(&self, origin: Vec2) -> Vec<Vec2> {
        let offset = 360.0 / self.disc_count as f32;
        (0..self.disc_count)
            .map(|i| {
                let rad = (self.angle + i as f32 * offset).to_radians();
                origin + Vec2::from_angle(rad) * self.orbit_radius
            })
            .collect()
    }

    pub fn update(&mut self, dt: f32, state: &mut GameState) {
        self.angle = wrap_degrees(self.angle + self.rotation_speed * dt);

        for cooldown in self.hit_cooldowns.values_mut() {
            *cooldown -= dt;
        }

        let discs = self.disc_positions(state.player.pos);
        for target in state.zombies.iter_mut().chain(state.boss.iter_mut()) {
            if !target.alive {
                continue;
            }
            if self.hit_cooldowns.get(&target.id).is_some_and(|c| *c > 0.0) {
                continue;
            }
            let bb = target.rect();
            for &disc in &discs {
                if circle_hits_box(disc, self.size, &bb) {
                    target.take_damage(self.damage);
                    self.hit_cooldowns.insert(target.id, DISC_HIT_DELAY);
                    break; // one hit per target per tick
                }
            }
        }

        // Drop expired entries and entries for targets no longer alive,
        // so the map cannot grow with enemy turnover
        let live: Vec<u32> = live_targets(state).map(|z| z.id).collect();
        self.hit_cooldowns
            .retain(|id, cooldown| *cooldown > 0.0 && live.contains(id));
    }

    fn upgrade(&mut self) {
        self.level += 1;
        match self.level {
            2 => self.disc_count = 2,
            3 => self.rotation_speed = DISC_ROTATION_SPEED * 1.3,
            4 => self.disc_count = 3,
            5 => self.orbit_radius = DISC_ORBIT_RADIUS * 1.2,
            6 => self.disc_count = 4,
            7 => self.damage = DISC_DAMAGE * 1.5,
            8 => self.size = 16.0,
            _ => {} // table exhausted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ZombieKind;

    fn playing_state() -> GameState {
        let mut state = GameState::new(1);
        state.weapons.clear(); // weapons under test are held separately
        state
    }

    fn add_zombie(state: &mut GameState, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        state.zombies.push(Zombie::new(id, ZombieKind::Basic, pos));
        id
    }

    #[test]
    fn test_gun_picks_nearest_regardless_of_order() {
        for order in [[30.0, 10.0, 20.0], [10.0, 20.0, 30.0], [20.0, 30.0, 10.0]] {
            let mut state = playing_state();
            let origin = state.player.pos;
            for d in order {
                add_zombie(&mut state, origin + Vec2::new(100.0 + d, 0.0));
            }

            let mut gun = AutoGun::new();
            gun.update(1.0, &mut state);

            assert_eq!(state.bullets.len(), 1);
            let expected_dir = Vec2::X; // nearest lies straight right
            let dir = state.bullets[0].vel.normalize();
            assert!((dir - expected_dir).length() < 1e-5);
        }
    }

    #[test]
    fn test_gun_ignores_dead_targets() {
        let mut state = playing_state();
        let origin = state.player.pos;
        let near = add_zombie(&mut state, origin + Vec2::new(50.0, 0.0));
        add_zombie(&mut state, origin + Vec2::new(0.0, 200.0));
        state
            .zombies
            .iter_mut()
            .find(|z| z.id == near)
            .unwrap()
            .alive = false;

        let mut gun = AutoGun::new();
        gun.update(1.0, &mut state);

        assert_eq!(state.bullets.len(), 1);
        let dir = state.bullets[0].vel.normalize();
        assert!((dir - Vec2::Y).length() < 1e-5, "must aim at the live target");
    }

    #[test]
    fn test_gun_timer_accumulates_without_targets() {
        let mut state = playing_state();
        let mut gun = AutoGun::new();

        gun.update(5.0, &mut state);
        assert!(state.bullets.is_empty());
        assert_eq!(gun.shoot_timer, 5.0);

        // A target appears: fires on the very next tick, however small
        let pos = state.player.pos + Vec2::new(100.0, 0.0);
        add_zombie(&mut state, pos);
        gun.update(0.001, &mut state);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(gun.shoot_timer, 0.0);
    }

    #[test]
    fn test_gun_holds_fire_before_cooldown() {
        let mut state = playing_state();
        let pos = state.player.pos + Vec2::new(100.0, 0.0);
        add_zombie(&mut state, pos);
        let mut gun = AutoGun::new();

        gun.update(0.1, &mut state); // cooldown is 1/3 s
        assert!(state.bullets.is_empty());
        gun.update(0.3, &mut state);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_gun_spread_is_symmetric_around_bearing() {
        let mut state = playing_state();
        let pos = state.player.pos + Vec2::new(200.0, 0.0);
        add_zombie(&mut state, pos);

        let mut gun = AutoGun::new();
        gun.bullet_count = 3;
        gun.update(1.0, &mut state);

        assert_eq!(state.bullets.len(), 3);
        let angles: Vec<f32> = state.bullets.iter().map(|b| b.vel.to_angle()).collect();
        let half_spread = GUN_SPREAD_DEGREES.to_radians() / 2.0;
        assert!((angles[0] + half_spread).abs() < 1e-4);
        assert!(angles[1].abs() < 1e-4); // center bullet rides the bearing
        assert!((angles[2] - half_spread).abs() < 1e-4);
    }

    #[test]
    fn test_gun_upgrade_table_caps() {
        let mut gun = AutoGun::new();
        for _ in 0..6 {
            gun.upgrade();
        }
        assert_eq!(gun.level, 7);
        assert_eq!(gun.fire_rate, 6.0);
        assert_eq!(gun.bullet_count, 3);

        // Beyond the table nothing changes
        let frozen = gun.clone();
        gun.upgrade();
        gun.upgrade();
        assert_eq!(gun.fire_rate, frozen.fire_rate);
        assert_eq!(gun.bullet_count, frozen.bullet_count);
        assert_eq!(gun.damage, frozen.damage);
    }

    #[test]
    fn test_disc_positions_evenly_spaced() {
        let mut disc = OrbitingDisc::new();
        disc.disc_count = 4;
        disc.angle = 0.0;

        let positions = disc.disc_positions(Vec2::ZERO);
        assert_eq!(positions.len(), 4);
        for p in &positions {
            assert!((p.length() - DISC_ORBIT_RADIUS).abs() < 1e-3);
        }
        // 0/90/180/270 degrees
        assert!((positions[0] - Vec2::new(DISC_ORBIT_RADIUS, 0.0)).length() < 1e-3);
        assert!((positions[1] - Vec2::new(0.0, DISC_ORBIT_RADIUS)).length() < 1e-3);
    }

    #[test]
    fn test_disc_angle_wraps() {
        let mut state = playing_state();
        let mut disc = OrbitingDisc::new();
        disc.angle = 350.0;
        disc.update(0.1, &mut state); // +18 degrees
        assert!(disc.angle >= 0.0 && disc.angle < 360.0);
        assert!((disc.angle - 8.0).abs() < 1e-3);
    }

    #[test]
    fn test_disc_hit_cooldown_per_target() {
        let mut state = playing_state();
        // Park a tank right on the disc orbit (angle 0 puts a disc at +x)
        let pos = state.player.pos + Vec2::new(DISC_ORBIT_RADIUS, 0.0);
        let id = state.next_entity_id();
        state.zombies.push(Zombie::new(id, ZombieKind::Tank, pos));
        let full = state.zombies[0].health;

        let mut disc = OrbitingDisc::new();
        disc.rotation_speed = 0.0; // hold the disc on the target

        disc.update(0.01, &mut state);
        assert_eq!(state.zombies[0].health, full - DISC_DAMAGE);

        // Within the hit delay: no second hit
        disc.update(0.1, &mut state);
        assert_eq!(state.zombies[0].health, full - DISC_DAMAGE);

        // After the delay elapses the target is hittable again
        disc.update(DISC_HIT_DELAY, &mut state);
        assert_eq!(state.zombies[0].health, full - 2.0 * DISC_DAMAGE);
    }

    #[test]
    fn test_disc_cooldowns_pruned_for_dead_targets() {
        let mut state = playing_state();
        let pos = state.player.pos + Vec2::new(DISC_ORBIT_RADIUS, 0.0);
        let mut disc = OrbitingDisc::new();
        disc.rotation_speed = 0.0;

        // Churn through many short-lived enemies; the cooldown map must not
        // accumulate entries for the dead
        for _ in 0..50 {
            let id = state.next_entity_id();
            state.zombies.push(Zombie::new(id, ZombieKind::Basic, pos));
            disc.update(0.01, &mut state);
            for z in &mut state.zombies {
                z.alive = false;
            }
            disc.update(0.01, &mut state);
            state.zombies.clear();
        }
        assert!(disc.hit_cooldowns.is_empty());
    }

    #[test]
    fn test_disc_never_spawns_projectiles() {
        let mut state = playing_state();
        let pos = state.player.pos + Vec2::new(DISC_ORBIT_RADIUS, 0.0);
        add_zombie(&mut state, pos);
        let mut disc = OrbitingDisc::new();
        disc.update(1.0, &mut state);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_disc_upgrade_table_caps() {
        let mut disc = OrbitingDisc::new();
        for _ in 0..7 {
            disc.upgrade();
        }
        assert_eq!(disc.level, 8);
        assert_eq!(disc.disc_count, 4);
        assert_eq!(disc.size, 16.0);

        let frozen = disc.clone();
        disc.upgrade();
        assert_eq!(disc.disc_count, frozen.disc_count);
        assert_eq!(disc.damage, frozen.damage);
        assert_eq!(disc.size, frozen.size);
    }
}
