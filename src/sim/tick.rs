//! Simulation tick
//!
//! One call to [`tick`] advances the whole session by `dt` seconds. The
//! per-tick resolution order is load-bearing: zombies move and contact the
//! player, then the boss, then bullets fly and resolve, then this tick's
//! deaths are swept exactly once, then gems feed the experience system,
//! then particles age out. Weapons run at the top of the tick so freshly
//! spawned bullets join the same bullet pass.

use glam::Vec2;
use rand::Rng;

use super::collision::circle_hits_box;
use super::state::{ExpGem, GamePhase, GameState, Particle, Zombie, ZombieKind};
use super::upgrades;
use crate::consts::*;

/// Input snapshot for a single tick
///
/// Movement flags mirror held keys; the rest are discrete press events the
/// frontend has already debounced. `select_upgrade` is the card index a
/// click landed on while the upgrade menu is open (hit-testing is the
/// frontend's job).
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Leave the main menu
    pub start: bool,
    /// Pause toggle (Escape); quits from the game-over screen
    pub pause: bool,
    /// Restart, honored only on the game-over screen
    pub restart: bool,
    /// Index of the upgrade card that was clicked, if any
    pub select_upgrade: Option<usize>,
}

impl TickInput {
    /// Held-key direction, unnormalized (the player normalizes)
    pub fn move_dir(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        dir
    }
}

/// State transitions surfaced to the frontend this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A session began (menu start or restart)
    Started,
    /// The player leveled up; an upgrade choice is now pending
    LevelUp { level: u32 },
    BossSpawned,
    GameOver,
    /// Escape pressed on the game-over screen
    QuitRequested,
}

/// Advance the session by one tick of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::MainMenu => {
            if input.start {
                state.phase = GamePhase::Playing;
                events.push(GameEvent::Started);
            }
            return events;
        }
        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Playing;
            }
            return events;
        }
        GamePhase::GameOver => {
            if input.restart {
                state.reset_session();
                log::info!("session restarted with seed {}", state.seed);
                events.push(GameEvent::Started);
            } else if input.pause {
                events.push(GameEvent::QuitRequested);
            }
            return events;
        }
        GamePhase::UpgradeSelection => {
            // A click off any card is a no-op; the menu stays up
            if let Some(card) = input.select_upgrade
                && let Some(&index) = state.offered.get(card)
            {
                upgrades::apply(index, &mut state.player, &mut state.weapons);
                state.offered.clear();
                state.phase = GamePhase::Playing;
            }
            return events;
        }
        GamePhase::Playing => {}
    }

    if input.pause {
        state.phase = GamePhase::Paused;
        return events;
    }

    state.elapsed += dt;

    // Player movement and invulnerability countdown
    state.player.apply_input(input.move_dir(), dt);
    state.player.clamp_to_arena();
    state.player.update(dt);

    // Weapons: the gun appends bullets, the disc damages directly
    let mut weapons = std::mem::take(&mut state.weapons);
    for weapon in &mut weapons {
        weapon.update(dt, state);
    }
    state.weapons = weapons;

    // Ambient void motes around the player
    if state.rng.random::<f32>() < VOID_PARTICLE_CHANCE {
        let mote = Particle::void_drift(&mut state.rng, state.player.pos);
        state.particles.push(mote);
    }

    // Difficulty-scaled zombie spawning
    if state.spawner.should_spawn(dt) {
        let (kind, pos) = state.spawner.spawn(&mut state.rng);
        let id = state.next_entity_id();
        state.zombies.push(Zombie::new(id, kind, pos));
    }

    // The boss arrives exactly once, top-center off-screen
    if !state.boss_spawned && state.elapsed >= BOSS_SPAWN_TIME {
        let id = state.next_entity_id();
        let pos = Vec2::new(ARENA_WIDTH / 2.0, -SPAWN_MARGIN);
        state.boss = Some(Zombie::new(id, ZombieKind::Boss, pos));
        state.boss_spawned = true;
        log::info!("boss arrived at {:.0}s", state.elapsed);
        events.push(GameEvent::BossSpawned);
    }

    let player_pos = state.player.pos;
    let player_rect = state.player.rect();
    let mut player_died = false;

    // Zombie chase and player contact
    for zombie in &mut state.zombies {
        zombie.update(dt, player_pos);
        if zombie.alive
            && zombie.rect().overlaps(&player_rect)
            && state.player.take_damage(zombie.damage)
        {
            player_died = true;
        }
    }

    // Boss chase, contact, and minion batches
    let mut minion_origin = None;
    if let Some(boss) = &mut state.boss {
        boss.update(dt, player_pos);
        if boss.alive
            && boss.rect().overlaps(&player_rect)
            && state.player.take_damage(boss.damage)
        {
            player_died = true;
        }
        if boss.alive && boss.should_spawn_minions() {
            minion_origin = Some(boss.pos);
        }
    }
    if let Some(origin) = minion_origin {
        for _ in 0..BOSS_MINION_COUNT {
            let offset = Vec2::new(
                state.rng.random_range(-BOSS_MINION_OFFSET..=BOSS_MINION_OFFSET),
                state.rng.random_range(-BOSS_MINION_OFFSET..=BOSS_MINION_OFFSET),
            );
            let id = state.next_entity_id();
            state
                .zombies
                .push(Zombie::new(id, ZombieKind::Fast, origin + offset));
        }
    }

    // Bullet movement and impacts: each bullet strikes at most one zombie
    // per tick (list order breaks ties), then the boss independently
    for bullet in &mut state.bullets {
        bullet.update(dt);
        if !bullet.alive {
            continue;
        }
        for zombie in &mut state.zombies {
            if zombie.alive && circle_hits_box(bullet.pos, bullet.radius, &zombie.rect()) {
                zombie.take_damage(bullet.damage);
                bullet.register_hit();
                break;
            }
        }
        if bullet.alive
            && let Some(boss) = &mut state.boss
            && boss.alive
            && circle_hits_box(bullet.pos, bullet.radius, &boss.rect())
        {
            boss.take_damage(bullet.damage);
            bullet.register_hit();
        }
    }
    state.bullets.retain(|b| b.alive);

    // Death sweep: every enemy whose health crossed to zero this tick is
    // rewarded exactly once (kill credit, gem, particle burst) and removed
    let mut deaths: Vec<(Vec2, u32, u32, usize)> = Vec::new();
    state.zombies.retain(|z| {
        if z.alive {
            true
        } else {
            deaths.push((z.pos, z.exp_value, z.kind.palette_index(), DEATH_PARTICLES_ZOMBIE));
            false
        }
    });
    if let Some(boss) = state.boss.take_if(|b| !b.alive) {
        deaths.push((
            boss.pos,
            boss.exp_value,
            boss.kind.palette_index(),
            DEATH_PARTICLES_BOSS,
        ));
    }
    for (pos, exp_value, palette, burst) in deaths {
        state.kills += 1;
        let id = state.next_entity_id();
        state.gems.push(ExpGem::new(id, pos, exp_value));
        for _ in 0..burst {
            let spark = Particle::death_spark(&mut state.rng, pos, palette);
            state.particles.push(spark);
        }
    }

    // Gem attraction and collection; each collected gem is one experience
    // deposit, so at most one level-up per gem
    let pickup_radius = state.player.pickup_radius;
    let mut leveled = false;
    let mut gems = std::mem::take(&mut state.gems);
    gems.retain_mut(|gem| {
        if gem.update(dt, player_pos, pickup_radius) {
            if state.experience.add_exp(gem.value) {
                leveled = true;
            }
            false
        } else {
            true
        }
    });
    state.gems = gems;

    // Particle aging
    state.particles.retain_mut(|p| p.update(dt));

    if leveled {
        let candidates = upgrades::available(&state.player, &state.weapons);
        state.offered = upgrades::offer(&mut state.rng, &candidates);
        state.phase = GamePhase::UpgradeSelection;
        log::info!("level {} reached", state.experience.level);
        events.push(GameEvent::LevelUp {
            level: state.experience.level,
        });
    }

    if player_died {
        state.phase = GamePhase::GameOver;
        log::info!(
            "game over at {:.0}s: level {}, {} kills",
            state.elapsed,
            state.experience.level,
            state.kills
        );
        events.push(GameEvent::GameOver);
    }

    events
}
