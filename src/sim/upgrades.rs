//! Upgrade catalog and selection
//!
//! A static list of upgrade descriptors, filtered against current state on
//! every level-up: weapon upgrades are offered only for equipped weapons,
//! heals only while the player is below full health. Presentation picks a
//! uniform sample of three filtered candidates (or all, if fewer remain).

use rand::seq::index::sample;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::Player;
use super::weapons::{Weapon, WeaponKind};

/// What selecting an upgrade does
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UpgradeEffect {
    /// Level up the named weapon (if equipped)
    WeaponLevel(WeaponKind),
    /// Raise max health by the amount and refill to the new maximum
    MaxHealth(f32),
    /// Raise movement speed by the amount
    Speed(f32),
    /// Raise gem pickup radius by the amount
    PickupRadius(f32),
    /// Restore health immediately, capped at max
    Heal(f32),
}

/// One card in the upgrade catalog
#[derive(Debug, Clone, Copy)]
pub struct UpgradeDef {
    pub name: &'static str,
    pub description: &'static str,
    pub effect: UpgradeEffect,
}

/// Every upgrade in the game
pub const CATALOG: &[UpgradeDef] = &[
    UpgradeDef {
        name: "Gun Upgrade",
        description: "Upgrade your auto gun. Faster fire or more bullets!",
        effect: UpgradeEffect::WeaponLevel(WeaponKind::AutoGun),
    },
    UpgradeDef {
        name: "Disc Upgrade",
        description: "Upgrade your orbiting disc. More discs or more damage!",
        effect: UpgradeEffect::WeaponLevel(WeaponKind::OrbitingDisc),
    },
    UpgradeDef {
        name: "Max Health +20",
        description: "Increase maximum health by 20. Also fully heals you!",
        effect: UpgradeEffect::MaxHealth(20.0),
    },
    UpgradeDef {
        name: "Max Health +50",
        description: "Massive health boost! Gain 50 max HP and a full heal!",
        effect: UpgradeEffect::MaxHealth(50.0),
    },
    UpgradeDef {
        name: "Movement Speed",
        description: "Move 50 units faster. Dodge zombies more easily!",
        effect: UpgradeEffect::Speed(50.0),
    },
    UpgradeDef {
        name: "Super Speed",
        description: "Major speed boost! Move 100 units faster!",
        effect: UpgradeEffect::Speed(100.0),
    },
    UpgradeDef {
        name: "Magnet",
        description: "Collect XP from further away. Pickup radius +40!",
        effect: UpgradeEffect::PickupRadius(40.0),
    },
    UpgradeDef {
        name: "Super Magnet",
        description: "Massive pickup range! Pull XP from across the screen!",
        effect: UpgradeEffect::PickupRadius(80.0),
    },
    UpgradeDef {
        name: "Health Potion",
        description: "Restore 50 HP immediately. Great for emergencies!",
        effect: UpgradeEffect::Heal(50.0),
    },
    UpgradeDef {
        name: "Full Heal",
        description: "Restore all health to maximum! Complete recovery!",
        effect: UpgradeEffect::Heal(100.0),
    },
];

/// Catalog indices valid for the current player/loadout
pub fn available(player: &Player, weapons: &[Weapon]) -> Vec<usize> {
    CATALOG
        .iter()
        .enumerate()
        .filter(|(_, def)| match def.effect {
            UpgradeEffect::WeaponLevel(kind) => weapons.iter().any(|w| w.kind() == kind),
            UpgradeEffect::Heal(_) => player.health < player.max_health,
            _ => true,
        })
        .map(|(i, _)| i)
        .collect()
}

/// Uniform sample of up to three candidates for presentation
pub fn offer(rng: &mut Pcg32, candidates: &[usize]) -> Vec<usize> {
    let count = candidates.len().min(3);
    sample(rng, candidates.len(), count)
        .into_iter()
        .map(|i| candidates[i])
        .collect()
}

/// Apply the chosen catalog entry to the player or its weapon
pub fn apply(index: usize, player: &mut Player, weapons: &mut [Weapon]) {
    let Some(def) = CATALOG.get(index) else { return };
    match def.effect {
        UpgradeEffect::WeaponLevel(kind) => {
            if let Some(weapon) = weapons.iter_mut().find(|w| w.kind() == kind) {
                weapon.upgrade();
            }
        }
        UpgradeEffect::MaxHealth(amount) => {
            player.max_health += amount;
            player.health = player.max_health;
        }
        UpgradeEffect::Speed(amount) => player.speed += amount,
        UpgradeEffect::PickupRadius(amount) => player.pickup_radius += amount,
        UpgradeEffect::Heal(amount) => player.heal(amount),
    }
}
