//! Experience accumulation and leveling
//!
//! Carry-over leveling: excess experience above a threshold rolls into the
//! next level's progress. A single `add_exp` call performs at most one
//! level-up even if the amount crosses several thresholds; the leftover
//! stays banked and the next gem tips it over, so each collection event
//! yields at most one upgrade choice.

use serde::{Deserialize, Serialize};

use crate::consts::{EXP_GROWTH_FACTOR, EXP_TO_LEVEL};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceState {
    pub level: u32,
    pub current_exp: u32,
    pub exp_to_next_level: u32,
    /// Lifetime total, never decreases
    pub total_exp: u64,
}

impl Default for ExperienceState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperienceState {
    pub fn new() -> Self {
        Self {
            level: 1,
            current_exp: 0,
            exp_to_next_level: EXP_TO_LEVEL,
            total_exp: 0,
        }
    }

    /// Add experience. Returns true if this crossed the level threshold
    /// (at most once per call).
    pub fn add_exp(&mut self, amount: u32) -> bool {
        self.current_exp += amount;
        self.total_exp += u64::from(amount);

        if self.current_exp >= self.exp_to_next_level {
            self.level_up();
            return true;
        }
        false
    }

    fn level_up(&mut self) {
        self.current_exp -= self.exp_to_next_level;
        self.level += 1;
        self.exp_to_next_level = (self.exp_to_next_level as f32 * EXP_GROWTH_FACTOR) as u32;
    }

    /// Progress toward the next level in [0, 1)
    pub fn progress(&self) -> f32 {
        self.current_exp as f32 / self.exp_to_next_level as f32
    }
}
