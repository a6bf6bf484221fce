use serde::{Deserialize, Serialize};

use crate::model::constants::{
    DEFAULT_RATING, MULLIGAN_CAP, PROVISIONAL_K, PROVISIONAL_RACES, STANDARD_K
};

/// Engine tuning knobs, fixed for the duration of one run.
///
/// The engine does not validate K-factors or the mulligan cap; callers
/// own those bounds. The decay offset is the one value clamped here,
/// since an out-of-range offset would defeat the retention clamps.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Seed rating for riders the baseline estimator cannot place.
    pub base_rating: i32,
    /// Sensitivity factor for established riders.
    pub standard_k: f64,
    /// Elevated sensitivity factor during the provisional period.
    pub provisional_k: f64,
    /// Length of the provisional period, in recorded races (debut inclusive).
    pub provisional_races: u32,
    /// Seed new riders from the ratings of peers in the same race.
    pub bootstrap_new_entrants: bool,
    /// Dampen catastrophic losses for established leaders.
    pub loss_dampening_enabled: bool,
    /// Lifetime per-rider cap on loss dampenings.
    pub loss_dampening_cap: u32,
    /// Regress ratings toward the pool mean at season boundaries.
    pub season_decay_enabled: bool,
    /// User offset added to the computed retention rate, in [-1.0, 1.0].
    pub decay_offset: f64
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            base_rating: DEFAULT_RATING,
            standard_k: STANDARD_K,
            provisional_k: PROVISIONAL_K,
            provisional_races: PROVISIONAL_RACES,
            bootstrap_new_entrants: false,
            loss_dampening_enabled: false,
            loss_dampening_cap: MULLIGAN_CAP,
            season_decay_enabled: false,
            decay_offset: 0.0
        }
    }
}

impl EngineConfig {
    /// Clamps the decay offset into its documented range. Called once at
    /// run entry.
    pub fn validated(mut self) -> EngineConfig {
        self.decay_offset = self.decay_offset.clamp(-1.0, 1.0);
        self
    }
}
