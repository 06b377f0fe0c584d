//! Attacker mix and ground-target selection policy.
//!
//! The reference material describes the higher-wave attacker mix only
//! qualitatively, so the exact shares live here as configuration with
//! documented defaults. Every roll draws from the engine's seeded RNG;
//! there is no other source of randomness in the simulation.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use silo_core::components::Silo;
use silo_core::constants::MAX_CITY_LOSSES_PER_WAVE;
use silo_core::types::Point;

use crate::systems::cities::CityRegistry;

/// Wave-dependent attack policy knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetingConfig {
    /// First wave on which smart bombs may appear.
    pub smart_bomb_min_wave: u32,
    /// Smart-bomb spawn share grows this many percent per wave past
    /// the minimum.
    pub smart_bomb_share_per_wave: u32,
    /// Smart-bomb spawn share ceiling (percent).
    pub smart_bomb_share_cap: u32,
    /// MIRV eligibility share grows this many percent per wave past
    /// wave 1.
    pub mirv_share_per_wave: u32,
    /// MIRV eligibility share ceiling (percent).
    pub mirv_share_cap: u32,
    /// First wave on which a flier may appear.
    pub flier_min_wave: u32,
    /// Ticks between fliers at wave 0, shrinking per wave.
    pub flier_cooldown_base: u32,
    /// Cooldown reduction per wave.
    pub flier_cooldown_step: u32,
    /// Cooldown floor.
    pub flier_cooldown_floor: u32,
    /// Ticks between munition releases from an active flier.
    pub flier_fire_cooldown: u32,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            smart_bomb_min_wave: 5,
            smart_bomb_share_per_wave: 10,
            smart_bomb_share_cap: 40,
            mirv_share_per_wave: 25,
            mirv_share_cap: 75,
            flier_min_wave: 2,
            flier_cooldown_base: 600,
            flier_cooldown_step: 30,
            flier_cooldown_floor: 240,
            flier_fire_cooldown: 90,
        }
    }
}

impl TargetingConfig {
    /// Percent of eligible spawns that become smart bombs.
    pub fn smart_bomb_share(&self, wave: u32) -> u32 {
        if wave < self.smart_bomb_min_wave {
            return 0;
        }
        let steps = wave - self.smart_bomb_min_wave + 1;
        (self.smart_bomb_share_per_wave * steps).min(self.smart_bomb_share_cap)
    }

    /// Percent of ICBM spawns that are split-eligible.
    pub fn mirv_share(&self, wave: u32) -> u32 {
        let steps = wave.saturating_sub(1);
        (self.mirv_share_per_wave * steps).min(self.mirv_share_cap)
    }

    pub fn flier_allowed(&self, wave: u32) -> bool {
        wave >= self.flier_min_wave
    }

    /// Ticks to wait before the next flier may enter.
    pub fn flier_cooldown(&self, wave: u32) -> u32 {
        self.flier_cooldown_base
            .saturating_sub(self.flier_cooldown_step * wave)
            .max(self.flier_cooldown_floor)
    }
}

/// Pick one ground target among live cities and the silos.
///
/// Once the per-wave city-loss cap is reached, live cities are excluded
/// so the remaining attackers cannot line up a fourth kill.
pub fn pick_ground_target(rng: &mut ChaCha8Rng, cities: &CityRegistry, silos: &[Silo]) -> Point {
    let mut candidates: Vec<Point> = Vec::new();
    if cities.lost_this_wave < MAX_CITY_LOSSES_PER_WAVE {
        candidates.extend(cities.alive_positions());
    }
    candidates.extend(silos.iter().map(Silo::pos));
    candidates[rng.gen_range(0..candidates.len())]
}

/// Pick `n` ground targets (independent draws).
pub fn pick_ground_targets(
    rng: &mut ChaCha8Rng,
    cities: &CityRegistry,
    silos: &[Silo],
    n: usize,
) -> Vec<Point> {
    (0..n).map(|_| pick_ground_target(rng, cities, silos)).collect()
}
