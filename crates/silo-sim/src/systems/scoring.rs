//! Score, multiplier, and bonus-city stock.

use silo_core::constants::*;
use silo_core::enums::{GameMode, MissileKind};
use silo_core::events::GameEvent;

/// Running score state owned by the engine.
#[derive(Debug, Clone)]
pub struct ScoreBoard {
    pub score: u64,
    /// Current wave multiplier, 1..=6.
    pub multiplier: u32,
    /// Banked bonus cities. A single 8-bit counter that wraps at 256,
    /// as the original hardware stored it.
    pub bonus_cities: u8,
    pub mode: GameMode,
    /// Score interval banking one bonus city; 0 disables banking.
    pub bonus_threshold: u64,
    next_bonus_at: u64,
}

impl ScoreBoard {
    pub fn new(mode: GameMode, bonus_threshold: u64) -> Self {
        Self {
            score: 0,
            multiplier: 1,
            bonus_cities: 0,
            mode,
            bonus_threshold,
            next_bonus_at: bonus_threshold,
        }
    }

    /// Multiplier for a 1-indexed wave: up every second wave boundary,
    /// saturating at 6 from wave 11.
    pub fn multiplier_for_wave(wave: u32) -> u32 {
        ((wave + 1) / 2).clamp(1, MAX_MULTIPLIER)
    }

    pub fn set_wave(&mut self, wave: u32) {
        self.multiplier = Self::multiplier_for_wave(wave);
    }

    /// Pre-multiplier kill value for an inbound missile kind.
    pub fn kill_value(kind: MissileKind) -> u32 {
        match kind {
            MissileKind::Icbm | MissileKind::MirvChild => POINTS_ICBM,
            MissileKind::SmartBomb => POINTS_SMART_BOMB,
            // ABMs are never collision targets; a zero value keeps the
            // match total.
            MissileKind::Abm => 0,
        }
    }

    /// Award a collision kill. Returns the multiplied points.
    pub fn award_kill(&mut self, kind: MissileKind, events: &mut Vec<GameEvent>) -> u32 {
        let points = Self::kill_value(kind) * self.multiplier;
        self.add(points as u64, events);
        points
    }

    /// Award a flier kill. Returns the multiplied points.
    pub fn award_flier(&mut self, events: &mut Vec<GameEvent>) -> u32 {
        let points = POINTS_FLIER * self.multiplier;
        self.add(points as u64, events);
        points
    }

    /// Award the end-of-wave bonus. Returns the multiplied total.
    pub fn wave_bonus(
        &mut self,
        surviving_cities: u32,
        unfired_abms: u32,
        events: &mut Vec<GameEvent>,
    ) -> u64 {
        let base = surviving_cities * POINTS_SURVIVING_CITY + unfired_abms * POINTS_UNFIRED_ABM;
        let bonus = (base * self.multiplier) as u64;
        self.add(bonus, events);
        bonus
    }

    /// Add raw points and bank a bonus city for every threshold
    /// boundary crossed (marathon mode only).
    pub fn add(&mut self, points: u64, events: &mut Vec<GameEvent>) {
        self.score += points;
        if self.mode == GameMode::Tournament || self.bonus_threshold == 0 {
            return;
        }
        while self.score >= self.next_bonus_at {
            self.bonus_cities = self.bonus_cities.wrapping_add(1);
            self.next_bonus_at += self.bonus_threshold;
            events.push(GameEvent::BonusCityBanked);
        }
    }

    /// Take one unit of stock for a city rebuild, if any is banked.
    pub fn consume_bonus_city(&mut self) -> bool {
        if self.bonus_cities > 0 {
            self.bonus_cities -= 1;
            true
        } else {
            false
        }
    }
}
