//! Attack scheduler: the per-wave state machine, pacing gate, and
//! spawn decisions.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use silo_core::components::Silo;
use silo_core::constants::*;
use silo_core::enums::{FlierKind, MissileKind, WavePhase};
use silo_core::events::GameEvent;
use silo_core::types::Point;

use crate::systems::cities::CityRegistry;
use crate::systems::explosions::ExplosionField;
use crate::systems::missiles::{self, MissileBoard};
use crate::systems::scoring::ScoreBoard;
use crate::targeting::{self, TargetingConfig};

/// Wave state machine and dispatch bookkeeping.
#[derive(Debug, Clone)]
pub struct AttackScheduler {
    pub phase: WavePhase,
    /// 1-indexed wave number.
    pub wave: u32,
    /// No new attacker enters while any inbound missile is at or above
    /// this altitude.
    pub pacing_ceiling: i32,
    /// Attackers left to dispatch this wave.
    pub budget: u32,
    /// Ticks until the next flier may enter.
    pub flier_wait: u32,
}

impl AttackScheduler {
    pub fn new(start_wave: u32) -> Self {
        Self {
            phase: WavePhase::WaveStart,
            wave: start_wave.max(1),
            pacing_ceiling: 0,
            budget: 0,
            flier_wait: 0,
        }
    }

    /// ICBM speed for the current wave.
    pub fn wave_speed(&self) -> i32 {
        let index = (self.wave as usize - 1).min(WAVE_SPEEDS.len() - 1);
        WAVE_SPEEDS[index]
    }

    /// `max(180, 202 - 2 * wave)`.
    pub fn pacing_ceiling_for(wave: u32) -> i32 {
        (PACE_BASE - PACE_STEP * wave as i32).max(PACE_FLOOR)
    }

    /// `min(8 + 2 * wave, 30)`.
    pub fn budget_for(wave: u32) -> u32 {
        (BUDGET_BASE + BUDGET_PER_WAVE * wave).min(BUDGET_CAP)
    }
}

/// Drive the wave state machine for one tick (IRQ 0 sub-step).
#[allow(clippy::too_many_arguments)]
pub fn run(
    sched: &mut AttackScheduler,
    board: &mut MissileBoard,
    explosions: &mut ExplosionField,
    cities: &mut CityRegistry,
    silos: &mut [Silo],
    score: &mut ScoreBoard,
    cfg: &TargetingConfig,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    match sched.phase {
        WavePhase::WaveStart => {
            start_wave(sched, board, explosions, cities, silos, score, cfg, events)
        }
        WavePhase::Attacking => attack(sched, board, cities, silos, cfg, rng, events),
        WavePhase::WaveEnding => end_wave(sched, cities, silos, score, events),
        WavePhase::WaveComplete => {
            sched.wave += 1;
            sched.phase = WavePhase::WaveStart;
        }
    }
}

/// Evaluate the end-of-wave condition. Called after event routing so
/// the tick's detonations are already reflected in the pools.
pub fn check_wave_end(
    sched: &mut AttackScheduler,
    board: &MissileBoard,
    explosions: &ExplosionField,
    cities: &CityRegistry,
    silos: &[Silo],
) {
    if sched.phase != WavePhase::Attacking {
        return;
    }
    // Forced end: three cities down and every silo dry is an
    // unwinnable board; end immediately rather than letting the rest
    // of the wave play out in silence.
    let forced = cities.lost_this_wave >= MAX_CITY_LOSSES_PER_WAVE
        && silos.iter().all(|s| s.ammo == 0);
    let resolved = sched.budget == 0
        && board.inbound.occupied_count() == 0
        && board.flier.is_none()
        && explosions.occupied_count() == 0;
    if forced || resolved {
        if forced {
            log::debug!("wave {} force-ended: 3 cities down, silos dry", sched.wave);
        }
        sched.phase = WavePhase::WaveEnding;
    }
}

#[allow(clippy::too_many_arguments)]
fn start_wave(
    sched: &mut AttackScheduler,
    board: &mut MissileBoard,
    explosions: &mut ExplosionField,
    cities: &mut CityRegistry,
    silos: &mut [Silo],
    score: &mut ScoreBoard,
    cfg: &TargetingConfig,
    events: &mut Vec<GameEvent>,
) {
    for silo in silos.iter_mut() {
        silo.ammo = SILO_CAPACITY;
    }
    cities.start_wave(score, events);
    board.reset();
    explosions.reset();
    sched.pacing_ceiling = AttackScheduler::pacing_ceiling_for(sched.wave);
    sched.budget = AttackScheduler::budget_for(sched.wave);
    sched.flier_wait = cfg.flier_cooldown(sched.wave);
    score.set_wave(sched.wave);
    log::debug!(
        "wave {} start: ceiling {}, budget {}",
        sched.wave,
        sched.pacing_ceiling,
        sched.budget
    );
    events.push(GameEvent::WaveStarted {
        wave: sched.wave,
        multiplier: score.multiplier,
    });
    sched.phase = WavePhase::Attacking;
}

/// One Attacking-phase tick: at most one new attacker (or flier
/// munition) enters, and only through the pacing gate.
fn attack(
    sched: &mut AttackScheduler,
    board: &mut MissileBoard,
    cities: &CityRegistry,
    silos: &[Silo],
    cfg: &TargetingConfig,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    if board.flier.is_none() && sched.flier_wait > 0 {
        sched.flier_wait -= 1;
    }
    if sched.budget == 0 {
        return;
    }
    let gate_open = board
        .highest_inbound_altitude()
        .is_none_or(|alt| alt < sched.pacing_ceiling);
    if !gate_open {
        return;
    }

    // Flier munition release takes priority over fresh entries.
    let release_due = board
        .flier
        .as_ref()
        .is_some_and(|f| !f.destroyed && f.fire_cooldown == 0);
    if release_due && board.inbound_load() < MAX_INBOUND_SLOTS && board.inbound_slot_free() {
        let origin = board.flier.as_ref().map(|f| f.pos()).unwrap_or_default();
        let target = targeting::pick_ground_target(rng, cities, silos);
        if missiles::spawn_inbound(
            board,
            MissileKind::Icbm,
            origin,
            target,
            sched.wave_speed(),
            false,
            events,
        ) {
            sched.budget -= 1;
            if let Some(flier) = board.flier.as_mut() {
                flier.fire_cooldown = cfg.flier_fire_cooldown;
            }
        }
        return;
    }

    // Flier entrance.
    if cfg.flier_allowed(sched.wave)
        && board.flier.is_none()
        && sched.flier_wait == 0
        && board.inbound_load() < MAX_INBOUND_SLOTS
    {
        let kind = if rng.gen_bool(0.5) {
            FlierKind::Bomber
        } else {
            FlierKind::Satellite
        };
        let dir = if rng.gen_bool(0.5) { 1 } else { -1 };
        missiles::spawn_flier(board, kind, dir, cfg.flier_fire_cooldown, events);
        sched.budget -= 1;
        sched.flier_wait = cfg.flier_cooldown(sched.wave);
        return;
    }

    // Smart bomb or ICBM entrance from the top row.
    let entry = Point::new(rng.gen_range(0..PLAYFIELD_WIDTH), ENTRY_ALTITUDE);
    let smart_possible = sched.wave >= cfg.smart_bomb_min_wave
        && board.smart_bomb_count() < MAX_SMART_BOMBS
        && board.inbound_load() + SMART_BOMB_WEIGHT <= MAX_INBOUND_SLOTS
        && board.inbound_slot_free()
        && sched.budget >= SMART_BOMB_WEIGHT as u32;
    if smart_possible && rng.gen_range(0..100u32) < cfg.smart_bomb_share(sched.wave) {
        let target = targeting::pick_ground_target(rng, cities, silos);
        if missiles::spawn_inbound(
            board,
            MissileKind::SmartBomb,
            entry,
            target,
            sched.wave_speed(),
            false,
            events,
        ) {
            sched.budget -= SMART_BOMB_WEIGHT as u32;
        }
        return;
    }
    if board.inbound_load() < MAX_INBOUND_SLOTS && board.inbound_slot_free() {
        let can_split = rng.gen_range(0..100u32) < cfg.mirv_share(sched.wave);
        let target = targeting::pick_ground_target(rng, cities, silos);
        if missiles::spawn_inbound(
            board,
            MissileKind::Icbm,
            entry,
            target,
            sched.wave_speed(),
            can_split,
            events,
        ) {
            sched.budget -= 1;
        }
    }
}

fn end_wave(
    sched: &mut AttackScheduler,
    cities: &CityRegistry,
    silos: &[Silo],
    score: &mut ScoreBoard,
    events: &mut Vec<GameEvent>,
) {
    let unfired: u32 = silos.iter().map(|s| s.ammo).sum();
    let surviving = cities.alive_count();
    let bonus = score.wave_bonus(surviving, unfired, events);
    log::debug!(
        "wave {} complete: {} cities, {} ABMs, bonus {}",
        sched.wave,
        surviving,
        unfired,
        bonus
    );
    events.push(GameEvent::WaveEnded {
        wave: sched.wave,
        bonus,
    });
    sched.phase = WavePhase::WaveComplete;
}
