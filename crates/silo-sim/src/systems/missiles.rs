//! Missile tables and per-kind state machines.
//!
//! Owns the two 8-slot hardware tables (ABMs, inbound threats) and the
//! single flier slot. Advancement is pure fixed-point kinematics; the
//! kind tag selects the extra behavior (smart-bomb evasion, MIRV
//! splits, flier crossing).

use rand_chacha::ChaCha8Rng;

use silo_core::components::{Flier, Missile, Silo};
use silo_core::constants::*;
use silo_core::enums::{FlierKind, MissileKind, MissileState, SiloId};
use silo_core::events::{FireRejection, GameEvent};
use silo_core::fixed::Fx;
use silo_core::geom;
use silo_core::slot::SlotPool;
use silo_core::types::Point;

use crate::systems::cities::CityRegistry;
use crate::targeting;

/// The engine-owned missile tables.
#[derive(Debug, Clone)]
pub struct MissileBoard {
    pub abms: SlotPool<Missile>,
    pub inbound: SlotPool<Missile>,
    pub flier: Option<Flier>,
}

impl MissileBoard {
    pub fn new() -> Self {
        Self {
            abms: SlotPool::new(MAX_ABM_SLOTS),
            inbound: SlotPool::new(MAX_INBOUND_SLOTS),
            flier: None,
        }
    }

    /// Clear all tables (wave reset).
    pub fn reset(&mut self) {
        self.abms.clear();
        self.inbound.clear();
        self.flier = None;
    }

    pub fn smart_bomb_count(&self) -> usize {
        self.inbound
            .iter()
            .filter(|(_, m)| m.kind == MissileKind::SmartBomb)
            .count()
    }

    /// Weighted inbound occupancy: ICBMs and MIRV children count 1,
    /// smart bombs 2, an active flier 1. The spawn budget ceiling is
    /// `MAX_INBOUND_SLOTS` against this load.
    pub fn inbound_load(&self) -> usize {
        let missiles: usize = self
            .inbound
            .iter()
            .map(|(_, m)| match m.kind {
                MissileKind::SmartBomb => SMART_BOMB_WEIGHT,
                _ => 1,
            })
            .sum();
        missiles + usize::from(self.flier.is_some())
    }

    pub fn inbound_slot_free(&self) -> bool {
        self.inbound.occupied_count() < MAX_INBOUND_SLOTS
    }

    /// Altitude of the highest in-flight inbound missile, if any.
    pub fn highest_inbound_altitude(&self) -> Option<i32> {
        self.inbound.iter().map(|(_, m)| m.altitude()).max()
    }
}

impl Default for MissileBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Fire an ABM from `silo_id` toward `target`.
///
/// The ammo decrement and the slot claim happen together; a rejected
/// command is surfaced as a feedback event, never an error.
pub fn fire_abm(
    board: &mut MissileBoard,
    silos: &mut [Silo],
    silo_id: SiloId,
    target: Point,
    events: &mut Vec<GameEvent>,
) -> bool {
    if board.abms.occupied_count() >= MAX_ABM_SLOTS {
        events.push(GameEvent::FireRejected {
            silo: silo_id,
            reason: FireRejection::SalvoFull,
        });
        return false;
    }
    let silo = &mut silos[silo_id.index()];
    if silo.ammo == 0 {
        events.push(GameEvent::FireRejected {
            silo: silo_id,
            reason: FireRejection::NoAmmo,
        });
        return false;
    }
    silo.ammo -= 1;
    let missile = Missile::launch(
        MissileKind::Abm,
        silo.pos(),
        target,
        silo_id.abm_speed(),
        Some(silo_id),
        false,
    );
    match board.abms.insert(missile) {
        Ok(slot) => {
            events.push(GameEvent::MissileSpawned {
                kind: MissileKind::Abm,
                slot,
            });
            true
        }
        Err(_) => {
            silo.ammo += 1;
            events.push(GameEvent::FireRejected {
                silo: silo_id,
                reason: FireRejection::SalvoFull,
            });
            false
        }
    }
}

/// Place an inbound missile (ICBM, smart bomb, or flier munition).
pub fn spawn_inbound(
    board: &mut MissileBoard,
    kind: MissileKind,
    origin: Point,
    target: Point,
    speed: i32,
    can_split: bool,
    events: &mut Vec<GameEvent>,
) -> bool {
    let missile = Missile::launch(kind, origin, target, speed, None, can_split);
    match board.inbound.insert(missile) {
        Ok(slot) => {
            events.push(GameEvent::MissileSpawned { kind, slot });
            true
        }
        Err(_) => false,
    }
}

/// Put a flier on the field, entering at the edge matching `dir`.
pub fn spawn_flier(
    board: &mut MissileBoard,
    kind: FlierKind,
    dir: i32,
    fire_cooldown: u32,
    events: &mut Vec<GameEvent>,
) {
    let start_x = if dir > 0 { 0 } else { PLAYFIELD_WIDTH - 1 };
    board.flier = Some(Flier {
        kind,
        pos_x: Fx::from_px(start_x),
        altitude: FLIER_ALTITUDE,
        dir,
        fire_cooldown,
        destroyed: false,
    });
    events.push(GameEvent::FlierSpawned { kind });
}

/// Advance every missile and the flier by one frame.
pub fn run(board: &mut MissileBoard, explosion_centers: &[Point], events: &mut Vec<GameEvent>) {
    for (_slot, missile) in board.abms.iter_mut() {
        advance(missile, explosion_centers);
    }
    for (_slot, missile) in board.inbound.iter_mut() {
        advance(missile, explosion_centers);
    }
    advance_flier(board, events);
}

/// One frame of kinematics for a single missile.
fn advance(missile: &mut Missile, explosion_centers: &[Point]) {
    match missile.state {
        MissileState::Spawned => missile.state = MissileState::InFlight,
        MissileState::InFlight => {}
        MissileState::Detonating | MissileState::Removed => return,
    }
    missile.prev_altitude = missile.altitude();
    if missile.inc_x.raw() == 0 && missile.inc_y.raw() == 0 {
        // Degenerate shot (target == origin): arrive immediately.
        missile.state = MissileState::Detonating;
        return;
    }
    let (step_x, step_y) = if missile.kind == MissileKind::SmartBomb {
        evasion_steps(missile, explosion_centers)
    } else {
        (missile.inc_x, missile.inc_y)
    };
    missile.pos_x += step_x;
    missile.pos_y += step_y;
    if geom::passed_target(missile.pos(), missile.target, missile.inc_x, missile.inc_y) {
        missile.state = MissileState::Detonating;
    }
}

/// Smart-bomb steering: keep the launch increment, but zero any axis
/// component that would close on the nearest explosion inside the
/// lookahead range. Net progress toward the target continues on the
/// other axis; the arrival test still uses the unmasked increments.
fn evasion_steps(missile: &Missile, centers: &[Point]) -> (Fx, Fx) {
    let pos = missile.pos();
    let mut nearest: Option<(i32, Point)> = None;
    for &center in centers {
        let d = geom::distance_approx(pos, center);
        if d <= SMART_BOMB_SCAN_RANGE && nearest.is_none_or(|(best, _)| d < best) {
            nearest = Some((d, center));
        }
    }
    let Some((_, threat)) = nearest else {
        return (missile.inc_x, missile.inc_y);
    };
    let mut step_x = missile.inc_x;
    let mut step_y = missile.inc_y;
    let dx = threat.x - pos.x;
    let dy = threat.y - pos.y;
    if dx != 0 && (step_x.raw() > 0) == (dx > 0) {
        step_x = Fx::ZERO;
    }
    if dy != 0 && (step_y.raw() > 0) == (dy > 0) {
        step_y = Fx::ZERO;
    }
    (step_x, step_y)
}

fn advance_flier(board: &mut MissileBoard, events: &mut Vec<GameEvent>) {
    let Some(flier) = board.flier.as_mut() else {
        return;
    };
    if flier.destroyed {
        return;
    }
    flier.pos_x += Fx::from_px(FLIER_SPEED * flier.dir);
    if flier.fire_cooldown > 0 {
        flier.fire_cooldown -= 1;
    }
    let x = flier.pos_x.to_px();
    if x < 0 || x >= PLAYFIELD_WIDTH {
        events.push(GameEvent::FlierExited { kind: flier.kind });
        board.flier = None;
    }
}

/// Evaluate the MIRV split condition for every split-eligible ICBM.
///
/// A parent splits when its current or previous altitude lies in the
/// split band, no other inbound missile is above the band, a slot is
/// free, and wave budget remains. Children launch from the parent's
/// position toward fresh policy targets at the parent's speed; the
/// parent keeps flying and never splits again. A split that would
/// exceed capacity or budget is truncated.
pub fn mirv_split(
    board: &mut MissileBoard,
    budget: &mut u32,
    cities: &CityRegistry,
    silos: &[Silo],
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    let altitudes: Vec<(usize, i32)> = board
        .inbound
        .iter()
        .map(|(slot, m)| (slot, m.altitude()))
        .collect();

    let in_band = |alt: i32| (MIRV_BAND_LOW..=MIRV_BAND_HIGH).contains(&alt);
    let candidates: Vec<usize> = board
        .inbound
        .iter()
        .filter(|(_, m)| {
            m.kind == MissileKind::Icbm
                && m.state == MissileState::InFlight
                && m.can_split
                && !m.has_split
                && (in_band(m.altitude()) || in_band(m.prev_altitude))
        })
        .map(|(slot, _)| slot)
        .collect();

    for slot in candidates {
        if *budget == 0 {
            break;
        }
        if altitudes
            .iter()
            .any(|&(other, alt)| other != slot && alt > MIRV_BAND_HIGH)
        {
            continue;
        }
        // Weighted headroom, never larger than the free slot count.
        let headroom = MAX_INBOUND_SLOTS.saturating_sub(board.inbound_load());
        let count = MIRV_MAX_CHILDREN.min(headroom).min(*budget as usize);
        if count == 0 {
            continue;
        }
        let (pos, speed) = match board.inbound.get_mut(slot) {
            Some(parent) => {
                parent.has_split = true;
                (parent.pos(), parent.speed)
            }
            None => continue,
        };
        let targets = targeting::pick_ground_targets(rng, cities, silos, count);
        let mut children = 0;
        for target in targets {
            let child = Missile::launch(MissileKind::MirvChild, pos, target, speed, None, false);
            if let Ok(child_slot) = board.inbound.insert(child) {
                events.push(GameEvent::MissileSpawned {
                    kind: MissileKind::MirvChild,
                    slot: child_slot,
                });
                *budget -= 1;
                children += 1;
            }
        }
        if children > 0 {
            events.push(GameEvent::MirvSplit { slot, children });
        }
    }
}
