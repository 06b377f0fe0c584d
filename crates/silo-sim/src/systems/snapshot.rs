//! Snapshot builder: assembles the complete read-only tick state.
//!
//! Read-only over every pool; it never modifies the simulation.

use silo_core::components::Silo;
use silo_core::enums::{GameMode, GamePhase, MissileKind, MissileState};
use silo_core::events::GameEvent;
use silo_core::state::*;
use silo_core::types::SimTime;

use crate::systems::cities::CityRegistry;
use crate::systems::explosions::ExplosionField;
use crate::systems::missiles::MissileBoard;
use crate::systems::scheduler::AttackScheduler;
use crate::systems::scoring::ScoreBoard;

#[allow(clippy::too_many_arguments)]
pub fn build(
    time: &SimTime,
    phase: GamePhase,
    mode: GameMode,
    credits: u32,
    board: &MissileBoard,
    explosions: &ExplosionField,
    cities: &CityRegistry,
    silos: &[Silo],
    sched: &AttackScheduler,
    score: &ScoreBoard,
    events: Vec<GameEvent>,
) -> GameSnapshot {
    let mut missiles: Vec<MissileView> = Vec::new();
    for (slot, m) in board.abms.iter() {
        missiles.push(MissileView {
            slot,
            kind: m.kind,
            state: m.state,
            x: m.pos().x,
            y: m.pos().y,
            target: m.target,
        });
    }
    for (slot, m) in board.inbound.iter() {
        missiles.push(MissileView {
            slot,
            kind: m.kind,
            state: m.state,
            x: m.pos().x,
            y: m.pos().y,
            target: m.target,
        });
    }

    let smart_bomb_active = board
        .inbound
        .iter()
        .any(|(_, m)| m.kind == MissileKind::SmartBomb && m.state != MissileState::Removed);
    let flier_active = board.flier.as_ref().is_some_and(|f| !f.destroyed);

    GameSnapshot {
        time: *time,
        phase,
        mode,
        credits,
        wave: sched.wave,
        wave_phase: sched.phase,
        score: score.score,
        multiplier: score.multiplier,
        bonus_cities: score.bonus_cities,
        pacing_ceiling: sched.pacing_ceiling,
        cities_lost_this_wave: cities.lost_this_wave,
        missiles,
        flier: board.flier.as_ref().map(|f| FlierView {
            kind: f.kind,
            x: f.pos().x,
            altitude: f.altitude,
        }),
        explosions: explosions
            .iter()
            .map(|(slot, e)| ExplosionView {
                slot,
                center: e.center,
                radius: e.radius,
                phase: e.phase,
            })
            .collect(),
        cities: cities
            .cities()
            .iter()
            .enumerate()
            .map(|(index, c)| CityView {
                index,
                x: c.x,
                alive: c.alive,
            })
            .collect(),
        silos: silos
            .iter()
            .map(|s| SiloView {
                id: s.id,
                x: s.x,
                ammo: s.ammo,
            })
            .collect(),
        smart_bomb_active,
        flier_active,
        explosions_dropped: explosions.dropped,
        events,
    }
}
