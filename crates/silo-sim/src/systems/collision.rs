//! Collision detector: inbound missiles against blast octagons.
//!
//! Runs every 5th tick only, a deliberate load-shedding and
//! timing-authenticity choice, aligned with the explosion group cycle.
//! Slots are swept in ascending id order on both sides so a run is
//! reproducible; the first containing octagon wins and the award is
//! never duplicated. ABMs are never tested (friendly blasts cannot
//! destroy them), and nothing below the ground immunity line is
//! tested.

use silo_core::constants::COLLISION_FLOOR_ALTITUDE;
use silo_core::enums::MissileState;
use silo_core::events::GameEvent;
use silo_core::geom;

use crate::systems::explosions::ExplosionField;
use crate::systems::missiles::MissileBoard;
use crate::systems::scoring::ScoreBoard;

/// Sweep every in-flight inbound missile and the flier against every
/// occupied explosion slot.
pub fn run(
    board: &mut MissileBoard,
    explosions: &ExplosionField,
    score: &mut ScoreBoard,
    events: &mut Vec<GameEvent>,
) {
    for (slot, missile) in board.inbound.iter_mut() {
        if missile.state != MissileState::InFlight {
            continue;
        }
        let pos = missile.pos();
        if pos.y < COLLISION_FLOOR_ALTITUDE {
            continue;
        }
        for (_explosion_slot, explosion) in explosions.iter() {
            if geom::point_in_octagon(pos, explosion.center, explosion.radius) {
                missile.state = MissileState::Detonating;
                missile.intercepted = true;
                let points = score.award_kill(missile.kind, events);
                events.push(GameEvent::MissileKilled {
                    kind: missile.kind,
                    slot,
                    points,
                });
                break;
            }
        }
    }

    let Some(flier) = board.flier.as_mut() else {
        return;
    };
    if flier.destroyed {
        return;
    }
    let pos = flier.pos();
    for (_explosion_slot, explosion) in explosions.iter() {
        if geom::point_in_octagon(pos, explosion.center, explosion.radius) {
            flier.destroyed = true;
            let points = score.award_flier(events);
            events.push(GameEvent::FlierKilled {
                kind: flier.kind,
                points,
            });
            break;
        }
    }
}
