//! Detonation routing: turns `Detonating` missiles into explosions,
//! city damage, and freed slots.
//!
//! Runs after the collision sweep so arrivals and intercepts from the
//! same tick resolve together. Uses a release buffer so slots are
//! freed only after the sweep over the table.

use silo_core::enums::MissileState;
use silo_core::events::GameEvent;

use crate::systems::cities::CityRegistry;
use crate::systems::explosions::ExplosionField;
use crate::systems::missiles::MissileBoard;

pub fn run(
    board: &mut MissileBoard,
    explosions: &mut ExplosionField,
    cities: &mut CityRegistry,
    events: &mut Vec<GameEvent>,
) {
    let mut release: Vec<usize> = Vec::new();

    for (slot, missile) in board.abms.iter_mut() {
        if missile.state != MissileState::Detonating {
            continue;
        }
        let pos = missile.pos();
        explosions.spawn(pos, events);
        events.push(GameEvent::MissileDetonated {
            kind: missile.kind,
            slot,
            x: pos.x,
            y: pos.y,
        });
        missile.state = MissileState::Removed;
        release.push(slot);
    }
    for slot in release.drain(..) {
        board.abms.release(slot);
    }

    for (slot, missile) in board.inbound.iter_mut() {
        if missile.state != MissileState::Detonating {
            continue;
        }
        let pos = missile.pos();
        explosions.spawn(pos, events);
        if !missile.intercepted {
            // An unintercepted arrival is a ground impact.
            events.push(GameEvent::MissileDetonated {
                kind: missile.kind,
                slot,
                x: pos.x,
                y: pos.y,
            });
            if let Some(index) = cities.destroy_near(pos) {
                events.push(GameEvent::CityDestroyed { index });
            }
        }
        missile.state = MissileState::Removed;
        release.push(slot);
    }
    for slot in release.drain(..) {
        board.inbound.release(slot);
    }

    if board.flier.as_ref().is_some_and(|f| f.destroyed) {
        if let Some(flier) = board.flier.take() {
            explosions.spawn(flier.pos(), events);
        }
    }
}
