//! Explosion field: 20 slots in 5 groups of 4.
//!
//! Exactly one group advances per tick, selected round-robin by
//! `tick mod 5`, so the whole population cycles in 5 ticks. This is a
//! hard timing contract: collapsing it into update-everything-per-tick
//! would change collision windows.

use silo_core::components::Explosion;
use silo_core::constants::*;
use silo_core::enums::ExplosionPhase;
use silo_core::events::GameEvent;
use silo_core::slot::SlotPool;
use silo_core::types::Point;

/// The engine-owned explosion pool plus starvation accounting.
#[derive(Debug, Clone)]
pub struct ExplosionField {
    pool: SlotPool<Explosion>,
    /// Cumulative detonations dropped because all 20 slots were busy.
    pub dropped: u64,
}

impl ExplosionField {
    pub fn new() -> Self {
        Self {
            pool: SlotPool::new(MAX_EXPLOSION_SLOTS),
            dropped: 0,
        }
    }

    /// Clear every slot (wave reset). The starvation counter persists.
    pub fn reset(&mut self) {
        self.pool.clear();
    }

    pub fn occupied_count(&self) -> usize {
        self.pool.occupied_count()
    }

    /// Occupied slots in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Explosion)> {
        self.pool.iter()
    }

    /// Centers of all occupied slots (smart bombs scan these).
    pub fn centers(&self) -> Vec<Point> {
        self.pool.iter().map(|(_, e)| e.center).collect()
    }

    /// Request a new explosion at `center`.
    ///
    /// With all 20 slots occupied the request is dropped (the impact
    /// simply does not explode, matching the hardware's slot
    /// starvation); the drop is counted and surfaced as an event.
    pub fn spawn(&mut self, center: Point, events: &mut Vec<GameEvent>) {
        let explosion = Explosion {
            center,
            radius: 0,
            phase: ExplosionPhase::Growing,
            group: 0,
            hold_updates: 0,
        };
        match self.pool.insert(explosion) {
            Ok(slot) => {
                if let Some(e) = self.pool.get_mut(slot) {
                    e.group = slot / EXPLOSIONS_PER_GROUP;
                }
                events.push(GameEvent::ExplosionSpawned {
                    slot,
                    x: center.x,
                    y: center.y,
                });
            }
            Err(_) => {
                self.dropped += 1;
                log::debug!("explosion slot starvation at ({}, {})", center.x, center.y);
                events.push(GameEvent::ExplosionDropped {
                    x: center.x,
                    y: center.y,
                });
            }
        }
    }

    /// Advance the group scheduled for this tick.
    pub fn run(&mut self, tick: u64, events: &mut Vec<GameEvent>) {
        let group = (tick % EXPLOSION_GROUPS as u64) as usize;
        let start = group * EXPLOSIONS_PER_GROUP;
        for slot in start..start + EXPLOSIONS_PER_GROUP {
            let collapsed = match self.pool.get_mut(slot) {
                Some(explosion) => {
                    step(explosion);
                    explosion.phase == ExplosionPhase::Shrinking && explosion.radius <= 0
                }
                None => false,
            };
            if collapsed {
                self.pool.release(slot);
                events.push(GameEvent::ExplosionEnded { slot });
            }
        }
    }
}

impl Default for ExplosionField {
    fn default() -> Self {
        Self::new()
    }
}

/// One group-update step of the growth state machine.
fn step(explosion: &mut Explosion) {
    match explosion.phase {
        ExplosionPhase::Growing => {
            explosion.radius += EXPLOSION_GROWTH_STEP;
            if explosion.radius >= EXPLOSION_MAX_RADIUS {
                explosion.radius = EXPLOSION_MAX_RADIUS;
                explosion.phase = ExplosionPhase::Holding;
                explosion.hold_updates = 0;
            }
        }
        ExplosionPhase::Holding => {
            explosion.hold_updates += 1;
            if explosion.hold_updates >= EXPLOSION_HOLD_UPDATES {
                explosion.phase = ExplosionPhase::Shrinking;
            }
        }
        ExplosionPhase::Shrinking => {
            explosion.radius = (explosion.radius - EXPLOSION_SHRINK_STEP).max(0);
        }
    }
}
