//! Entity records stored in the simulation's slot pools.
//!
//! These are plain data structs; the per-tick update rules live in the
//! `silo-sim` systems.

use serde::{Deserialize, Serialize};

use crate::enums::{ExplosionPhase, FlierKind, MissileKind, MissileState, SiloId};
use crate::fixed::Fx;
use crate::geom;
use crate::types::Point;

/// A missile in the ABM or inbound table.
///
/// Position and the per-frame increment vector are 8.8 fixed point;
/// the increment is computed once at launch and never changes except
/// for smart-bomb evasion, which masks it axis by axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Missile {
    pub kind: MissileKind,
    pub state: MissileState,
    pub pos_x: Fx,
    pub pos_y: Fx,
    pub inc_x: Fx,
    pub inc_y: Fx,
    pub origin: Point,
    pub target: Point,
    /// Launch speed in units per frame; MIRV children inherit it.
    pub speed: i32,
    /// Owning silo (ABMs only).
    pub silo: Option<SiloId>,
    /// ICBM may split into MIRV children.
    pub can_split: bool,
    /// Split already consumed; an ICBM splits at most once.
    pub has_split: bool,
    /// Altitude at the end of the previous advance, for the split band
    /// check when the descent rate can step over the band.
    pub prev_altitude: i32,
    /// Set when the collision detector caught this missile in a blast.
    pub intercepted: bool,
}

impl Missile {
    /// Build a missile at `origin` aimed at `target`, moving `speed`
    /// units per frame.
    pub fn launch(
        kind: MissileKind,
        origin: Point,
        target: Point,
        speed: i32,
        silo: Option<SiloId>,
        can_split: bool,
    ) -> Self {
        let (inc_x, inc_y) = geom::increments(origin, target, speed);
        Self {
            kind,
            state: MissileState::Spawned,
            pos_x: Fx::from_px(origin.x),
            pos_y: Fx::from_px(origin.y),
            inc_x,
            inc_y,
            origin,
            target,
            speed,
            silo,
            can_split,
            has_split: false,
            prev_altitude: origin.y,
            intercepted: false,
        }
    }

    /// Current pixel position.
    pub fn pos(&self) -> Point {
        Point::new(self.pos_x.to_px(), self.pos_y.to_px())
    }

    /// Current altitude in pixels.
    pub fn altitude(&self) -> i32 {
        self.pos_y.to_px()
    }
}

/// The single flier (bomber or satellite) crossing the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flier {
    pub kind: FlierKind,
    pub pos_x: Fx,
    pub altitude: i32,
    /// +1 rightward, -1 leftward.
    pub dir: i32,
    /// Ticks until the scheduler may order the next munition release.
    pub fire_cooldown: u32,
    /// Set when caught in a blast; removed during detonation routing.
    pub destroyed: bool,
}

impl Flier {
    pub fn pos(&self) -> Point {
        Point::new(self.pos_x.to_px(), self.altitude)
    }
}

/// One octagonal blast volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub center: Point,
    /// Current radius, 0..=13.
    pub radius: i32,
    pub phase: ExplosionPhase,
    /// Update group, 0..=4 (slot id / 4).
    pub group: usize,
    /// Group updates spent in the holding phase so far.
    pub hold_updates: u32,
}

/// A city site on the ground line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub x: i32,
    pub altitude: i32,
    pub alive: bool,
}

/// A defense silo with its remaining ABM stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Silo {
    pub id: SiloId,
    pub x: i32,
    pub altitude: i32,
    pub ammo: u32,
}

impl Silo {
    pub fn pos(&self) -> Point {
        Point::new(self.x, self.altitude)
    }
}
