//! Game state snapshot: the complete visible state produced each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Point, SimTime};

/// Complete read-only state handed to external collaborators after
/// each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub mode: GameMode,
    pub credits: u32,
    pub wave: u32,
    pub wave_phase: WavePhase,
    pub score: u64,
    pub multiplier: u32,
    /// Banked bonus cities awaiting a crater to rebuild.
    pub bonus_cities: u8,
    pub pacing_ceiling: i32,
    pub cities_lost_this_wave: u32,
    pub missiles: Vec<MissileView>,
    pub flier: Option<FlierView>,
    pub explosions: Vec<ExplosionView>,
    pub cities: Vec<CityView>,
    pub silos: Vec<SiloView>,
    /// A smart bomb is in flight (its continuous cue outranks the
    /// flier's; arbitration is the UI layer's job).
    pub smart_bomb_active: bool,
    /// A flier is crossing the field.
    pub flier_active: bool,
    /// Cumulative detonations dropped to explosion-slot starvation.
    pub explosions_dropped: u64,
    /// Events raised during this tick.
    pub events: Vec<GameEvent>,
}

/// One occupied missile slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissileView {
    pub slot: usize,
    pub kind: MissileKind,
    pub state: MissileState,
    pub x: i32,
    pub y: i32,
    pub target: Point,
}

/// The flier, if one is crossing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlierView {
    pub kind: FlierKind,
    pub x: i32,
    pub altitude: i32,
}

/// One occupied explosion slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionView {
    pub slot: usize,
    pub center: Point,
    pub radius: i32,
    pub phase: ExplosionPhase,
}

/// One city site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityView {
    pub index: usize,
    pub x: i32,
    pub alive: bool,
}

/// One silo's launch state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiloView {
    pub id: SiloId,
    pub x: i32,
    pub ammo: u32,
}
