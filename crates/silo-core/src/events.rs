//! Discrete events emitted by the simulation each tick.
//!
//! The frontend consumes these for audio and UI triggering; the
//! simulation also uses the stream in tests to observe lifecycle
//! transitions without poking at internals.

use serde::{Deserialize, Serialize};

use crate::enums::{FlierKind, MissileKind, SiloId};

/// Why a fire command produced no ABM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireRejection {
    /// The silo's ammo is exhausted.
    NoAmmo,
    /// All eight ABM slots are in flight.
    SalvoFull,
}

/// One tick's worth of observable happenings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A new wave began.
    WaveStarted { wave: u32, multiplier: u32 },
    /// The wave resolved; bonus covers unfired ABMs and surviving
    /// cities, already multiplied.
    WaveEnded { wave: u32, bonus: u64 },
    /// A missile entered its table.
    MissileSpawned { kind: MissileKind, slot: usize },
    /// A missile reached its target and detonated.
    MissileDetonated {
        kind: MissileKind,
        slot: usize,
        x: i32,
        y: i32,
    },
    /// A missile was caught in a blast volume.
    MissileKilled {
        kind: MissileKind,
        slot: usize,
        points: u32,
    },
    /// An ICBM split into MIRV children.
    MirvSplit { slot: usize, children: usize },
    /// A flier entered the field.
    FlierSpawned { kind: FlierKind },
    /// The flier was caught in a blast volume.
    FlierKilled { kind: FlierKind, points: u32 },
    /// The flier left at the far edge.
    FlierExited { kind: FlierKind },
    /// A city was destroyed by an unintercepted impact.
    CityDestroyed { index: usize },
    /// A banked bonus city rebuilt a destroyed site.
    CityRebuilt { index: usize },
    /// Cumulative score crossed the bonus threshold.
    BonusCityBanked,
    /// An explosion began.
    ExplosionSpawned { slot: usize, x: i32, y: i32 },
    /// An explosion collapsed and freed its slot.
    ExplosionEnded { slot: usize },
    /// A detonation found all 20 explosion slots occupied and was
    /// dropped; the impact simply does not explode.
    ExplosionDropped { x: i32, y: i32 },
    /// A fire command was rejected.
    FireRejected {
        silo: SiloId,
        reason: FireRejection,
    },
    /// No city is alive and no bonus stock remains.
    GameOver { score: u64 },
}
