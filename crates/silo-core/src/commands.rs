//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::SiloId;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Move the crosshair. Coordinates outside the playfield are
    /// clamped, never rejected.
    Aim { x: i32, y: i32 },
    /// Fire an ABM from the given silo at the current crosshair.
    Fire { silo: SiloId },
    /// Suspend tick advancement.
    Pause,
    /// Resume tick advancement; no ticks are skipped.
    Resume,
    /// Add a credit.
    InsertCoin,
    /// Start a new game (consumes a credit).
    StartGame,
    /// Debug override: jump to the given wave at its start.
    ForceWave { wave: u32 },
}
