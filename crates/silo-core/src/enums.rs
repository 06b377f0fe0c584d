//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Missile kind tag. One closed set of kinds sharing a homogeneous
/// record; the update rule is selected by tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissileKind {
    /// Descending enemy missile.
    Icbm,
    /// Player-fired interceptor.
    Abm,
    /// Evasive enemy munition (inbound weight 2).
    SmartBomb,
    /// Child spawned by an ICBM split mid-flight.
    MirvChild,
}

impl MissileKind {
    /// True for kinds that live in the inbound table and threaten the
    /// ground.
    pub fn is_inbound(self) -> bool {
        !matches!(self, MissileKind::Abm)
    }
}

/// Missile lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissileState {
    /// Created this tick, not yet advanced.
    #[default]
    Spawned,
    /// Advancing along its trajectory.
    InFlight,
    /// Arrived or intercepted; awaiting detonation routing.
    Detonating,
    /// Finished; slot is about to be released.
    Removed,
}

/// Flier variant. Both cross the field horizontally at the same
/// altitude; the distinction matters to the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlierKind {
    Bomber,
    Satellite,
}

/// Defense silo identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiloId {
    Left,
    Center,
    Right,
}

impl SiloId {
    pub const ALL: [SiloId; 3] = [SiloId::Left, SiloId::Center, SiloId::Right];

    pub fn index(self) -> usize {
        match self {
            SiloId::Left => 0,
            SiloId::Center => 1,
            SiloId::Right => 2,
        }
    }

    /// Launch speed in units per frame: the center silo fires fast.
    pub fn abm_speed(self) -> i32 {
        match self {
            SiloId::Center => crate::constants::ABM_SPEED_CENTER,
            SiloId::Left | SiloId::Right => crate::constants::ABM_SPEED_SIDE,
        }
    }
}

/// Explosion growth phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionPhase {
    #[default]
    Growing,
    Holding,
    Shrinking,
}

/// Wave lifecycle phase driven by the attack scheduler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Resetting silos, counters and pools for the new wave.
    #[default]
    WaveStart,
    /// Dispatching attackers under the pacing ceiling.
    Attacking,
    /// All attackers resolved (or forced end); computing bonuses.
    WaveEnding,
    /// Bonuses awarded; next tick starts the following wave.
    WaveComplete,
}

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Attract,
    Active,
    Paused,
    GameOver,
}

/// Rule variant selected at game start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Bonus cities are banked every threshold crossing.
    #[default]
    Marathon,
    /// No bonus cities, ever.
    Tournament,
}
