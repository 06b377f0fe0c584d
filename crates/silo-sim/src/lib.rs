//! Headless simulation engine for SILO.
//!
//! Owns every slot pool, advances the fixed 60 Hz tick with its four
//! IRQ-equivalent sub-steps, and produces a `GameSnapshot` per tick.
//! Completely deterministic for a given seed and command stream.

pub mod engine;
pub mod systems;
pub mod targeting;

pub use engine::{GameEngine, SimConfig};
pub use silo_core as core;

#[cfg(test)]
mod tests;
