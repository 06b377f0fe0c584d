//! Simulation engine: the core of the game.
//!
//! `GameEngine` owns every pool, processes player commands at tick
//! boundaries, runs the systems in their fixed order, and produces a
//! `GameSnapshot` per tick. Completely headless and deterministic for
//! a given seed and command stream.
//!
//! Each 60 Hz frame is structured as the hardware's four IRQ slots:
//!
//! 1. IRQ 0: player intents and attack-scheduler spawn decisions
//! 2. IRQ 1: missile kinematics, state machines, MIRV splits
//! 3. IRQ 2: explosion group advance (group = `tick mod 5`)
//! 4. IRQ 3: collision sweep (every 5th tick), detonation routing,
//!    wave-end evaluation
//!
//! The explosion group cycle and the collision cadence share the
//! 5-tick period, so their phase relationship is fixed by
//! construction.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use silo_core::commands::PlayerCommand;
use silo_core::components::Silo;
use silo_core::constants::*;
use silo_core::enums::{GameMode, GamePhase, SiloId};
use silo_core::events::GameEvent;
use silo_core::state::GameSnapshot;
use silo_core::types::{Point, SimTime};

use crate::systems;
use crate::systems::cities::CityRegistry;
use crate::systems::explosions::ExplosionField;
use crate::systems::missiles::MissileBoard;
use crate::systems::scheduler::AttackScheduler;
use crate::systems::scoring::ScoreBoard;
use crate::targeting::TargetingConfig;

/// Configuration for a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub mode: GameMode,
    /// Wave the first game begins on (testing aid; normally 1).
    pub start_wave: u32,
    /// Score interval banking one bonus city; ignored in tournament.
    pub bonus_threshold: u64,
    pub targeting: TargetingConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            mode: GameMode::Marathon,
            start_wave: 1,
            bonus_threshold: BONUS_CITY_THRESHOLD,
            targeting: TargetingConfig::default(),
        }
    }
}

/// The simulation engine. Owns all pools and per-game state.
pub struct GameEngine {
    config: SimConfig,
    time: SimTime,
    phase: GamePhase,
    credits: u32,
    crosshair: Point,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<GameEvent>,

    board: MissileBoard,
    explosions: ExplosionField,
    cities: CityRegistry,
    silos: Vec<Silo>,
    scheduler: AttackScheduler,
    score: ScoreBoard,
}

impl GameEngine {
    pub fn new(config: SimConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let scheduler = AttackScheduler::new(config.start_wave);
        let score = ScoreBoard::new(config.mode, config.bonus_threshold);
        Self {
            time: SimTime::default(),
            phase: GamePhase::default(),
            credits: 0,
            crosshair: Point::new(PLAYFIELD_WIDTH / 2, PLAYFIELD_HEIGHT / 2),
            rng,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            board: MissileBoard::new(),
            explosions: ExplosionField::new(),
            cities: CityRegistry::new(),
            silos: make_silos(),
            scheduler,
            score,
            config,
        }
    }

    /// Queue a player command for the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the snapshot.
    ///
    /// While paused (or before a game starts) no tick elapses; the
    /// snapshot still reflects the current state.
    pub fn tick(&mut self) -> GameSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build(
            &self.time,
            self.phase,
            self.config.mode,
            self.credits,
            &self.board,
            &self.explosions,
            &self.cities,
            &self.silos,
            &self.scheduler,
            &self.score,
            events,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Aim { x, y } => {
                self.crosshair = Point::new(x, y).clamped();
            }
            PlayerCommand::Fire { silo } => {
                if self.phase == GamePhase::Active {
                    systems::missiles::fire_abm(
                        &mut self.board,
                        &mut self.silos,
                        silo,
                        self.crosshair,
                        &mut self.events,
                    );
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::InsertCoin => {
                self.credits = (self.credits + 1).min(99);
            }
            PlayerCommand::StartGame => {
                if matches!(self.phase, GamePhase::Attract | GamePhase::GameOver)
                    && self.credits > 0
                {
                    self.credits -= 1;
                    self.start_game();
                }
            }
            PlayerCommand::ForceWave { wave } => {
                if self.phase == GamePhase::Active {
                    self.scheduler = AttackScheduler::new(wave);
                }
            }
        }
    }

    /// Reset all per-game state and enter the first wave.
    fn start_game(&mut self) {
        self.time = SimTime::default();
        self.board = MissileBoard::new();
        self.explosions = ExplosionField::new();
        self.cities = CityRegistry::new();
        self.silos = make_silos();
        self.scheduler = AttackScheduler::new(self.config.start_wave);
        self.score = ScoreBoard::new(self.config.mode, self.config.bonus_threshold);
        self.phase = GamePhase::Active;
    }

    /// Run the four IRQ sub-steps of one frame.
    fn run_systems(&mut self) {
        let tick = self.time.tick;

        // IRQ 0: spawn decisions.
        systems::scheduler::run(
            &mut self.scheduler,
            &mut self.board,
            &mut self.explosions,
            &mut self.cities,
            &mut self.silos,
            &mut self.score,
            &self.config.targeting,
            &mut self.rng,
            &mut self.events,
        );

        // IRQ 1: kinematics and per-kind state machines.
        let centers = self.explosions.centers();
        systems::missiles::run(&mut self.board, &centers, &mut self.events);
        systems::missiles::mirv_split(
            &mut self.board,
            &mut self.scheduler.budget,
            &self.cities,
            &self.silos,
            &mut self.rng,
            &mut self.events,
        );

        // IRQ 2: explosion group advance.
        self.explosions.run(tick, &mut self.events);

        // IRQ 3: collision sweep, detonation routing, wave end.
        if tick % COLLISION_INTERVAL == 0 {
            systems::collision::run(
                &mut self.board,
                &self.explosions,
                &mut self.score,
                &mut self.events,
            );
        }
        systems::detonation::run(
            &mut self.board,
            &mut self.explosions,
            &mut self.cities,
            &mut self.events,
        );
        systems::scheduler::check_wave_end(
            &mut self.scheduler,
            &self.board,
            &self.explosions,
            &self.cities,
            &self.silos,
        );

        if self.cities.annihilated(self.score.bonus_cities) {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver {
                score: self.score.score,
            });
        }
    }

    /// Direct registry access for tests that need to stage board
    /// states the command stream cannot reach quickly.
    #[cfg(test)]
    pub(crate) fn cities_mut(&mut self) -> &mut CityRegistry {
        &mut self.cities
    }
}

fn make_silos() -> Vec<Silo> {
    SiloId::ALL
        .iter()
        .zip(SILO_X)
        .map(|(&id, x)| Silo {
            id,
            x,
            altitude: SILO_ALTITUDE,
            ammo: SILO_CAPACITY,
        })
        .collect()
}
