//! Tests for the engine, wave scheduler, missile state machines,
//! explosion field, and collision pipeline.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use silo_core::commands::PlayerCommand;
use silo_core::components::{Missile, Silo};
use silo_core::constants::*;
use silo_core::enums::*;
use silo_core::events::{FireRejection, GameEvent};
use silo_core::fixed::Fx;
use silo_core::types::{Point, SimTime};

use crate::engine::{GameEngine, SimConfig};
use crate::systems::cities::CityRegistry;
use crate::systems::explosions::ExplosionField;
use crate::systems::missiles::{self, MissileBoard};
use crate::systems::scheduler::{self, AttackScheduler};
use crate::systems::scoring::ScoreBoard;
use crate::systems::{collision, detonation, snapshot};
use crate::targeting::TargetingConfig;

fn test_silos() -> Vec<Silo> {
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

fn in_flight(kind: MissileKind, origin: Point, target: Point, speed: i32) -> Missile {
    let mut m = Missile::launch(kind, origin, target, speed, None, false);
    m.state = MissileState::InFlight;
    m
}

fn started_engine(seed: u64) -> GameEngine {
    let mut engine = GameEngine::new(SimConfig {
        seed,
        ..Default::default()
    });
    engine.queue_commands([PlayerCommand::InsertCoin, PlayerCommand::StartGame]);
    engine.tick();
    engine
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let script = |engine: &mut GameEngine, tick: u64| {
        if tick % 30 == 0 {
            engine.queue_command(PlayerCommand::Aim {
                x: (tick as i32 * 37) % 256,
                y: 100 + (tick as i32 * 13) % 80,
            });
            engine.queue_command(PlayerCommand::Fire {
                silo: SiloId::ALL[(tick / 30) as usize % 3],
            });
        }
    };

    let mut engine_a = started_engine(12345);
    let mut engine_b = started_engine(12345);

    for tick in 0..500 {
        script(&mut engine_a, tick);
        script(&mut engine_b, tick);
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();
        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = started_engine(111);
    let mut engine_b = started_engine(222);

    let mut diverged = false;
    for _ in 0..500 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Game phase and coin handling ----

#[test]
fn test_attract_does_not_tick() {
    let mut engine = GameEngine::new(SimConfig::default());
    for _ in 0..10 {
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Attract);
    }
    assert_eq!(engine.time().tick, 0);
}

#[test]
fn test_start_requires_credit() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Attract);

    engine.queue_commands([PlayerCommand::InsertCoin, PlayerCommand::StartGame]);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::WaveStarted { wave: 1, .. })));
}

#[test]
fn test_pause_stops_simulation() {
    let mut engine = started_engine(42);
    for _ in 0..9 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 10);

    engine.queue_command(PlayerCommand::Pause);
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 10, "Time should not advance while paused");
    assert_eq!(engine.phase(), GamePhase::Paused);

    engine.queue_command(PlayerCommand::Resume);
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 20);
}

#[test]
fn test_force_wave_override() {
    let mut engine = started_engine(42);
    engine.queue_command(PlayerCommand::ForceWave { wave: 5 });
    let snap = engine.tick();
    assert_eq!(snap.wave, 5);
    assert_eq!(snap.multiplier, 3);
    assert_eq!(snap.pacing_ceiling, 192);
}

#[test]
fn test_game_over_when_cities_annihilated() {
    let mut engine = started_engine(42);
    for city in engine.cities_mut().cities.iter_mut() {
        city.alive = false;
    }
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::GameOver { .. })));

    let frozen = engine.time().tick;
    engine.tick();
    assert_eq!(engine.time().tick, frozen, "GameOver freezes the clock");
}

// ---- Firing ----

#[test]
fn test_fire_decrements_ammo_and_spawns() {
    let mut board = MissileBoard::new();
    let mut silos = test_silos();
    let mut events = Vec::new();

    let ok = missiles::fire_abm(
        &mut board,
        &mut silos,
        SiloId::Center,
        Point::new(100, 120),
        &mut events,
    );
    assert!(ok);
    assert_eq!(silos[1].ammo, SILO_CAPACITY - 1);
    assert_eq!(board.abms.occupied_count(), 1);
}

#[test]
fn test_fire_with_empty_silo_reports_no_ammo() {
    let mut board = MissileBoard::new();
    let mut silos = test_silos();
    silos[0].ammo = 0;
    let mut events = Vec::new();

    let ok = missiles::fire_abm(
        &mut board,
        &mut silos,
        SiloId::Left,
        Point::new(100, 120),
        &mut events,
    );
    assert!(!ok);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::FireRejected {
            silo: SiloId::Left,
            reason: FireRejection::NoAmmo,
        }
    )));
}

#[test]
fn test_fire_with_full_salvo_rejected() {
    let mut board = MissileBoard::new();
    let mut silos = test_silos();
    let mut events = Vec::new();

    for i in 0..MAX_ABM_SLOTS as i32 {
        assert!(missiles::fire_abm(
            &mut board,
            &mut silos,
            SiloId::Center,
            Point::new(10 + i * 20, 150),
            &mut events,
        ));
    }
    let ammo_before = silos[1].ammo;
    let ok = missiles::fire_abm(
        &mut board,
        &mut silos,
        SiloId::Center,
        Point::new(128, 150),
        &mut events,
    );
    assert!(!ok);
    assert_eq!(silos[1].ammo, ammo_before, "Rejected fire must not spend ammo");
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::FireRejected {
            reason: FireRejection::SalvoFull,
            ..
        }
    )));
}

// ---- ABM flight time ----

#[test]
fn test_center_silo_time_to_target() {
    // Straight up from (128, 11) to (128, 83): distance 72 at 7
    // units/frame resolves in ceil(72/7) = 11 ticks.
    let mut engine = started_engine(42);
    engine.queue_commands([
        PlayerCommand::Aim { x: 128, y: 83 },
        PlayerCommand::Fire { silo: SiloId::Center },
    ]);
    let mut detonated_at = None;
    for tick in 1..=40 {
        let snap = engine.tick();
        if snap.events.iter().any(|e| {
            matches!(
                e,
                GameEvent::MissileDetonated {
                    kind: MissileKind::Abm,
                    ..
                }
            )
        }) {
            detonated_at = Some(tick);
            break;
        }
    }
    assert_eq!(detonated_at, Some(11));
}

#[test]
fn test_side_silo_time_to_target() {
    // Straight up from (32, 11) to (32, 75): distance 64 at 3
    // units/frame resolves in ceil(64/3) = 22 ticks.
    let mut engine = started_engine(42);
    engine.queue_commands([
        PlayerCommand::Aim { x: 32, y: 75 },
        PlayerCommand::Fire { silo: SiloId::Left },
    ]);
    let mut detonated_at = None;
    for tick in 1..=60 {
        let snap = engine.tick();
        if snap.events.iter().any(|e| {
            matches!(
                e,
                GameEvent::MissileDetonated {
                    kind: MissileKind::Abm,
                    ..
                }
            )
        }) {
            detonated_at = Some(tick);
            break;
        }
    }
    assert_eq!(detonated_at, Some(22));
}

// ---- Wave scheduler ----

#[test]
fn test_pacing_ceiling_formula() {
    assert_eq!(AttackScheduler::pacing_ceiling_for(1), 200);
    assert_eq!(AttackScheduler::pacing_ceiling_for(10), 182);
    assert_eq!(AttackScheduler::pacing_ceiling_for(11), 180);
    assert_eq!(AttackScheduler::pacing_ceiling_for(50), 180);
}

#[test]
fn test_budget_formula() {
    assert_eq!(AttackScheduler::budget_for(1), 10);
    assert_eq!(AttackScheduler::budget_for(10), 28);
    assert_eq!(AttackScheduler::budget_for(11), 30);
    assert_eq!(AttackScheduler::budget_for(30), 30);
}

struct SchedulerHarness {
    sched: AttackScheduler,
    board: MissileBoard,
    explosions: ExplosionField,
    cities: CityRegistry,
    silos: Vec<Silo>,
    score: ScoreBoard,
    cfg: TargetingConfig,
    rng: ChaCha8Rng,
    events: Vec<GameEvent>,
}

impl SchedulerHarness {
    fn new(wave: u32) -> Self {
        Self {
            sched: AttackScheduler::new(wave),
            board: MissileBoard::new(),
            explosions: ExplosionField::new(),
            cities: CityRegistry::new(),
            silos: test_silos(),
            score: ScoreBoard::new(GameMode::Marathon, BONUS_CITY_THRESHOLD),
            cfg: TargetingConfig::default(),
            rng: ChaCha8Rng::seed_from_u64(7),
            events: Vec::new(),
        }
    }

    fn run(&mut self) {
        scheduler::run(
            &mut self.sched,
            &mut self.board,
            &mut self.explosions,
            &mut self.cities,
            &mut self.silos,
            &mut self.score,
            &self.cfg,
            &mut self.rng,
            &mut self.events,
        );
    }

    fn check_wave_end(&mut self) {
        scheduler::check_wave_end(
            &mut self.sched,
            &self.board,
            &self.explosions,
            &self.cities,
            &self.silos,
        );
    }
}

#[test]
fn test_wave_start_resets_state() {
    let mut h = SchedulerHarness::new(3);
    h.silos[0].ammo = 0;
    h.cities.lost_this_wave = 2;
    h.run();

    assert_eq!(h.sched.phase, WavePhase::Attacking);
    assert!(h.silos.iter().all(|s| s.ammo == SILO_CAPACITY));
    assert_eq!(h.cities.lost_this_wave, 0);
    assert_eq!(h.sched.pacing_ceiling, 196);
    assert_eq!(h.sched.budget, 14);
    assert_eq!(h.score.multiplier, 2);
    assert!(h
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::WaveStarted { wave: 3, .. })));
}

#[test]
fn test_no_spawn_while_missile_above_pacing_ceiling() {
    let mut h = SchedulerHarness::new(1);
    h.run();
    assert_eq!(h.sched.pacing_ceiling, 200);

    h.board
        .inbound
        .insert(in_flight(
            MissileKind::Icbm,
            Point::new(10, 210),
            Point::new(10, 15),
            1,
        ))
        .unwrap();
    h.run();
    assert_eq!(
        h.board.inbound.occupied_count(),
        1,
        "No spawn while an inbound missile sits above the ceiling"
    );

    h.board.inbound.get_mut(0).unwrap().pos_y = Fx::from_px(150);
    h.run();
    assert_eq!(h.board.inbound.occupied_count(), 2);
}

#[test]
fn test_wave_end_sequence_awards_bonus() {
    let mut h = SchedulerHarness::new(1);
    h.run();
    h.sched.budget = 0;

    h.check_wave_end();
    assert_eq!(h.sched.phase, WavePhase::WaveEnding);

    let score_before = h.score.score;
    h.run();
    // 6 cities * 100 + 30 unfired ABMs * 5 at multiplier 1.
    assert_eq!(h.score.score - score_before, 750);
    assert!(h
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::WaveEnded { wave: 1, bonus: 750 })));
    assert_eq!(h.sched.phase, WavePhase::WaveComplete);

    h.run();
    assert_eq!(h.sched.wave, 2);
    assert_eq!(h.sched.phase, WavePhase::WaveStart);
    h.run();
    assert!(h
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::WaveStarted { wave: 2, .. })));
}

#[test]
fn test_forced_wave_end_on_three_losses_and_dry_silos() {
    let mut h = SchedulerHarness::new(1);
    h.run();

    // Still attacking: budget left and a missile in flight.
    h.board
        .inbound
        .insert(in_flight(
            MissileKind::Icbm,
            Point::new(10, 100),
            Point::new(10, 15),
            1,
        ))
        .unwrap();
    for i in 0..3 {
        assert!(h
            .cities
            .destroy_near(Point::new(CITY_X[i], CITY_ALTITUDE))
            .is_some());
    }
    h.check_wave_end();
    assert_eq!(
        h.sched.phase,
        WavePhase::Attacking,
        "Silos still have ammo; no forced end yet"
    );

    for silo in h.silos.iter_mut() {
        silo.ammo = 0;
    }
    h.check_wave_end();
    assert_eq!(h.sched.phase, WavePhase::WaveEnding);
}

// ---- MIRV ----

#[test]
fn test_mirv_split_in_band() {
    let mut board = MissileBoard::new();
    let mut parent = in_flight(
        MissileKind::Icbm,
        Point::new(100, 140),
        Point::new(100, 15),
        1,
    );
    parent.can_split = true;
    board.inbound.insert(parent).unwrap();

    let cities = CityRegistry::new();
    let silos = test_silos();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut events = Vec::new();
    let mut budget = 10u32;

    missiles::mirv_split(&mut board, &mut budget, &cities, &silos, &mut rng, &mut events);

    assert_eq!(board.inbound.occupied_count(), 4, "Parent plus 3 children");
    assert!(board.inbound.get(0).unwrap().has_split);
    assert_eq!(budget, 7);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::MirvSplit { slot: 0, children: 3 })));

    // A parent splits at most once.
    missiles::mirv_split(&mut board, &mut budget, &cities, &silos, &mut rng, &mut events);
    assert_eq!(board.inbound.occupied_count(), 4);
}

#[test]
fn test_mirv_split_blocked_by_high_missile() {
    let mut board = MissileBoard::new();
    let mut parent = in_flight(
        MissileKind::Icbm,
        Point::new(100, 140),
        Point::new(100, 15),
        1,
    );
    parent.can_split = true;
    board.inbound.insert(parent).unwrap();
    // Another inbound missile still above the band blocks the split.
    board
        .inbound
        .insert(in_flight(
            MissileKind::Icbm,
            Point::new(50, 170),
            Point::new(50, 15),
            1,
        ))
        .unwrap();

    let cities = CityRegistry::new();
    let silos = test_silos();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut events = Vec::new();
    let mut budget = 10u32;

    missiles::mirv_split(&mut board, &mut budget, &cities, &silos, &mut rng, &mut events);

    assert_eq!(board.inbound.occupied_count(), 2, "Split must be blocked");
    assert!(!board.inbound.get(0).unwrap().has_split);
    assert_eq!(budget, 10);
}

#[test]
fn test_mirv_split_truncated_by_capacity() {
    let mut board = MissileBoard::new();
    let mut parent = in_flight(
        MissileKind::Icbm,
        Point::new(100, 140),
        Point::new(100, 15),
        1,
    );
    parent.can_split = true;
    board.inbound.insert(parent).unwrap();
    for i in 0..5 {
        board
            .inbound
            .insert(in_flight(
                MissileKind::Icbm,
                Point::new(20 + i * 10, 100),
                Point::new(20 + i * 10, 15),
                1,
            ))
            .unwrap();
    }

    let cities = CityRegistry::new();
    let silos = test_silos();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut events = Vec::new();
    let mut budget = 10u32;

    missiles::mirv_split(&mut board, &mut budget, &cities, &silos, &mut rng, &mut events);

    assert_eq!(
        board.inbound.occupied_count(),
        MAX_INBOUND_SLOTS,
        "Split truncated to the two free slots"
    );
    assert_eq!(budget, 8);
}

// ---- Smart bomb evasion ----

#[test]
fn test_smart_bomb_dodges_explosion_in_path() {
    let mut board = MissileBoard::new();
    // Heading down-right toward (150, 15); an explosion below zeroes
    // the descent while the lateral component keeps going.
    board
        .inbound
        .insert(in_flight(
            MissileKind::SmartBomb,
            Point::new(100, 150),
            Point::new(150, 15),
            4,
        ))
        .unwrap();

    let centers = vec![Point::new(90, 140)];
    let mut events = Vec::new();
    missiles::run(&mut board, &centers, &mut events);

    let bomb = board.inbound.get(0).unwrap();
    assert!(bomb.pos().x > 100, "Lateral progress continues");
    assert_eq!(bomb.pos().y, 150, "Descent toward the blast is held");

    // With no explosion nearby the bomb resumes its full increment.
    let mut events = Vec::new();
    missiles::run(&mut board, &[], &mut events);
    let bomb = board.inbound.get(0).unwrap();
    assert!(bomb.pos().y < 150);
}

// ---- Explosion field ----

#[test]
fn test_explosion_group_round_robin() {
    let mut field = ExplosionField::new();
    let mut events = Vec::new();
    // Fill the first five slots: groups 0,0,0,0,1.
    for i in 0..5 {
        field.spawn(Point::new(40 + i * 20, 100), &mut events);
    }

    for tick in 0u64..25 {
        let slot0_before = field.iter().find(|(s, _)| *s == 0).map(|(_, e)| e.radius);
        let slot4_before = field.iter().find(|(s, _)| *s == 4).map(|(_, e)| e.radius);
        field.run(tick, &mut events);
        let slot0_after = field.iter().find(|(s, _)| *s == 0).map(|(_, e)| e.radius);
        let slot4_after = field.iter().find(|(s, _)| *s == 4).map(|(_, e)| e.radius);

        if tick % 5 == 0 {
            assert_ne!(slot0_before, slot0_after, "Group 0 updates on tick {tick}");
            assert_eq!(slot4_before, slot4_after);
        } else if tick % 5 == 1 {
            assert_ne!(slot4_before, slot4_after, "Group 1 updates on tick {tick}");
            assert_eq!(slot0_before, slot0_after);
        } else {
            assert_eq!(slot0_before, slot0_after);
            assert_eq!(slot4_before, slot4_after);
        }
    }
}

#[test]
fn test_explosion_lifecycle_grow_hold_shrink() {
    let mut field = ExplosionField::new();
    let mut events = Vec::new();
    field.spawn(Point::new(100, 100), &mut events);

    let mut max_seen = 0;
    for tick in 0u64..200 {
        field.run(tick, &mut events);
        if let Some((_, e)) = field.iter().next() {
            max_seen = max_seen.max(e.radius);
            assert!(e.radius <= EXPLOSION_MAX_RADIUS);
        }
    }
    assert_eq!(max_seen, EXPLOSION_MAX_RADIUS);
    assert_eq!(field.occupied_count(), 0, "Explosion must collapse and free");
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::ExplosionEnded { slot: 0 })));
}

#[test]
fn test_explosion_slot_starvation_drops_spawn() {
    let mut field = ExplosionField::new();
    let mut events = Vec::new();
    for i in 0..MAX_EXPLOSION_SLOTS as i32 {
        field.spawn(Point::new(i * 10, 100), &mut events);
    }
    assert_eq!(field.occupied_count(), MAX_EXPLOSION_SLOTS);
    assert_eq!(field.dropped, 0);

    field.spawn(Point::new(128, 100), &mut events);
    assert_eq!(field.occupied_count(), MAX_EXPLOSION_SLOTS);
    assert_eq!(field.dropped, 1);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::ExplosionDropped { x: 128, y: 100 })));
}

// ---- Collision ----

#[test]
fn test_collision_kills_icbm_and_scores() {
    let mut board = MissileBoard::new();
    board
        .inbound
        .insert(in_flight(
            MissileKind::Icbm,
            Point::new(100, 100),
            Point::new(100, 15),
            1,
        ))
        .unwrap();

    let mut field = ExplosionField::new();
    let mut events = Vec::new();
    field.spawn(Point::new(100, 100), &mut events);
    field.run(0, &mut events);

    let mut score = ScoreBoard::new(GameMode::Marathon, BONUS_CITY_THRESHOLD);
    collision::run(&mut board, &field, &mut score, &mut events);

    let missile = board.inbound.get(0).unwrap();
    assert_eq!(missile.state, MissileState::Detonating);
    assert!(missile.intercepted);
    assert_eq!(score.score, 25);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::MissileKilled {
            kind: MissileKind::Icbm,
            slot: 0,
            points: 25,
        }
    )));
}

#[test]
fn test_collision_ground_immunity() {
    let mut board = MissileBoard::new();
    board
        .inbound
        .insert(in_flight(
            MissileKind::Icbm,
            Point::new(100, COLLISION_FLOOR_ALTITUDE - 1),
            Point::new(100, 15),
            1,
        ))
        .unwrap();

    let mut field = ExplosionField::new();
    let mut events = Vec::new();
    field.spawn(Point::new(100, COLLISION_FLOOR_ALTITUDE - 1), &mut events);
    field.run(0, &mut events);

    let mut score = ScoreBoard::new(GameMode::Marathon, BONUS_CITY_THRESHOLD);
    collision::run(&mut board, &field, &mut score, &mut events);

    assert_eq!(
        board.inbound.get(0).unwrap().state,
        MissileState::InFlight,
        "Below the immunity line nothing is tested"
    );
    assert_eq!(score.score, 0);
}

#[test]
fn test_collision_never_touches_abms() {
    let mut board = MissileBoard::new();
    let mut abm = Missile::launch(
        MissileKind::Abm,
        Point::new(128, 11),
        Point::new(100, 100),
        7,
        Some(SiloId::Center),
        false,
    );
    abm.state = MissileState::InFlight;
    abm.pos_x = Fx::from_px(100);
    abm.pos_y = Fx::from_px(100);
    board.abms.insert(abm).unwrap();

    let mut field = ExplosionField::new();
    let mut events = Vec::new();
    field.spawn(Point::new(100, 100), &mut events);
    field.run(0, &mut events);

    let mut score = ScoreBoard::new(GameMode::Marathon, BONUS_CITY_THRESHOLD);
    collision::run(&mut board, &field, &mut score, &mut events);

    assert_eq!(board.abms.get(0).unwrap().state, MissileState::InFlight);
    assert_eq!(score.score, 0);
}

#[test]
fn test_collision_kills_flier() {
    let mut board = MissileBoard::new();
    let mut events = Vec::new();
    missiles::spawn_flier(&mut board, FlierKind::Bomber, 1, 90, &mut events);
    if let Some(flier) = board.flier.as_mut() {
        flier.pos_x = Fx::from_px(100);
    }

    let mut field = ExplosionField::new();
    field.spawn(Point::new(100, FLIER_ALTITUDE), &mut events);
    field.run(0, &mut events);

    let mut score = ScoreBoard::new(GameMode::Marathon, BONUS_CITY_THRESHOLD);
    collision::run(&mut board, &field, &mut score, &mut events);

    assert!(board.flier.as_ref().unwrap().destroyed);
    assert_eq!(score.score, 100);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::FlierKilled { points: 100, .. })));
}

// ---- Detonation routing ----

#[test]
fn test_impact_destroys_city_and_spawns_explosion() {
    let mut board = MissileBoard::new();
    let mut missile = in_flight(
        MissileKind::Icbm,
        Point::new(CITY_X[0], CITY_ALTITUDE),
        Point::new(CITY_X[0], CITY_ALTITUDE),
        1,
    );
    missile.state = MissileState::Detonating;
    board.inbound.insert(missile).unwrap();

    let mut field = ExplosionField::new();
    let mut cities = CityRegistry::new();
    let mut events = Vec::new();
    detonation::run(&mut board, &mut field, &mut cities, &mut events);

    assert_eq!(board.inbound.occupied_count(), 0, "Slot released");
    assert_eq!(field.occupied_count(), 1);
    assert_eq!(cities.alive_count(), 5);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::CityDestroyed { index: 0 })));
}

#[test]
fn test_intercepted_missile_does_not_destroy_city() {
    let mut board = MissileBoard::new();
    let mut missile = in_flight(
        MissileKind::Icbm,
        Point::new(CITY_X[1], CITY_ALTITUDE),
        Point::new(CITY_X[1], CITY_ALTITUDE),
        1,
    );
    missile.state = MissileState::Detonating;
    missile.intercepted = true;
    board.inbound.insert(missile).unwrap();

    let mut field = ExplosionField::new();
    let mut cities = CityRegistry::new();
    let mut events = Vec::new();
    detonation::run(&mut board, &mut field, &mut cities, &mut events);

    assert_eq!(cities.alive_count(), 6);
    assert_eq!(field.occupied_count(), 1, "Intercepts still explode");
}

// ---- Cities ----

#[test]
fn test_city_loss_cap_suppresses_fourth_kill() {
    let mut cities = CityRegistry::new();
    for i in 0..3 {
        assert!(cities
            .destroy_near(Point::new(CITY_X[i], CITY_ALTITUDE))
            .is_some());
    }
    assert_eq!(cities.lost_this_wave, MAX_CITY_LOSSES_PER_WAVE);
    assert!(
        cities
            .destroy_near(Point::new(CITY_X[3], CITY_ALTITUDE))
            .is_none(),
        "Fourth loss in one wave is suppressed"
    );
    assert_eq!(cities.alive_count(), 3);
}

#[test]
fn test_bonus_city_rebuild_consumes_stock() {
    let mut cities = CityRegistry::new();
    cities.destroy_near(Point::new(CITY_X[0], CITY_ALTITUDE));
    cities.destroy_near(Point::new(CITY_X[4], CITY_ALTITUDE));

    let mut score = ScoreBoard::new(GameMode::Marathon, BONUS_CITY_THRESHOLD);
    score.bonus_cities = 1;
    let mut events = Vec::new();
    cities.start_wave(&mut score, &mut events);

    assert_eq!(cities.alive_count(), 5, "One rebuild per banked city");
    assert_eq!(score.bonus_cities, 0);
    assert_eq!(cities.lost_this_wave, 0);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::CityRebuilt { index: 0 })));
}

// ---- Scoring ----

#[test]
fn test_multiplier_sequence() {
    let expected = [1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6];
    for (i, &want) in expected.iter().enumerate() {
        let wave = i as u32 + 1;
        assert_eq!(
            ScoreBoard::multiplier_for_wave(wave),
            want,
            "wave {wave}"
        );
    }
    assert_eq!(ScoreBoard::multiplier_for_wave(13), 6);
    assert_eq!(ScoreBoard::multiplier_for_wave(40), 6);
}

#[test]
fn test_icbm_kill_at_multiplier_two_scores_fifty() {
    let mut score = ScoreBoard::new(GameMode::Marathon, BONUS_CITY_THRESHOLD);
    score.set_wave(3);
    assert_eq!(score.multiplier, 2);
    let mut events = Vec::new();
    let points = score.award_kill(MissileKind::Icbm, &mut events);
    assert_eq!(points, 50);
    assert_eq!(score.score, 50);
}

#[test]
fn test_wave_bonus_value() {
    let mut score = ScoreBoard::new(GameMode::Marathon, BONUS_CITY_THRESHOLD);
    let mut events = Vec::new();
    // 4 cities and 3 unfired ABMs at multiplier 1.
    let bonus = score.wave_bonus(4, 3, &mut events);
    assert_eq!(bonus, 415);
}

#[test]
fn test_bonus_city_banking_marathon() {
    let mut score = ScoreBoard::new(GameMode::Marathon, 10_000);
    let mut events = Vec::new();
    score.add(9_999, &mut events);
    assert_eq!(score.bonus_cities, 0);
    score.add(1, &mut events);
    assert_eq!(score.bonus_cities, 1);
    // One boundary per 10k, even in a single large award.
    score.add(20_000, &mut events);
    assert_eq!(score.bonus_cities, 3);
    let banked = events
        .iter()
        .filter(|e| matches!(e, GameEvent::BonusCityBanked))
        .count();
    assert_eq!(banked, 3);
}

#[test]
fn test_bonus_city_banking_disabled_in_tournament() {
    let mut score = ScoreBoard::new(GameMode::Tournament, 10_000);
    let mut events = Vec::new();
    score.add(50_000, &mut events);
    assert_eq!(score.bonus_cities, 0);
    assert!(events.is_empty());
}

// ---- Snapshot cue flags ----

#[test]
fn test_snapshot_active_kind_flags() {
    let mut board = MissileBoard::new();
    let mut events = Vec::new();
    board
        .inbound
        .insert(in_flight(
            MissileKind::SmartBomb,
            Point::new(100, 200),
            Point::new(100, 15),
            2,
        ))
        .unwrap();
    missiles::spawn_flier(&mut board, FlierKind::Satellite, 1, 90, &mut events);

    let snap = snapshot::build(
        &SimTime::default(),
        GamePhase::Active,
        GameMode::Marathon,
        0,
        &board,
        &ExplosionField::new(),
        &CityRegistry::new(),
        &test_silos(),
        &AttackScheduler::new(1),
        &ScoreBoard::new(GameMode::Marathon, BONUS_CITY_THRESHOLD),
        Vec::new(),
    );
    assert!(snap.smart_bomb_active);
    assert!(snap.flier_active);
}

// ---- Long-run invariants ----

#[test]
fn test_pool_invariants_over_long_run() {
    let mut engine = started_engine(99);
    let mut max_wave = 0;

    for tick in 0u64..3_000 {
        if tick % 25 == 0 {
            engine.queue_command(PlayerCommand::Aim {
                x: (tick as i32 * 53) % 256,
                y: 90 + (tick as i32 * 29) % 100,
            });
            engine.queue_command(PlayerCommand::Fire {
                silo: SiloId::ALL[(tick / 25) as usize % 3],
            });
        }
        let snap = engine.tick();
        if snap.phase == GamePhase::GameOver {
            break;
        }
        max_wave = max_wave.max(snap.wave);

        let abms = snap
            .missiles
            .iter()
            .filter(|m| m.kind == MissileKind::Abm)
            .count();
        assert!(abms <= MAX_ABM_SLOTS, "tick {tick}: {abms} ABMs");

        let load: usize = snap
            .missiles
            .iter()
            .map(|m| match m.kind {
                MissileKind::SmartBomb => SMART_BOMB_WEIGHT,
                MissileKind::Abm => 0,
                _ => 1,
            })
            .sum::<usize>()
            + usize::from(snap.flier_active);
        assert!(load <= MAX_INBOUND_SLOTS, "tick {tick}: inbound load {load}");

        assert!(snap.explosions.len() <= MAX_EXPLOSION_SLOTS);
        assert!(snap.cities_lost_this_wave <= MAX_CITY_LOSSES_PER_WAVE);
        assert!((1..=MAX_MULTIPLIER).contains(&snap.multiplier));
        if snap.wave_phase == WavePhase::Attacking {
            assert_eq!(
                snap.pacing_ceiling,
                AttackScheduler::pacing_ceiling_for(snap.wave)
            );
        }
    }

    assert!(max_wave >= 2, "Waves should progress within 50 seconds");
}
