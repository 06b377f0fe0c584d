//! Simulation constants and tuning parameters.
//!
//! Values mirror the original arcade hardware tables. Vertical
//! coordinates are altitudes (0 = ground, increasing upward); the
//! hardware's screen rows convert as `alt = 231 - row`.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// IRQ-equivalent sub-steps per frame (240 Hz interrupt / 60 Hz frame).
pub const IRQS_PER_FRAME: u32 = 4;

// --- Playfield ---

/// Playfield width in pixels.
pub const PLAYFIELD_WIDTH: i32 = 256;

/// Playfield height in pixels (scan lines).
pub const PLAYFIELD_HEIGHT: i32 = 231;

/// Altitude at which inbound missiles enter the playfield.
pub const ENTRY_ALTITUDE: i32 = 230;

// --- Slot tables (hardware sizes) ---

/// ABM missile table size.
pub const MAX_ABM_SLOTS: usize = 8;

/// ICBM / smart bomb / MIRV-child table size.
pub const MAX_INBOUND_SLOTS: usize = 8;

/// Explosion table size (5 groups of 4).
pub const MAX_EXPLOSION_SLOTS: usize = 20;

/// Number of explosion update groups.
pub const EXPLOSION_GROUPS: usize = 5;

/// Explosion slots per group.
pub const EXPLOSIONS_PER_GROUP: usize = 4;

// --- ABM kinematics ---

/// ABM speed from the left/right silos (units per frame).
pub const ABM_SPEED_SIDE: i32 = 3;

/// ABM speed from the center silo (units per frame).
pub const ABM_SPEED_CENTER: i32 = 7;

// --- Silos ---

/// Number of defense silos.
pub const NUM_SILOS: usize = 3;

/// ABMs per silo at wave start.
pub const SILO_CAPACITY: u32 = 10;

/// Silo x positions: left, center, right.
pub const SILO_X: [i32; NUM_SILOS] = [32, 128, 224];

/// Ground altitude of the silo launch points.
pub const SILO_ALTITUDE: i32 = 11;

// --- Cities ---

/// Number of cities at game start.
pub const NUM_CITIES: usize = 6;

/// City x positions (three each side of the center silo).
pub const CITY_X: [i32; NUM_CITIES] = [48, 72, 96, 160, 184, 208];

/// Ground altitude of the city sites.
pub const CITY_ALTITUDE: i32 = 15;

/// Half-width of the impact box that destroys a city.
pub const CITY_HIT_RADIUS: i32 = 10;

/// Maximum cities destroyed per wave.
pub const MAX_CITY_LOSSES_PER_WAVE: u32 = 3;

// --- Explosions ---

/// Maximum octagon radius.
pub const EXPLOSION_MAX_RADIUS: i32 = 13;

/// Radius gained per group update while growing.
pub const EXPLOSION_GROWTH_STEP: i32 = 1;

/// Radius lost per group update while shrinking.
pub const EXPLOSION_SHRINK_STEP: i32 = 1;

/// Group updates spent holding at maximum radius.
pub const EXPLOSION_HOLD_UPDATES: u32 = 10;

/// Octagon chamfer slope numerator (3/8 slope).
pub const OCTAGON_SLOPE_NUM: i32 = 3;

/// Octagon chamfer slope denominator.
pub const OCTAGON_SLOPE_DEN: i32 = 8;

// --- Collision ---

/// Collision sweep cadence in ticks.
pub const COLLISION_INTERVAL: u64 = 5;

/// No collision testing below this altitude (ground immunity line).
pub const COLLISION_FLOOR_ALTITUDE: i32 = 33;

// --- MIRV ---

/// Lower bound of the split altitude band.
pub const MIRV_BAND_LOW: i32 = 128;

/// Upper bound of the split altitude band; an inbound missile above
/// this altitude blocks all splits for the tick.
pub const MIRV_BAND_HIGH: i32 = 159;

/// Maximum children per split.
pub const MIRV_MAX_CHILDREN: usize = 3;

// --- Smart bombs ---

/// Maximum concurrent smart bombs.
pub const MAX_SMART_BOMBS: usize = 2;

/// Inbound-capacity weight of one smart bomb.
pub const SMART_BOMB_WEIGHT: usize = 2;

/// Evasion lookahead: explosions within this octagonal distance are
/// considered when steering.
pub const SMART_BOMB_SCAN_RANGE: i32 = 32;

// --- Flier ---

/// Cruise altitude for bombers and satellites.
pub const FLIER_ALTITUDE: i32 = 116;

/// Horizontal flier speed (pixels per frame).
pub const FLIER_SPEED: i32 = 1;

// --- Scoring (pre-multiplier values) ---

/// Points per ICBM or MIRV child killed.
pub const POINTS_ICBM: u32 = 25;

/// Points per smart bomb killed.
pub const POINTS_SMART_BOMB: u32 = 125;

/// Points per flier (bomber or satellite) killed.
pub const POINTS_FLIER: u32 = 100;

/// End-of-wave points per unfired ABM.
pub const POINTS_UNFIRED_ABM: u32 = 5;

/// End-of-wave points per surviving city.
pub const POINTS_SURVIVING_CITY: u32 = 100;

/// Score multiplier ceiling (reached at wave 11).
pub const MAX_MULTIPLIER: u32 = 6;

/// Default score interval that banks one bonus city (marathon mode).
pub const BONUS_CITY_THRESHOLD: u64 = 10_000;

// --- Wave pacing ---

/// ICBM speed by wave (1-indexed; last entry repeats).
pub const WAVE_SPEEDS: [i32; 20] = [
    1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 8, 8, 8, 8,
];

/// Pacing ceiling base: `max(PACE_FLOOR, PACE_BASE - PACE_STEP * wave)`.
pub const PACE_BASE: i32 = 202;

/// Pacing ceiling decrement per wave.
pub const PACE_STEP: i32 = 2;

/// Pacing ceiling floor.
pub const PACE_FLOOR: i32 = 180;

/// Attack budget: `min(BUDGET_BASE + BUDGET_PER_WAVE * wave, BUDGET_CAP)`.
pub const BUDGET_BASE: u32 = 8;

/// Attack budget growth per wave.
pub const BUDGET_PER_WAVE: u32 = 2;

/// Attack budget cap.
pub const BUDGET_CAP: u32 = 30;
