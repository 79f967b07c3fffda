//! Simulation constants and tuning parameters.
//!
//! Distances are screen units, times are seconds, speeds are units per second.

/// Largest step a single tick may integrate.
pub const MAX_DT: f32 = 0.05;

// --- World ---

/// Ground line as a fraction of viewport height.
pub const FLOOR_RATIO: f32 = 0.78;

/// Background scroll speed.
pub const SCROLL_SPEED: f32 = 170.0;

/// Gravity applied to ballistic drops.
pub const GRAVITY: f32 = 980.0;

// --- Player ---

pub const PLAYER_START_X: f32 = 280.0;
pub const PLAYER_WIDTH: f32 = 96.0;
pub const PLAYER_HEIGHT: f32 = 160.0;
pub const PLAYER_SPEED: f32 = 270.0;

/// Horizontal margin the player is kept inside.
pub const PLAYER_EDGE_MARGIN: f32 = 30.0;

/// Horizontal speed above which the player turns to face its motion.
pub const FACING_DEADZONE: f32 = 2.0;

pub const BASE_MAX_HEALTH: f32 = 100.0;
pub const MAX_HEALTH_PER_HP_LEVEL: f32 = 10.0;

/// Health restored immediately by buying an hp level.
pub const HP_PURCHASE_HEAL: f32 = 10.0;

pub const REGEN_BASE: f32 = 0.45;
pub const REGEN_PER_LEVEL: f32 = 0.25;

// --- Melee ---

pub const MELEE_COOLDOWN: f32 = 0.28;
pub const MELEE_BASE_DAMAGE: f32 = 18.0;
pub const MELEE_DAMAGE_PER_WAVE: f32 = 2.0;
pub const MELEE_CRIT_MULT: f32 = 1.6;
pub const MELEE_HIT_FLASH: f32 = 0.12;

// --- Gun ---

pub const GUN_BASE_COOLDOWN: f32 = 0.22;
pub const GUN_COOLDOWN_PER_FIRE_LEVEL: f32 = 0.02;
pub const GUN_MIN_COOLDOWN: f32 = 0.08;
pub const BULLET_BASE_SPEED: f32 = 720.0;
pub const BULLET_SPEED_PER_FIRE_LEVEL: f32 = 90.0;
pub const PLAYER_BULLET_LIFE: f32 = 1.1;

/// Player bullets leave the playfield this far past either side.
pub const PLAYER_BULLET_MARGIN: f32 = 50.0;

pub const GUN_BASE_DAMAGE: f32 = 8.0;
pub const GUN_DAMAGE_PER_WAVE: f32 = 1.1;
pub const GUN_DAMAGE_PER_DMG_LEVEL: f32 = 0.6;
pub const GUN_CRIT_MULT: f32 = 1.5;
pub const GUN_HIT_FLASH: f32 = 0.10;

// --- Skill (shockwave) ---

pub const SKILL_COOLDOWN: f32 = 6.0;
pub const SKILL_RADIUS: f32 = 340.0;
pub const SKILL_BASE_DAMAGE: f32 = 14.0;
pub const SKILL_DAMAGE_PER_WAVE: f32 = 2.0;
pub const SKILL_DAMAGE_PER_DMG_LEVEL: f32 = 0.5;
pub const SKILL_HIT_FLASH: f32 = 0.18;

// --- Crit ---

/// Percentage points of crit chance per crit level.
pub const CRIT_PERCENT_PER_LEVEL: f32 = 2.0;
pub const CRIT_MAX_PROBABILITY: f32 = 0.45;

// --- Enemies ---

pub const ENEMY_BASE_HEALTH: f32 = 40.0;
pub const ENEMY_HEALTH_PER_WAVE: f32 = 8.0;
pub const ENEMY_BASE_CONTACT_DAMAGE: f32 = 7.0;
pub const ENEMY_CONTACT_DAMAGE_PER_WAVE: f32 = 0.6;

/// Enemies enter at `viewport_width + U(0, ENEMY_ENTRY_SPREAD)`.
pub const ENEMY_ENTRY_SPREAD: f32 = 260.0;

/// Living enemies past `-width * ENEMY_RECYCLE_WIDTHS` wrap back to the right edge.
pub const ENEMY_RECYCLE_WIDTHS: f32 = 4.0;
pub const ENEMY_RECYCLE_MIN_OFFSET: f32 = 120.0;
pub const ENEMY_RECYCLE_MAX_OFFSET: f32 = 520.0;

/// How long a dead enemy keeps sliding before it is removed.
pub const DEATH_DRIFT_SECS: f32 = 0.6;
/// Fraction of its velocity a dead enemy keeps while drifting.
pub const DEATH_DRIFT_FACTOR: f32 = 0.35;

// --- Spawning ---

pub const SPAWN_INTERVAL: f32 = 0.32;
pub const BASE_POPULATION: usize = 2;
pub const INITIAL_SPAWNS: usize = 3;
pub const BOSS_WAVE_PERIOD: u32 = 5;
pub const KILLS_PER_WAVE: u32 = 10;

pub const TANK_MIN_WAVE: u32 = 3;
pub const TANK_THRESHOLD: f32 = 0.15;
pub const RUNNER_MIN_WAVE: u32 = 2;
pub const RUNNER_THRESHOLD: f32 = 0.55;

// --- Contact ---

pub const CONTACT_INVULNERABILITY: f32 = 0.18;

// --- Boss ---

pub const BOSS_VOLLEY_BASE_INTERVAL: f32 = 1.2;
pub const BOSS_VOLLEY_INTERVAL_PER_WAVE: f32 = 0.04;
pub const BOSS_VOLLEY_MIN_INTERVAL: f32 = 0.6;
pub const BOSS_VOLLEY_SIZE: usize = 5;
pub const BOSS_VOLLEY_SPREAD: f32 = 0.18;
pub const BOSS_PROJECTILE_SPEED: f32 = 420.0;
pub const BOSS_PROJECTILE_LIFE: f32 = 2.2;
pub const BOSS_PROJECTILE_BASE_DAMAGE: f32 = 14.0;
pub const BOSS_PROJECTILE_DAMAGE_PER_WAVE: f32 = 0.7;
pub const BOSS_PROJECTILE_INVULNERABILITY: f32 = 0.22;

/// Boss projectiles leave the playfield this far past any edge.
pub const BOSS_PROJECTILE_MARGIN: f32 = 80.0;

/// Horizontal distance the boss tries to keep in front of the player.
pub const BOSS_STANDOFF: f32 = 240.0;
pub const BOSS_STEER_GAIN: f32 = 0.25;
pub const BOSS_MIN_VX: f32 = -140.0;
pub const BOSS_MAX_VX: f32 = 20.0;

// --- Drops ---

pub const COIN_GRAVITY_SCALE: f32 = 0.75;
pub const BLOOD_GRAVITY_SCALE: f32 = 0.65;
pub const COIN_PICKUP_RADIUS: f32 = 46.0;

/// Drops leave the playfield this far past the sides or below the bottom.
pub const DROP_MARGIN: f32 = 80.0;

pub const HIT_BLOOD_COUNT: usize = 6;
pub const DEATH_BLOOD_COUNT: usize = 6;
pub const BULLET_BLOOD_COUNT: usize = 3;
pub const PLAYER_HIT_BLOOD_COUNT: usize = 5;

// --- Camera shake (power, duration) ---

pub const SHAKE_MELEE: (f32, f32) = (10.0, 0.14);
pub const SHAKE_GUN: (f32, f32) = (6.0, 0.08);
pub const SHAKE_SKILL: (f32, f32) = (20.0, 0.22);
pub const SHAKE_KILL: (f32, f32) = (16.0, 0.18);
pub const SHAKE_BOSS_INCOMING: (f32, f32) = (22.0, 0.24);
pub const SHAKE_BOSS_VOLLEY: (f32, f32) = (10.0, 0.10);
pub const SHAKE_CONTACT: (f32, f32) = (8.0, 0.12);
pub const SHAKE_BOSS_HIT: (f32, f32) = (14.0, 0.16);

// --- Economy ---

pub const GUN_PRICE: u32 = 80;
