//! Fixed playfield geometry and tuning.
//!
//! World coordinates grow rightward and upward with the origin at the
//! bottom-left corner of the playfield. Entity positions are centers.

pub const GAME_WIDTH: f32 = 800.0;
pub const GAME_HEIGHT: f32 = 700.0;

pub const SHIP_WIDTH: f32 = 44.0;
pub const SHIP_HEIGHT: f32 = 44.0;
/// Center height of the ship.
pub const SHIP_BOTTOM: f32 = 32.0;
/// Horizontal distance the ship covers per tick while a move key is held.
pub const SHIP_MOVEMENT: f32 = 5.0;
pub const SHIP_LIVES: u32 = 3;

pub const DEFENSE_LINE: f32 = 100.0;

pub const ALIEN_WIDTH: f32 = 33.0;
pub const ALIEN_HEIGHT: f32 = 33.0;
pub const ALIEN_H_SEP: f32 = 16.0;
pub const ALIEN_V_SEP: f32 = 16.0;
/// Gap between the top of the playfield and the top row of a fresh formation.
pub const ALIEN_CEILING: f32 = 100.0;
pub const ALIEN_ROWS: usize = 5;
pub const ALIENS_IN_ROW: usize = 11;
pub const ALIEN_H_WALK: f32 = 8.0;
pub const ALIEN_V_WALK: f32 = 16.0;
/// Seconds between formation steps at the start of the first wave.
pub const ALIEN_SPEED: f32 = 1.0;

pub const BOLT_WIDTH: f32 = 4.0;
pub const BOLT_HEIGHT: f32 = 16.0;
pub const PLAYER_BOLT_SPEED: f32 = 10.0;
pub const ALIEN_BOLT_SPEED: f32 = 8.0;
/// Upper bound of the random step multiple between alien shots.
pub const BOLT_RATE: u32 = 5;

pub const BACKGROUND_SPEED: f32 = 0.1;
pub const BACKGROUND_FRAMES: u8 = 8;

pub const KILL_SCORE: u32 = 100;
/// Applied to the step interval on every kill.
pub const SPEEDUP_FACTOR: f32 = 0.97;
