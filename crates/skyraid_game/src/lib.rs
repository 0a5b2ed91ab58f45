pub mod entities;
pub mod input;
pub mod rect;
pub mod sprite;
pub mod world;

pub use input::InputState;
pub use world::{SoundCue, World};

/// Fixed window width in pixels.
pub const SCREEN_WIDTH: i32 = 1024;
/// Fixed window height in pixels.
pub const SCREEN_HEIGHT: i32 = 768;

/// Horizontal scroll rate of the starfield, in pixels per second.
pub const BACKGROUND_SCROLL_SPEED: f32 = 30.0;

/// Player movement speed, in pixels per second.
pub const PLAYER_SPEED: f32 = 400.0;
pub const PLAYER_SRC_X: i32 = 0;
pub const PLAYER_SRC_Y: i32 = 0;
pub const PLAYER_WIDTH: i32 = 94;
pub const PLAYER_HEIGHT: i32 = 100;
pub const PLAYER_FRAME_COUNT: i32 = 4;
pub const PLAYER_FRAME_TIME: f32 = 0.2;

pub const PLAYER_BULLET_SPEED: f32 = 600.0;
pub const PLAYER_BULLET_SRC_X: i32 = 376;
pub const PLAYER_BULLET_SRC_Y: i32 = 0;
pub const PLAYER_BULLET_WIDTH: i32 = 10;
pub const PLAYER_BULLET_HEIGHT: i32 = 100;

pub const ENEMY_SPEED: f32 = 150.0;
pub const ENEMY_SRC_X: i32 = 0;
pub const ENEMY_SRC_Y: i32 = 100;
pub const ENEMY_WIDTH: i32 = 40;
pub const ENEMY_HEIGHT: i32 = 46;
pub const ENEMY_FRAME_COUNT: i32 = 4;
pub const ENEMY_FRAME_TIME: f32 = 0.1;
/// Seconds between enemy spawns at the right edge.
pub const ENEMY_SPAWN_INTERVAL: f32 = 1.5;

/// Enemy bullets travel left, so the speed is negative.
pub const ENEMY_BULLET_SPEED: f32 = -300.0;
pub const ENEMY_BULLET_SRC_X: i32 = 376;
pub const ENEMY_BULLET_SRC_Y: i32 = 100;
pub const ENEMY_BULLET_WIDTH: i32 = 10;
pub const ENEMY_BULLET_HEIGHT: i32 = 25;
