//! Modus Invaders - A Space Invaders style arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, patrol, game state)
//! - `renderer`: Draw surface abstraction and WebGPU rendering pipeline
//! - `input`: Held-key tracking for the three logical game keys
//! - `audio`: Sound playback collaborator
//! - `game`: Frame driver tying the simulation to its collaborators

pub mod audio;
pub mod error;
pub mod game;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::StartupError;
pub use game::{FrameStatus, Game};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Stage dimensions (pixels)
    pub const STAGE_WIDTH: f32 = 300.0;
    pub const STAGE_HEIGHT: f32 = 300.0;

    /// Invaders turn around when the leftmost one passes this x
    pub const PATROL_LEFT_MARGIN: f32 = 30.0;
    /// Invaders turn around when the rightmost one passes `stage width - this`
    pub const PATROL_RIGHT_MARGIN: f32 = 20.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 15.0;
    pub const PLAYER_SPEED: f32 = 2.0;
    /// Minimum time between player shots (milliseconds)
    pub const PLAYER_FIRE_RATE_MS: f64 = 300.0;

    /// Invader defaults
    pub const INVADER_SIZE: f32 = 15.0;
    pub const INVADER_DRIFT: f32 = 0.3;
    pub const INVADER_DESCENT: f32 = 10.0;
    pub const INVADER_COUNT: usize = 24;
    pub const INVADER_COLUMNS: usize = 8;
    pub const INVADER_ROWS: usize = 3;
    pub const INVADER_SPACING: f32 = 30.0;
    /// Chance per frame that an unobstructed invader fires
    pub const INVADER_FIRE_CHANCE: f64 = 0.005;

    /// Bullet defaults
    pub const BULLET_SIZE: f32 = 3.0;
    pub const PLAYER_BULLET_HEIGHT: f32 = 5.0;
    pub const PLAYER_BULLET_SPEED: f32 = -6.0;
    pub const INVADER_BULLET_SPEED: f32 = 2.0;

    /// Shield layout
    pub const SHIELD_COUNT: usize = 3;
    pub const SHIELD_BIT_SIZE: f32 = 3.0;
    /// Distance of the shield row above the bottom of the stage
    pub const SHIELD_OFFSET_Y: f32 = 40.0;

    /// Nominal frame duration used by headless runs (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
