//! IF/ELSE Runner - click-only side-scrolling mini-games
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (physics, spawning, collisions, screens)
//! - `session`: The context object that owns one play session
//! - `renderer`: WebGPU rendering pipeline and scene building
//! - `ui`: Text overlay layout per screen
//! - `platform`: Host capabilities (clock, storage, download)
//! - `export`: Run summary snapshot and CSV export
//! - `layout`: Fixed screen geometry (cards, buttons, bars)
//! - `tuning`: Per-variant game rules
//! - `content`: Decision options, tips and profile labels

pub mod content;
pub mod export;
pub mod layout;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use session::Session;
pub use tuning::{Tuning, Variant};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical canvas size (no resizing)
    pub const WIDTH: f32 = 960.0;
    pub const HEIGHT: f32 = 540.0;
    /// Target frame rate
    pub const FPS: f32 = 60.0;
    /// Largest frame delta accepted by the loop (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Ground line (player feet rest here)
    pub const GROUND_Y: f32 = HEIGHT * 0.8;
    /// Player fixed horizontal position
    pub const PLAYER_X: f32 = WIDTH * 0.15;
    /// Player collision box
    pub const PLAYER_W: f32 = 32.0;
    pub const PLAYER_H: f32 = 48.0;

    /// Gravity (pixels/s², downward)
    pub const GRAVITY: f32 = 1800.0;
    /// Jump impulse (pixels/s, negative is up)
    pub const JUMP_VELOCITY: f32 = -680.0;
    /// World scroll speed (pixels/s)
    pub const SCROLL_SPEED: f32 = 240.0;

    /// Decision countdown (seconds)
    pub const DECISION_SECONDS: f32 = 5.0;
    /// Scrolled distance that opens the first decision
    pub const DECISION1_DISTANCE: u32 = 900;
    /// Scrolled distance that opens the second decision
    pub const DECISION2_DISTANCE: u32 = 1800;

    /// Timed variants end after this many seconds
    pub const SESSION_SECONDS: f32 = 30.0;
    /// How long a tip stays on screen (seconds)
    pub const TIP_SECONDS: f32 = 2.0;

    /// Deterministic pre-population: obstacles per level
    pub const PREPOPULATED_OBSTACLES: usize = 10;
    /// Spacing between pre-populated obstacles
    pub const OBSTACLE_SPACING: f32 = 320.0;
    /// Chance a pre-populated obstacle carries a collectible
    pub const COLLECTIBLE_CHANCE: f64 = 0.7;

    /// Stochastic spawn: per-frame probabilities
    pub const OBSTACLE_SPAWN_CHANCE: f64 = 0.02;
    pub const COLLECTIBLE_SPAWN_CHANCE: f64 = 0.015;

    /// Local storage key for the last run summary
    pub const STORAGE_KEY: &str = "ifelse_trilha_last";
    /// CSV export file name
    pub const CSV_FILENAME: &str = "trilha.csv";
}

/// Map a point in logical canvas space to normalized device coordinates
#[inline]
pub fn logical_to_ndc(pos: Vec2) -> Vec2 {
    Vec2::new(
        pos.x / consts::WIDTH * 2.0 - 1.0,
        1.0 - pos.y / consts::HEIGHT * 2.0,
    )
}

/// Map a point on a displayed canvas (CSS pixels) back to logical space
#[inline]
pub fn client_to_logical(x: f32, y: f32, client_w: f32, client_h: f32) -> Vec2 {
    if client_w <= 0.0 || client_h <= 0.0 {
        return Vec2::new(x, y);
    }
    Vec2::new(x * consts::WIDTH / client_w, y * consts::HEIGHT / client_h)
}
