//! Lane Hopper - An endless lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Simulation (lane generation, movement queue, traffic, collisions, session)
//! - `config`: Data-driven game tuning with validation
//! - `input`: Key/button mapping to game commands
//! - `renderer`: Renderer seam that consumes session frames
//! - `web`: wasm-bindgen bridge for the browser host (wasm32 only)

pub mod config;
pub mod input;
pub mod renderer;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{ConfigError, GameConfig};
pub use input::Command;
pub use sim::{Direction, Frame, GamePhase, GameSession, Snapshot};

/// Game configuration constants (defaults for `GameConfig`)
pub mod consts {
    /// Board width in columns
    pub const COLUMNS: u32 = 17;
    /// Width of one grid cell before zoom
    pub const POSITION_WIDTH: f32 = 42.0;
    /// World scale applied to every model dimension
    pub const ZOOM: f32 = 2.0;
    /// Duration of one hop in milliseconds
    pub const STEP_TIME_MS: f64 = 200.0;
    /// Player footprint (pre-zoom)
    pub const PLAYER_SIZE: f32 = 15.0;
    /// Peak of the hop arc (pre-zoom)
    pub const HOP_HEIGHT: f32 = 8.0;
    /// Lanes generated beyond the start lane on a fresh board
    pub const LANES_AHEAD: u32 = 9;

    /// Lane population
    pub const FOREST_OBSTACLES: u32 = 4;
    pub const CARS_PER_LANE: u32 = 3;
    pub const TRUCKS_PER_LANE: u32 = 2;

    /// Vehicle lengths (pre-zoom)
    pub const CAR_LENGTH: f32 = 60.0;
    pub const TRUCK_LENGTH: f32 = 105.0;

    /// Possible traffic speeds; a lane advances `speed * delta_ms / SPEED_DIVISOR`
    pub const LANE_SPEEDS: [f32; 3] = [2.0, 2.5, 3.0];
    pub const SPEED_DIVISOR: f32 = 16.0;
    /// Cells past the board edge where vehicles wrap around
    pub const WRAP_MARGIN_CELLS: f32 = 2.0;

    /// Camera rig
    pub const CAMERA_DISTANCE: f32 = 500.0;
    pub const CAMERA_TILT_X_DEG: f32 = 50.0;
    pub const CAMERA_TILT_Y_DEG: f32 = 20.0;
    /// Directional light start position
    pub const LIGHT_START: [f32; 3] = [-100.0, -100.0, 200.0];
}

/// Height factor of the hop arc for a step fraction in [0, 1]
///
/// Zero at both ends, peaks at 1.0 halfway through the step.
#[inline]
pub fn hop_arc(fraction: f32) -> f32 {
    (fraction.clamp(0.0, 1.0) * std::f32::consts::PI).sin().max(0.0)
}
