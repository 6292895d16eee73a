//! Game tuning and configuration
//!
//! Defaults mirror `crate::consts`. A JSON file (or string) can override any
//! subset of fields; everything is validated before a session is built.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Grid, VehicleKind};

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Board ===
    /// Columns per lane
    pub columns: u32,
    /// Cell width before zoom
    pub position_width: f32,
    /// World scale
    pub zoom: f32,
    /// Lanes generated ahead of the start lane on reset
    pub lanes_ahead: u32,

    // === Player ===
    /// Hop duration (ms)
    pub step_time_ms: f64,
    /// Player footprint (pre-zoom)
    pub player_size: f32,
    /// Hop peak (pre-zoom)
    pub hop_height: f32,

    // === Lanes ===
    pub forest_obstacles: u32,
    pub cars_per_lane: u32,
    pub trucks_per_lane: u32,
    pub car_length: f32,
    pub truck_length: f32,
    pub lane_speeds: Vec<f32>,

    // === Camera ===
    pub camera_distance: f32,

    /// Fixed RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: COLUMNS,
            position_width: POSITION_WIDTH,
            zoom: ZOOM,
            lanes_ahead: LANES_AHEAD,

            step_time_ms: STEP_TIME_MS,
            player_size: PLAYER_SIZE,
            hop_height: HOP_HEIGHT,

            forest_obstacles: FOREST_OBSTACLES,
            cars_per_lane: CARS_PER_LANE,
            trucks_per_lane: TRUCKS_PER_LANE,
            car_length: CAR_LENGTH,
            truck_length: TRUCK_LENGTH,
            lane_speeds: LANE_SPEEDS.to_vec(),

            camera_distance: CAMERA_DISTANCE,

            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON configuration (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Same config with a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Board geometry derived from this config
    pub fn grid(&self) -> Grid {
        Grid {
            columns: self.columns,
            position_width: self.position_width,
            zoom: self.zoom,
        }
    }

    /// Pre-zoom length of a vehicle kind
    pub fn vehicle_length(&self, kind: VehicleKind) -> f32 {
        match kind {
            VehicleKind::Car => self.car_length,
            VehicleKind::Truck => self.truck_length,
        }
    }

    /// Vehicles spawned per lane of the given kind
    pub fn vehicles_per_lane(&self, kind: VehicleKind) -> u32 {
        match kind {
            VehicleKind::Car => self.cars_per_lane,
            VehicleKind::Truck => self.trucks_per_lane,
        }
    }

    /// Check every field; placement loops rely on the slot checks to terminate
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 {
            return Err(ConfigError::Invalid("columns must be at least 1"));
        }
        if !positive(self.position_width) || !positive(self.zoom) {
            return Err(ConfigError::Invalid("position_width and zoom must be positive"));
        }
        if !(self.step_time_ms.is_finite() && self.step_time_ms > 0.0) {
            return Err(ConfigError::Invalid("step_time_ms must be positive"));
        }
        if self.lanes_ahead == 0 {
            return Err(ConfigError::Invalid("lanes_ahead must be at least 1"));
        }
        if !positive(self.player_size) || !positive(self.car_length) || !positive(self.truck_length)
        {
            return Err(ConfigError::Invalid("player and vehicle sizes must be positive"));
        }
        if !(self.hop_height.is_finite() && self.hop_height >= 0.0) {
            return Err(ConfigError::Invalid("hop_height must be zero or positive"));
        }
        if !positive(self.camera_distance) {
            return Err(ConfigError::Invalid("camera_distance must be positive"));
        }
        if self.lane_speeds.is_empty() || !self.lane_speeds.iter().all(|s| positive(*s)) {
            return Err(ConfigError::Invalid("lane_speeds must be a non-empty list of positive speeds"));
        }

        check_slots("forest obstacles", self.forest_obstacles, self.columns)?;
        let grid = self.grid();
        for kind in [VehicleKind::Car, VehicleKind::Truck] {
            check_slots(
                kind.plural(),
                self.vehicles_per_lane(kind),
                grid.slot_count(kind.span()),
            )?;
        }
        Ok(())
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn check_slots(what: &'static str, count: u32, slots: u32) -> Result<(), ConfigError> {
    if count > slots {
        return Err(ConfigError::Overcrowded { what, count, slots });
    }
    Ok(())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),

    #[error("Cannot place {count} {what} into {slots} slots")]
    Overcrowded {
        what: &'static str,
        count: u32,
        slots: u32,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}
