//! Lanes and procedural lane generation

use std::collections::BTreeSet;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::placement::distinct_slots;
use crate::config::{ConfigError, GameConfig};

/// Vehicle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleKind {
    Car,
    Truck,
}

impl VehicleKind {
    /// Columns covered by one spawn slot
    pub const fn span(self) -> u32 {
        match self {
            VehicleKind::Car => 2,
            VehicleKind::Truck => 3,
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            VehicleKind::Car => "cars",
            VehicleKind::Truck => "trucks",
        }
    }
}

/// Direction traffic flows in a road lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Heading {
    /// Toward decreasing x
    Left,
    /// Toward increasing x
    Right,
}

impl Heading {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Heading::Left => -1.0,
            Heading::Right => 1.0,
        }
    }
}

/// A vehicle in a road lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Spawn slot (distinct within the lane)
    pub slot: u32,
    /// Centre x in world units
    pub x: f32,
    /// Length before zoom
    pub length: f32,
}

/// Lane payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LaneKind {
    /// Open grass
    Field,
    /// Grass with trees blocking some columns
    Forest { occupied: BTreeSet<u32> },
    /// Traffic lane
    Road {
        vehicle: VehicleKind,
        heading: Heading,
        /// Distance per 16 ms of frame time
        speed: f32,
        vehicles: Vec<Vehicle>,
    },
}

/// Flat lane type tag for renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaneTag {
    Field,
    Forest,
    CarLane,
    TruckLane,
}

/// One row of the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub index: u32,
    pub kind: LaneKind,
}

impl Lane {
    pub fn field(index: u32) -> Self {
        Self {
            index,
            kind: LaneKind::Field,
        }
    }

    pub fn tag(&self) -> LaneTag {
        match &self.kind {
            LaneKind::Field => LaneTag::Field,
            LaneKind::Forest { .. } => LaneTag::Forest,
            LaneKind::Road {
                vehicle: VehicleKind::Car,
                ..
            } => LaneTag::CarLane,
            LaneKind::Road {
                vehicle: VehicleKind::Truck,
                ..
            } => LaneTag::TruckLane,
        }
    }

    /// True if a tree stands in this column
    pub fn is_blocked(&self, column: u32) -> bool {
        match &self.kind {
            LaneKind::Forest { occupied } => occupied.contains(&column),
            _ => false,
        }
    }

    pub fn is_road(&self) -> bool {
        matches!(self.kind, LaneKind::Road { .. })
    }

    /// Blocked columns (empty unless forest)
    pub fn occupied_columns(&self) -> impl Iterator<Item = u32> + '_ {
        let occupied = match &self.kind {
            LaneKind::Forest { occupied } => Some(occupied),
            _ => None,
        };
        occupied.into_iter().flatten().copied()
    }

    /// Vehicles (empty unless road)
    pub fn vehicles(&self) -> &[Vehicle] {
        match &self.kind {
            LaneKind::Road { vehicles, .. } => vehicles,
            _ => &[],
        }
    }
}

/// Produces lanes from a seeded RNG
#[derive(Debug, Clone)]
pub struct LaneGenerator {
    rng: Pcg32,
    grid: Grid,
    config: GameConfig,
}

impl LaneGenerator {
    /// Build a generator; fails if the config could make placement loop forever
    pub fn new(config: &GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rng: Pcg32::seed_from_u64(seed),
            grid: config.grid(),
            config: config.clone(),
        })
    }

    /// Create the lane at `index`; lane 0 is always a safe field
    pub fn create_lane(&mut self, index: u32) -> Lane {
        if index == 0 {
            return Lane::field(index);
        }

        let kind = match self.rng.random_range(0..3) {
            0 => self.road(VehicleKind::Car),
            1 => self.road(VehicleKind::Truck),
            _ => self.forest(),
        };
        let lane = Lane { index, kind };
        log::debug!("Generated lane {} ({:?})", index, lane.tag());
        lane
    }

    fn forest(&mut self) -> LaneKind {
        let columns = distinct_slots(&mut self.rng, self.config.forest_obstacles, self.grid.columns);
        LaneKind::Forest {
            occupied: columns.into_iter().collect(),
        }
    }

    fn road(&mut self, vehicle: VehicleKind) -> LaneKind {
        let heading = if self.rng.random_bool(0.5) {
            Heading::Left
        } else {
            Heading::Right
        };

        let count = self.config.vehicles_per_lane(vehicle);
        let length = self.config.vehicle_length(vehicle);
        let span = vehicle.span();
        let slots = distinct_slots(&mut self.rng, count, self.grid.slot_count(span));
        let vehicles = slots
            .into_iter()
            .map(|slot| Vehicle {
                slot,
                x: self.grid.slot_x(slot, span),
                length,
            })
            .collect();

        let speeds = &self.config.lane_speeds;
        let speed = speeds[self.rng.random_range(0..speeds.len())];

        LaneKind::Road {
            vehicle,
            heading,
            speed,
            vehicles,
        }
    }
}
