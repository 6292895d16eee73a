//! Read-only views handed to renderers
//!
//! `Snapshot` is the small per-tick summary; `Frame` adds the world
//! positions of every lane's trees and vehicles.

use glam::Vec3;
use serde::Serialize;

use super::grid::Grid;
use super::lane::{Heading, Lane, LaneKind, LaneTag, VehicleKind};

/// Per-tick session summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    /// Player world position; `z` is the hop height
    pub player: Vec3,
    /// Camera position following the player
    pub camera: Vec3,
    /// Directional light position following the player
    pub light: Vec3,
    /// Committed lane
    pub lane: u32,
    /// Committed column
    pub column: u32,
    /// Distance score (committed lane)
    pub score: u32,
    /// Furthest lane reached this run
    pub best: u32,
    /// Run ended by a collision
    pub ended: bool,
}

impl Snapshot {
    pub fn alive(&self) -> bool {
        !self.ended
    }
}

/// A vehicle as the renderer needs it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VehicleView {
    pub x: f32,
    /// World length (zoom applied)
    pub length: f32,
    pub kind: VehicleKind,
    pub heading: Heading,
}

/// One lane as the renderer needs it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneView {
    pub index: u32,
    /// World y of the lane centre line
    pub y: f32,
    pub tag: LaneTag,
    /// World x of each tree
    pub obstacles: Vec<f32>,
    pub vehicles: Vec<VehicleView>,
}

impl LaneView {
    pub fn from_lane(lane: &Lane, grid: &Grid) -> Self {
        let vehicles = match &lane.kind {
            LaneKind::Road {
                vehicle,
                heading,
                vehicles,
                ..
            } => vehicles
                .iter()
                .map(|v| VehicleView {
                    x: v.x,
                    length: v.length * grid.zoom,
                    kind: *vehicle,
                    heading: *heading,
                })
                .collect(),
            _ => Vec::new(),
        };

        Self {
            index: lane.index,
            y: grid.lane_y(lane.index),
            tag: lane.tag(),
            obstacles: lane.occupied_columns().map(|c| grid.column_x(c)).collect(),
            vehicles,
        }
    }
}

/// Everything a renderer draws for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    pub lanes: Vec<LaneView>,
}
