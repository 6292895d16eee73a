//! The board: an append-only sequence of lanes

use super::lane::{Lane, LaneGenerator};

/// Board lookup errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("Lane {index} out of range (board has {len} lanes)")]
    OutOfRange { index: u32, len: u32 },
}

/// Lanes indexed 0..len, grown on demand as the player advances
#[derive(Debug, Clone)]
pub struct Board {
    lanes: Vec<Lane>,
    generator: LaneGenerator,
}

impl Board {
    /// Empty board drawing lanes from `generator`
    pub fn new(generator: LaneGenerator) -> Self {
        Self {
            lanes: Vec::new(),
            generator,
        }
    }

    /// Generate lane `index` if it is the next one; no-op for existing lanes
    ///
    /// Returns true if a lane was appended.
    pub fn ensure_lane(&mut self, index: u32) -> bool {
        if index != self.len() {
            return false;
        }
        let lane = self.generator.create_lane(index);
        self.lanes.push(lane);
        true
    }

    /// Append the next lane
    pub fn push_lane(&mut self) -> &Lane {
        let index = self.len();
        self.ensure_lane(index);
        &self.lanes[index as usize]
    }

    /// Generate every lane up to and including `last`
    pub fn extend_to(&mut self, last: u32) {
        while self.len() <= last {
            self.push_lane();
        }
    }

    pub fn lane_at(&self, index: u32) -> Result<&Lane, BoardError> {
        self.lanes
            .get(index as usize)
            .ok_or(BoardError::OutOfRange {
                index,
                len: self.len(),
            })
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lanes_mut(&mut self) -> &mut [Lane] {
        &mut self.lanes
    }

    pub fn len(&self) -> u32 {
        self.lanes.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Drop every lane (full game reset only)
    pub fn reset(&mut self) {
        self.lanes.clear();
    }
}
