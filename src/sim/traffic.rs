//! Vehicle motion
//!
//! Every road lane scrolls its vehicles at a constant speed. A vehicle that
//! leaves the board by more than the wrap margin reappears on the far side,
//! so a handful of vehicles per lane reads as endless traffic.

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::grid::Grid;
use super::lane::{Lane, LaneKind};
use crate::consts::SPEED_DIVISOR;

/// Wraparound bounds in world x
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WrapBounds {
    /// A bit before the beginning of the lane
    pub before: f32,
    /// A bit after the end of the lane
    pub after: f32,
}

impl WrapBounds {
    pub fn for_grid(grid: &Grid) -> Self {
        let extent = grid.wrap_extent();
        Self {
            before: -extent,
            after: extent,
        }
    }
}

/// Advance the vehicles of one lane by `delta_ms`
pub fn advance_lane(lane: &mut Lane, delta_ms: f32, bounds: WrapBounds) {
    let LaneKind::Road {
        heading,
        speed,
        vehicles,
        ..
    } = &mut lane.kind
    else {
        return;
    };

    let step = *speed * delta_ms / SPEED_DIVISOR * heading.sign();
    for vehicle in vehicles.iter_mut() {
        vehicle.x += step;
        if step < 0.0 && vehicle.x < bounds.before {
            vehicle.x = bounds.after;
        } else if step > 0.0 && vehicle.x > bounds.after {
            vehicle.x = bounds.before;
        }
    }
}

/// Advance every road lane on the board
pub fn advance_traffic(board: &mut Board, delta_ms: f32, bounds: WrapBounds) {
    for lane in board.lanes_mut() {
        advance_lane(lane, delta_ms, bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Heading, Vehicle, VehicleKind};

    fn road(heading: Heading, speed: f32, xs: &[f32]) -> Lane {
        Lane {
            index: 1,
            kind: LaneKind::Road {
                vehicle: VehicleKind::Car,
                heading,
                speed,
                vehicles: xs
                    .iter()
                    .enumerate()
                    .map(|(slot, &x)| Vehicle {
                        slot: slot as u32,
                        x,
                        length: 60.0,
                    })
                    .collect(),
            },
        }
    }

    fn bounds() -> WrapBounds {
        WrapBounds {
            before: -882.0,
            after: 882.0,
        }
    }

    #[test]
    fn test_bounds_for_default_grid() {
        let grid = Grid {
            columns: 17,
            position_width: 42.0,
            zoom: 2.0,
        };
        assert_eq!(WrapBounds::for_grid(&grid), bounds());
    }

    #[test]
    fn test_speed_scaling() {
        // speed 2 over 16 ms moves 2 units
        let mut lane = road(Heading::Right, 2.0, &[0.0, 100.0]);
        advance_lane(&mut lane, 16.0, bounds());
        let xs: Vec<_> = lane.vehicles().iter().map(|v| v.x).collect();
        assert_eq!(xs, vec![2.0, 102.0]);

        let mut lane = road(Heading::Left, 3.0, &[0.0]);
        advance_lane(&mut lane, 160.0, bounds());
        assert_eq!(lane.vehicles()[0].x, -30.0);
    }

    #[test]
    fn test_zero_delta_is_stationary() {
        let mut lane = road(Heading::Left, 2.5, &[10.0]);
        advance_lane(&mut lane, 0.0, bounds());
        assert_eq!(lane.vehicles()[0].x, 10.0);
    }

    #[test]
    fn test_wrap_left_snaps_to_after_same_tick() {
        let mut lane = road(Heading::Left, 2.0, &[-880.0]);
        // -880 - 4 = -884 < -882
        advance_lane(&mut lane, 32.0, bounds());
        assert_eq!(lane.vehicles()[0].x, 882.0);
    }

    #[test]
    fn test_wrap_right_snaps_to_before() {
        let mut lane = road(Heading::Right, 2.0, &[881.0]);
        advance_lane(&mut lane, 16.0, bounds());
        assert_eq!(lane.vehicles()[0].x, -882.0);
    }

    #[test]
    fn test_large_delta_still_snaps_to_bound() {
        let mut lane = road(Heading::Left, 3.0, &[0.0]);
        advance_lane(&mut lane, 60_000.0, bounds());
        assert_eq!(lane.vehicles()[0].x, 882.0);
    }

    #[test]
    fn test_non_road_lanes_untouched() {
        let mut lane = Lane::field(3);
        advance_lane(&mut lane, 16.0, bounds());
        assert_eq!(lane, Lane::field(3));
    }
}
