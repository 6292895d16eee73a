//! Collision detection between the player and traffic
//!
//! Only the x axis matters: the player and every vehicle in the player's
//! committed lane are treated as intervals across the lane.

use super::lane::Lane;

/// A closed interval on the lane's x axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Interval of `length` centred on `center`
    pub fn centered(center: f32, length: f32) -> Self {
        Self {
            min: center - length / 2.0,
            max: center + length / 2.0,
        }
    }

    /// Strict overlap; touching edges do not collide
    #[inline]
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.max > other.min && self.min < other.max
    }
}

/// A vehicle the player ran into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index into the lane's vehicle list
    pub vehicle: usize,
    /// World x of the vehicle centre
    pub x: f32,
}

/// Check the player against every vehicle in `lane`
///
/// `player_size` and vehicle lengths are pre-zoom; positions are world units.
pub fn detect_collision(lane: &Lane, player_x: f32, player_size: f32, zoom: f32) -> Option<Hit> {
    let player = Interval::centered(player_x, player_size * zoom);
    lane.vehicles()
        .iter()
        .enumerate()
        .find(|(_, v)| player.overlaps(&Interval::centered(v.x, v.length * zoom)))
        .map(|(vehicle, v)| Hit { vehicle, x: v.x })
}
