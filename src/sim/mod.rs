//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering:
//! - Seeded RNG only
//! - Timestamps come from the host, never from a clock
//! - Pure lane data; renderers read `Frame`s

pub mod board;
pub mod collision;
pub mod grid;
pub mod lane;
pub mod movement;
pub mod placement;
pub mod session;
pub mod snapshot;
pub mod traffic;

pub use board::{Board, BoardError};
pub use collision::{Hit, Interval, detect_collision};
pub use grid::{Grid, GridPos};
pub use lane::{Heading, Lane, LaneGenerator, LaneKind, LaneTag, Vehicle, VehicleKind};
pub use movement::{
    Direction, MoveQueue, MoveRejection, ParseDirectionError, StepPhase, StepProgress,
    validate_move,
};
pub use placement::distinct_slots;
pub use session::{CameraRig, GamePhase, GameSession, Player};
pub use snapshot::{Frame, LaneView, Snapshot, VehicleView};
pub use traffic::{WrapBounds, advance_lane, advance_traffic};
