//! Movement queue and step state machine
//!
//! Each accepted command is one full cell hop. Hops play back one at a time,
//! each interpolated over the configured step duration; the next queued hop
//! starts on the same tick the previous one commits.

use std::collections::VecDeque;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::board::{Board, BoardError};
use super::grid::GridPos;

/// A one-cell move command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
    ];

    /// Cell reached by hopping from `pos`, or None below lane/column 0
    ///
    /// The upper column bound depends on the board and is checked by
    /// `validate_move`.
    pub fn apply(self, pos: GridPos) -> Option<GridPos> {
        let GridPos { lane, column } = pos;
        match self {
            Direction::Forward => Some(GridPos::new(lane.checked_add(1)?, column)),
            Direction::Backward => Some(GridPos::new(lane.checked_sub(1)?, column)),
            Direction::Left => Some(GridPos::new(lane, column.checked_sub(1)?)),
            Direction::Right => Some(GridPos::new(lane, column.checked_add(1)?)),
        }
    }

    /// Unit world-space offset of one hop
    pub fn offset(self) -> Vec2 {
        match self {
            Direction::Forward => Vec2::Y,
            Direction::Backward => Vec2::NEG_Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown direction: {0}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forward" | "up" => Ok(Direction::Forward),
            "backward" | "down" => Ok(Direction::Backward),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// Why a move was refused (never shown to the player)
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejection {
    #[error("move leaves the board")]
    OffBoard,

    #[error("tree at lane {lane}, column {column}")]
    Blocked { lane: u32, column: u32 },

    #[error("game is over")]
    GameOver,

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Check a hop from the final queued position `from`
///
/// Only the destination cell is checked against forest occupancy.
pub fn validate_move(
    board: &Board,
    columns: u32,
    from: GridPos,
    direction: Direction,
) -> Result<GridPos, MoveRejection> {
    let target = direction.apply(from).ok_or(MoveRejection::OffBoard)?;
    if target.column >= columns {
        return Err(MoveRejection::OffBoard);
    }
    if board.lane_at(target.lane)?.is_blocked(target.column) {
        return Err(MoveRejection::Blocked {
            lane: target.lane,
            column: target.column,
        });
    }
    Ok(target)
}

/// State machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPhase {
    /// No hop pending
    Idle,
    /// A hop is interpolating (or will start on the next tick)
    Stepping,
}

/// Progress of the head hop after a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepProgress {
    pub direction: Direction,
    /// Fraction of the hop completed, in [0, 1]
    pub fraction: f32,
    /// The hop finished this tick and was popped
    pub committed: bool,
}

/// FIFO of accepted, not-yet-completed hops
#[derive(Debug, Clone, Default)]
pub struct MoveQueue {
    moves: VecDeque<Direction>,
    /// When the head hop began interpolating
    step_start: Option<f64>,
    /// A hop was accepted while idle; it starts at the next tick
    start_pending: bool,
}

impl MoveQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> StepPhase {
        if self.step_start.is_some() || self.start_pending {
            StepPhase::Stepping
        } else {
            StepPhase::Idle
        }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn head(&self) -> Option<Direction> {
        self.moves.front().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.moves.iter().copied()
    }

    pub fn step_start(&self) -> Option<f64> {
        self.step_start
    }

    /// Resting position once every queued hop has played out
    pub fn final_position(&self, from: GridPos) -> Option<GridPos> {
        self.moves.iter().try_fold(from, |pos, dir| dir.apply(pos))
    }

    /// Enqueue an already validated hop
    pub fn push(&mut self, direction: Direction) {
        if self.step_start.is_none() {
            self.start_pending = true;
        }
        self.moves.push_back(direction);
    }

    /// Advance the head hop to `now`
    ///
    /// A hop commits once strictly more than `step_ms` has elapsed; the next
    /// hop then starts at `now`.
    pub fn advance(&mut self, now: f64, step_ms: f64) -> Option<StepProgress> {
        if self.start_pending {
            self.step_start = Some(now);
            self.start_pending = false;
        }
        let start = self.step_start?;
        let Some(direction) = self.head() else {
            self.step_start = None;
            return None;
        };

        let elapsed = now - start;
        let fraction = (elapsed / step_ms).clamp(0.0, 1.0) as f32;
        let committed = elapsed > step_ms;
        if committed {
            self.moves.pop_front();
            self.step_start = if self.moves.is_empty() {
                None
            } else {
                Some(now)
            };
        }

        Some(StepProgress {
            direction,
            fraction,
            committed,
        })
    }

    pub fn clear(&mut self) {
        self.moves.clear();
        self.step_start = None;
        self.start_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{Lane, LaneGenerator, LaneKind};
    use proptest::prelude::*;

    /// Board whose lane 1 is a forest with trees in columns 3 and 8
    fn forest_board() -> Board {
        let mut board = Board::new(LaneGenerator::new(&GameConfig::default(), 1).unwrap());
        board.extend_to(3);
        board.lanes_mut()[1] = Lane {
            index: 1,
            kind: LaneKind::Forest {
                occupied: [3, 8].into_iter().collect(),
            },
        };
        board.lanes_mut()[2] = Lane::field(2);
        board
    }

    #[test]
    fn test_direction_apply() {
        let p = GridPos::new(2, 5);
        assert_eq!(Direction::Forward.apply(p), Some(GridPos::new(3, 5)));
        assert_eq!(Direction::Backward.apply(p), Some(GridPos::new(1, 5)));
        assert_eq!(Direction::Left.apply(p), Some(GridPos::new(2, 4)));
        assert_eq!(Direction::Right.apply(p), Some(GridPos::new(2, 6)));
        assert_eq!(Direction::Backward.apply(GridPos::new(0, 5)), None);
        assert_eq!(Direction::Left.apply(GridPos::new(1, 0)), None);
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("Forward".parse::<Direction>(), Ok(Direction::Forward));
        assert_eq!("down".parse::<Direction>(), Ok(Direction::Backward));
        assert!("sideways".parse::<Direction>().is_err());
        for dir in Direction::ALL {
            assert_eq!(dir.as_str().parse::<Direction>(), Ok(dir));
        }
    }

    #[test]
    fn test_validate_edges() {
        let board = forest_board();
        let start = GridPos::new(0, 0);
        assert_eq!(
            validate_move(&board, 17, start, Direction::Left),
            Err(MoveRejection::OffBoard)
        );
        assert_eq!(
            validate_move(&board, 17, start, Direction::Backward),
            Err(MoveRejection::OffBoard)
        );
        assert_eq!(
            validate_move(&board, 17, GridPos::new(0, 16), Direction::Right),
            Err(MoveRejection::OffBoard)
        );
        assert!(validate_move(&board, 17, GridPos::new(0, 15), Direction::Right).is_ok());
    }

    #[test]
    fn test_validate_forest() {
        let board = forest_board();
        // Into a tree from below and above
        assert_eq!(
            validate_move(&board, 17, GridPos::new(0, 8), Direction::Forward),
            Err(MoveRejection::Blocked { lane: 1, column: 8 })
        );
        assert_eq!(
            validate_move(&board, 17, GridPos::new(2, 3), Direction::Backward),
            Err(MoveRejection::Blocked { lane: 1, column: 3 })
        );
        // Sideways into a tree within the forest lane
        assert_eq!(
            validate_move(&board, 17, GridPos::new(1, 7), Direction::Right),
            Err(MoveRejection::Blocked { lane: 1, column: 8 })
        );
        assert_eq!(
            validate_move(&board, 17, GridPos::new(1, 4), Direction::Left),
            Err(MoveRejection::Blocked { lane: 1, column: 3 })
        );
        // Free cell
        assert_eq!(
            validate_move(&board, 17, GridPos::new(0, 7), Direction::Forward),
            Ok(GridPos::new(1, 7))
        );
    }

    #[test]
    fn test_validate_beyond_board() {
        let board = forest_board();
        assert_eq!(
            validate_move(&board, 17, GridPos::new(3, 0), Direction::Forward),
            Err(MoveRejection::Board(BoardError::OutOfRange { index: 4, len: 4 }))
        );
    }

    #[test]
    fn test_queue_state_machine() {
        let mut queue = MoveQueue::new();
        assert_eq!(queue.phase(), StepPhase::Idle);
        assert_eq!(queue.advance(0.0, 200.0), None);

        queue.push(Direction::Forward);
        assert_eq!(queue.phase(), StepPhase::Stepping);

        // First tick arms the step at its own timestamp
        let p = queue.advance(1000.0, 200.0).unwrap();
        assert_eq!(p.fraction, 0.0);
        assert!(!p.committed);
        assert_eq!(queue.step_start(), Some(1000.0));

        let p = queue.advance(1100.0, 200.0).unwrap();
        assert!((p.fraction - 0.5).abs() < 1e-6);

        // Exactly step_ms does not commit yet
        let p = queue.advance(1200.0, 200.0).unwrap();
        assert_eq!(p.fraction, 1.0);
        assert!(!p.committed);

        let p = queue.advance(1201.0, 200.0).unwrap();
        assert!(p.committed);
        assert_eq!(p.direction, Direction::Forward);
        assert!(queue.is_empty());
        assert_eq!(queue.phase(), StepPhase::Idle);
    }

    #[test]
    fn test_next_step_starts_on_commit_tick() {
        let mut queue = MoveQueue::new();
        queue.push(Direction::Left);
        queue.push(Direction::Forward);
        queue.advance(0.0, 200.0);

        let p = queue.advance(500.0, 200.0).unwrap();
        assert!(p.committed);
        assert_eq!(p.direction, Direction::Left);
        assert_eq!(queue.step_start(), Some(500.0));
        assert_eq!(queue.head(), Some(Direction::Forward));

        // A push while stepping does not re-arm the start time
        queue.push(Direction::Right);
        assert_eq!(queue.step_start(), Some(500.0));

        let p = queue.advance(550.0, 200.0).unwrap();
        assert_eq!(p.direction, Direction::Forward);
        assert!((p.fraction - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_final_position_folds_queue() {
        let mut queue = MoveQueue::new();
        for dir in [Direction::Forward, Direction::Left, Direction::Forward] {
            queue.push(dir);
        }
        assert_eq!(
            queue.iter().collect::<Vec<_>>(),
            vec![Direction::Forward, Direction::Left, Direction::Forward]
        );
        assert_eq!(
            queue.final_position(GridPos::new(0, 8)),
            Some(GridPos::new(2, 7))
        );
    }

    #[test]
    fn test_clear() {
        let mut queue = MoveQueue::new();
        queue.push(Direction::Right);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.phase(), StepPhase::Idle);
        assert_eq!(queue.advance(10.0, 200.0), None);
    }

    proptest! {
        #[test]
        fn prop_fraction_bounded(elapsed in 0.0f64..10_000.0, step in 1.0f64..1_000.0) {
            let mut queue = MoveQueue::new();
            queue.push(Direction::Forward);
            queue.advance(0.0, step);
            let p = queue.advance(elapsed, step).unwrap();
            prop_assert!((0.0..=1.0).contains(&p.fraction));
            prop_assert_eq!(p.committed, elapsed > step);
        }
    }
}
