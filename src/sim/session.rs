//! Game session: owns the board, the player and the move queue
//!
//! The host calls `tick` once per rendered frame with its frame timestamp
//! (milliseconds) and forwards input through `request_move` / `reset`.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::collision::detect_collision;
use super::grid::{Grid, GridPos};
use super::lane::LaneGenerator;
use super::movement::{Direction, MoveQueue, MoveRejection, validate_move};
use super::snapshot::{Frame, LaneView, Snapshot};
use super::traffic::{WrapBounds, advance_traffic};
use crate::config::{ConfigError, GameConfig};
use crate::consts::{CAMERA_TILT_X_DEG, CAMERA_TILT_Y_DEG, LIGHT_START};
use crate::hop_arc;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player is alive
    Playing,
    /// Hit by a vehicle; terminal until reset
    GameOver,
}

/// The player piece
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Committed cell
    pub pos: GridPos,
    /// Interpolated world position; `z` is the hop height
    pub world: Vec3,
}

impl Player {
    fn spawn(grid: &Grid) -> Self {
        let pos = GridPos::new(0, grid.center_column());
        Self {
            pos,
            world: grid.world_position(pos).extend(0.0),
        }
    }
}

/// Camera and light start positions; both follow the player's planar offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub camera_start: Vec3,
    pub light_start: Vec3,
}

impl CameraRig {
    pub fn new(distance: f32) -> Self {
        let tilt_x = CAMERA_TILT_X_DEG.to_radians();
        let tilt_y = CAMERA_TILT_Y_DEG.to_radians();
        let y = -tilt_x.tan() * distance;
        let x = tilt_y.tan() * (distance * distance + y * y).sqrt();
        Self {
            camera_start: Vec3::new(x, y, distance),
            light_start: Vec3::from_array(LIGHT_START),
        }
    }

    pub fn camera_at(&self, planar: Vec2) -> Vec3 {
        self.camera_start + planar.extend(0.0)
    }

    pub fn light_at(&self, planar: Vec2) -> Vec3 {
        self.light_start + planar.extend(0.0)
    }
}

/// One run of the game
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    bounds: WrapBounds,
    rig: CameraRig,
    seed: u64,
    board: Board,
    player: Player,
    queue: MoveQueue,
    phase: GamePhase,
    previous_timestamp: Option<f64>,
    best_lane: u32,
}

impl GameSession {
    /// Start a session; draws a random seed unless the config fixes one
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::with_seed(config, seed)
    }

    /// Start a session with an explicit seed
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let generator = LaneGenerator::new(&config, seed)?;
        let grid = config.grid();
        let mut session = Self {
            bounds: WrapBounds::for_grid(&grid),
            rig: CameraRig::new(config.camera_distance),
            seed,
            board: Board::new(generator),
            player: Player::spawn(&grid),
            queue: MoveQueue::new(),
            phase: GamePhase::Playing,
            previous_timestamp: None,
            best_lane: 0,
            grid,
            config,
        };
        session.reset();
        log::info!("Game session started with seed: {}", seed);
        Ok(session)
    }

    /// Back to the start: fresh board, player on the centre of lane 0
    pub fn reset(&mut self) {
        self.board.reset();
        self.board.extend_to(self.config.lanes_ahead);
        self.player = Player::spawn(&self.grid);
        self.queue.clear();
        self.phase = GamePhase::Playing;
        self.previous_timestamp = None;
        self.best_lane = 0;
        log::debug!("Session reset ({} lanes)", self.board.len());
    }

    /// Queue a hop; returns false (and changes nothing) if it is not allowed
    pub fn request_move(&mut self, direction: Direction) -> bool {
        match self.try_move(direction) {
            Ok(target) => {
                log::trace!("Queued {} toward {:?}", direction.as_str(), target);
                true
            }
            Err(reason) => {
                log::trace!("Dropped {}: {}", direction.as_str(), reason);
                false
            }
        }
    }

    /// Validate against the position after every queued hop, then enqueue
    fn try_move(&mut self, direction: Direction) -> Result<GridPos, MoveRejection> {
        if self.phase == GamePhase::GameOver {
            return Err(MoveRejection::GameOver);
        }
        let from = self
            .queue
            .final_position(self.player.pos)
            .ok_or(MoveRejection::OffBoard)?;
        let target = validate_move(&self.board, self.grid.columns, from, direction)?;

        if direction == Direction::Forward {
            self.board.push_lane();
        }
        self.queue.push(direction);
        Ok(target)
    }

    /// Advance the simulation to `now` (ms) and report the result
    pub fn tick(&mut self, now: f64) -> Snapshot {
        if self.phase == GamePhase::GameOver {
            return self.snapshot();
        }

        let delta = match self.previous_timestamp {
            Some(previous) => (now - previous).max(0.0) as f32,
            None => 0.0,
        };
        self.previous_timestamp = Some(now);

        advance_traffic(&mut self.board, delta, self.bounds);
        self.update_step(now);
        self.check_collision();

        self.snapshot()
    }

    fn update_step(&mut self, now: f64) {
        let Some(progress) = self.queue.advance(now, self.config.step_time_ms) else {
            return;
        };

        let base = self.grid.world_position(self.player.pos);
        let planar = base + progress.direction.offset() * (progress.fraction * self.grid.cell());
        let hop = hop_arc(progress.fraction) * self.config.hop_height * self.grid.zoom;
        self.player.world = planar.extend(hop);

        if progress.committed {
            if let Some(next) = progress.direction.apply(self.player.pos) {
                self.player.pos = next;
            }
            if self.player.pos.lane > self.best_lane {
                self.best_lane = self.player.pos.lane;
                log::debug!("Score: {}", self.best_lane);
            }
        }
    }

    /// Collisions are checked in the committed lane only, not the lane being hopped into
    fn check_collision(&mut self) {
        let lane = match self.board.lane_at(self.player.pos.lane) {
            Ok(lane) => lane,
            Err(err) => {
                log::error!("Player outside the board: {}", err);
                return;
            }
        };
        if !lane.is_road() {
            return;
        }

        if let Some(hit) = detect_collision(
            lane,
            self.player.world.x,
            self.config.player_size,
            self.grid.zoom,
        ) {
            self.phase = GamePhase::GameOver;
            log::info!(
                "Game over: hit vehicle {} (x = {:.1}) in lane {}, score {} (best {})",
                hit.vehicle,
                hit.x,
                self.player.pos.lane,
                self.player.pos.lane,
                self.best_lane
            );
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let planar = self.player.world.truncate();
        Snapshot {
            player: self.player.world,
            camera: self.rig.camera_at(planar),
            light: self.rig.light_at(planar),
            lane: self.player.pos.lane,
            column: self.player.pos.column,
            score: self.player.pos.lane,
            best: self.best_lane,
            ended: self.phase == GamePhase::GameOver,
        }
    }

    /// Snapshot plus every lane's world layout
    pub fn frame(&self) -> Frame {
        Frame {
            snapshot: self.snapshot(),
            lanes: self.lane_views(),
        }
    }

    pub fn lane_views(&self) -> Vec<LaneView> {
        self.board
            .lanes()
            .iter()
            .map(|lane| LaneView::from_lane(lane, &self.grid))
            .collect()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_alive(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn position(&self) -> GridPos {
        self.player.pos
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn queue(&self) -> &MoveQueue {
        &self.queue
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn best_lane(&self) -> u32 {
        self.best_lane
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}
