//! Lane Hopper entry point
//!
//! The browser build is driven from JavaScript through `lane_hopper::web`.
//! Natively this runs a headless autoplay session and logs frames.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use lane_hopper::renderer::{LogRenderer, Renderer};
    use lane_hopper::sim::{Direction, GameSession, Interval};
    use lane_hopper::{ConfigError, GameConfig};

    /// Simulated frame length (ms)
    const FRAME_MS: f64 = 16.0;
    /// Simulated run length (ms)
    const RUN_MS: f64 = 60_000.0;
    /// Extra clearance the bot wants from oncoming traffic (world units)
    const SAFETY_MARGIN: f32 = 120.0;

    pub fn run() -> Result<(), ConfigError> {
        let config = match std::env::args().nth(1) {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        let mut session = GameSession::new(config)?;
        let mut renderer = LogRenderer::new(60);
        let mut now = 0.0;

        while now < RUN_MS {
            if session.queue().is_empty() {
                if let Some(direction) = choose_move(&session) {
                    session.request_move(direction);
                }
            }

            let snapshot = session.tick(now);
            renderer.render(&session.frame());
            if snapshot.ended {
                break;
            }
            now += FRAME_MS;
        }

        let snapshot = session.snapshot();
        println!(
            "Seed {}: reached lane {} (best {}) after {:.1}s{}",
            session.seed(),
            snapshot.score,
            snapshot.best,
            now / 1000.0,
            if snapshot.ended { ", hit by traffic" } else { "" }
        );
        Ok(())
    }

    /// Hop forward when the next lane looks clear, otherwise sidestep
    fn choose_move(session: &GameSession) -> Option<Direction> {
        let pos = session.position();
        let grid = session.grid();
        let config = session.config();
        let next = session.board().lane_at(pos.lane + 1).ok()?;

        let reach = config.player_size * grid.zoom + SAFETY_MARGIN;
        let player = Interval::centered(grid.column_x(pos.column), reach);
        let clear = next.vehicles().iter().all(|v| {
            !player.overlaps(&Interval::centered(v.x, v.length * grid.zoom + SAFETY_MARGIN))
        });

        if !clear {
            return None;
        }
        if !next.is_blocked(pos.column) {
            return Some(Direction::Forward);
        }
        let current = session.board().lane_at(pos.lane).ok()?;
        [Direction::Left, Direction::Right].into_iter().find(|direction| {
            direction
                .apply(pos)
                .is_some_and(|p| p.column < grid.columns && !current.is_blocked(p.column))
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lane Hopper (native) starting...");

    if let Err(err) = headless::run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is lane_hopper::web::start, this is just to satisfy the compiler
}
