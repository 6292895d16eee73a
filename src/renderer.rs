//! Renderer seam
//!
//! Scene construction lives with the host; the engine only hands out
//! `Frame`s. `LogRenderer` is the headless implementation used natively.

use crate::sim::Frame;

/// Anything that can present a frame of the game
pub trait Renderer {
    fn render(&mut self, frame: &Frame);
}

/// Logs a summary every `every` frames, and once when the run ends
#[derive(Debug, Clone)]
pub struct LogRenderer {
    every: u64,
    frames: u64,
    reported_end: bool,
}

impl LogRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
            reported_end: false,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, frame: &Frame) {
        self.frames += 1;
        let snap = &frame.snapshot;

        if snap.ended {
            if !self.reported_end {
                self.reported_end = true;
                log::info!("Run ended at lane {} (best {})", snap.score, snap.best);
            }
            return;
        }
        self.reported_end = false;

        if self.frames % self.every == 0 {
            let traffic: usize = frame.lanes.iter().map(|l| l.vehicles.len()).sum();
            log::info!(
                "frame {}: lane {} column {} at ({:.1}, {:.1}, hop {:.1}), {} lanes, {} vehicles",
                self.frames,
                snap.lane,
                snap.column,
                snap.player.x,
                snap.player.y,
                snap.player.z,
                frame.lanes.len(),
                traffic
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::GameSession;

    #[test]
    fn test_log_renderer_counts_frames() {
        let session = GameSession::with_seed(GameConfig::default(), 3).unwrap();
        let mut renderer = LogRenderer::new(0);
        for _ in 0..5 {
            renderer.render(&session.frame());
        }
        assert_eq!(renderer.frames(), 5);
    }
}
