//! Input mapping
//!
//! Translates host key and button events into session commands. The host
//! owns event wiring; this only decides what an event means.

use crate::sim::{Direction, GameSession};

/// A discrete player command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    /// Start over (the retry button)
    Reset,
}

impl Command {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Command::Move(Direction::Forward)),
            "ArrowDown" => Some(Command::Move(Direction::Backward)),
            "ArrowLeft" => Some(Command::Move(Direction::Left)),
            "ArrowRight" => Some(Command::Move(Direction::Right)),
            _ => None,
        }
    }

    /// Map a legacy `KeyboardEvent.keyCode`
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            38 => Some(Command::Move(Direction::Forward)),
            40 => Some(Command::Move(Direction::Backward)),
            37 => Some(Command::Move(Direction::Left)),
            39 => Some(Command::Move(Direction::Right)),
            _ => None,
        }
    }

    /// Map an on-screen button id
    pub fn from_button(id: &str) -> Option<Self> {
        match id {
            "retry" => Some(Command::Reset),
            other => other.parse().ok().map(Command::Move),
        }
    }

    /// Apply to a session; returns true if anything changed
    pub fn apply(self, session: &mut GameSession) -> bool {
        match self {
            Command::Move(direction) => session.request_move(direction),
            Command::Reset => {
                session.reset();
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(
            Command::from_key("ArrowUp"),
            Some(Command::Move(Direction::Forward))
        );
        assert_eq!(
            Command::from_key("ArrowLeft"),
            Some(Command::Move(Direction::Left))
        );
        assert_eq!(Command::from_key("d"), None);
    }

    #[test]
    fn test_key_codes_match_keys() {
        for (code, key) in [
            (38, "ArrowUp"),
            (40, "ArrowDown"),
            (37, "ArrowLeft"),
            (39, "ArrowRight"),
        ] {
            assert_eq!(Command::from_key_code(code), Command::from_key(key));
        }
        assert_eq!(Command::from_key_code(13), None);
    }

    #[test]
    fn test_buttons() {
        assert_eq!(Command::from_button("retry"), Some(Command::Reset));
        assert_eq!(
            Command::from_button("backward"),
            Some(Command::Move(Direction::Backward))
        );
        assert_eq!(Command::from_button("darkMode"), None);
    }

    #[test]
    fn test_apply_to_session() {
        let mut session = GameSession::with_seed(GameConfig::default(), 5).unwrap();
        assert!(Command::Move(Direction::Left).apply(&mut session));
        assert!(!Command::Move(Direction::Backward).apply(&mut session));
        assert_eq!(session.queue().len(), 1);
        assert!(Command::Reset.apply(&mut session));
        assert!(session.queue().is_empty());
    }
}
