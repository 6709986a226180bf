//! Maps key names to commands.

use std::collections::HashMap;

use crate::events::GameCommand;
use crate::map::direction::Direction;

/// Key names (`"w"`, `"up"`, `"escape"`, ...) to commands. The runner feeds its
/// scripted presses through here; an interactive frontend would do the same.
#[derive(Debug, Clone)]
pub struct Bindings {
    key_bindings: HashMap<&'static str, GameCommand>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        // Player movement
        key_bindings.insert("w", GameCommand::MovePlayer(Direction::North));
        key_bindings.insert("up", GameCommand::MovePlayer(Direction::North));
        key_bindings.insert("s", GameCommand::MovePlayer(Direction::South));
        key_bindings.insert("down", GameCommand::MovePlayer(Direction::South));
        key_bindings.insert("a", GameCommand::MovePlayer(Direction::West));
        key_bindings.insert("left", GameCommand::MovePlayer(Direction::West));
        key_bindings.insert("d", GameCommand::MovePlayer(Direction::East));
        key_bindings.insert("right", GameCommand::MovePlayer(Direction::East));

        // Loop control
        key_bindings.insert("p", GameCommand::TogglePause);
        key_bindings.insert("r", GameCommand::Restart);
        key_bindings.insert("escape", GameCommand::Stop);
        key_bindings.insert("q", GameCommand::Stop);

        Self { key_bindings }
    }
}

impl Bindings {
    /// Looks up a key by name, ignoring case.
    pub fn command(&self, key: &str) -> Option<GameCommand> {
        self.key_bindings.get(key.to_ascii_lowercase().as_str()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_and_arrows() {
        let bindings = Bindings::default();
        assert_eq!(bindings.command("W"), Some(GameCommand::MovePlayer(Direction::North)));
        assert_eq!(bindings.command("left"), Some(GameCommand::MovePlayer(Direction::West)));
        assert_eq!(bindings.command("D"), Some(GameCommand::MovePlayer(Direction::East)));
        assert_eq!(bindings.command("x"), None);
    }
}
