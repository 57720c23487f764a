use serde::{Deserialize, Serialize};

use crate::session_rng::SessionRng;
use super::types::Player;

/// Who places the first mark. The first mover always plays X.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstPlayerMode {
    #[default]
    Human,
    Computer,
    Random,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TicTacToeSessionSettings {
    pub ai_player: Player,
}

impl Default for TicTacToeSessionSettings {
    fn default() -> Self {
        Self { ai_player: Player::O }
    }
}

impl TicTacToeSessionSettings {
    pub fn from_first_player_mode(mode: FirstPlayerMode, rng: &mut SessionRng) -> Self {
        let computer_first = match mode {
            FirstPlayerMode::Human => false,
            FirstPlayerMode::Computer => true,
            FirstPlayerMode::Random => rng.random_bool(),
        };
        let ai_player = if computer_first { Player::X } else { Player::O };
        Self { ai_player }
    }

    pub fn human_player(&self) -> Player {
        self.ai_player.opponent()
    }
}
