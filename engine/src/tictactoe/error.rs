use super::types::{Player, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicTacToeError {
    /// No child of the current node was reached by this move: the cell is
    /// taken or off the board.
    InvalidMove { row: usize, col: usize },
    GameAlreadyOver,
    WrongTurn { expected: Player },
    NoMovesAvailable,
}

impl TicTacToeError {
    pub fn invalid_move(pos: Position) -> Self {
        TicTacToeError::InvalidMove { row: pos.row, col: pos.col }
    }
}

impl std::fmt::Display for TicTacToeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicTacToeError::InvalidMove { row, col } => {
                write!(f, "Invalid move: cell ({}, {}) is taken or out of bounds", row, col)
            }
            TicTacToeError::GameAlreadyOver => write!(f, "Game is already over"),
            TicTacToeError::WrongTurn { expected } => write!(f, "Not your turn: {} moves next", expected),
            TicTacToeError::NoMovesAvailable => write!(f, "No moves available from a finished position"),
        }
    }
}

impl std::error::Error for TicTacToeError {}
