mod board;
mod error;
mod game_tree;
mod navigator;
mod session;
mod settings;
mod types;
mod win_detector;

pub use board::{Board, BoardParseError};
pub use error::TicTacToeError;
pub use game_tree::{FULL_TREE_NODE_COUNT, GameTree, NodeId, TreeNode, TreeStats};
pub use navigator::{advance, best_child, candidate_moves, select_ai_move};
pub use session::{TicTacToeSession, new_game, status_for};
pub use settings::{FirstPlayerMode, TicTacToeSessionSettings};
pub use types::{BOARD_SIZE, GameStatus, Mark, Player, Position, TerminalStatus, WinningLine};
pub use win_detector::{WINNING_LINES, check_win, check_win_with_line};
