use std::sync::Arc;

use crate::log_debug;
use super::board::Board;
use super::error::TicTacToeError;
use super::game_tree::{GameTree, NodeId};
use super::navigator::{advance, candidate_moves, select_ai_move};
use super::settings::TicTacToeSessionSettings;
use super::types::{GameStatus, Player, Position, TerminalStatus};

/// Starts a game on the shared tree with the human playing X.
pub fn new_game() -> TicTacToeSession {
    TicTacToeSession::new(GameTree::shared(), TicTacToeSessionSettings::default())
}

/// A single game in progress: a cursor into a read-only tree.
///
/// The cursor only ever moves to a child. A failed move leaves it where it was.
pub struct TicTacToeSession {
    tree: Arc<GameTree>,
    current: NodeId,
    ai_player: Player,
    status: GameStatus,
    history: Vec<Position>,
}

impl TicTacToeSession {
    pub fn new(tree: Arc<GameTree>, settings: TicTacToeSessionSettings) -> Self {
        let current = tree.root();
        Self {
            tree,
            current,
            ai_player: settings.ai_player,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    pub fn play_human_move(&mut self, row: usize, col: usize) -> Result<GameStatus, TicTacToeError> {
        self.ensure_turn(self.human_player())?;
        let pos = Position::new(row, col);
        self.apply(pos)?;
        log_debug!("Player moved to {}", pos);
        Ok(self.status)
    }

    pub fn play_ai_move(&mut self) -> Result<(Position, GameStatus), TicTacToeError> {
        self.ensure_turn(self.ai_player)?;
        let pos = select_ai_move(&self.tree, self.current)?;
        self.apply(pos)?;
        log_debug!("AI moving to {}, {}", pos.row, pos.col);
        Ok((pos, self.status))
    }

    fn ensure_turn(&self, player: Player) -> Result<(), TicTacToeError> {
        if self.status.is_over() {
            return Err(TicTacToeError::GameAlreadyOver);
        }
        let mover = self.current_player();
        if mover != player {
            return Err(TicTacToeError::WrongTurn { expected: mover });
        }
        Ok(())
    }

    fn apply(&mut self, pos: Position) -> Result<(), TicTacToeError> {
        let next = advance(&self.tree, self.current, pos)?;
        self.current = next;
        self.history.push(pos);
        self.status = status_for(self.board(), self.ai_player);
        Ok(())
    }

    pub fn board(&self) -> &Board {
        self.tree.node(self.current).board()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn current_node(&self) -> NodeId {
        self.current
    }

    pub fn current_player(&self) -> Player {
        self.tree.node(self.current).mover()
    }

    /// Minimax value of the current position, +1 X wins, -1 O wins.
    pub fn current_value(&self) -> i8 {
        self.tree.node(self.current).value()
    }

    pub fn ai_player(&self) -> Player {
        self.ai_player
    }

    pub fn human_player(&self) -> Player {
        self.ai_player.opponent()
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.status.is_over() && self.current_player() == self.ai_player
    }

    pub fn history(&self) -> &[Position] {
        &self.history
    }

    pub fn candidate_moves(&self) -> Vec<(Position, i8)> {
        candidate_moves(&self.tree, self.current)
    }
}

/// Reads the outcome straight off the board rather than from minimax values.
pub fn status_for(board: &Board, ai_player: Player) -> GameStatus {
    if board.is_winning_for(ai_player) {
        GameStatus::Finished(TerminalStatus::ComputerWon)
    } else if board.is_winning_for(ai_player.opponent()) {
        GameStatus::Finished(TerminalStatus::PlayerWon)
    } else if board.is_full() {
        GameStatus::Finished(TerminalStatus::Draw)
    } else {
        GameStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session_rng::SessionRng;

    fn session(ai_player: Player) -> TicTacToeSession {
        TicTacToeSession::new(GameTree::shared(), TicTacToeSessionSettings { ai_player })
    }

    fn play_random_human(session: &mut TicTacToeSession, rng: &mut SessionRng) -> GameStatus {
        let cells: Vec<Position> = session.board().empty_cells().collect();
        let pos = cells[rng.random_range(0..cells.len())];
        session.play_human_move(pos.row, pos.col).unwrap()
    }

    #[test]
    fn test_new_game_starts_at_root() {
        let game = new_game();
        assert_eq!(*game.board(), Board::new());
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.current_player(), Player::X);
        assert_eq!(game.ai_player(), Player::O);
        assert!(!game.is_ai_turn());
        assert!(game.history().is_empty());
        assert_eq!(game.current_value(), 0);
    }

    #[test]
    fn test_center_then_ai_corner() {
        let mut game = new_game();
        assert_eq!(game.play_human_move(1, 1), Ok(GameStatus::InProgress));
        assert!(game.is_ai_turn());

        let (pos, status) = game.play_ai_move().unwrap();
        assert_eq!(pos, Position::new(0, 0));
        assert_eq!(status, GameStatus::InProgress);
        assert_eq!(game.history(), &[Position::new(1, 1), Position::new(0, 0)]);
        assert_eq!(game.current_value(), 0);
    }

    #[test]
    fn test_invalid_move_leaves_session_untouched() {
        let mut game = new_game();
        game.play_human_move(1, 1).unwrap();
        game.play_ai_move().unwrap();

        let before = *game.board();
        let node = game.current_node();
        assert_eq!(game.play_human_move(0, 0), Err(TicTacToeError::InvalidMove { row: 0, col: 0 }));
        assert_eq!(game.play_human_move(5, 1), Err(TicTacToeError::InvalidMove { row: 5, col: 1 }));
        assert_eq!(*game.board(), before);
        assert_eq!(game.current_node(), node);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_wrong_turn() {
        let mut game = new_game();
        assert_eq!(game.play_ai_move(), Err(TicTacToeError::WrongTurn { expected: Player::X }));

        game.play_human_move(0, 0).unwrap();
        assert_eq!(game.play_human_move(0, 1), Err(TicTacToeError::WrongTurn { expected: Player::O }));
    }

    #[test]
    fn test_computer_first_opens_and_human_follows() {
        let mut game = session(Player::X);
        assert!(game.is_ai_turn());
        assert_eq!(game.play_human_move(1, 1), Err(TicTacToeError::WrongTurn { expected: Player::X }));

        let (pos, status) = game.play_ai_move().unwrap();
        assert_eq!(pos, Position::new(0, 0));
        assert_eq!(status, GameStatus::InProgress);
        assert_eq!(game.current_player(), Player::O);
        assert!(game.play_human_move(1, 1).is_ok());
    }

    #[test]
    fn test_human_win_is_reported() {
        let mut game = new_game();
        // O's replies are forced through the cursor, bypassing the AI
        for (row, col) in [(0, 0), (1, 0), (1, 1), (2, 0)] {
            game.apply(Position::new(row, col)).unwrap();
        }
        assert_eq!(game.play_human_move(2, 2), Ok(GameStatus::Finished(TerminalStatus::PlayerWon)));
        assert_eq!(game.play_ai_move(), Err(TicTacToeError::GameAlreadyOver));
        assert_eq!(game.play_human_move(2, 1), Err(TicTacToeError::GameAlreadyOver));
    }

    #[test]
    fn test_computer_wins_against_first_free_cell_play() {
        let mut game = new_game();
        let mut status = GameStatus::InProgress;
        while !status.is_over() {
            status = if game.is_ai_turn() {
                game.play_ai_move().unwrap().1
            } else {
                let pos = game.board().empty_cells().next().unwrap();
                game.play_human_move(pos.row, pos.col).unwrap()
            };
        }
        assert_eq!(status, GameStatus::Finished(TerminalStatus::ComputerWon));
        assert_eq!(game.board().winner(), Some(Player::O));
        assert_eq!(
            game.history(),
            &[
                Position::new(0, 0),
                Position::new(1, 1),
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(1, 0),
                Position::new(2, 0),
            ]
        );
    }

    #[test]
    fn test_status_for_reads_board() {
        let ai_won: Board = "OOO XX. X..".parse().unwrap();
        assert_eq!(status_for(&ai_won, Player::O), GameStatus::Finished(TerminalStatus::ComputerWon));
        assert_eq!(status_for(&ai_won, Player::X), GameStatus::Finished(TerminalStatus::PlayerWon));

        let draw: Board = "XOX XOO OXX".parse().unwrap();
        assert_eq!(status_for(&draw, Player::O), GameStatus::Finished(TerminalStatus::Draw));

        let open: Board = "XO. ... ...".parse().unwrap();
        assert_eq!(status_for(&open, Player::O), GameStatus::InProgress);
    }

    #[test]
    fn test_ai_never_loses_to_random_play() {
        for ai_player in [Player::O, Player::X] {
            for seed in 0..40 {
                let mut rng = SessionRng::new(seed);
                let mut game = session(ai_player);
                let mut status = GameStatus::InProgress;
                while !status.is_over() {
                    status = if game.is_ai_turn() {
                        let (_, status) = game.play_ai_move().unwrap();
                        // optimal play never gives up value
                        let value = game.current_value();
                        if ai_player == Player::O {
                            assert!(value <= 0);
                        } else {
                            assert!(value >= 0);
                        }
                        status
                    } else {
                        play_random_human(&mut game, &mut rng)
                    };
                }
                assert_ne!(status, GameStatus::Finished(TerminalStatus::PlayerWon), "seed {}", seed);
                assert_eq!(game.play_ai_move(), Err(TicTacToeError::GameAlreadyOver));
                assert_eq!(game.play_human_move(0, 0), Err(TicTacToeError::GameAlreadyOver));
            }
        }
    }

    #[test]
    fn test_ai_against_itself_draws() {
        let mut game = session(Player::O);
        let mut status = GameStatus::InProgress;
        while !status.is_over() {
            status = if game.is_ai_turn() {
                game.play_ai_move().unwrap().1
            } else {
                let pos = select_ai_move(&game.tree, game.current_node()).unwrap();
                game.play_human_move(pos.row, pos.col).unwrap()
            };
        }
        assert_eq!(status, GameStatus::Finished(TerminalStatus::Draw));
        assert_eq!(game.history().len(), 9);
    }
}
