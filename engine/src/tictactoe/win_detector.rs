use super::board::Board;
use super::types::{Player, Position, WinningLine};

const fn pos(row: usize, col: usize) -> Position {
    Position { row, col }
}

/// Rows, then columns, then the two diagonals.
pub const WINNING_LINES: [[Position; 3]; 8] = [
    [pos(0, 0), pos(0, 1), pos(0, 2)],
    [pos(1, 0), pos(1, 1), pos(1, 2)],
    [pos(2, 0), pos(2, 1), pos(2, 2)],
    [pos(0, 0), pos(1, 0), pos(2, 0)],
    [pos(0, 1), pos(1, 1), pos(2, 1)],
    [pos(0, 2), pos(1, 2), pos(2, 2)],
    [pos(0, 0), pos(1, 1), pos(2, 2)],
    [pos(2, 0), pos(1, 1), pos(0, 2)],
];

pub fn is_winning_for(board: &Board, player: Player) -> bool {
    let mark = player.mark();
    WINNING_LINES
        .iter()
        .any(|line| line.iter().all(|&p| board.mark_at(p) == mark))
}

pub fn check_win(board: &Board) -> Option<Player> {
    check_win_with_line(board).map(|line| line.player)
}

/// First completed line in `WINNING_LINES` order, if any.
pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    for line in WINNING_LINES.iter() {
        let Some(player) = board.mark_at(line[0]).player() else {
            continue;
        };
        if line[1..].iter().all(|&p| board.mark_at(p) == player.mark()) {
            return Some(WinningLine::new(player, line[0], line[2]));
        }
    }
    None
}
