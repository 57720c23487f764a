use std::fmt;
use std::str::FromStr;

use super::types::{BOARD_SIZE, Mark, Player, Position};
use super::win_detector::{check_win, is_winning_for};

const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A 3x3 grid. Boards are values: placing a mark yields a new board and
/// leaves the original untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Mark; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Off-board positions read as `Mark::Empty`.
    pub fn mark_at(&self, pos: Position) -> Mark {
        if pos.is_on_board() {
            self.cells[pos.row][pos.col]
        } else {
            Mark::Empty
        }
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        pos.is_on_board() && self.cells[pos.row][pos.col] == Mark::Empty
    }

    /// Returns a copy with `pos` set to `player`'s mark.
    ///
    /// The cell must be on the board and empty.
    pub fn with_mark(&self, pos: Position, player: Player) -> Board {
        debug_assert!(
            self.is_empty_at(pos),
            "cell {} is not an empty cell of\n{}",
            pos,
            self
        );
        let mut next = *self;
        next.cells[pos.row][pos.col] = player.mark();
        next
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
            .filter(|&pos| self.mark_at(pos) == Mark::Empty)
    }

    pub fn empty_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Mark::Empty)
            .count()
    }

    pub fn count_of(&self, player: Player) -> usize {
        let mark = player.mark();
        self.cells.iter().flatten().filter(|&&cell| cell == mark).count()
    }

    pub fn is_winning_for(&self, player: Player) -> bool {
        is_winning_for(self, player)
    }

    pub fn winner(&self) -> Option<Player> {
        check_win(self)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&cell| cell != Mark::Empty)
    }

    pub fn is_draw(&self) -> bool {
        self.is_full() && self.winner().is_none()
    }

    pub fn is_terminal(&self) -> bool {
        self.is_winning_for(Player::X) || self.is_winning_for(Player::O) || self.is_full()
    }

    /// Exact outcome of a finished game: +1 X won, -1 O won, 0 otherwise.
    pub fn utility(&self) -> i8 {
        if self.is_winning_for(Player::X) {
            1
        } else if self.is_winning_for(Player::O) {
            -1
        } else {
            0
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            writeln!(f, "{} | {} | {}", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardParseError {
    InvalidLength { expected: usize, got: usize },
    InvalidCharacter { character: char, position: usize },
}

impl fmt::Display for BoardParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardParseError::InvalidLength { expected, got } => {
                write!(f, "Board needs {} cells, got {}", expected, got)
            }
            BoardParseError::InvalidCharacter { character, position } => {
                write!(f, "Invalid cell character '{}' at cell {}", character, position)
            }
        }
    }
}

impl std::error::Error for BoardParseError {}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Reads nine cells row by row. `X`/`O` (any case) are marks, `.` and `-`
    /// are empty; whitespace and `|` separators are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::new();
        let mut count = 0;
        for character in s.chars() {
            if character.is_whitespace() || character == '|' {
                continue;
            }
            let mark = match character {
                'X' | 'x' => Mark::X,
                'O' | 'o' => Mark::O,
                '.' | '-' | '_' => Mark::Empty,
                _ => {
                    return Err(BoardParseError::InvalidCharacter { character, position: count });
                }
            };
            if count < CELL_COUNT {
                board.cells[count / BOARD_SIZE][count % BOARD_SIZE] = mark;
            }
            count += 1;
        }
        if count != CELL_COUNT {
            return Err(BoardParseError::InvalidLength { expected: CELL_COUNT, got: count });
        }
        Ok(board)
    }
}
