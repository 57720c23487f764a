use std::fmt;

pub const BOARD_SIZE: usize = 3;

/// One of the two sides. X always moves first and is the maximizing player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(&self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn mark(&self) -> Mark {
        match self {
            Player::X => Mark::X,
            Player::O => Mark::O,
        }
    }

    pub fn is_maximizing(&self) -> bool {
        *self == Player::X
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mark())
    }
}

/// Contents of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn player(&self) -> Option<Player> {
        match self {
            Mark::X => Some(Player::X),
            Mark::O => Some(Player::O),
            Mark::Empty => None,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl From<Player> for Mark {
    fn from(player: Player) -> Self {
        player.mark()
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_on_board(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Cells numbered 1..=9 in row-major order, the way a keypad-style UI labels them.
    pub fn from_cell_number(number: usize) -> Option<Self> {
        if (1..=BOARD_SIZE * BOARD_SIZE).contains(&number) {
            Some(Self::new((number - 1) / BOARD_SIZE, (number - 1) % BOARD_SIZE))
        } else {
            None
        }
    }

    pub fn cell_number(&self) -> usize {
        self.row * BOARD_SIZE + self.col + 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub player: Player,
    pub start: Position,
    pub end: Position,
}

impl WinningLine {
    pub fn new(player: Player, start: Position, end: Position) -> Self {
        Self { player, start, end }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminalStatus {
    ComputerWon,
    PlayerWon,
    Draw,
}

impl fmt::Display for TerminalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalStatus::ComputerWon => write!(f, "Computer won!"),
            TerminalStatus::PlayerWon => write!(f, "Player won!"),
            TerminalStatus::Draw => write!(f, "Draw"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Finished(TerminalStatus),
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Finished(_))
    }
}
