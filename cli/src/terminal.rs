use std::io::{self, BufRead, Write};

use tictactoe_engine::log_debug;
use tictactoe_engine::tictactoe::{
    GameStatus, Position, TerminalStatus, TicTacToeSession, check_win_with_line,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Position),
    Quit,
}

/// Accepts a cell number `1..=9` or a 0-based `row col` pair.
pub fn parse_command(input: &str) -> Result<Command, String> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
        return Ok(Command::Quit);
    }

    let parts: Vec<&str> = input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .collect();

    match parts.as_slice() {
        [cell] => {
            let number: usize = cell
                .parse()
                .map_err(|_| format!("'{}' is not a cell number", cell))?;
            Position::from_cell_number(number)
                .map(Command::Move)
                .ok_or_else(|| format!("Cell number must be between 1 and 9, got {}", number))
        }
        [row, col] => {
            let row: usize = row.parse().map_err(|_| format!("'{}' is not a row", row))?;
            let col: usize = col.parse().map_err(|_| format!("'{}' is not a column", col))?;
            Ok(Command::Move(Position::new(row, col)))
        }
        _ => Err("Enter a cell number 1-9, 'row col', or q to quit".to_string()),
    }
}

/// Plays one game over the given streams. Returns `None` if the player quit
/// or input ran out before the game ended.
pub fn run_game<R, W>(
    mut session: TicTacToeSession,
    show_evaluations: bool,
    mut input: R,
    mut output: W,
) -> io::Result<Option<TerminalStatus>>
where
    R: BufRead,
    W: Write,
{
    writeln!(
        output,
        "You play {}, the computer plays {}.",
        session.human_player(),
        session.ai_player()
    )?;

    let mut line = String::new();
    loop {
        if let GameStatus::Finished(result) = session.status() {
            write!(output, "{}", session.board())?;
            if let Some(winning_line) = check_win_with_line(session.board()) {
                writeln!(
                    output,
                    "{} completes {} to {}",
                    winning_line.player, winning_line.start, winning_line.end
                )?;
            }
            writeln!(output, "{}", result)?;
            return Ok(Some(result));
        }

        if session.is_ai_turn() {
            let (pos, _) = session.play_ai_move().map_err(io::Error::other)?;
            writeln!(output, "Computer plays cell {} {}", pos.cell_number(), pos)?;
            continue;
        }

        write!(output, "{}", session.board())?;
        if show_evaluations {
            for (pos, value) in session.candidate_moves() {
                writeln!(output, "  cell {} {} -> {:+}", pos.cell_number(), pos, value)?;
            }
        }
        write!(output, "Your move ({}): ", session.human_player())?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match parse_command(&line) {
            Ok(Command::Quit) => return Ok(None),
            Ok(Command::Move(pos)) => {
                if let Err(e) = session.play_human_move(pos.row, pos.col) {
                    log_debug!("Rejected move {}: {}", pos, e);
                    writeln!(output, "{}", e)?;
                }
            }
            Err(message) => writeln!(output, "{}", message)?,
        }
    }
}
