//! Serializable text view of a game for display

use std::fmt;

use serde::Serialize;

use crate::board::{Point, BOARD_COLS, BOARD_ROWS};
use crate::game::{Game, GameResult};
use crate::state::Player;

const WHITE_GLYPH: char = '○';
const BLACK_GLYPH: char = '●';
const EMPTY_GLYPH: char = '.';

/// Everything a display needs, detached from the engine
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BoardView {
    /// Piece glyphs per row, row 5 first, columns A to I
    pub rows: Vec<String>,
    pub to_move: Player,
    /// `"<point> <direction>"` of the last capture in an open chain
    pub last_capture: Option<String>,
    pub visited: Vec<Point>,
    pub half_moves: u16,
    pub result: GameResult,
    /// Position string that reproduces this game
    pub position: String,
}

impl BoardView {
    pub fn of(game: &Game) -> Self {
        let board = game.board();
        let rows = (0..BOARD_ROWS)
            .rev()
            .map(|row| {
                (0..BOARD_COLS)
                    .filter_map(|col| Point::new(row, col))
                    .map(|point| match board.get(point) {
                        Some(Player::White) => WHITE_GLYPH,
                        Some(Player::Black) => BLACK_GLYPH,
                        None => EMPTY_GLYPH,
                    })
                    .collect()
            })
            .collect();

        Self {
            rows,
            to_move: game.to_move(),
            last_capture: game.last_capture().map(|(point, dir)| format!("{point} {dir}")),
            visited: game.visited().to_vec(),
            half_moves: game.half_moves(),
            result: game.result(),
            position: game.position(),
        }
    }
}

/// Diagonal glyphs between row `upper` (zero-based) and the row below it
fn diagonal_row(upper: usize) -> String {
    let mut line = String::from("  │");
    for col in 0..BOARD_COLS - 1 {
        line.push(if (upper + col) % 2 == 0 { '╲' } else { '╱' });
        line.push('│');
    }
    line
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = (b'A'..b'A' + BOARD_COLS as u8).map(|c| (c as char).to_string()).collect();
        writeln!(f, "  {}", labels.join(" "))?;

        for (i, row) in self.rows.iter().enumerate() {
            let number = BOARD_ROWS - i;
            let cells: Vec<String> = row.chars().map(String::from).collect();
            writeln!(f, "{} {}", number, cells.join("─"))?;
            if number > 1 {
                writeln!(f, "{}", diagonal_row(number - 1))?;
            }
        }

        writeln!(f)?;
        match self.result {
            GameResult::Ongoing => writeln!(f, "{} to play", self.to_move)?,
            result => writeln!(f, "Result: {result}")?,
        }
        writeln!(f, "Last capture: {}", self.last_capture.as_deref().unwrap_or("- -"))?;
        let visited: Vec<String> = self.visited.iter().map(Point::to_string).collect();
        writeln!(f, "Visited: {}", visited.join(", "))?;
        write!(f, "Half-moves: {}", self.half_moves)
    }
}
