//! Board state: occupancy of the 45 points plus piece counts

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Point, BOARD_COLS, BOARD_ROWS, POINT_COUNT};
use crate::error::ParseError;

/// Text form of the standard opening board, row 1 first
pub const INITIAL_BOARD: &str = "WWWWWWWWW/WWWWWWWWW/BWBW1BWBW/BBBBBBBBB/BBBBBBBBB";

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    White = 0,
    Black = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Single-letter symbol used in board and position strings
    pub fn symbol(self) -> char {
        match self {
            Player::White => 'W',
            Player::Black => 'B',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'W' | 'w' => Some(Player::White),
            'B' | 'b' => Some(Player::Black),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => f.write_str("White"),
            Player::Black => f.write_str("Black"),
        }
    }
}

/// Occupancy grid. Piece counts are kept in step with the grid on every mutation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Player>; POINT_COUNT],
    counts: [u8; 2],
}

impl Board {
    /// Board with no pieces
    pub fn empty() -> Self {
        Self {
            cells: [None; POINT_COUNT],
            counts: [0; 2],
        }
    }

    /// Standard opening: rows 1-2 white, rows 4-5 black, row 3 alternating around an empty E3
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for point in Point::all() {
            let col = point.col();
            let owner = match point.row() {
                0 | 1 => Some(Player::White),
                3 | 4 => Some(Player::Black),
                _ if col == BOARD_COLS / 2 => None,
                _ if (col < BOARD_COLS / 2) == (col % 2 == 0) => Some(Player::Black),
                _ => Some(Player::White),
            };
            if let Some(player) = owner {
                board.place(point, player);
            }
        }
        board
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Occupant of a point
    pub fn get(&self, point: Point) -> Option<Player> {
        self.cells[point.index()]
    }

    pub fn is_empty(&self, point: Point) -> bool {
        self.cells[point.index()].is_none()
    }

    /// Number of pieces a player has left
    pub fn count(&self, player: Player) -> usize {
        self.counts[player.index()] as usize
    }

    /// Points occupied by `player`, in index order
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = Point> + '_ {
        Point::all().filter(move |&p| self.get(p) == Some(player))
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Put a piece on a point, replacing whatever was there
    pub fn place(&mut self, point: Point, player: Player) {
        self.remove(point);
        self.cells[point.index()] = Some(player);
        self.counts[player.index()] += 1;
    }

    /// Clear a point, returning its former occupant
    pub fn remove(&mut self, point: Point) -> Option<Player> {
        let previous = self.cells[point.index()].take();
        if let Some(player) = previous {
            self.counts[player.index()] -= 1;
        }
        previous
    }

    /// Move the piece on `from` to the empty point `to`
    pub(crate) fn relocate(&mut self, from: Point, to: Point) {
        debug_assert!(self.is_empty(to), "relocating onto occupied point {to}");
        self.cells[to.index()] = self.cells[from.index()].take();
    }

    /// Panics when the cached piece counts disagree with the grid.
    /// A mismatch means the engine corrupted the board and must not continue.
    pub fn assert_consistent(&self) {
        let mut counts = [0u8; 2];
        for player in self.cells.iter().flatten() {
            counts[player.index()] += 1;
        }
        assert_eq!(counts, self.counts, "piece counts out of step with board");
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut gap = 0;
        for point in Point::all() {
            if point.col() == 0 && point.row() > 0 {
                if gap > 0 {
                    write!(f, "{gap}")?;
                    gap = 0;
                }
                f.write_str("/")?;
            }
            match self.get(point) {
                None => gap += 1,
                Some(player) => {
                    if gap > 0 {
                        write!(f, "{gap}")?;
                        gap = 0;
                    }
                    write!(f, "{}", player.symbol())?;
                }
            }
        }
        if gap > 0 {
            write!(f, "{gap}")?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.split('/').collect();
        if rows.len() != BOARD_ROWS {
            return Err(ParseError::InvalidBoard(format!(
                "expected {BOARD_ROWS} rows, found {}",
                rows.len()
            )));
        }

        let mut board = Self::empty();
        for (row, text) in rows.iter().enumerate() {
            let mut col = 0;
            for c in text.chars() {
                if let Some(gap) = c.to_digit(10).filter(|&d| d > 0) {
                    col += gap as usize;
                    continue;
                }
                let player = Player::from_symbol(c).ok_or_else(|| {
                    ParseError::InvalidBoard(format!("unexpected character {c:?} in row {}", row + 1))
                })?;
                let point = Point::new(row, col).ok_or_else(|| {
                    ParseError::InvalidBoard(format!("row {} is longer than {BOARD_COLS}", row + 1))
                })?;
                board.place(point, player);
                col += 1;
            }
            if col != BOARD_COLS {
                return Err(ParseError::InvalidBoard(format!(
                    "row {} covers {col} columns, expected {BOARD_COLS}",
                    row + 1
                )));
            }
        }
        Ok(board)
    }
}
