//! Board geometry: points, directions and the fixed line topology

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Number of rows (numbered 1-5)
pub const BOARD_ROWS: usize = 5;

/// Number of columns (lettered A-I)
pub const BOARD_COLS: usize = 9;

/// Total number of intersections
pub const POINT_COUNT: usize = BOARD_ROWS * BOARD_COLS;

/// One of the 45 board intersections, stored as `row * 9 + col`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Point(u8);

impl Point {
    /// Point from zero-based row and column, `None` when off the board
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_ROWS && col < BOARD_COLS {
            Some(Point((row * BOARD_COLS + col) as u8))
        } else {
            None
        }
    }

    /// Point from its index (0..45)
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < POINT_COUNT {
            Some(Point(index as u8))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Zero-based row (0 is row 1)
    pub const fn row(self) -> usize {
        self.0 as usize / BOARD_COLS
    }

    /// Zero-based column (0 is column A)
    pub const fn col(self) -> usize {
        self.0 as usize % BOARD_COLS
    }

    /// Strong points carry diagonal lines
    pub const fn is_strong(self) -> bool {
        (self.row() + self.col()) % 2 == 0
    }

    /// Neighbor along a drawn line, if any
    pub fn neighbor(self, direction: Direction) -> Option<Point> {
        neighbor(self, direction)
    }

    /// All 45 points in index order
    pub fn all() -> impl Iterator<Item = Point> {
        (0..POINT_COUNT as u8).map(Point)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.col() as u8) as char, self.row() + 1)
    }
}

impl FromStr for Point {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(ParseError::InvalidPoint(s.to_string()));
        }
        let col = bytes[0].to_ascii_uppercase().wrapping_sub(b'A') as usize;
        let row = bytes[1].wrapping_sub(b'1') as usize;
        Point::new(row, col).ok_or_else(|| ParseError::InvalidPoint(s.to_string()))
    }
}

impl TryFrom<String> for Point {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Point> for String {
    fn from(point: Point) -> Self {
        point.to_string()
    }
}

/// Compass direction along a board line. North is towards row 5, east towards column I.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N = 0,
    NE = 1,
    E = 2,
    SE = 3,
    S = 4,
    SW = 5,
    W = 6,
    NW = 7,
}

/// Row/column deltas, indexed by `Direction as usize`
pub const DIRECTION_VECTORS: [(i8, i8); 8] = [
    (1, 0),   // N
    (1, 1),   // NE
    (0, 1),   // E
    (-1, 1),  // SE
    (-1, 0),  // S
    (-1, -1), // SW
    (0, -1),  // W
    (1, -1),  // NW
];

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 4) % 8]
    }

    pub const fn is_diagonal(self) -> bool {
        self.index() % 2 == 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::S => "S",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        }
    }

    /// Direction of the line from `from` to an adjacent `to`
    pub fn between(from: Point, to: Point) -> Option<Self> {
        Self::ALL.into_iter().find(|&d| neighbor(from, d) == Some(to))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::InvalidDirection(s.to_string()))
    }
}

// ============================================================================
// TOPOLOGY
// ============================================================================

type Topology = [[Option<Point>; 8]; POINT_COUNT];

/// Neighbor table indexed by point and direction, evaluated at compile time
static TOPOLOGY: Topology = build_topology();

const fn build_topology() -> Topology {
    let mut table: Topology = [[None; 8]; POINT_COUNT];
    let mut index = 0;
    while index < POINT_COUNT {
        let point = Point(index as u8);
        let row = point.row() as i8;
        let col = point.col() as i8;

        let mut d = 0;
        while d < 8 {
            let direction = Direction::ALL[d];
            let (dr, dc) = DIRECTION_VECTORS[d];
            let r = row + dr;
            let c = col + dc;
            let on_board = r >= 0 && r < BOARD_ROWS as i8 && c >= 0 && c < BOARD_COLS as i8;
            if on_board && (point.is_strong() || !direction.is_diagonal()) {
                table[index][d] = Some(Point((r as usize * BOARD_COLS + c as usize) as u8));
            }
            d += 1;
        }
        index += 1;
    }
    table
}

/// Neighbor of `point` along `direction`, `None` when no line is drawn there
pub fn neighbor(point: Point, direction: Direction) -> Option<Point> {
    TOPOLOGY[point.index()][direction.index()]
}

/// Directions with a drawn line at `point`
pub fn directions(point: Point) -> impl Iterator<Item = Direction> {
    Direction::ALL
        .into_iter()
        .filter(move |&d| neighbor(point, d).is_some())
}
