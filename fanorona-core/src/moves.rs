//! Move values, their text notation and the fixed action-index encoding

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Direction, Point, POINT_COUNT};
use crate::error::ParseError;

/// Slots per origin point: 8 directions x 3 move kinds
const SLOTS_PER_POINT: usize = 8 * 3;

/// Direction order inside a point's slot block: numpad order, skipping the centre
const SLOT_DIRECTIONS: [Direction; 8] = [
    Direction::SW,
    Direction::S,
    Direction::SE,
    Direction::W,
    Direction::E,
    Direction::NW,
    Direction::N,
    Direction::NE,
];

fn direction_slot(direction: Direction) -> usize {
    match direction {
        Direction::SW => 0,
        Direction::S => 1,
        Direction::SE => 2,
        Direction::W => 3,
        Direction::E => 4,
        Direction::NW => 5,
        Direction::N => 6,
        Direction::NE => 7,
    }
}

/// Index of the end-turn action
pub const END_TURN_ACTION: usize = POINT_COUNT * SLOTS_PER_POINT;

/// Size of the fixed action space (every structural move plus end-turn)
pub const ACTION_COUNT: usize = END_TURN_ACTION + 1;

/// Text spelling of the end-turn decision
pub const END_TURN_TEXT: &str = "END";

/// Capture classification of a move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Paika = 0,
    Approach = 1,
    Withdrawal = 2,
}

impl MoveKind {
    const ALL: [MoveKind; 3] = [MoveKind::Paika, MoveKind::Approach, MoveKind::Withdrawal];

    pub fn is_capture(self) -> bool {
        self != MoveKind::Paika
    }

    pub fn marker(self) -> char {
        match self {
            MoveKind::Paika => 'P',
            MoveKind::Approach => 'A',
            MoveKind::Withdrawal => 'W',
        }
    }

    pub fn from_marker(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'P' => Some(MoveKind::Paika),
            'A' => Some(MoveKind::Approach),
            'W' => Some(MoveKind::Withdrawal),
            _ => None,
        }
    }
}

/// A single ply: one piece stepping one line, with its capture tag.
///
/// Construct with [`Move::new`] so that `to` is always the neighbor of
/// `from` along `direction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Point,
    pub to: Point,
    pub direction: Direction,
    pub kind: MoveKind,
}

impl Move {
    /// Move from `from` along `direction`, `None` when no line leaves that way
    pub fn new(from: Point, direction: Direction, kind: MoveKind) -> Option<Self> {
        let to = from.neighbor(direction)?;
        Some(Self { from, to, direction, kind })
    }

    pub fn is_capture(&self) -> bool {
        self.kind.is_capture()
    }

    /// Position in the fixed action space:
    /// `point * 24 + slot * 3 + kind`, slots in numpad order SW S SE W E NW N NE
    pub fn action_index(&self) -> usize {
        self.from.index() * SLOTS_PER_POINT + direction_slot(self.direction) * 3 + self.kind as usize
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.from, self.to, self.kind.marker())
    }
}

impl FromStr for Move {
    type Err = ParseError;

    /// Parses `<from><to><kind>`, e.g. `D3E3A`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 5 || !s.is_ascii() {
            return Err(ParseError::InvalidMove(s.to_string()));
        }
        let from: Point = s[0..2].parse()?;
        let to: Point = s[2..4].parse()?;
        let kind = s[4..]
            .chars()
            .next()
            .and_then(MoveKind::from_marker)
            .ok_or_else(|| ParseError::InvalidKind(s[4..].to_string()))?;
        let direction = Direction::between(from, to).ok_or(ParseError::NotConnected { from, to })?;
        Ok(Self { from, to, direction, kind })
    }
}

/// Input accepted from an external actor: a move, or stopping a capture chain
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Move(Move),
    EndTurn,
}

impl Action {
    pub fn to_index(&self) -> usize {
        match self {
            Action::Move(mv) => mv.action_index(),
            Action::EndTurn => END_TURN_ACTION,
        }
    }

    /// Decode an action index. `None` for indices outside the space or
    /// for slots whose direction leaves the board at that point.
    pub fn from_index(index: usize) -> Option<Self> {
        if index == END_TURN_ACTION {
            return Some(Action::EndTurn);
        }
        let from = Point::from_index(index / SLOTS_PER_POINT)?;
        let slot = index % SLOTS_PER_POINT;
        let direction = SLOT_DIRECTIONS[slot / 3];
        let kind = MoveKind::ALL[slot % 3];
        Move::new(from, direction, kind).map(Action::Move)
    }
}

impl From<Move> for Action {
    fn from(mv: Move) -> Self {
        Action::Move(mv)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move(mv) => mv.fmt(f),
            Action::EndTurn => f.write_str(END_TURN_TEXT),
        }
    }
}

impl FromStr for Action {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(END_TURN_TEXT) {
            Ok(Action::EndTurn)
        } else {
            s.parse().map(Action::Move)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Point {
        s.parse().unwrap()
    }

    #[test]
    fn test_move_notation() {
        let mv: Move = "d3e3a".parse().unwrap();
        assert_eq!(mv.from, p("D3"));
        assert_eq!(mv.to, p("E3"));
        assert_eq!(mv.direction, Direction::E);
        assert_eq!(mv.kind, MoveKind::Approach);
        assert_eq!(mv.to_string(), "D3E3A");

        let mv = Move::new(p("D2"), Direction::NE, MoveKind::Withdrawal).unwrap();
        assert_eq!(mv.to_string(), "D2E3W");
        assert_eq!(mv.to_string().parse::<Move>().unwrap(), mv);
    }

    #[test]
    fn test_move_parse_errors() {
        assert_eq!(
            "D3E4A".parse::<Move>(),
            Err(ParseError::NotConnected { from: p("D3"), to: p("E4") })
        );
        assert!(matches!("D3E3X".parse::<Move>(), Err(ParseError::InvalidKind(_))));
        assert!(matches!("Z3E3A".parse::<Move>(), Err(ParseError::InvalidPoint(_))));
        assert!(matches!("D3E3".parse::<Move>(), Err(ParseError::InvalidMove(_))));
        assert!(matches!("D3E3AA".parse::<Move>(), Err(ParseError::InvalidMove(_))));
    }

    #[test]
    fn test_move_new_requires_line() {
        assert!(Move::new(p("D3"), Direction::NE, MoveKind::Paika).is_none());
        assert!(Move::new(p("A1"), Direction::W, MoveKind::Paika).is_none());
    }

    #[test]
    fn test_action_index_layout() {
        assert_eq!(ACTION_COUNT, 1081);
        assert_eq!(Action::from_index(END_TURN_ACTION), Some(Action::EndTurn));
        assert_eq!(Action::from_index(ACTION_COUNT), None);
        // A1 has no southern line
        assert_eq!(Action::from_index(3), None);

        let mv = Move::new(p("E3"), Direction::NW, MoveKind::Approach).unwrap();
        let index = Action::Move(mv).to_index();
        assert_eq!(index, 22 * 24 + 5 * 3 + 1);
        assert_eq!(Action::from_index(index), Some(Action::Move(mv)));

        let north = Move::new(p("E3"), Direction::N, MoveKind::Paika).unwrap();
        assert_eq!(north.action_index(), 546);
        let first = Move::new(p("B2"), Direction::SW, MoveKind::Paika).unwrap();
        assert_eq!(first.action_index(), 10 * 24);
    }

    #[test]
    fn test_slot_order_covers_every_direction() {
        for (slot, direction) in SLOT_DIRECTIONS.into_iter().enumerate() {
            assert_eq!(direction_slot(direction), slot);
        }
    }

    #[test]
    fn test_action_text() {
        assert_eq!("end".parse::<Action>().unwrap(), Action::EndTurn);
        assert_eq!(Action::EndTurn.to_string(), "END");
        let action: Action = "E2E3P".parse().unwrap();
        assert!(matches!(action, Action::Move(mv) if mv.kind == MoveKind::Paika));
    }
}
