//! Move application and capture-chain continuation

use crate::board::{neighbor, Direction, Point};
use crate::error::RulesError;
use crate::movegen::{capturing_moves_from, captured_points};
use crate::moves::Move;
use crate::state::Board;

/// Apply a move to `board`, returning the captured points.
///
/// The move is checked against the board before anything changes: the
/// origin must hold a piece and the destination must be the empty
/// neighbor along the move's direction. Legality under the capture rules
/// is the caller's concern (see [`crate::movegen::legal_moves`]).
pub fn apply(board: &mut Board, mv: &Move) -> Result<Vec<Point>, RulesError> {
    if board.is_empty(mv.from) {
        return Err(RulesError::Malformed { mv: *mv, reason: "origin is empty" });
    }
    if neighbor(mv.from, mv.direction) != Some(mv.to) {
        return Err(RulesError::Malformed { mv: *mv, reason: "destination is not the next point on the line" });
    }
    if !board.is_empty(mv.to) {
        return Err(RulesError::Malformed { mv: *mv, reason: "destination is occupied" });
    }

    let captured = captured_points(board, mv);
    board.relocate(mv.from, mv.to);
    for &point in &captured {
        board.remove(point);
    }
    board.assert_consistent();

    Ok(captured)
}

/// State of a turn in progress: the moving piece and where it has been
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnContext {
    active: Point,
    visited: Vec<Point>,
    last_direction: Option<Direction>,
}

impl TurnContext {
    /// Context for a piece about to move from `origin`
    pub fn begin(origin: Point) -> Self {
        Self {
            active: origin,
            visited: vec![origin],
            last_direction: None,
        }
    }

    /// Rebuild a context mid-chain. `visited` is extended with `active` if missing.
    pub fn resume(active: Point, mut visited: Vec<Point>, last_direction: Option<Direction>) -> Self {
        if !visited.contains(&active) {
            visited.push(active);
        }
        Self { active, visited, last_direction }
    }

    /// Record a capture made by the active piece
    pub fn record(&mut self, mv: &Move) {
        debug_assert_eq!(mv.from, self.active, "chain moves must use the active piece");
        debug_assert!(!self.visited.contains(&mv.to), "chain revisited {}", mv.to);
        self.active = mv.to;
        self.visited.push(mv.to);
        self.last_direction = Some(mv.direction);
    }

    /// Point of the piece making the captures
    pub fn active(&self) -> Point {
        self.active
    }

    /// Points visited this turn, in order, origin first
    pub fn visited(&self) -> &[Point] {
        &self.visited
    }

    /// Direction of the most recent capture
    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }
}

/// Captures the active piece may chain after its last capture.
///
/// Excludes destinations already visited this turn and the reverse of the
/// previous capture direction. An empty result ends the chain.
pub fn continuations(board: &Board, ctx: &TurnContext) -> Vec<Move> {
    let reverse = ctx.last_direction.map(Direction::opposite);
    capturing_moves_from(board, ctx.active)
        .into_iter()
        .filter(|mv| !ctx.visited.contains(&mv.to))
        .filter(|mv| Some(mv.direction) != reverse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::MoveKind;
    use crate::state::Player;

    fn p(s: &str) -> Point {
        s.parse().unwrap()
    }

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    #[test]
    fn test_apply_paika_relocates() {
        let mut board: Board = "9/4W4/9/9/B8".parse().unwrap();
        let captured = apply(&mut board, &mv("E2E3P")).unwrap();
        assert!(captured.is_empty());
        assert_eq!(board.get(p("E3")), Some(Player::White));
        assert!(board.is_empty(p("E2")));
    }

    #[test]
    fn test_apply_approach_removes_run() {
        let mut board = Board::initial();
        let captured = apply(&mut board, &mv("E2E3A")).unwrap();
        assert_eq!(captured, vec![p("E4"), p("E5")]);
        assert_eq!(board.count(Player::Black), 20);
        assert_eq!(board.count(Player::White), 22);
        assert!(board.is_empty(p("E2")));
        assert!(board.is_empty(p("E4")));
        assert!(board.is_empty(p("E5")));
    }

    #[test]
    fn test_apply_withdrawal_removes_run_behind() {
        let mut board = Board::initial();
        let captured = apply(&mut board, &mv("D3E3W")).unwrap();
        assert_eq!(captured, vec![p("C3")]);
        assert_eq!(board.get(p("B3")), Some(Player::White));
    }

    #[test]
    fn test_apply_rejects_malformed_without_mutation() {
        let mut board = Board::initial();
        let before = board.clone();
        assert!(apply(&mut board, &mv("E3F3P")).is_err()); // empty origin
        assert!(apply(&mut board, &mv("E1E2P")).is_err()); // occupied destination
        let bent = Move { from: p("D3"), to: p("E3"), direction: Direction::N, kind: MoveKind::Paika };
        assert!(apply(&mut board, &bent).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_turn_context_tracks_visits() {
        let mut ctx = TurnContext::begin(p("C1"));
        assert_eq!(ctx.visited(), &[p("C1")]);
        assert_eq!(ctx.last_direction(), None);
        ctx.record(&mv("C1D1A"));
        ctx.record(&mv("D1D2A"));
        assert_eq!(ctx.active(), p("D2"));
        assert_eq!(ctx.visited(), &[p("C1"), p("D1"), p("D2")]);
        assert_eq!(ctx.last_direction(), Some(Direction::N));
    }

    /// Chain position: white C3 can take E3, then D5, then F4 in one turn.
    /// Black B3 sits behind C3 so that stepping back west would also capture.
    const CHAIN_BOARD: &str = "9/9/1BW1B4/5B3/3B5";

    #[test]
    fn test_three_capture_chain() {
        let mut board: Board = CHAIN_BOARD.parse().unwrap();
        let opening = crate::movegen::legal_moves(&board, Player::White);
        assert_eq!(opening, vec![mv("C3D3A"), mv("C3D3W")]);

        let first = mv("C3D3A");
        let mut ctx = TurnContext::begin(first.from);
        assert_eq!(apply(&mut board, &first).unwrap(), vec![p("E3")]);
        ctx.record(&first);

        // Stepping back to C3 would approach B3, but C3 is visited and west reverses the capture
        assert!(capturing_moves_from(&board, p("D3")).contains(&mv("D3C3A")));
        assert_eq!(continuations(&board, &ctx), vec![mv("D3D4A")]);

        let second = mv("D3D4A");
        assert_eq!(apply(&mut board, &second).unwrap(), vec![p("D5")]);
        ctx.record(&second);
        assert_eq!(continuations(&board, &ctx), vec![mv("D4E4A")]);

        let third = mv("D4E4A");
        assert_eq!(apply(&mut board, &third).unwrap(), vec![p("F4")]);
        ctx.record(&third);

        assert_eq!(ctx.visited(), &[p("C3"), p("D3"), p("D4"), p("E4")]);
        assert!(continuations(&board, &ctx).is_empty());
        assert_eq!(board.count(Player::Black), 1);
    }

    #[test]
    fn test_reverse_direction_excluded() {
        // D3 can approach F3 going east or B3 going west
        let board: Board = "9/9/1B1W1B3/9/9".parse().unwrap();
        assert_eq!(capturing_moves_from(&board, p("D3")).len(), 2);

        let ctx = TurnContext::resume(p("D3"), Vec::new(), Some(Direction::E));
        assert_eq!(ctx.visited(), &[p("D3")]);
        assert_eq!(continuations(&board, &ctx), vec![mv("D3E3A")]);
    }
}
