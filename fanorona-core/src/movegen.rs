//! Legal move generation under the mandatory-capture rule

use crate::board::{directions, neighbor, Direction, Point};
use crate::moves::{Move, MoveKind};
use crate::state::{Board, Player};

/// All legal moves for `player`.
///
/// Capturing moves exclude paika entirely: if any capture exists only
/// captures are returned. An empty result means the player cannot move.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Move> {
    let captures: Vec<Move> = board
        .pieces(player)
        .flat_map(|point| capturing_moves_from(board, point))
        .collect();

    if !captures.is_empty() {
        return captures;
    }

    board
        .pieces(player)
        .flat_map(|point| paika_moves_from(board, point))
        .collect()
}

/// Whether `player` has at least one capture available
pub fn has_capture(board: &Board, player: Player) -> bool {
    board
        .pieces(player)
        .any(|point| !capturing_moves_from(board, point).is_empty())
}

/// Capturing moves of the piece standing on `origin`, approach before withdrawal
pub fn capturing_moves_from(board: &Board, origin: Point) -> Vec<Move> {
    let mut moves = Vec::new();
    let Some(player) = board.get(origin) else {
        return moves;
    };
    let opponent = player.opponent();

    for direction in directions(origin) {
        let Some(to) = neighbor(origin, direction) else {
            continue;
        };
        if !board.is_empty(to) {
            continue;
        }

        let approach_target = neighbor(to, direction);
        if approach_target.is_some_and(|p| board.get(p) == Some(opponent)) {
            moves.push(Move { from: origin, to, direction, kind: MoveKind::Approach });
        }

        let withdrawal_target = neighbor(origin, direction.opposite());
        if withdrawal_target.is_some_and(|p| board.get(p) == Some(opponent)) {
            moves.push(Move { from: origin, to, direction, kind: MoveKind::Withdrawal });
        }
    }

    moves
}

/// Paika moves of the piece on `origin`: steps to adjacent empty points
pub fn paika_moves_from(board: &Board, origin: Point) -> Vec<Move> {
    if board.is_empty(origin) {
        return Vec::new();
    }
    directions(origin)
        .filter_map(|direction| {
            let to = neighbor(origin, direction)?;
            board
                .is_empty(to)
                .then_some(Move { from: origin, to, direction, kind: MoveKind::Paika })
        })
        .collect()
}

/// Points a move would capture on `board`: the contiguous run of opposing
/// pieces on its capture line. Empty for paika.
pub fn captured_points(board: &Board, mv: &Move) -> Vec<Point> {
    let Some(player) = board.get(mv.from) else {
        return Vec::new();
    };
    let (start, line) = match mv.kind {
        MoveKind::Paika => return Vec::new(),
        MoveKind::Approach => (neighbor(mv.to, mv.direction), mv.direction),
        MoveKind::Withdrawal => (neighbor(mv.from, mv.direction.opposite()), mv.direction.opposite()),
    };
    opposing_run(board, start, line, player.opponent())
}

/// Walk from `start` along `line` while points hold `opponent`
fn opposing_run(board: &Board, start: Option<Point>, line: Direction, opponent: Player) -> Vec<Point> {
    let mut run = Vec::new();
    let mut current = start;
    while let Some(point) = current {
        if board.get(point) != Some(opponent) {
            break;
        }
        run.push(point);
        current = neighbor(point, line);
    }
    run
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Point {
        s.parse().unwrap()
    }

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    #[test]
    fn test_opening_moves_are_all_captures_into_centre() {
        let board = Board::initial();
        let mut moves: Vec<String> = legal_moves(&board, Player::White)
            .iter()
            .map(|m| m.to_string())
            .collect();
        moves.sort();
        assert_eq!(moves, vec!["D2E3A", "D3E3A", "D3E3W", "E2E3A", "F2E3A"]);
        assert!(!legal_moves(&board, Player::White).contains(&mv("E2E3P")));
    }

    #[test]
    fn test_black_opening_mirrors_white() {
        let board = Board::initial();
        let moves = legal_moves(&board, Player::Black);
        assert_eq!(moves.len(), 5);
        assert!(moves.iter().all(|m| m.is_capture() && m.to == p("E3")));
    }

    #[test]
    fn test_paika_only_when_no_capture() {
        let board: Board = "9/4W4/9/9/B8".parse().unwrap();
        let moves = legal_moves(&board, Player::White);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| m.kind == MoveKind::Paika));
        // E2 is weak: four cardinal steps
        assert_eq!(moves.len(), 4);
        assert!(!has_capture(&board, Player::White));
    }

    #[test]
    fn test_mandatory_capture_filters_paika() {
        // White E2 can approach E4 via E3; other white piece has only paika
        let board: Board = "W8/4W4/9/4B4/9".parse().unwrap();
        let moves = legal_moves(&board, Player::White);
        assert_eq!(moves, vec![mv("E2E3A")]);
        assert!(has_capture(&board, Player::White));
    }

    #[test]
    fn test_approach_run_stops_at_own_piece() {
        let board: Board = "9/9/W1BBW4/9/9".parse().unwrap();
        let captured = captured_points(&board, &mv("A3B3A"));
        assert_eq!(captured, vec![p("C3"), p("D3")]);
    }

    #[test]
    fn test_approach_run_reaches_edge() {
        let board: Board = "9/9/W1BBBBBBB/9/9".parse().unwrap();
        let captured = captured_points(&board, &mv("A3B3A"));
        assert_eq!(captured.len(), 7);
    }

    #[test]
    fn test_withdrawal_run_stops_at_gap() {
        let board: Board = "9/9/B1BBW4/9/9".parse().unwrap();
        let captured = captured_points(&board, &mv("E3F3W"));
        assert_eq!(captured, vec![p("D3"), p("C3")]);
    }

    #[test]
    fn test_edge_origin_never_withdraws() {
        // White on A3 with black only in front: nothing behind the edge
        let board: Board = "9/9/W1B6/9/9".parse().unwrap();
        let moves = capturing_moves_from(&board, p("A3"));
        assert_eq!(moves, vec![mv("A3B3A")]);
        assert!(moves.iter().all(|m| m.kind != MoveKind::Withdrawal));
    }

    #[test]
    fn test_both_approach_and_withdrawal_offered() {
        let board: Board = "9/9/BW1B5/9/9".parse().unwrap();
        let moves = capturing_moves_from(&board, p("B3"));
        assert!(moves.contains(&mv("B3C3A")));
        assert!(moves.contains(&mv("B3C3W")));
        assert_eq!(captured_points(&board, &mv("B3C3A")), vec![p("D3")]);
        assert_eq!(captured_points(&board, &mv("B3C3W")), vec![p("A3")]);
    }

    #[test]
    fn test_weak_point_has_no_diagonal_captures() {
        // D3 is weak; black on F5 lies on a diagonal D3 cannot use
        let board: Board = "9/9/3W5/9/5B3".parse().unwrap();
        assert!(capturing_moves_from(&board, p("D3")).is_empty());
    }

    #[test]
    fn test_no_moves_when_blocked() {
        // White A1 hemmed in by black on every line
        let board: Board = "WB7/BB7/9/9/9".parse().unwrap();
        assert!(legal_moves(&board, Player::White).is_empty());
        assert!(!legal_moves(&board, Player::Black).is_empty());

        let board: Board = "9/9/9/9/9".parse().unwrap();
        assert!(legal_moves(&board, Player::White).is_empty());
    }
}
