//! Game controller: the whole-turn state machine
//!
//! A turn starts in [`Phase::AwaitingMove`]. A paika ends it at once; a
//! capture opens [`Phase::AwaitingChainDecision`], where the same piece may
//! keep capturing until it runs out of continuations or the actor stops.
//! Control returns to the caller after every ply.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Direction, Point};
use crate::capture::{self, continuations, TurnContext};
use crate::config::RulesConfig;
use crate::error::{ParseError, RulesError};
use crate::movegen::legal_moves;
use crate::moves::{Action, Move, ACTION_COUNT};
use crate::state::{Board, Player};
use crate::view::BoardView;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameResult {
    /// Win for `player`
    pub fn win_for(player: Player) -> Self {
        match player {
            Player::White => GameResult::WhiteWins,
            Player::Black => GameResult::BlackWins,
        }
    }

    /// Winning player, `None` for draws and unfinished games
    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::WhiteWins => Some(Player::White),
            GameResult::BlackWins => Some(Player::Black),
            GameResult::Ongoing | GameResult::Draw => None,
        }
    }

    pub fn is_over(self) -> bool {
        self != GameResult::Ongoing
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Ongoing => f.write_str("ongoing"),
            GameResult::WhiteWins => f.write_str("White wins"),
            GameResult::BlackWins => f.write_str("Black wins"),
            GameResult::Draw => f.write_str("draw"),
        }
    }
}

/// Where the state machine is waiting
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The player to move must choose a move
    AwaitingMove,
    /// A capture was made; the player may continue the chain or stop
    AwaitingChainDecision(TurnContext),
    /// The game has ended
    Terminal(GameResult),
}

/// Summary of the game for external consumers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub to_move: Player,
    pub half_moves: u16,
    pub result: GameResult,
}

/// What happened to the turn after a ply
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnStatus {
    /// Same player, chain continuation available
    ChainOpen,
    /// Turn over, opponent to move
    TurnEnded,
    /// The game ended
    GameOver(GameResult),
}

/// Result of one accepted ply
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlyOutcome {
    pub captured: Vec<Point>,
    pub status: TurnStatus,
}

// ============================================================================
// GAME
// ============================================================================

/// A game in progress. Owns the board exclusively.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    config: RulesConfig,
    to_move: Player,
    half_moves: u16,
    phase: Phase,
}

impl Game {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Standard opening, white to move, default rules
    pub fn new() -> Self {
        Self::with_config(RulesConfig::default())
    }

    /// Standard opening with custom rules
    pub fn with_config(config: RulesConfig) -> Self {
        Self::from_position(Board::initial(), Player::White, 0, config)
    }

    /// Game starting from an arbitrary board at a turn boundary.
    /// Terminal conditions are evaluated immediately.
    pub fn from_position(board: Board, to_move: Player, half_moves: u16, config: RulesConfig) -> Self {
        let mut game = Self {
            board,
            config,
            to_move,
            half_moves,
            phase: Phase::AwaitingMove,
        };
        game.settle();
        game
    }

    /// Game resumed in the middle of a capture chain
    pub fn resume_chain(
        board: Board,
        to_move: Player,
        half_moves: u16,
        ctx: TurnContext,
        config: RulesConfig,
    ) -> Result<Self, ParseError> {
        if board.get(ctx.active()) != Some(to_move) {
            return Err(ParseError::InvalidPosition(format!(
                "capturing piece on {} does not belong to {}",
                ctx.active(),
                to_move
            )));
        }
        if half_moves >= config.move_limit {
            return Err(ParseError::InvalidPosition(format!(
                "capture chain open at half-move {} but the game ends at {}",
                half_moves, config.move_limit
            )));
        }
        let mut game = Self {
            board,
            config,
            to_move,
            half_moves,
            phase: Phase::AwaitingChainDecision(ctx),
        };
        if game.board.count(to_move.opponent()) == 0 {
            game.enter_terminal(GameResult::win_for(to_move));
        }
        Ok(game)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Player whose turn it is
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Completed turns so far
    pub fn half_moves(&self) -> u16 {
        self.half_moves
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn result(&self) -> GameResult {
        match self.phase {
            Phase::Terminal(result) => result,
            _ => GameResult::Ongoing,
        }
    }

    pub fn record(&self) -> GameRecord {
        GameRecord {
            to_move: self.to_move,
            half_moves: self.half_moves,
            result: self.result(),
        }
    }

    /// Capture chain state, when one is open
    pub fn turn_context(&self) -> Option<&TurnContext> {
        match &self.phase {
            Phase::AwaitingChainDecision(ctx) => Some(ctx),
            _ => None,
        }
    }

    /// Point and direction of the last capture in the open chain
    pub fn last_capture(&self) -> Option<(Point, Direction)> {
        let ctx = self.turn_context()?;
        Some((ctx.active(), ctx.last_direction()?))
    }

    /// Points visited by the capturing piece this turn
    pub fn visited(&self) -> &[Point] {
        self.turn_context().map(TurnContext::visited).unwrap_or(&[])
    }

    /// Textual view for display
    pub fn view(&self) -> BoardView {
        BoardView::of(self)
    }

    /// Position string; parses back with [`Game::parse_position`]
    pub fn position(&self) -> String {
        self.to_string()
    }

    // ========================================================================
    // LEGAL ACTIONS
    // ========================================================================

    /// Moves the current player may make now: the legal set at the start
    /// of a turn, the continuations inside a chain, nothing once over.
    pub fn legal_moves(&self) -> Vec<Move> {
        match &self.phase {
            Phase::AwaitingMove => legal_moves(&self.board, self.to_move),
            Phase::AwaitingChainDecision(ctx) => continuations(&self.board, ctx),
            Phase::Terminal(_) => Vec::new(),
        }
    }

    /// Legal moves plus the end-turn decision when inside a chain
    pub fn legal_actions(&self) -> Vec<Action> {
        let mut actions: Vec<Action> = self.legal_moves().into_iter().map(Action::Move).collect();
        if matches!(self.phase, Phase::AwaitingChainDecision(_)) {
            actions.push(Action::EndTurn);
        }
        actions
    }

    /// Fixed-size legality mask over the whole action space
    pub fn action_mask(&self) -> Vec<bool> {
        let mut mask = vec![false; ACTION_COUNT];
        for action in self.legal_actions() {
            mask[action.to_index()] = true;
        }
        mask
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    /// Play a move chosen from [`Game::legal_moves`].
    ///
    /// Rejected moves leave the game untouched.
    pub fn play(&mut self, mv: Move) -> Result<PlyOutcome, RulesError> {
        let mut ctx = match &self.phase {
            Phase::Terminal(result) => return Err(RulesError::GameOver(*result)),
            Phase::AwaitingMove => {
                if !legal_moves(&self.board, self.to_move).contains(&mv) {
                    return Err(RulesError::IllegalMove(mv));
                }
                TurnContext::begin(mv.from)
            }
            Phase::AwaitingChainDecision(ctx) => {
                if !continuations(&self.board, ctx).contains(&mv) {
                    return Err(RulesError::IllegalContinuation(mv));
                }
                ctx.clone()
            }
        };

        let captured = capture::apply(&mut self.board, &mv)?;
        if !mv.is_capture() {
            let status = self.finish_turn();
            return Ok(PlyOutcome { captured, status });
        }

        ctx.record(&mv);
        let status = self.after_capture(ctx);
        Ok(PlyOutcome { captured, status })
    }

    /// Stop an open capture chain and pass the turn
    pub fn end_turn(&mut self) -> Result<TurnStatus, RulesError> {
        match self.phase {
            Phase::AwaitingChainDecision(_) => Ok(self.finish_turn()),
            Phase::AwaitingMove => Err(RulesError::NoCaptureChain),
            Phase::Terminal(result) => Err(RulesError::GameOver(result)),
        }
    }

    /// Apply a move or end-turn decision
    pub fn apply_action(&mut self, action: Action) -> Result<PlyOutcome, RulesError> {
        match action {
            Action::Move(mv) => self.play(mv),
            Action::EndTurn => self.end_turn().map(|status| PlyOutcome {
                captured: Vec::new(),
                status,
            }),
        }
    }

    /// Apply an action given by its index in the fixed action space
    pub fn apply_action_index(&mut self, index: usize) -> Result<PlyOutcome, RulesError> {
        let action = Action::from_index(index).ok_or(RulesError::InvalidAction(index))?;
        self.apply_action(action)
    }

    fn after_capture(&mut self, ctx: TurnContext) -> TurnStatus {
        if self.board.count(self.to_move.opponent()) == 0 {
            let result = GameResult::win_for(self.to_move);
            self.enter_terminal(result);
            return TurnStatus::GameOver(result);
        }

        if continuations(&self.board, &ctx).is_empty() {
            return self.finish_turn();
        }

        self.phase = Phase::AwaitingChainDecision(ctx);
        TurnStatus::ChainOpen
    }

    fn finish_turn(&mut self) -> TurnStatus {
        self.half_moves += 1;
        self.to_move = self.to_move.opponent();
        self.phase = Phase::AwaitingMove;

        tracing::debug!(
            "Turn {} complete, {} to move ({} white, {} black)",
            self.half_moves,
            self.to_move,
            self.board.count(Player::White),
            self.board.count(Player::Black)
        );

        self.settle();
        match self.phase {
            Phase::Terminal(result) => TurnStatus::GameOver(result),
            _ => TurnStatus::TurnEnded,
        }
    }

    /// Evaluate terminal conditions at a turn boundary:
    /// elimination, then stalemate, then the move-limit draw.
    fn settle(&mut self) {
        let player = self.to_move;
        let result = if self.board.count(player) == 0 {
            Some(GameResult::win_for(player.opponent()))
        } else if self.board.count(player.opponent()) == 0 {
            Some(GameResult::win_for(player))
        } else if legal_moves(&self.board, player).is_empty() {
            Some(GameResult::win_for(player.opponent()))
        } else if self.half_moves >= self.config.move_limit {
            Some(GameResult::Draw)
        } else {
            None
        };

        if let Some(result) = result {
            self.enter_terminal(result);
        }
    }

    fn enter_terminal(&mut self, result: GameResult) {
        tracing::info!("Game over after {} half-moves: {}", self.half_moves, result);
        self.phase = Phase::Terminal(result);
    }

    // ========================================================================
    // POSITION STRINGS
    // ========================================================================

    /// Parse a position string using the given rules
    pub fn parse_position(s: &str, config: RulesConfig) -> Result<Self, ParseError> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        let &[board, player, last_point, last_dir, visited, half_moves] = fields.as_slice() else {
            return Err(ParseError::InvalidPosition(format!(
                "expected 6 fields, found {}",
                fields.len()
            )));
        };

        let board: Board = board.parse()?;

        let mut symbol = player.chars();
        let to_move = match (symbol.next().and_then(Player::from_symbol), symbol.next()) {
            (Some(p), None) => p,
            _ => return Err(ParseError::InvalidPosition(format!("bad side to move {player:?}"))),
        };

        let half_moves: u16 = half_moves
            .parse()
            .map_err(|_| ParseError::InvalidPosition(format!("bad half-move count {half_moves:?}")))?;

        let visited = if visited == "-" {
            Vec::new()
        } else {
            visited
                .split(',')
                .map(str::parse)
                .collect::<Result<Vec<Point>, _>>()?
        };

        if last_point == "-" {
            return Ok(Self::from_position(board, to_move, half_moves, config));
        }

        let active: Point = last_point.parse()?;
        let direction = match last_dir {
            "-" => None,
            d => Some(d.parse::<Direction>()?),
        };
        let ctx = TurnContext::resume(active, visited, direction);
        Self::resume_chain(board, to_move, half_moves, ctx, config)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Position string: `<board> <side> <last point> <last dir> <visited> <half-moves>`
impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.board, self.to_move.symbol())?;
        match self.turn_context() {
            Some(ctx) => {
                write!(f, "{} ", ctx.active())?;
                match ctx.last_direction() {
                    Some(d) => write!(f, "{d} ")?,
                    None => f.write_str("- ")?,
                }
                let visited: Vec<String> = ctx.visited().iter().map(Point::to_string).collect();
                write!(f, "{} ", visited.join(","))?;
            }
            None => f.write_str("- - - ")?,
        }
        write!(f, "{}", self.half_moves)
    }
}

impl FromStr for Game {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_position(s, RulesConfig::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================
