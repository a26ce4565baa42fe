//! Self-play command - play random games through the engine
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_all(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use fanorona_core::{Game, GameResult, RulesConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SelfPlayArgs {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Position string to start every game from (defaults to the opening)
    #[arg(long)]
    pub position: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameSummary {
    game_number: usize,
    result: GameResult,
    half_moves: u16,
    plies: usize,
}

/// Aggregated results
#[derive(Clone, Debug)]
struct SelfPlayResults {
    games: Vec<GameSummary>,
    white_wins: usize,
    black_wins: usize,
    draws: usize,
    avg_half_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run self-play command
pub fn run(args: SelfPlayArgs, config: RulesConfig, seed: Option<u64>) -> Result<()> {
    let start = crate::load_game(args.position.as_deref(), config)?;

    tracing::info!(
        "Starting self-play: {} games, move limit {}",
        args.games,
        start.config().move_limit
    );

    let results = play_all(&start, args.games, seed)?;

    report_results(&results, args.json);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play every game from the same start
fn play_all(start: &Game, games: usize, seed: Option<u64>) -> Result<SelfPlayResults> {
    let mut rng = create_rng(seed);
    let mut summaries = Vec::with_capacity(games);

    for game_number in 1..=games {
        let summary = play_single_game(start, game_number, &mut rng)?;

        tracing::info!(
            "Game {}: {} ({} half-moves, {} plies)",
            summary.game_number,
            summary.result,
            summary.half_moves,
            summary.plies
        );

        summaries.push(summary);
    }

    Ok(compute_statistics(summaries))
}

/// Report results
fn report_results(results: &SelfPlayResults, json: bool) {
    if json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game choosing uniformly among legal actions
fn play_single_game(start: &Game, game_number: usize, rng: &mut ChaCha8Rng) -> Result<GameSummary> {
    let mut game = start.clone();
    let mut plies = 0;

    while !game.result().is_over() {
        let actions = game.legal_actions();
        let action = *actions
            .choose(rng)
            .context("ongoing game offered no legal action")?;
        game.apply_action(action)
            .with_context(|| format!("engine rejected its own legal action {action} in {game}"))?;
        plies += 1;
    }

    Ok(GameSummary {
        game_number,
        result: game.result(),
        half_moves: game.half_moves(),
        plies,
    })
}

/// Compute aggregate statistics from game summaries
fn compute_statistics(games: Vec<GameSummary>) -> SelfPlayResults {
    let count = |result: GameResult| games.iter().filter(|g| g.result == result).count();
    let white_wins = count(GameResult::WhiteWins);
    let black_wins = count(GameResult::BlackWins);
    let draws = count(GameResult::Draw);

    let total_half_moves: u32 = games.iter().map(|g| g.half_moves as u32).sum();
    let avg_half_moves = if games.is_empty() {
        0.0
    } else {
        total_half_moves as f32 / games.len() as f32
    };

    SelfPlayResults {
        games,
        white_wins,
        black_wins,
        draws,
        avg_half_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &SelfPlayResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        result: GameResult,
        half_moves: u16,
        plies: usize,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        white_wins: usize,
        black_wins: usize,
        draws: usize,
        avg_half_moves: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        white_wins: results.white_wins,
        black_wins: results.black_wins,
        draws: results.draws,
        avg_half_moves: results.avg_half_moves,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                result: g.result,
                half_moves: g.half_moves,
                plies: g.plies,
            })
            .collect(),
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::warn!("Failed to serialize results: {}", e),
    }
}

/// Print results as text
fn print_text_results(results: &SelfPlayResults) {
    let total = results.games.len();

    println!("\n=== Self-play Results ===");
    println!("Total games: {}", total);
    println!("White wins:  {} ({:.1}%)", results.white_wins, percent(results.white_wins, total));
    println!("Black wins:  {} ({:.1}%)", results.black_wins, percent(results.black_wins, total));
    println!("Draws:       {} ({:.1}%)", results.draws, percent(results.draws, total));
    println!("Avg half-moves: {:.1}", results.avg_half_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {} in {} half-moves ({} plies)",
            game.game_number, game.result, game.half_moves, game.plies
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(game_number: usize, result: GameResult, half_moves: u16) -> GameSummary {
        GameSummary {
            game_number,
            result,
            half_moves,
            plies: half_moves as usize,
        }
    }

    #[test]
    fn test_compute_statistics_empty() {
        let results = compute_statistics(vec![]);
        assert_eq!(results.white_wins, 0);
        assert_eq!(results.black_wins, 0);
        assert_eq!(results.draws, 0);
        assert_eq!(results.avg_half_moves, 0.0);
    }

    #[test]
    fn test_compute_statistics() {
        let games = vec![
            summary(1, GameResult::WhiteWins, 10),
            summary(2, GameResult::Draw, 44),
            summary(3, GameResult::BlackWins, 36),
        ];

        let results = compute_statistics(games);
        assert_eq!(results.white_wins, 1);
        assert_eq!(results.black_wins, 1);
        assert_eq!(results.draws, 1);
        assert_eq!(results.avg_half_moves, 30.0);
    }

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(Some(42));
        let mut rng2 = create_rng(Some(42));

        use rand::Rng;
        assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
    }

    #[test]
    fn test_seeded_self_play_is_reproducible() {
        let start = Game::new();
        let a = play_all(&start, 3, Some(7)).unwrap();
        let b = play_all(&start, 3, Some(7)).unwrap();
        for (x, y) in a.games.iter().zip(&b.games) {
            assert_eq!(x.result, y.result);
            assert_eq!(x.plies, y.plies);
        }
        assert!(a.games.iter().all(|g| g.result.is_over()));
        assert!(a.games.iter().all(|g| g.half_moves <= 44));
    }
}
