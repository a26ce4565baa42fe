//! Play command - interactive two-player session on stdin
//!
//! Accepts move notation (`D3E3A`), `END` to stop a capture chain, and
//! `quit`. Rejected input is reported and the prompt repeats.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Args;

use fanorona_core::{Action, Game, RulesConfig, TurnStatus};

#[derive(Args)]
pub struct PlayArgs {
    /// Position string to start from (defaults to the opening)
    #[arg(long)]
    pub position: Option<String>,
}

/// Run play command
pub fn run(args: PlayArgs, config: RulesConfig) -> Result<()> {
    let mut game = crate::load_game(args.position.as_deref(), config)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session(&mut game, stdin.lock(), &mut stdout)?;
    tracing::info!("Session ended: {} after {} half-moves", game.result(), game.half_moves());
    Ok(())
}

/// Drive `game` from text input until it ends or input runs out
fn session<R: BufRead, W: Write>(game: &mut Game, input: R, out: &mut W) -> Result<()> {
    let mut lines = input.lines();

    loop {
        writeln!(out, "{}\n", game.view())?;
        if game.result().is_over() {
            return Ok(());
        }

        let options: Vec<String> = game.legal_actions().iter().map(Action::to_string).collect();
        write!(out, "Legal: {}\n{}> ", options.join(" "), game.to_move())?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            return Ok(());
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") {
            return Ok(());
        }

        let action: Action = match line.parse() {
            Ok(action) => action,
            Err(e) => {
                writeln!(out, "Cannot read {line:?}: {e}")?;
                continue;
            }
        };

        match game.apply_action(action) {
            Ok(outcome) => {
                if !outcome.captured.is_empty() {
                    let captured: Vec<String> = outcome.captured.iter().map(ToString::to_string).collect();
                    writeln!(out, "Captured {}", captured.join(", "))?;
                }
                if outcome.status == TurnStatus::ChainOpen {
                    writeln!(out, "Capture chain open: continue or END")?;
                }
            }
            Err(e) => writeln!(out, "Rejected: {e}")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_session(game: &mut Game, input: &str) -> String {
        let mut out = Vec::new();
        session(game, Cursor::new(input.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_session_plays_moves() {
        let mut game = Game::new();
        let output = run_session(&mut game, "e2e3a\n");
        assert!(output.contains("Captured E4, E5"));
        assert_eq!(game.half_moves(), 1);
    }

    #[test]
    fn test_session_reports_bad_input() {
        let mut game = Game::new();
        let output = run_session(&mut game, "nonsense\nE2E3P\nquit\nE2E3A\n");
        assert!(output.contains("Cannot read \"nonsense\""));
        assert!(output.contains("Rejected: illegal move: E2E3P"));
        assert_eq!(game.half_moves(), 0);
    }

    #[test]
    fn test_session_stops_chain_with_end() {
        let mut game: Game = "9/9/1BW1B4/5B3/3B5 W - - - 0".parse().unwrap();
        let output = run_session(&mut game, "C3D3A\nEND\n");
        assert!(output.contains("Capture chain open"));
        assert_eq!(game.to_move(), fanorona_core::Player::Black);
    }
}
