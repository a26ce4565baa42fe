//! Show and moves commands - inspect a position without playing it

use anyhow::Result;
use clap::Args;

use fanorona_core::{Action, Game, RulesConfig};

#[derive(Args)]
pub struct ShowArgs {
    /// Position string (defaults to the opening)
    #[arg(long)]
    pub position: Option<String>,

    /// Output the view as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct MovesArgs {
    /// Position string (defaults to the opening)
    #[arg(long)]
    pub position: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run show command
pub fn show(args: ShowArgs, config: RulesConfig) -> Result<()> {
    let game = crate::load_game(args.position.as_deref(), config)?;
    let view = game.view();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{view}");
    }
    Ok(())
}

/// Run moves command
pub fn moves(args: MovesArgs, config: RulesConfig) -> Result<()> {
    let game = crate::load_game(args.position.as_deref(), config)?;
    let actions = action_notation(&game);

    if args.json {
        #[derive(serde::Serialize)]
        struct JsonMoves {
            position: String,
            to_move: String,
            actions: Vec<String>,
        }

        let output = JsonMoves {
            position: game.position(),
            to_move: game.to_move().to_string(),
            actions,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if actions.is_empty() {
        println!("No legal moves ({})", game.result());
    } else {
        for action in actions {
            println!("{action}");
        }
    }
    Ok(())
}

/// Legal actions in notation, end-turn last
fn action_notation(game: &Game) -> Vec<String> {
    game.legal_actions().iter().map(Action::to_string).collect()
}
