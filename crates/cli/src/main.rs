//! Othello in the terminal: play against MCTS, pit agents against each
//! other, or inspect a move sequence.

mod human;
mod matchup;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use flexi_logger::Logger;
use human::{format_moves, HumanAgent};
use matchup::{run_match, AgentKind, MatchSettings};
use othello_board::{play_game, replay, Square, Turn};
use othello_core::Player;
use othello_mcts::{MctsAgent, MctsConfig, RolloutPolicy};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io;
use std::time::Instant;

/// Othello with a Monte Carlo Tree Search opponent.
#[derive(Parser)]
#[command(name = "othello")]
#[command(about = "Play Othello against MCTS and run agent matches")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the search engine on the console.
    Play {
        /// Colour of the human player.
        #[arg(short, long, value_enum, default_value = "black")]
        color: Side,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Play a series of games between two computer players.
    Match {
        #[arg(long, value_enum, default_value = "mcts")]
        first: AgentKind,

        #[arg(long, value_enum, default_value = "random")]
        second: AgentKind,

        /// Number of games to play.
        #[arg(short, long, default_value = "10")]
        games: usize,

        /// Keep the first player on Black instead of alternating colours.
        #[arg(long)]
        fixed_colors: bool,

        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Replay moves from the opening and show the position.
    Moves {
        /// Squares such as D3, or "pass".
        moves: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Side {
    Black,
    White,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Player::Black,
            Side::White => Player::White,
        }
    }
}

/// Search settings shared by the subcommands that use MCTS.
#[derive(Args, Clone, Debug)]
struct SearchArgs {
    /// Number of MCTS simulations per move.
    #[arg(short, long, default_value = "1000")]
    simulations: usize,

    /// UCT exploration constant.
    #[arg(long, default_value = "1.0")]
    exploration: f32,

    /// Random seed for reproducibility.
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Take corners first during rollouts.
    #[arg(long)]
    corner_rollouts: bool,

    /// Keep the whole search tree instead of pruning unreachable branches.
    #[arg(long)]
    keep_tree: bool,
}

impl SearchArgs {
    fn config(&self) -> MctsConfig {
        MctsConfig {
            num_simulations: self.simulations,
            exploration: self.exploration,
            rollout_policy: if self.corner_rollouts {
                RolloutPolicy::CornersFirst
            } else {
                RolloutPolicy::Uniform
            },
            prune_on_advance: !self.keep_tree,
        }
    }
}

fn parse_moves(moves: &[String]) -> Result<Vec<Option<Square>>> {
    moves
        .iter()
        .map(|m| {
            if m.eq_ignore_ascii_case("pass") {
                Ok(None)
            } else {
                m.parse::<Square>().map(Some).with_context(|| format!("Failed to parse move {m:?}"))
            }
        })
        .collect()
}

fn report(turn: &Turn<'_>) {
    println!("{:>2}. {} plays {}", turn.state.steps + 1, turn.state.to_move, turn.action);
}

/// Run the play command.
fn cmd_play(color: Side, search: &SearchArgs) -> Result<()> {
    let human_color = Player::from(color);
    let mut engine = MctsAgent::with_rollouts(search.config(), ChaCha8Rng::seed_from_u64(search.seed));
    let mut human = HumanAgent::new(io::stdin().lock(), io::stdout());

    println!(
        "You play {} ({}); MCTS uses {} simulations per move",
        human_color,
        human_color.glyph(),
        search.simulations
    );

    let record = match human_color {
        Player::Black => play_game(&mut human, &mut engine, report),
        Player::White => play_game(&mut engine, &mut human, report),
    }
    .context("Game aborted")?;

    let (black, white) = record.score();
    println!("\n{}\nFinal score: black {} - {} white", record.board, black, white);
    match record.winner() {
        Some(winner) if winner == human_color => println!("You win!"),
        Some(_) => println!("MCTS wins."),
        None => println!("Draw."),
    }
    Ok(())
}

/// Run the match command.
fn cmd_match(settings: MatchSettings, json: bool) -> Result<()> {
    let start = Instant::now();
    log::info!(
        "Playing {} games: {} vs {} ({} simulations/move)",
        settings.games,
        settings.first,
        settings.second,
        settings.config.num_simulations
    );

    let summary = run_match(&settings).context("Match failed")?;
    log::info!("Completed in {:.2}s", start.elapsed().as_secs_f64());

    if json {
        println!("{}", serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?);
    } else {
        println!("{summary}");
    }
    Ok(())
}

/// Run the moves command.
fn cmd_moves(moves: &[String]) -> Result<()> {
    let state = replay(parse_moves(moves)?).context("Move sequence is not legal")?;
    let (black, white) = (state.board.count(Player::Black), state.board.count(Player::White));

    println!("{}", state.board);
    println!("After {} plies: black {} - {} white", state.steps, black, white);
    if state.is_final() {
        match state.board.winner() {
            Some(winner) => println!("Game over, {winner} wins"),
            None => println!("Game over, draw"),
        }
    } else if state.valid_moves().is_empty() {
        println!("{} to move: must pass", state.to_move);
    } else {
        println!("{} to move: {}", state.to_move, format_moves(state.valid_moves()));
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _logger = Logger::try_with_env_or_str("info")
        .and_then(|logger| logger.format(flexi_logger::colored_default_format).start())
        .context("Failed to start logger")?;

    match cli.command {
        Commands::Play { color, search } => cmd_play(color, &search),
        Commands::Match {
            first,
            second,
            games,
            fixed_colors,
            json,
            search,
        } => cmd_match(
            MatchSettings {
                first,
                second,
                games,
                fixed_colors,
                seed: search.seed,
                config: search.config(),
            },
            json,
        ),
        Commands::Moves { moves } => cmd_moves(&moves),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_match_args() {
        let cli = Cli::try_parse_from([
            "othello", "match", "--first", "corner", "--games", "4", "--fixed-colors", "-s", "50", "--corner-rollouts",
        ])
        .unwrap();
        match cli.command {
            Commands::Match {
                first,
                second,
                games,
                fixed_colors,
                json,
                search,
            } => {
                assert_eq!(first, AgentKind::Corner);
                assert_eq!(second, AgentKind::Random);
                assert_eq!(games, 4);
                assert!(fixed_colors);
                assert!(!json);
                let config = search.config();
                assert_eq!(config.num_simulations, 50);
                assert_eq!(config.rollout_policy, RolloutPolicy::CornersFirst);
                assert!(config.prune_on_advance);
            }
            _ => panic!("expected match command"),
        }
    }

    #[test]
    fn test_parse_moves() {
        let moves: Vec<String> = ["d3", "PASS", "C5"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            parse_moves(&moves).unwrap(),
            vec![Some(Square::D3), None, Some(Square::C5)]
        );
        assert!(parse_moves(&["K9".to_string()]).is_err());
    }

    #[test]
    fn test_moves_command() {
        let moves: Vec<String> = ["D3", "C5"].iter().map(|s| s.to_string()).collect();
        assert!(cmd_moves(&moves).is_ok());
        assert!(cmd_moves(&["A1".to_string()]).is_err());
    }
}
