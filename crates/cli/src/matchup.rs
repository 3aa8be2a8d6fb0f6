//! Series of games between two agent kinds.

use clap::ValueEnum;
use log::info;
use othello_board::{play_game, Agent, CornerAgent, GameRecord, RandomAgent};
use othello_core::{Player, Result};
use othello_mcts::{MctsAgent, MctsConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;

/// Computer players available from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Mcts,
    Random,
    Corner,
}

impl AgentKind {
    pub fn build(self, config: &MctsConfig, seed: u64) -> Box<dyn Agent> {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        match self {
            AgentKind::Mcts => Box::new(MctsAgent::with_rollouts(config.clone(), rng)),
            AgentKind::Random => Box::new(RandomAgent::new(rng)),
            AgentKind::Corner => Box::new(CornerAgent::new(rng)),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AgentKind::Mcts => "mcts",
            AgentKind::Random => "random",
            AgentKind::Corner => "corner",
        };
        f.write_str(name)
    }
}

/// Parameters of a match.
#[derive(Clone, Debug)]
pub struct MatchSettings {
    pub first: AgentKind,
    pub second: AgentKind,
    pub games: usize,
    /// `first` plays Black in every game instead of alternating.
    pub fixed_colors: bool,
    pub seed: u64,
    pub config: MctsConfig,
}

/// Outcome of one game, from the match's point of view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub index: usize,
    pub first_color: String,
    /// "first", "second" or "draw".
    pub result: String,
    pub black_discs: u32,
    pub white_discs: u32,
    pub plies: usize,
    pub passes: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchSummary {
    pub first: AgentKind,
    pub second: AgentKind,
    pub games: usize,
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
    pub first_score: f32,
    pub results: Vec<GameSummary>,
}

impl MatchSummary {
    fn from_games(settings: &MatchSettings, results: Vec<GameSummary>) -> Self {
        let count = |which: &str| results.iter().filter(|g| g.result == which).count();
        let first_wins = count("first");
        let second_wins = count("second");
        let draws = count("draw");
        let first_score = if results.is_empty() {
            0.0
        } else {
            (first_wins as f32 + 0.5 * draws as f32) / results.len() as f32
        };

        Self {
            first: settings.first,
            second: settings.second,
            games: results.len(),
            first_wins,
            second_wins,
            draws,
            first_score,
            results,
        }
    }
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} vs {} over {} games", self.first, self.second, self.games)?;
        writeln!(f, "================================================")?;
        for game in &self.results {
            writeln!(
                f,
                "Game {:>3}: {} as {:<5} {:>2}-{:<2} ({} plies, {} passes) -> {}",
                game.index + 1,
                self.first,
                game.first_color,
                game.black_discs,
                game.white_discs,
                game.plies,
                game.passes,
                game.result
            )?;
        }
        writeln!(f, "------------------------------------------------")?;
        writeln!(f, "{} wins: {}", self.first, self.first_wins)?;
        writeln!(f, "{} wins: {}", self.second, self.second_wins)?;
        writeln!(f, "Draws: {}", self.draws)?;
        write!(f, "Score for {}: {:.1}%", self.first, self.first_score * 100.0)
    }
}

fn summarize(index: usize, first_color: Player, record: &GameRecord) -> GameSummary {
    let (black_discs, white_discs) = record.score();
    let result = match record.winner() {
        Some(winner) if winner == first_color => "first",
        Some(_) => "second",
        None => "draw",
    };
    GameSummary {
        index,
        first_color: first_color.to_string(),
        result: result.to_string(),
        black_discs,
        white_discs,
        plies: record.moves.len(),
        passes: record.passes(),
    }
}

/// Play one game of the match. Seeds depend only on the game index.
pub fn play_one(settings: &MatchSettings, index: usize) -> Result<GameSummary> {
    let game_seed = settings.seed.wrapping_add(index as u64 * 1000);
    let mut first = settings.first.build(&settings.config, game_seed);
    let mut second = settings.second.build(&settings.config, game_seed.wrapping_add(1));

    let first_color = if settings.fixed_colors || index % 2 == 0 {
        Player::Black
    } else {
        Player::White
    };
    let record = match first_color {
        Player::Black => play_game(&mut first, &mut second, |_| {})?,
        Player::White => play_game(&mut second, &mut first, |_| {})?,
    };

    let summary = summarize(index, first_color, &record);
    info!(
        "game {} finished {}-{}: {}",
        index + 1,
        summary.black_discs,
        summary.white_discs,
        summary.result
    );
    Ok(summary)
}

/// Play every game of the match on the rayon pool.
///
/// Each game owns its agents and seeds, so the summary does not depend on
/// scheduling.
pub fn run_match(settings: &MatchSettings) -> Result<MatchSummary> {
    let results = (0..settings.games)
        .into_par_iter()
        .map(|index| play_one(settings, index))
        .collect::<Result<Vec<_>>>()?;
    Ok(MatchSummary::from_games(settings, results))
}
