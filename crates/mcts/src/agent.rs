//! A player backed by a persistent search tree.

use crate::{
    config::MctsConfig,
    evaluator::{Evaluator, RolloutEvaluator},
    node::{Node, NodeId},
    search::Mcts,
};
use log::debug;
use othello_board::{Action, Agent, Board, GameState};
use othello_core::{OthelloError, Player, Result};
use rand::Rng;

/// Plays by searching from a cursor that follows the game through the tree.
///
/// The tree always starts at the initial position, so the cursor is at the
/// root before Black's first move whichever colour this agent plays.
pub struct MctsAgent<E: Evaluator> {
    mcts: Mcts<E>,
    cursor: NodeId,
}

impl<R: Rng> MctsAgent<RolloutEvaluator<R>> {
    /// Agent scoring leaves with random playouts driven by `rng`.
    pub fn with_rollouts(config: MctsConfig, rng: R) -> Self {
        let evaluator = RolloutEvaluator::with_policy(rng, config.rollout_policy);
        Self::new(config, evaluator)
    }
}

impl<E: Evaluator> MctsAgent<E> {
    pub fn new(config: MctsConfig, evaluator: E) -> Self {
        let mcts = Mcts::new(config, evaluator, GameState::initial());
        let cursor = mcts.root();
        Self { mcts, cursor }
    }

    pub fn mcts(&self) -> &Mcts<E> {
        &self.mcts
    }

    pub fn cursor(&self) -> NodeId {
        self.cursor
    }

    /// Node for the current game position.
    pub fn current(&self) -> &Node {
        self.mcts.tree().get(self.cursor)
    }

    fn advance(&mut self, to: NodeId) {
        self.cursor = if self.mcts.config().prune_on_advance {
            self.mcts.compact(to)
        } else {
            to
        };
    }
}

impl<E: Evaluator> Agent for MctsAgent<E> {
    fn initialize(&mut self) {
        self.mcts.reset(GameState::initial());
        self.cursor = self.mcts.root();
    }

    fn opponent_move_callback(&mut self, action: &Action) -> Result<()> {
        let child = self.mcts.force_expand_on_action(self.cursor, action)?;
        self.advance(child);
        Ok(())
    }

    fn select_move(&mut self, board: &Board, player: Player) -> Result<Action> {
        if board.is_final() {
            return Err(OthelloError::GameOver);
        }

        let state = self.current().state;
        if state.board != *board || state.to_move != player {
            return Err(OthelloError::Desync(format!(
                "search tree is at ply {} with {} to move, game has {} to move",
                state.steps, state.to_move, player
            )));
        }

        let result = self.mcts.search(self.cursor).ok_or(OthelloError::GameOver)?;
        debug!(
            "{} plays {} at ply {} (value {:+.3})",
            player, result.action, state.steps, result.root_value
        );
        self.advance(result.node);
        Ok(result.action)
    }
}
