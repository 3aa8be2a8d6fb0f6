//! Monte Carlo Tree Search with UCT selection.
//!
//! Each simulation walks down from a start node (`tree_policy`), scores the
//! leaf with the evaluator, and backs the result up to the tree root with
//! alternating sign.

use crate::{
    config::MctsConfig,
    evaluator::Evaluator,
    node::NodeId,
    tree::Tree,
};
use log::{debug, log_enabled, trace, Level};
use othello_board::{Action, GameState};
use othello_core::{OthelloError, Result, Reward};

/// Result of an MCTS search.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Most visited child of the start node.
    pub node: NodeId,

    /// The move leading to `node`.
    pub action: Action,

    /// Visit count for each explored move at the start node.
    pub visit_counts: Vec<(Action, u32)>,

    /// Mean backed-up reward at the start node, from the perspective of the
    /// player to move there.
    pub root_value: f32,
}

/// Monte Carlo Tree Search over Othello positions.
///
/// The tree persists between searches, so statistics gathered below a node
/// are reused once the game reaches it.
pub struct Mcts<E: Evaluator> {
    config: MctsConfig,
    evaluator: E,
    tree: Tree,
}

impl<E: Evaluator> Mcts<E> {
    /// Create a new MCTS instance rooted at `root`.
    pub fn new(config: MctsConfig, evaluator: E, root: GameState) -> Self {
        Self {
            config,
            evaluator,
            tree: Tree::new(root),
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Discard the tree and start over from `root`.
    pub fn reset(&mut self, root: GameState) {
        self.tree.reset(root);
    }

    /// See [`Tree::compact`].
    pub fn compact(&mut self, keep: NodeId) -> NodeId {
        self.tree.compact(keep)
    }

    /// Search from `start` with the configured budget and pick a move.
    ///
    /// Returns None when the game is over at `start`.
    pub fn search(&mut self, start: NodeId) -> Option<SearchResult> {
        // At least one simulation, so a live position always yields a child.
        let simulations = self.config.num_simulations.max(1);
        let best = self.best_action(start, simulations, self.config.exploration)?;
        self.extract_results(start, best)
    }

    /// Run `n_simulations` from `start` and return its most visited child,
    /// the earliest expanded one on ties. None if `start` has no children.
    pub fn best_action(&mut self, start: NodeId, n_simulations: usize, c: f32) -> Option<NodeId> {
        for _ in 0..n_simulations {
            self.simulate(start, c);
        }

        let best = self.most_visited_child(start);

        if log_enabled!(Level::Trace) {
            for (id, child) in self.tree.children(start) {
                trace!(
                    "  {:>4}: visits={:<6} mean={:+.3}{}",
                    describe(child.causing_action.as_ref()),
                    child.visits,
                    child.mean_reward(),
                    if Some(id) == best { " *" } else { "" }
                );
            }
        }
        if let Some(best) = best {
            let node = self.tree.get(best);
            debug!(
                "search: {} simulations, best {} ({} visits, mean {:+.3}), tree size {}",
                n_simulations,
                describe(node.causing_action.as_ref()),
                node.visits,
                node.mean_reward(),
                self.tree.len()
            );
        }

        best
    }

    /// Run a single simulation: select/expand -> evaluate -> backpropagate.
    fn simulate(&mut self, start: NodeId, c: f32) {
        let leaf = self.tree_policy(start, c);
        let state = self.tree.get(leaf).state;
        // Credit goes to whoever moved into the leaf.
        let reward = self.evaluator.evaluate(&state, state.to_move.opponent());
        self.backpropagate(leaf, reward);
    }

    /// Descend from `start`: stop at a terminal node, otherwise expand the
    /// first node that still has an untried move and return the new child.
    pub fn tree_policy(&mut self, start: NodeId, c: f32) -> NodeId {
        let mut current = start;
        loop {
            if self.tree.get(current).terminal {
                return current;
            }
            if let Some(child) = self.expand(current) {
                return child;
            }
            match self.best_uct_child(current, c) {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    /// Child maximizing `Q/N + c * sqrt(ln(N_parent) / N)`.
    ///
    /// Unvisited children win outright. Ties keep the earliest child.
    pub fn best_uct_child(&self, node_id: NodeId, c: f32) -> Option<NodeId> {
        let node = self.tree.get(node_id);
        let ln_parent = (node.visits.max(1) as f32).ln();

        let mut best = None;
        let mut best_uct = f32::NEG_INFINITY;

        for &child_id in &node.children {
            let child = self.tree.get(child_id);
            let uct = if child.visits == 0 {
                f32::INFINITY
            } else {
                let n = child.visits as f32;
                child.reward / n + c * (ln_parent / n).sqrt()
            };

            if best.is_none() || uct > best_uct {
                best_uct = uct;
                best = Some(child_id);
            }
        }

        best
    }

    fn most_visited_child(&self, node_id: NodeId) -> Option<NodeId> {
        let mut best: Option<(NodeId, u32)> = None;
        for (id, child) in self.tree.children(node_id) {
            if best.map_or(true, |(_, visits)| child.visits > visits) {
                best = Some((id, child.visits));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Create the child for the lowest untried square, or the pass child
    /// when the side to move is stuck. None when nothing is left to try.
    pub fn expand(&mut self, node_id: NodeId) -> Option<NodeId> {
        let node = self.tree.get_mut(node_id);
        let action = if let Some(sq) = node.untried.pop_lsb() {
            Action::place(sq, node.state.board.place_at_unchecked(node.state.to_move, sq))
        } else if node.pass_untried {
            node.pass_untried = false;
            Action::pass(node.state.board)
        } else {
            return None;
        };

        Some(self.tree.add_child(node_id, action))
    }

    /// Child of `node_id` reached by `action`, creating it if the search has
    /// not explored that move yet.
    ///
    /// # Errors
    /// `IllegalMove` if `action` is not a legal move at `node_id`.
    pub fn force_expand_on_action(&mut self, node_id: NodeId, action: &Action) -> Result<NodeId> {
        let node = self.tree.get(node_id);
        if let Some(&existing) = node
            .children
            .iter()
            .find(|&&child| self.tree.get(child).causing_action.as_ref() == Some(action))
        {
            return Ok(existing);
        }

        let state = node.state;
        let illegal = OthelloError::IllegalMove {
            square: action.square().map(|sq| sq.index()),
            player: state.to_move,
        };
        if state.board.action(state.to_move, action.square())? != *action {
            return Err(illegal);
        }

        let node = self.tree.get_mut(node_id);
        match action.square() {
            Some(sq) if node.untried.contains(sq) => node.untried.clear(sq),
            None if node.pass_untried => node.pass_untried = false,
            _ => return Err(illegal),
        }

        Ok(self.tree.add_child(node_id, *action))
    }

    /// Add one visit and `reward` to `node_id`, then walk to the tree root
    /// flipping the sign at every level.
    pub fn backpropagate(&mut self, node_id: NodeId, reward: Reward) {
        let mut reward = reward;
        let mut current = Some(node_id);

        while let Some(id) = current {
            let node = self.tree.get_mut(id);
            node.visits += 1;
            node.reward += reward.value();
            reward = reward.negate();
            current = node.parent;
        }
    }

    fn extract_results(&self, start: NodeId, best: NodeId) -> Option<SearchResult> {
        let action = self.tree.get(best).causing_action?;

        let mut visit_counts = Vec::new();
        let mut total_visits = 0u32;
        let mut total_reward = 0.0f32;
        for (_, child) in self.tree.children(start) {
            if let Some(action) = child.causing_action {
                visit_counts.push((action, child.visits));
            }
            total_visits += child.visits;
            total_reward += child.reward;
        }

        // Children hold rewards for the player to move at `start`.
        let root_value = if total_visits > 0 {
            total_reward / total_visits as f32
        } else {
            0.0
        };

        Some(SearchResult {
            node: best,
            action,
            visit_counts,
            root_value,
        })
    }
}

fn describe(action: Option<&Action>) -> String {
    action.map_or_else(|| "root".to_string(), |a| a.to_string())
}
