//! MCTS node types for tree storage.
//!
//! Nodes live in an arena and refer to each other by index: children are
//! owned through the arena, and the parent link is a plain handle.

use othello_board::{Action, Bitboard, GameState};

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// A node in the search tree: one game state reached by one action.
///
/// `reward` is credited to the player who made `causing_action`, i.e. the
/// player to move at the parent. A parent therefore ranks its children by
/// their mean reward directly.
#[derive(Clone, Debug)]
pub struct Node {
    pub state: GameState,

    pub parent: Option<NodeId>,

    /// Explored moves, in expansion order.
    pub children: Vec<NodeId>,

    pub visits: u32,

    /// Sum of backed-up rewards.
    pub reward: f32,

    /// Legal squares for `state.to_move` that have no child yet.
    pub untried: Bitboard,

    /// The side to move has no square but the game goes on, and the pass
    /// child has not been created yet.
    pub pass_untried: bool,

    /// Neither side can move.
    pub terminal: bool,

    /// Move that produced this node; None only at the root.
    pub causing_action: Option<Action>,
}

impl Node {
    fn with_state(state: GameState, parent: Option<NodeId>, causing_action: Option<Action>) -> Self {
        let untried = state.valid_moves();
        let terminal = untried.is_empty() && state.board.valid_moves(state.to_move.opponent()).is_empty();
        Self {
            state,
            parent,
            children: Vec::new(),
            visits: 0,
            reward: 0.0,
            untried,
            pass_untried: untried.is_empty() && !terminal,
            terminal,
            causing_action,
        }
    }

    /// Create a root node for `state`.
    pub fn root(state: GameState) -> Self {
        Self::with_state(state, None, None)
    }

    /// Create the node reached from `parent` by `action`.
    pub fn child(state: GameState, parent: NodeId, action: Action) -> Self {
        Self::with_state(state, Some(parent), Some(action))
    }

    /// Mean reward (Q / N); 0.0 for an unvisited node.
    pub fn mean_reward(&self) -> f32 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward / self.visits as f32
        }
    }

    /// True while some move (square or forced pass) has no child yet.
    pub fn has_untried(&self) -> bool {
        self.untried.is_not_empty() || self.pass_untried
    }
}
