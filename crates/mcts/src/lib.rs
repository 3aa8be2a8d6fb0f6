//! Monte Carlo Tree Search for Othello.
//!
//! Plain UCT over an arena tree: unexplored moves are expanded one at a
//! time, leaves are scored by an [`Evaluator`] (random playouts by default)
//! and results are backed up with alternating sign.
//!
//! # Example
//!
//! ```
//! use othello_board::GameState;
//! use othello_mcts::{Mcts, MctsConfig, RolloutEvaluator};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let config = MctsConfig::with_simulations(200);
//! let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(42));
//! let mut mcts = Mcts::new(config, evaluator, GameState::initial());
//!
//! let root = mcts.root();
//! let result = mcts.search(root).expect("opening position has moves");
//! println!("Best move: {}", result.action);
//! println!("Root value: {:+.3}", result.root_value);
//! ```

pub mod agent;
pub mod config;
pub mod evaluator;
mod node;
pub mod search;
mod tree;

pub use agent::MctsAgent;
pub use config::MctsConfig;
pub use evaluator::{Evaluator, RolloutEvaluator, RolloutPolicy};
pub use node::{Node, NodeId};
pub use search::{Mcts, SearchResult};
pub use tree::Tree;
