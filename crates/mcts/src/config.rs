//! MCTS configuration parameters.

use crate::evaluator::RolloutPolicy;

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct MctsConfig {
    /// Number of simulations per search.
    pub num_simulations: usize,

    /// UCT exploration constant `c` in
    /// `Q / N + c * sqrt(ln(N_parent) / N)`.
    pub exploration: f32,

    /// Move choice inside random playouts.
    pub rollout_policy: RolloutPolicy,

    /// Drop branches the game can no longer reach whenever an agent advances
    /// its cursor.
    pub prune_on_advance: bool,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: 1000,
            exploration: 1.0,
            rollout_policy: RolloutPolicy::Uniform,
            prune_on_advance: true,
        }
    }
}

impl MctsConfig {
    /// Create a new config with the specified number of simulations.
    pub fn with_simulations(num_simulations: usize) -> Self {
        Self {
            num_simulations,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.num_simulations, 1000);
        assert!((config.exploration - 1.0).abs() < 1e-6);
        assert_eq!(config.rollout_policy, RolloutPolicy::Uniform);
        assert!(config.prune_on_advance);
    }

    #[test]
    fn test_with_simulations() {
        let config = MctsConfig::with_simulations(100);
        assert_eq!(config.num_simulations, 100);
        assert!((config.exploration - 1.0).abs() < 1e-6);
    }
}
