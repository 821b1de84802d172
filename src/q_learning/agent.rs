//! Tabular Q-learning agent
//!
//! Maintains the action-value table and the ε-greedy exploration policy,
//! updating estimates online via one-step temporal difference learning.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    game::BoardKey,
    q_learning::q_table::QTable,
};

/// Agent hyperparameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hyperparameters {
    /// Learning rate α, in (0, 1]
    pub alpha: f64,
    /// Discount factor γ, in [0, 1]
    pub gamma: f64,
    /// Initial exploration rate ε, in [0, 1]
    pub epsilon: f64,
    /// Multiplicative ε decay per learning update, in (0, 1]
    pub epsilon_decay: f64,
    /// Exploration rate floor
    pub min_epsilon: f64,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            gamma: 0.99,
            epsilon: 0.5,
            epsilon_decay: 0.995,
            min_epsilon: 0.01,
        }
    }
}

impl Hyperparameters {
    /// Validate parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidHyperparameter`] naming the first
    /// parameter outside its valid range.
    pub fn validate(&self) -> Result<()> {
        let check = |ok: bool, name: &'static str, value: f64, expected: &'static str| {
            if ok {
                Ok(())
            } else {
                Err(crate::Error::InvalidHyperparameter {
                    name,
                    value,
                    expected,
                })
            }
        };

        check(
            self.alpha > 0.0 && self.alpha <= 1.0,
            "alpha",
            self.alpha,
            "(0, 1]",
        )?;
        check(
            (0.0..=1.0).contains(&self.gamma),
            "gamma",
            self.gamma,
            "[0, 1]",
        )?;
        check(
            (0.0..=1.0).contains(&self.epsilon),
            "epsilon",
            self.epsilon,
            "[0, 1]",
        )?;
        check(
            self.epsilon_decay > 0.0 && self.epsilon_decay <= 1.0,
            "epsilon_decay",
            self.epsilon_decay,
            "(0, 1]",
        )?;
        check(
            self.min_epsilon >= 0.0 && self.min_epsilon <= self.epsilon,
            "min_epsilon",
            self.min_epsilon,
            "[0, epsilon]",
        )?;
        Ok(())
    }
}

/// Serializable agent state for persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AgentState {
    pub q_table: QTable,
    pub params: Hyperparameters,
    pub epsilon: f64,
    pub rng_seed: Option<u64>,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent (off-policy TD control)
///
/// Learns action values by always updating toward the maximum next-state
/// value, regardless of the action actually taken.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    params: Hyperparameters,
    epsilon: f64,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearningAgent {
    /// Create a new agent with the given hyperparameters.
    ///
    /// # Errors
    ///
    /// Returns an error if any hyperparameter is outside its valid range.
    pub fn new(params: Hyperparameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            q_table: QTable::new(),
            epsilon: params.epsilon,
            params,
            rng: build_rng(None),
            rng_seed: None,
        })
    }

    /// Seed the agent's RNG for reproducible action selection
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.reseed(seed);
        self
    }

    /// Re-seed the agent's RNG in place
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
    }

    /// Current exploration rate
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// The agent's hyperparameters
    pub fn params(&self) -> &Hyperparameters {
        &self.params
    }

    /// Read access to the Q-table
    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Mutable access to the Q-table (priming test fixtures, inspection)
    pub fn q_table_mut(&mut self) -> &mut QTable {
        &mut self.q_table
    }

    /// Number of states with stored Q-values
    pub fn q_table_size(&self) -> usize {
        self.q_table.len()
    }

    /// ε-greedy action selection over the legal-action set.
    ///
    /// With probability ε returns a uniformly random legal action, otherwise
    /// the greedy action.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoLegalActions`] if `legal` is empty; callers
    /// must check for terminal states before requesting an action.
    pub fn choose_action(&mut self, state: &BoardKey, legal: &[usize]) -> Result<usize> {
        if legal.is_empty() {
            return Err(crate::Error::NoLegalActions);
        }

        if self.rng.random::<f64>() < self.epsilon {
            // Explore: random legal action
            Ok(*legal.choose(&mut self.rng).ok_or(crate::Error::NoLegalActions)?)
        } else {
            self.greedy_action(state, legal)
        }
    }

    /// Greedy action selection: the legal action with the maximum stored
    /// Q-value, ties broken uniformly at random among maximizers.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoLegalActions`] if `legal` is empty.
    pub fn greedy_action(&mut self, state: &BoardKey, legal: &[usize]) -> Result<usize> {
        if legal.is_empty() {
            return Err(crate::Error::NoLegalActions);
        }

        let values = self.q_table.action_values(state);
        let best = legal
            .iter()
            .map(|&a| values[a])
            .fold(f64::NEG_INFINITY, f64::max);
        let maximizers: Vec<usize> = legal
            .iter()
            .copied()
            .filter(|&a| values[a] == best)
            .collect();

        Ok(*maximizers
            .choose(&mut self.rng)
            .ok_or(crate::Error::NoLegalActions)?)
    }

    /// One-step Q-learning update:
    ///
    /// `Q(s,a) ← (1-α)·Q(s,a) + α·(reward + γ·maxNext)`
    ///
    /// `maxNext` is 0 when `terminal`, otherwise the maximum over all 9
    /// action slots of `next_state` (not restricted to legal actions).
    /// Illegal slots default to 0.0, so this matches a legal-only maximum
    /// while every legal value is non-negative; once learned values go
    /// negative the all-slot maximum is floored at zero.
    ///
    /// After the update, decays ε by the configured factor, floored at
    /// `min_epsilon`.
    pub fn learn(
        &mut self,
        state: BoardKey,
        action: usize,
        reward: f64,
        next_state: &BoardKey,
        terminal: bool,
    ) {
        let max_next = if terminal {
            0.0
        } else {
            self.q_table.max_over_all(next_state)
        };

        let old = self.q_table.value(&state, action);
        let new = (1.0 - self.params.alpha) * old
            + self.params.alpha * (reward + self.params.gamma * max_next);
        self.q_table.set(state, action, new);

        self.decay_epsilon();
    }

    fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.params.epsilon_decay).max(self.params.min_epsilon);
    }

    pub(crate) fn export_state(&self) -> AgentState {
        AgentState {
            q_table: self.q_table.clone(),
            params: self.params,
            epsilon: self.epsilon,
            rng_seed: self.rng_seed,
        }
    }

    pub(crate) fn from_state(state: AgentState) -> Self {
        Self {
            q_table: state.q_table,
            params: state.params,
            epsilon: state.epsilon,
            rng: build_rng(state.rng_seed),
            rng_seed: state.rng_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greedy_params() -> Hyperparameters {
        Hyperparameters {
            epsilon: 0.0,
            min_epsilon: 0.0,
            ..Hyperparameters::default()
        }
    }

    #[test]
    fn test_hyperparameter_validation() {
        let bad_alpha = Hyperparameters {
            alpha: 0.0,
            ..Hyperparameters::default()
        };
        assert!(bad_alpha.validate().is_err());

        let bad_floor = Hyperparameters {
            epsilon: 0.1,
            min_epsilon: 0.2,
            ..Hyperparameters::default()
        };
        assert!(bad_floor.validate().is_err());

        assert!(Hyperparameters::default().validate().is_ok());
    }

    #[test]
    fn test_choose_action_empty_legal_set_errors() {
        let mut agent = QLearningAgent::new(Hyperparameters::default()).unwrap();
        let state = BoardKey::empty();
        assert!(matches!(
            agent.choose_action(&state, &[]),
            Err(crate::Error::NoLegalActions)
        ));
    }

    #[test]
    fn test_fresh_agent_greedy_on_empty_board_returns_valid_index() {
        // All Q-values tied at 0: any index is acceptable but must be legal
        let mut agent = QLearningAgent::new(greedy_params()).unwrap().with_seed(7);
        let state = BoardKey::empty();
        let legal: Vec<usize> = (0..9).collect();

        for _ in 0..50 {
            let action = agent.choose_action(&state, &legal).unwrap();
            assert!(action < 9);
        }
    }

    #[test]
    fn test_greedy_picks_unique_maximizer() {
        let mut agent = QLearningAgent::new(greedy_params()).unwrap().with_seed(3);
        let state = BoardKey::empty();
        agent.q_table_mut().set(state, 2, 0.4);
        agent.q_table_mut().set(state, 5, 0.9);

        for _ in 0..20 {
            assert_eq!(agent.greedy_action(&state, &[0, 2, 5, 8]).unwrap(), 5);
        }
    }

    #[test]
    fn test_greedy_ties_break_among_maximizers_only() {
        let mut agent = QLearningAgent::new(greedy_params()).unwrap().with_seed(11);
        let state = BoardKey::empty();
        agent.q_table_mut().set(state, 1, 0.7);
        agent.q_table_mut().set(state, 6, 0.7);
        agent.q_table_mut().set(state, 3, 0.1);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let action = agent.greedy_action(&state, &[1, 3, 6]).unwrap();
            assert!(action == 1 || action == 6);
            seen.insert(action);
        }
        // Both maximizers should appear over enough draws
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_greedy_ignores_illegal_maximizer() {
        let mut agent = QLearningAgent::new(greedy_params()).unwrap().with_seed(5);
        let state = BoardKey::empty();
        // Slot 0 holds the global maximum but is not legal here
        agent.q_table_mut().set(state, 0, 5.0);
        agent.q_table_mut().set(state, 4, 1.0);

        assert_eq!(agent.greedy_action(&state, &[4, 7]).unwrap(), 4);
    }

    #[test]
    fn test_learn_update_rule() {
        let params = Hyperparameters {
            alpha: 0.5,
            gamma: 0.9,
            ..greedy_params()
        };
        let mut agent = QLearningAgent::new(params).unwrap();
        let state = BoardKey::empty();
        let next = BoardKey::parse("X........").unwrap();
        agent.q_table_mut().set(next, 3, 2.0);

        agent.learn(state, 4, 1.0, &next, false);

        // new = (1-0.5)*0 + 0.5*(1.0 + 0.9*2.0) = 1.4
        assert!((agent.q_table().value(&state, 4) - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_learn_alpha_one_collapses_to_target() {
        let params = Hyperparameters {
            alpha: 1.0,
            gamma: 0.9,
            ..greedy_params()
        };
        let mut agent = QLearningAgent::new(params).unwrap();
        let state = BoardKey::empty();
        let next = BoardKey::parse("X........").unwrap();
        agent.q_table_mut().set(state, 0, 0.33);
        agent.q_table_mut().set(next, 1, 0.5);

        agent.learn(state, 0, 0.25, &next, false);

        // Old value fully discarded: reward + γ·maxNext exactly
        assert!((agent.q_table().value(&state, 0) - (0.25 + 0.9 * 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_learn_terminal_ignores_next_state() {
        let params = Hyperparameters {
            alpha: 1.0,
            ..greedy_params()
        };
        let mut agent = QLearningAgent::new(params).unwrap();
        let state = BoardKey::empty();
        let next = BoardKey::parse("X........").unwrap();
        agent.q_table_mut().set(next, 0, 10.0);

        agent.learn(state, 4, -1.0, &next, true);

        assert_eq!(agent.q_table().value(&state, 4), -1.0);
    }

    #[test]
    fn test_epsilon_decays_monotonically_to_floor() {
        let params = Hyperparameters {
            epsilon: 0.5,
            epsilon_decay: 0.5,
            min_epsilon: 0.05,
            ..Hyperparameters::default()
        };
        let mut agent = QLearningAgent::new(params).unwrap();
        let state = BoardKey::empty();
        let next = BoardKey::parse("X........").unwrap();

        let mut previous = agent.epsilon();
        for _ in 0..20 {
            agent.learn(state, 0, 0.0, &next, false);
            assert!(agent.epsilon() <= previous);
            assert!(agent.epsilon() >= 0.05);
            previous = agent.epsilon();
        }
        assert_eq!(agent.epsilon(), 0.05);
    }
}
