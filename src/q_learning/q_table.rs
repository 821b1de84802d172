//! Q-table storage for temporal difference learning

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::game::BoardKey;

/// Number of action slots per state (one per board cell)
pub const ACTIONS: usize = 9;

/// Q-table mapping board states to fixed-size action-value arrays.
///
/// Entries default to the all-zero vector for any state not yet visited.
/// Reads are observing-only: looking up a missing state returns zeros
/// without inserting an entry. Only writes insert, so the table never grows
/// from policy queries alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QTable {
    values: HashMap<BoardKey, [f64; ACTIONS]>,
}

impl QTable {
    /// Create an empty Q-table
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Get the Q-value for a state-action pair (0.0 for unvisited states)
    pub fn value(&self, state: &BoardKey, action: usize) -> f64 {
        self.values.get(state).map_or(0.0, |row| row[action])
    }

    /// Get the full action-value row for a state (zeros for unvisited states)
    pub fn action_values(&self, state: &BoardKey) -> [f64; ACTIONS] {
        self.values.get(state).copied().unwrap_or([0.0; ACTIONS])
    }

    /// Set the Q-value for a state-action pair, inserting the zero vector
    /// on first write to the state.
    pub fn set(&mut self, state: BoardKey, action: usize, value: f64) {
        self.values.entry(state).or_insert([0.0; ACTIONS])[action] = value;
    }

    /// Maximum Q-value over all 9 action slots of a state.
    ///
    /// Deliberately not restricted to legal actions: illegal slots default
    /// to 0.0 and are never written by the policy. Once legal values go
    /// negative this bounds the maximum below by zero; see the update-rule
    /// docs in `agent`.
    pub fn max_over_all(&self, state: &BoardKey) -> f64 {
        self.action_values(state)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Number of states with stored entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table holds no entries
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the stored state keys
    pub fn states(&self) -> impl Iterator<Item = &BoardKey> {
        self.values.keys()
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.values.clear();
    }
}
