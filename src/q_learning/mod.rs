//! Tabular Q-learning
//!
//! This module implements off-policy temporal difference (TD) control with
//! an exact action-value table, which is sufficient for Tic-Tac-Toe's small
//! state space.
//!
//! ## Usage Example
//!
//! ```
//! use oxo::q_learning::{Hyperparameters, QLearningAgent};
//!
//! let agent = QLearningAgent::new(Hyperparameters {
//!     alpha: 0.5,          // learning rate
//!     gamma: 0.99,         // discount factor
//!     epsilon: 0.5,        // initial exploration rate
//!     epsilon_decay: 0.995,
//!     min_epsilon: 0.01,
//! })
//! .unwrap();
//! # let _ = agent;
//! ```

pub mod agent;
pub mod q_table;
pub mod serialization;

pub use agent::{Hyperparameters, QLearningAgent};
pub use q_table::QTable;
pub use serialization::{SavedAgent, TrainingMetadata};
