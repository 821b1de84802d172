//! Tabular Q-learning for Tic-Tac-Toe
//!
//! This crate provides:
//! - Complete Tic-Tac-Toe environment with move validation
//! - Q-learning agent with ε-greedy exploration and TD updates
//! - Episode runner driving agent-vs-opponent games
//! - Training and evaluation pipelines with progress reporting
//! - Agent persistence and an interactive console

pub mod adapters;
pub mod cli;
pub mod episode;
pub mod error;
pub mod game;
pub mod pipeline;
pub mod ports;
pub mod q_learning;

pub use error::{Error, Result};
