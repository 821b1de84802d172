//! Tic-Tac-Toe game environment
//!
//! Authoritative game rules: board state, move legality, win/draw detection.
//! The environment has no dependency on the learning agent.

pub mod board;
pub mod lines;

pub use board::{Board, BoardKey, Cell, Mark};
pub use lines::WINNING_LINES;
