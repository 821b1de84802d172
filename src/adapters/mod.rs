//! Adapters implementing domain ports.
//!
//! Infrastructure implementations of the traits defined in the ports
//! module: opponents backed by a random source, the console, or a fixed
//! test script.

pub mod console;
pub mod random;
pub mod scripted;

pub use console::ConsoleInput;
pub use random::RandomOpponent;
pub use scripted::ScriptedOpponent;
