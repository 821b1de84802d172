//! Ports (trait boundaries) for external dependencies.
//!
//! These traits are owned by the domain and implemented by adapters, so the
//! episode runner and pipeline never depend on a concrete opponent or
//! output device.

pub mod move_source;
pub mod observer;

pub use move_source::MoveSource;
pub use observer::Observer;
