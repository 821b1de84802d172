//! MoveSource port - abstraction for opponent move selection
//!
//! The episode runner requests opponent moves through this port, so the
//! core game/agent logic has no direct dependency on a console device.
//! Adapters include a seedable random opponent, a console-backed human
//! opponent, and a scripted opponent for tests.

use crate::{
    Result,
    game::Board,
};

/// Capability for producing the next opponent move.
///
/// # Contract
///
/// `legal` is the current set of legal cell indices (ascending) and is
/// never empty when the runner calls this method. Implementations must
/// return an element of `legal`; a human-facing adapter resolves invalid
/// input by re-prompting rather than returning an illegal index.
pub trait MoveSource {
    /// Produce the next move for the current board position.
    ///
    /// # Errors
    ///
    /// Returns an error only for unrecoverable conditions (e.g. the input
    /// stream closing); recoverable input mistakes are handled internally.
    fn next_move(&mut self, board: &Board, legal: &[usize]) -> Result<usize>;

    /// Name used in logs and saved-agent metadata
    fn name(&self) -> &str;

    /// Seed the source's internal RNG, if it has one.
    ///
    /// Training pipelines call this when supplied with a deterministic
    /// seed. Stateless sources ignore it.
    fn set_rng_seed(&mut self, _seed: u64) {}
}
