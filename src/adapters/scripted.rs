//! Scripted opponent for deterministic tests

use crate::{
    Result,
    game::Board,
    ports::MoveSource,
};

/// Opponent that plays a fixed move sequence in order.
///
/// Panics in tests are avoided by returning `NoLegalActions` when the
/// script runs out, which signals a mis-specified fixture.
#[derive(Debug)]
pub struct ScriptedOpponent {
    moves: std::vec::IntoIter<usize>,
}

impl ScriptedOpponent {
    pub fn new(moves: Vec<usize>) -> Self {
        Self {
            moves: moves.into_iter(),
        }
    }
}

impl MoveSource for ScriptedOpponent {
    fn next_move(&mut self, _board: &Board, legal: &[usize]) -> Result<usize> {
        match self.moves.next() {
            Some(pos) if legal.contains(&pos) => Ok(pos),
            Some(pos) => Err(crate::Error::IllegalMove { position: pos }),
            None => Err(crate::Error::NoLegalActions),
        }
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}
