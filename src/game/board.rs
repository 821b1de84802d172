//! Board state representation and game rules
//!
//! The environment is split into two types with distinct roles:
//!
//! - [`Board`] is the mutable working board used during episode simulation.
//!   It owns move legality and win/draw detection.
//! - [`BoardKey`] is an immutable value snapshot used as the Q-table key.
//!   Two keys with identical cell contents compare and hash equal no matter
//!   how the boards were reached, so a stored key can never be silently
//!   invalidated by later mutation of the working board.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use super::lines;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }
}

/// A player mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Get the opposing mark
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Convert mark to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }
}

/// Immutable snapshot of the board cells, usable as a Q-table key.
///
/// Only 9 bytes, so it implements `Copy`. Serializes as its 9-character
/// string encoding (`X`/`O`/`.`), which keeps persisted Q-tables readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardKey([Cell; 9]);

impl BoardKey {
    /// The all-empty board
    pub fn empty() -> Self {
        BoardKey([Cell::Empty; 9])
    }

    /// Cell contents of the snapshot
    pub fn cells(&self) -> &[Cell; 9] {
        &self.0
    }

    /// Encode as a 9-character string
    pub fn encode(&self) -> String {
        self.0.iter().map(|&c| c.to_char()).collect()
    }

    /// Parse from a 9-character string representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not contain exactly 9 characters
    /// or any character is not a valid cell representation.
    pub fn parse(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(BoardKey(cells))
    }
}

impl fmt::Display for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl Serialize for BoardKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for BoardKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        BoardKey::parse(&s).map_err(de::Error::custom)
    }
}

/// Mutable working board owning the authoritative game rules
#[derive(Debug, Clone)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
        }
    }

    /// Restore a working board from a snapshot key
    pub fn from_key(key: BoardKey) -> Self {
        Board {
            cells: *key.cells(),
        }
    }

    /// Clear the board and return the initial state snapshot
    pub fn reset(&mut self) -> BoardKey {
        self.cells = [Cell::Empty; 9];
        self.snapshot()
    }

    /// Take an immutable snapshot for use as a Q-table key
    pub fn snapshot(&self) -> BoardKey {
        BoardKey(self.cells)
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        pos < 9 && self.cells[pos] == Cell::Empty
    }

    /// Indices of empty cells, in ascending order
    pub fn available_actions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Count of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Apply a move for `mark`, returning whether the move won the game.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IllegalMove`] if the target cell is occupied
    /// or the index is out of range.
    pub fn apply_move(&mut self, pos: usize, mark: Mark) -> Result<bool, crate::Error> {
        if !self.is_empty(pos) {
            return Err(crate::Error::IllegalMove { position: pos });
        }

        self.cells[pos] = mark.to_cell();

        // Fast path: only lines through the played cell can complete here.
        let won = lines::won_through(&self.cells, pos, mark);
        debug_assert_eq!(won, lines::has_won(&self.cells, mark));
        Ok(won)
    }

    /// Check if a mark has won (full 8-line check)
    pub fn is_win(&self, mark: Mark) -> bool {
        lines::has_won(&self.cells, mark)
    }

    /// Check if no empty cell remains
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Check if the game is over (win for either mark, or full board)
    pub fn is_terminal(&self) -> bool {
        self.is_win(Mark::X) || self.is_win(Mark::O) || self.is_full()
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Mark> {
        if self.is_win(Mark::X) {
            Some(Mark::X)
        } else if self.is_win(Mark::O) {
            Some(Mark::O)
        } else {
            None
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                write!(f, "{}", self.cells[row * 3 + col].to_char())?;
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
