//! Winning line analysis for Tic-Tac-Toe

use super::{Cell, Mark};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Check if a mark has won by having three in a row.
///
/// This is the ground-truth check over all 8 canonical lines.
pub fn has_won(cells: &[Cell; 9], mark: Mark) -> bool {
    let target = mark.to_cell();
    WINNING_LINES
        .iter()
        .any(|line| line.iter().all(|&idx| cells[idx] == target))
}

/// Check whether the line(s) passing through `pos` are completed by `mark`.
///
/// Fast path for move application: only lines containing the most recent
/// move can have been completed by it, so the outcome always matches
/// [`has_won`].
pub fn won_through(cells: &[Cell; 9], pos: usize, mark: Mark) -> bool {
    let target = mark.to_cell();
    WINNING_LINES
        .iter()
        .filter(|line| line.contains(&pos))
        .any(|line| line.iter().all(|&idx| cells[idx] == target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_won_horizontal() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::X;
        cells[1] = Cell::X;
        cells[2] = Cell::X;

        assert!(has_won(&cells, Mark::X));
        assert!(!has_won(&cells, Mark::O));
    }

    #[test]
    fn test_has_won_vertical() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::O;
        cells[3] = Cell::O;
        cells[6] = Cell::O;

        assert!(has_won(&cells, Mark::O));
        assert!(!has_won(&cells, Mark::X));
    }

    #[test]
    fn test_has_won_diagonal() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::X;
        cells[4] = Cell::X;
        cells[8] = Cell::X;

        assert!(has_won(&cells, Mark::X));
        assert!(!has_won(&cells, Mark::O));
    }

    #[test]
    fn test_won_through_matches_full_check() {
        // Exhaustive over all single-mark placements on a row-winning board
        let mut cells = [Cell::Empty; 9];
        cells[3] = Cell::X;
        cells[4] = Cell::X;
        cells[5] = Cell::X;

        for pos in [3, 4, 5] {
            assert!(won_through(&cells, pos, Mark::X));
        }
        // Positions off the winning line do not report a win through them
        assert!(!won_through(&cells, 0, Mark::X));
        assert!(has_won(&cells, Mark::X));
    }

    #[test]
    fn test_no_win_on_mixed_line() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::X;
        cells[1] = Cell::O;
        cells[2] = Cell::X;

        assert!(!has_won(&cells, Mark::X));
        assert!(!won_through(&cells, 2, Mark::X));
    }
}
