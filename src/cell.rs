#[cfg(feature = "serialization")]
use serde::{Serialize, Deserialize};

/// A cell on a Minesweeper field.
///
/// The mine and the number of neighboring mines are fixed when the field is created; only the [state][CellState] changes during a game, and only through the methods of [`Field`][crate::Field]. Cells are `Copy`, so any cell obtained from a field is a snapshot which renderers can hold on to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Cell {
    mine: bool,
    adjacent_mines: u8,
    state: CellState,
}
impl Cell {
    /// The largest possible number of neighboring mines.
    pub const MAX_ADJACENT_MINES: u8 = 8;

    /// Creates a hidden cell. Mined cells always store zero neighboring mines.
    #[inline(always)]
    pub(crate) const fn new(mine: bool, adjacent_mines: u8) -> Self {
        Self {
            mine,
            adjacent_mines: if mine { 0 } else { adjacent_mines },
            state: CellState::Hidden,
        }
    }
    /// Returns `true` if the cell holds a mine, `false` otherwise.
    #[inline(always)]
    pub const fn has_mine(self) -> bool {
        self.mine
    }
    /// Returns the number of mines among the directly and diagonally adjacent cells.
    ///
    /// Always zero for mined cells, since their number is never displayed.
    #[inline(always)]
    pub const fn adjacent_mine_count(self) -> u8 {
        self.adjacent_mines
    }
    /// Returns the current state of the cell.
    #[inline(always)]
    pub const fn state(self) -> CellState {
        self.state
    }
    /// Returns `true` if this cell is in its final state for a won game: flagged if it holds a mine, revealed otherwise.
    #[inline]
    pub const fn is_settled(self) -> bool {
        match self.state {
            CellState::Flagged => self.mine,
            CellState::Revealed => !self.mine,
            _ => false,
        }
    }

    /// Flags a hidden cell or unflags a flagged one. Returns `false` without changing anything if the cell is already opened.
    pub(crate) fn toggle_flag(&mut self) -> bool {
        match self.state {
            CellState::Hidden => self.state = CellState::Flagged,
            CellState::Flagged => self.state = CellState::Hidden,
            CellState::Revealed | CellState::Detonated => return false,
        }
        true
    }
    /// Opens a hidden cell, detonating it if it holds a mine. Returns `false` without changing anything if the cell is not hidden.
    ///
    /// A flagged cell has to be unflagged before it can be revealed.
    pub(crate) fn reveal(&mut self) -> bool {
        if !self.state.is_hidden() {
            return false;
        }
        self.state = if self.mine { CellState::Detonated } else { CellState::Revealed };
        true
    }
    /// Checks the invariants which hold for every cell produced by a field, used when restoring saved cells.
    #[cfg(feature = "serialization")]
    pub(crate) const fn is_consistent(self) -> bool {
        if self.adjacent_mines > Self::MAX_ADJACENT_MINES || (self.mine && self.adjacent_mines != 0) {
            return false;
        }
        match self.state {
            CellState::Revealed => !self.mine,
            CellState::Detonated => self.mine,
            CellState::Hidden | CellState::Flagged => true,
        }
    }
}

/// The state of a cell.
///
/// Cells start out `Hidden`. `Hidden` and `Flagged` can be toggled back and forth any number of times, while `Revealed` and `Detonated` are terminal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, derive_more::IsVariant)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum CellState {
    /// The cell hasn't been opened or marked yet.
    ///
    /// Returned by the `Default` trait implementation.
    #[default]
    Hidden,
    /// The player marked the cell as holding a mine. Flagged cells cannot be revealed.
    Flagged,
    /// The cell was opened and holds no mine.
    Revealed,
    /// The cell was opened and held a mine, losing the game.
    Detonated,
}
impl CellState {
    /// Returns `true` for `Revealed` and `Detonated`, the states which never change again.
    #[inline]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Revealed | Self::Detonated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_hidden() {
        let cell = Cell::new(false, 3);
        assert_eq!(cell.state(), CellState::Hidden);
        assert_eq!(cell.adjacent_mine_count(), 3);
        assert!(!cell.has_mine());
    }

    #[test]
    fn test_mined_cell_drops_adjacent_count() {
        let cell = Cell::new(true, 4);
        assert!(cell.has_mine());
        assert_eq!(cell.adjacent_mine_count(), 0);
    }

    #[test]
    fn test_toggle_flag_round_trip() {
        let mut cell = Cell::new(false, 0);
        assert!(cell.toggle_flag());
        assert_eq!(cell.state(), CellState::Flagged);
        assert!(cell.toggle_flag());
        assert_eq!(cell.state(), CellState::Hidden);
    }

    #[test]
    fn test_toggle_flag_refused_on_open_cells() {
        let mut revealed = Cell::new(false, 1);
        assert!(revealed.reveal());
        assert!(!revealed.toggle_flag());
        assert_eq!(revealed.state(), CellState::Revealed);

        let mut detonated = Cell::new(true, 0);
        assert!(detonated.reveal());
        assert!(!detonated.toggle_flag());
        assert_eq!(detonated.state(), CellState::Detonated);
    }

    #[test]
    fn test_reveal_transitions() {
        let mut safe = Cell::new(false, 2);
        assert!(safe.reveal());
        assert_eq!(safe.state(), CellState::Revealed);
        assert!(!safe.reveal());

        let mut mine = Cell::new(true, 0);
        assert!(mine.reveal());
        assert_eq!(mine.state(), CellState::Detonated);
        assert!(!mine.reveal());
    }

    #[test]
    fn test_flagged_cell_cannot_be_revealed() {
        let mut cell = Cell::new(true, 0);
        cell.toggle_flag();
        assert!(!cell.reveal());
        assert_eq!(cell.state(), CellState::Flagged);
    }

    #[test]
    fn test_is_settled() {
        let mut mine = Cell::new(true, 0);
        assert!(!mine.is_settled());
        mine.toggle_flag();
        assert!(mine.is_settled());

        let mut safe = Cell::new(false, 1);
        assert!(!safe.is_settled());
        safe.toggle_flag();
        assert!(!safe.is_settled());
        safe.toggle_flag();
        safe.reveal();
        assert!(safe.is_settled());
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn test_consistency_checks() {
        assert!(Cell::new(false, 8).is_consistent());
        assert!(!Cell { mine: false, adjacent_mines: 9, state: CellState::Hidden }.is_consistent());
        assert!(!Cell { mine: true, adjacent_mines: 1, state: CellState::Hidden }.is_consistent());
        assert!(!Cell { mine: true, adjacent_mines: 0, state: CellState::Revealed }.is_consistent());
        assert!(!Cell { mine: false, adjacent_mines: 0, state: CellState::Detonated }.is_consistent());
    }
}
