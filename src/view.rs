//! What a renderer shows for a field, derived from the cells and the `show_mines` view parameter.
//!
//! Revealing every mine after a loss is a matter of presentation: the field itself never changes because the game ended. Renderers pass `show_mines` when asking for a view instead.

use core::fmt::{self, Display, Formatter, Write};
#[cfg(feature = "serialization")]
use serde::{Serialize, Deserialize};
use crate::{Cell, CellState, Field};

/// What should be drawn for a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, derive_more::IsVariant)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum CellView {
    /// A closed cell.
    Hidden,
    /// A closed cell with a flag on it.
    Flagged,
    /// An open cell and the number of mines around it, which may be zero.
    Open(u8),
    /// The mine which ended the game.
    Detonated,
    /// A closed mine, shown because mines were requested to be visible.
    Mine,
}
impl Cell {
    /// Returns what a renderer should draw for this cell. With `show_mines`, closed unflagged mines are shown as [`CellView::Mine`].
    #[inline]
    pub const fn view(self, show_mines: bool) -> CellView {
        match self.state() {
            CellState::Hidden if show_mines && self.has_mine() => CellView::Mine,
            CellState::Hidden => CellView::Hidden,
            CellState::Flagged => CellView::Flagged,
            CellState::Revealed => CellView::Open(self.adjacent_mine_count()),
            CellState::Detonated => CellView::Detonated,
        }
    }
}

/// A plain text picture of a field's layout, created by [`Field::dump`].
///
/// Rows are separated by newlines and each cell takes one character: `X` for a mine (only with `show_mines`), the digit of the adjacent mine count when it is nonzero, and a space otherwise.
///
/// # Usage
/// ```
/// # use minefield::Field;
/// # use core::num::NonZeroUsize;
/// #
/// let dimensions = [NonZeroUsize::new(3).unwrap(), NonZeroUsize::new(2).unwrap()];
/// let field = Field::from_mines(dimensions, &[[0, 0]]).unwrap();
/// assert_eq!(field.dump(true).to_string(), "X1 \n11 ");
/// assert_eq!(field.dump(false).to_string(), " 1 \n11 ");
/// ```
#[derive(Copy, Clone, Debug)]
pub struct FieldDump<'f> {
    field: &'f Field,
    show_mines: bool,
}
impl<'f> FieldDump<'f> {
    /// Creates a dump of the specified field.
    #[inline(always)]
    pub const fn new(field: &'f Field, show_mines: bool) -> Self {
        Self {field, show_mines}
    }
    fn symbol(self, cell: Cell) -> char {
        if cell.has_mine() {
            return if self.show_mines { 'X' } else { ' ' };
        }
        match cell.adjacent_mine_count() {
            0 => ' ',
            count => char::from(b'0' + count),
        }
    }
}
impl Display for FieldDump<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (y, row) in self.field.rows().enumerate() {
            if y > 0 {
                f.write_char('\n')?;
            }
            for cell in row {
                f.write_char(self.symbol(cell))?;
            }
        }
        Ok(())
    }
}
