//! Iterators useful for traversing a field.
//!
//! Currently available:
//! - [`RowIter`] — iterates over the cells of a single field row
//! - [`FieldRowsIter`] — iterates over the rows of a field (each item is a [`RowIter`])
//! - [`Neighbors`] — iterates over the coordinates of the Moore neighborhood of a cell

use core::{
    ops::{Range, Index},
    iter::FusedIterator,
};
use crate::{
    Cell, Field,
    FieldCoordinates, FieldDimensions,
};

/// Iterates over a single field row.
///
/// Can also be indexed to pull arbitrary cells from the row, regardless of the iterator state.
///
/// # Usage
/// ```
/// # use minefield::{Field, RowIter};
/// # use core::num::NonZeroUsize;
/// #
/// let dimensions = [NonZeroUsize::new(9).unwrap(), NonZeroUsize::new(4).unwrap()];
/// let field = Field::from_mines(dimensions, &[[8, 3]]).unwrap(); // Place a mine (remember that indices start from 0)
/// let mut rowiter = field.row(3); // Create an iterator over the fourth row
/// let mine_cell = rowiter.nth(8) // Find the ninth element in the row
///     .unwrap();
/// assert!(mine_cell.has_mine());
/// assert_eq!(field.row(3)[7].adjacent_mine_count(), 1);
/// ```
#[derive(Clone)]
pub struct RowIter<'f> {
    field: &'f Field,
    row: usize,
    index: Range<usize>,
}
impl<'f> RowIter<'f> {
    /// Creates an iterator over the specified row of the specified field.
    ///
    /// # Panics
    /// Panics if the row is out of range.
    #[inline]
    #[track_caller]
    pub fn new(field: &'f Field, row: usize) -> Self {
        assert!(row < field.height(), "row {} out of range for a field with {} rows", row, field.height());
        Self {field, row, index: 0..field.width()}
    }
    /// Returns the cell at the specified column, or `None` if such a column doesn't exist. The row for which the iterator was created is used.
    #[inline]
    pub fn get(&self, column: usize) -> Option<Cell> {
        self.field.get([column, self.row]).copied()
    }
    /// Returns the row index which the iterator was created for.
    #[inline(always)]
    pub const fn row(&self) -> usize {
        self.row
    }
    /// Returns the field which the iterator iterates over.
    #[inline(always)]
    pub const fn field(&self) -> &'f Field {
        self.field
    }
}
impl Iterator for RowIter<'_> {
    type Item = Cell;
    fn next(&mut self) -> Option<Self::Item> {
        let column = self.index.next()?;
        self.get(column)
    }
    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}
impl DoubleEndedIterator for RowIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let column = self.index.next_back()?;
        self.get(column)
    }
}
impl ExactSizeIterator for RowIter<'_> {
    /// Returns the remaining amount of cells to iterate upon.
    #[inline(always)]
    fn len(&self) -> usize {
        self.index.len()
    }
}
impl FusedIterator for RowIter<'_> {}
impl Index<usize> for RowIter<'_> {
    type Output = Cell;
    /// Returns the cell at the specified column.
    ///
    /// # Panics
    /// Panics if the column is out of range.
    #[inline]
    #[track_caller]
    fn index(&self, column: usize) -> &Cell {
        &self.field[[column, self.row]]
    }
}

/// An iterator over the rows of a field, top to bottom.
///
/// # Usage
/// ```
/// # use minefield::{Field, FieldRowsIter};
/// # use core::num::NonZeroUsize;
/// #
/// let dimensions = [NonZeroUsize::new(9).unwrap(), NonZeroUsize::new(4).unwrap()];
/// let field = Field::from_mines(dimensions, &[[8, 3]]).unwrap();
/// let mut row_with_mine: Option<usize> = None;
/// for (y, mut row) in field.rows().enumerate() {
///     if row.any(|cell| cell.has_mine()) {
///         row_with_mine = Some(y);
///     }
/// }
/// assert_eq!(row_with_mine, Some(3));
/// ```
#[derive(Clone)]
pub struct FieldRowsIter<'f> {
    field: &'f Field,
    index: Range<usize>,
}
impl<'f> FieldRowsIter<'f> {
    /// Returns an iterator over the specified field's rows.
    #[inline(always)]
    pub fn new(field: &'f Field) -> Self {
        Self {field, index: 0..field.height()}
    }
}
impl<'f> Iterator for FieldRowsIter<'f> {
    type Item = RowIter<'f>;
    fn next(&mut self) -> Option<Self::Item> {
        self.index.next().map(|y| self.field.row(y))
    }
    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}
impl DoubleEndedIterator for FieldRowsIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.index.next_back().map(|y| self.field.row(y))
    }
}
impl ExactSizeIterator for FieldRowsIter<'_> {
    #[inline(always)]
    fn len(&self) -> usize {
        self.index.len()
    }
}
impl FusedIterator for FieldRowsIter<'_> {}

/// Offsets of the Moore neighborhood in clockwise order, starting from top-left: ↖, ↑, ↗, →, ↘, ↓, ↙, ←.
const NEIGHBOR_OFFSETS: [[isize; 2]; 8] = [
    [-1, -1], [0, -1], [1, -1],
    [1, 0],
    [1, 1], [0, 1], [-1, 1],
    [-1, 0],
];

/// Iterates over the coordinates of the up to 8 cells directly or diagonally adjacent to a cell.
///
/// Offsets which would leave the field are skipped, so corner cells have 3 neighbors and edge cells have 5.
///
/// # Usage
/// ```
/// # use minefield::Neighbors;
/// # use core::num::NonZeroUsize;
/// #
/// let dimensions = [NonZeroUsize::new(3).unwrap(), NonZeroUsize::new(3).unwrap()];
/// let corner: Vec<_> = Neighbors::new(dimensions, [0, 0]).collect();
/// assert_eq!(corner, vec![[1, 0], [1, 1], [0, 1]]);
/// assert_eq!(Neighbors::new(dimensions, [1, 1]).count(), 8);
/// ```
#[derive(Clone, Debug)]
pub struct Neighbors {
    center: FieldCoordinates,
    bounds: [usize; 2],
    offsets: core::slice::Iter<'static, [isize; 2]>,
}
impl Neighbors {
    /// Creates an iterator over the neighbors of `center` on a field with the given dimensions.
    #[inline]
    pub fn new(dimensions: FieldDimensions, center: FieldCoordinates) -> Self {
        Self {
            center,
            bounds: [dimensions[0].get(), dimensions[1].get()],
            offsets: NEIGHBOR_OFFSETS.iter(),
        }
    }
    fn shift(&self, offset: [isize; 2]) -> Option<FieldCoordinates> {
        let x = self.center[0].checked_add_signed(offset[0])?;
        let y = self.center[1].checked_add_signed(offset[1])?;
        (x < self.bounds[0] && y < self.bounds[1]).then_some([x, y])
    }
}
impl Iterator for Neighbors {
    type Item = FieldCoordinates;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let offset = *self.offsets.next()?;
            if let Some(location) = self.shift(offset) {
                return Some(location);
            }
        }
    }
    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.offsets.len()))
    }
}
impl FusedIterator for Neighbors {}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::num::NonZeroUsize;

    use super::*;

    fn dims(width: usize, height: usize) -> FieldDimensions {
        [NonZeroUsize::new(width).unwrap(), NonZeroUsize::new(height).unwrap()]
    }

    #[test]
    fn test_neighbors_are_clipped_at_edges() {
        let dimensions = dims(4, 3);
        assert_eq!(Neighbors::new(dimensions, [0, 0]).count(), 3);
        assert_eq!(Neighbors::new(dimensions, [3, 2]).count(), 3);
        assert_eq!(Neighbors::new(dimensions, [1, 0]).count(), 5);
        assert_eq!(Neighbors::new(dimensions, [1, 1]).count(), 8);
    }

    #[test]
    fn test_neighbors_on_single_cell_field() {
        assert_eq!(Neighbors::new(dims(1, 1), [0, 0]).next(), None);
    }

    #[test]
    fn test_neighbors_order_is_clockwise() {
        let around: Vec<_> = Neighbors::new(dims(3, 3), [1, 1]).collect();
        assert_eq!(around, [[0, 0], [1, 0], [2, 0], [2, 1], [2, 2], [1, 2], [0, 2], [0, 1]]);
    }

    #[test]
    fn test_rows_iterate_in_order() {
        let field = Field::from_mines(dims(3, 2), &[[2, 1]]).unwrap();
        let mines: Vec<Vec<bool>> = field.rows()
            .map(|row| row.map(Cell::has_mine).collect())
            .collect();
        assert_eq!(mines, [[false, false, false], [false, false, true]]);

        let mut rows = field.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.next_back().map(|row| row.row()), Some(1));
        assert_eq!(field.row(0).rev().count(), 3);
    }
}
