//! The playfield of a Minesweeper game.
//!
//! This is the main point of interest for the crate: mine placement, flagging, cascading reveal and the win condition all live here. For that reason, this module is the most detailed one.

use core::{
    ops::Index,
    num::NonZeroUsize,
};
#[cfg(feature = "serialization")]
use core::fmt::{self, Formatter};
use alloc::vec::Vec;
#[cfg(feature = "serialization")]
use serde::{
    Serialize, Deserialize,
    ser::{Serializer, SerializeStruct},
    de::{self, Deserializer, Visitor, MapAccess, SeqAccess},
};
use crate::{
    Cell, CellState, FieldError,
    Neighbors, RowIter, FieldRowsIter,
    FieldDump,
};

/// Represents a playfield.
///
/// Fields in Minesweeper are matrices of [cells][Cell], some of which hold mines. A field is created once per game with all of its mines already placed, and is then driven by the implementation calling [`reveal`][Field::reveal] and [`toggle_flag`][Field::toggle_flag] when the player clicks a cell. The game is lost as soon as `reveal` reports a [detonation][RevealOutcome::Detonated], and won once [`is_cleared`][Field::is_cleared] returns `true`.
///
/// The field never renders anything or keeps track of time; after each call, the implementation reads the cells back (by [indexing][Index], through [`rows`][Field::rows] or with [`dump`][Field::dump]) and redraws whatever it needs to.
///
/// Starting a new game means creating a new field: there is no way to reset one in place, since mines have to be placed anew.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    dimensions: FieldDimensions,
    storage: Vec<Cell>,
    mine_count: usize,
    mines_remaining: usize,
}
/// The dimensions of a field.
///
/// The first element specifies the width (the number of columns), while the second one specifies the height (number of rows). As required by `NonZeroUsize`, a field cannot be smaller than 1x1.
pub type FieldDimensions = [NonZeroUsize; 2];
/// The coordinates of a cell on a field.
///
/// The first element specifies the column index (X coordinate), while the second one specifies the row index (Y coordinate). The coordinate system starts from zero, i.e. the coordinates `[0, 0]` correspond to the top left corner and the only cell of a 1x1 field.
pub type FieldCoordinates = [usize; 2];

/// The outcome of [revealing][Field::reveal] a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, derive_more::IsVariant)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum RevealOutcome {
    /// Nothing happened, because the cell was flagged or already open.
    Ignored,
    /// One or more safe cells were opened. More than one cell is opened when the cell has no neighboring mines, starting a cascade.
    Opened(NonZeroUsize),
    /// The cell held a mine, which went off. The game is lost.
    Detonated,
}

impl Field {
    /// Creates a field with the specified dimensions and the specified number of randomly placed mines, using the thread-local random number generator.
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidConfiguration`] if there are more mines than cells.
    #[cfg(all(feature = "generation", feature = "std"))]
    pub fn new(dimensions: FieldDimensions, mine_count: usize) -> Result<Self, FieldError> {
        Self::with_rng(dimensions, mine_count, &mut rand::rng())
    }
    /// Creates a field with the specified dimensions and the specified number of mines, placed using the specified random number generator.
    ///
    /// Mine locations are drawn uniformly without replacement, so no two mines ever share a cell. Seeded generators produce reproducible fields.
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidConfiguration`] if there are more mines than cells.
    #[cfg(feature = "generation")]
    pub fn with_rng<R>(dimensions: FieldDimensions, mine_count: usize, rng: &mut R) -> Result<Self, FieldError>
    where R: rand::Rng + ?Sized {
        let area = check_mine_count(dimensions, mine_count)?;
        let mut layout = alloc::vec![false; area];
        for index in rand::seq::index::sample(rng, area, mine_count) {
            layout[index] = true;
        }
        let field = Self::from_layout(dimensions, &layout);
        log::debug!(
            "placed {} mines on a {}x{} field",
            field.mine_count, dimensions[0], dimensions[1],
        );
        Ok(field)
    }
    /// Creates a field with mines at exactly the specified locations.
    ///
    /// This is mostly useful for tutorials, replays and tests, where the layout must not be random.
    ///
    /// # Errors
    /// Returns [`FieldError::OutOfBounds`] if a location lies outside the field, or [`FieldError::InvalidConfiguration`] if a location is listed more than once.
    pub fn from_mines(dimensions: FieldDimensions, mines: &[FieldCoordinates]) -> Result<Self, FieldError> {
        let area = check_mine_count(dimensions, mines.len())?;
        let mut layout = alloc::vec![false; area];
        for &location in mines {
            let index = checked_index(dimensions, location)?;
            if layout[index] {
                return Err(invalid_configuration(dimensions, mines.len()));
            }
            layout[index] = true;
        }
        Ok(Self::from_layout(dimensions, &layout))
    }
    /// Builds hidden cells from a row-major mine layout and computes the adjacency counts.
    fn from_layout(dimensions: FieldDimensions, layout: &[bool]) -> Self {
        let width = dimensions[0].get();
        let storage: Vec<Cell> = layout.iter()
            .enumerate()
            .map(|(index, &mine)| {
                let location = [index % width, index / width];
                Cell::new(mine, count_mines_around(dimensions, layout, location))
            })
            .collect();
        let mine_count = layout.iter().filter(|&&mine| mine).count();
        Self {dimensions, storage, mine_count, mines_remaining: mine_count}
    }

    /// Returns the width and height of the field.
    #[inline(always)]
    pub const fn dimensions(&self) -> FieldDimensions {
        self.dimensions
    }
    /// Returns the number of columns.
    #[inline(always)]
    pub const fn width(&self) -> usize {
        self.dimensions[0].get()
    }
    /// Returns the number of rows.
    #[inline(always)]
    pub const fn height(&self) -> usize {
        self.dimensions[1].get()
    }
    /// Returns the total number of cells.
    #[inline(always)]
    pub fn area(&self) -> usize {
        self.storage.len()
    }
    /// Returns the number of mines on the field. This never changes during the lifetime of the field.
    #[inline(always)]
    pub const fn mine_count(&self) -> usize {
        self.mine_count
    }
    /// Returns the number of flags the player may still place: the number of mines minus the number of flagged cells.
    ///
    /// This is what the mine counter of a Minesweeper implementation displays. It says nothing about whether the flags are placed correctly.
    #[inline(always)]
    pub const fn mines_remaining(&self) -> usize {
        self.mines_remaining
    }

    /// Returns the cell at the specified coordinates, or `None` if they are out of bounds.
    #[inline]
    pub fn get(&self, coordinates: FieldCoordinates) -> Option<&Cell> {
        let index = checked_index(self.dimensions, coordinates).ok()?;
        self.storage.get(index)
    }
    /// Returns an iterator over the coordinates of the cells adjacent to the specified one, including diagonally adjacent ones.
    #[inline]
    pub fn neighbors(&self, coordinates: FieldCoordinates) -> Neighbors {
        Neighbors::new(self.dimensions, coordinates)
    }
    /// Counts all mines around a location.
    ///
    /// All directly and diagonally adjacent mines are considered neighboring. If the location itself holds a mine, it isn't counted.
    pub fn count_neighboring_mines(&self, coordinates: FieldCoordinates) -> u8 {
        let mut count = 0_u8;
        for location in self.neighbors(coordinates) {
            if self[location].has_mine() {count += 1};
        }
        count
    }

    /// Flags the specified cell if it is hidden, or unflags it if it is flagged. Returns `true` if the state of the cell changed.
    ///
    /// Every flag placed takes one from [`mines_remaining`][Field::mines_remaining] and every flag removed gives one back. Flagging is refused once no mines remain, so there can never be more flags than mines. Open cells cannot be flagged.
    ///
    /// # Errors
    /// Returns [`FieldError::OutOfBounds`] if the coordinates lie outside the field.
    pub fn toggle_flag(&mut self, coordinates: FieldCoordinates) -> Result<bool, FieldError> {
        let index = checked_index(self.dimensions, coordinates)?;
        let cell = &mut self.storage[index];
        if cell.state().is_hidden() && self.mines_remaining == 0 {
            return Ok(false); // Out of flags.
        }
        if !cell.toggle_flag() {
            return Ok(false);
        }
        if cell.state().is_flagged() {
            self.mines_remaining -= 1;
        } else {
            self.mines_remaining += 1;
        }
        Ok(true)
    }
    /// Opens the specified cell and returns the outcome.
    ///
    /// If the cell holds a mine, only that cell changes and [`RevealOutcome::Detonated`] is returned; ending the game is up to the caller. If the opened cell has no neighboring mines, all of its hidden neighbors are opened as well, and so on for every neighbor which has no neighboring mines either, until the whole clearing and its numbered border are open. Flagged cells are never opened by this cascade, which also means a flag stops the cascade from spreading past it.
    ///
    /// Flagged and open cells are left alone and produce [`RevealOutcome::Ignored`].
    ///
    /// # Errors
    /// Returns [`FieldError::OutOfBounds`] if the coordinates lie outside the field.
    pub fn reveal(&mut self, coordinates: FieldCoordinates) -> Result<RevealOutcome, FieldError> {
        let index = checked_index(self.dimensions, coordinates)?;
        let cell = &mut self.storage[index];
        if !cell.reveal() {
            return Ok(RevealOutcome::Ignored);
        }
        if cell.state().is_detonated() {
            log::debug!("mine at {:?} detonated", coordinates);
            return Ok(RevealOutcome::Detonated);
        }
        let mut opened = 1_usize;
        if cell.adjacent_mine_count() == 0 {
            opened += self.open_clearing(coordinates);
            log::trace!("cascade from {:?} opened {} cells", coordinates, opened);
        }
        Ok(RevealOutcome::Opened(NonZeroUsize::MIN.saturating_add(opened - 1)))
    }
    /// Opens every hidden cell reachable from an already revealed cell without neighboring mines, returning how many were opened.
    ///
    /// Cells only ever leave the `Hidden` state, so each of them is pushed onto the work list at most once.
    fn open_clearing(&mut self, anchor_location: FieldCoordinates) -> usize {
        let mut opened = 0_usize;
        let mut stack = Vec::<FieldCoordinates>::with_capacity(16);
        stack.push(anchor_location);
        while let Some(location) = stack.pop() {
            for neighbor in self.neighbors(location) {
                let index = self.index_unchecked(neighbor);
                let cell = &mut self.storage[index];
                // Flagged and already open cells fail to reveal and are skipped.
                if !cell.reveal() {
                    continue;
                }
                debug_assert!(cell.state().is_revealed(), "a clearing cannot border a mine");
                opened += 1;
                if cell.adjacent_mine_count() == 0 {
                    stack.push(neighbor);
                }
            }
        }
        opened
    }

    /// Returns `true` if the field is fully solved (game win condition), `false` otherwise.
    ///
    /// A field is solved when every mine is flagged and every other cell is revealed.
    #[must_use = "traversing the entire field is expensive"]
    pub fn is_cleared(&self) -> bool {
        self.storage.iter().all(|cell| cell.is_settled())
    }
    /// Returns the amount of cells which have been revealed, not counting a detonated mine.
    #[must_use = "traversing the entire field is expensive"]
    pub fn count_revealed(&self) -> usize {
        self.count_in_state(CellState::Revealed)
    }
    /// Returns the amount of cells currently flagged.
    #[inline(always)]
    pub const fn count_flagged(&self) -> usize {
        self.mine_count - self.mines_remaining
    }
    /// Returns the amount of safe cells which the player still needs to reveal in order to win the game.
    #[must_use = "traversing the entire field is expensive"]
    pub fn safe_cells_left(&self) -> usize {
        self.area() - self.mine_count - self.count_revealed()
    }
    fn count_in_state(&self, state: CellState) -> usize {
        self.storage.iter().filter(|cell| cell.state() == state).count()
    }

    /// Returns an iterator over a single row.
    ///
    /// Said iterator can then also be indexed, thus serving as a versatile reference to a specific row.
    ///
    /// # Panics
    /// Panics if the specified row is out of range.
    #[inline]
    #[track_caller]
    pub fn row(&self, row: usize) -> RowIter<'_> {
        RowIter::new(self, row)
    }
    /// Returns an iterator over the field's rows, top to bottom.
    #[inline(always)]
    pub fn rows(&self) -> FieldRowsIter<'_> {
        FieldRowsIter::new(self)
    }
    /// Returns a plain text picture of the field's layout, one line per row and one character per cell: the adjacent mine count for cells which have neighboring mines, `X` for mines if `show_mines` is set, and a space otherwise.
    ///
    /// The layout is drawn regardless of which cells have been opened, which makes it suitable for debugging and for the final picture after a loss.
    #[inline(always)]
    pub const fn dump(&self, show_mines: bool) -> FieldDump<'_> {
        FieldDump::new(self, show_mines)
    }

    #[inline(always)]
    fn index_unchecked(&self, coordinates: FieldCoordinates) -> usize {
        coordinates[0] + coordinates[1] * self.width()
    }
}
impl Index<FieldCoordinates> for Field {
    type Output = Cell;
    /// Returns the cell at the column `index[0]` and row `index[1]`, both starting at zero.
    ///
    /// # Panics
    /// Index checking is enabled for this method. For a version which returns an `Option` instead of panicking if the index is out of bounds, see `get`.
    #[inline]
    #[track_caller]
    fn index(&self, coordinates: FieldCoordinates) -> &Self::Output {
        match self.get(coordinates) {
            Some(cell) => cell,
            None => panic!("coordinates {:?} out of bounds", coordinates),
        }
    }
}

fn invalid_configuration(dimensions: FieldDimensions, mines: usize) -> FieldError {
    FieldError::InvalidConfiguration {
        width: dimensions[0].get(),
        height: dimensions[1].get(),
        mines,
    }
}
/// Returns the area of the field if the mines fit on it.
fn check_mine_count(dimensions: FieldDimensions, mines: usize) -> Result<usize, FieldError> {
    let area = dimensions[0].get().checked_mul(dimensions[1].get())
        .ok_or_else(|| invalid_configuration(dimensions, mines))?;
    if mines > area {
        return Err(invalid_configuration(dimensions, mines));
    }
    Ok(area)
}
fn checked_index(dimensions: FieldDimensions, coordinates: FieldCoordinates) -> Result<usize, FieldError> {
    let (width, height) = (dimensions[0].get(), dimensions[1].get());
    let [x, y] = coordinates;
    if x >= width || y >= height {
        return Err(FieldError::OutOfBounds {coordinates, dimensions});
    }
    Ok(x + y * width)
}
/// Counts the mines around a location of a row-major layout. Mined locations count as zero.
fn count_mines_around(dimensions: FieldDimensions, layout: &[bool], location: FieldCoordinates) -> u8 {
    let width = dimensions[0].get();
    if layout[location[0] + location[1] * width] {
        return 0;
    }
    let mut count = 0_u8;
    for [x, y] in Neighbors::new(dimensions, location) {
        if layout[x + y * width] {count += 1};
    }
    count
}

/// Reasons a saved field can be rejected when restoring it.
#[cfg(feature = "serialization")]
#[derive(Debug, derive_more::Display)]
enum RestoreError {
    #[display("expected {expected} cells for the field dimensions, found {found}")]
    CellCount { expected: usize, found: usize },
    #[display("cell {coordinates:?} is in an impossible state")]
    InconsistentCell { coordinates: FieldCoordinates },
    #[display("cell {coordinates:?} stores {stored} adjacent mines, but {actual} are adjacent")]
    AdjacencyMismatch { coordinates: FieldCoordinates, stored: u8, actual: u8 },
    #[display("{mines_remaining} mines remaining does not match {mines} mines with {flags} flags")]
    FlagBudget { mines_remaining: usize, mines: usize, flags: usize },
}
#[cfg(feature = "serialization")]
impl Field {
    /// Rebuilds a field from saved parts, checking that they describe a field this crate could have produced.
    fn restore(dimensions: FieldDimensions, storage: Vec<Cell>, mines_remaining: usize) -> Result<Self, RestoreError> {
        let expected = dimensions[0].get().saturating_mul(dimensions[1].get());
        if storage.len() != expected {
            return Err(RestoreError::CellCount {expected, found: storage.len()});
        }
        let layout: Vec<bool> = storage.iter().map(|cell| cell.has_mine()).collect();
        let width = dimensions[0].get();
        for (index, cell) in storage.iter().enumerate() {
            let coordinates = [index % width, index / width];
            if !cell.is_consistent() {
                return Err(RestoreError::InconsistentCell {coordinates});
            }
            let actual = count_mines_around(dimensions, &layout, coordinates);
            if cell.adjacent_mine_count() != actual {
                return Err(RestoreError::AdjacencyMismatch {coordinates, stored: cell.adjacent_mine_count(), actual});
            }
        }
        let mines = layout.iter().filter(|&&mine| mine).count();
        let flags = storage.iter().filter(|cell| cell.state().is_flagged()).count();
        if flags > mines || mines - flags != mines_remaining {
            return Err(RestoreError::FlagBudget {mines_remaining, mines, flags});
        }
        log::debug!("restored a {}x{} field with {} mines", dimensions[0], dimensions[1], mines);
        Ok(Self {dimensions, storage, mine_count: mines, mines_remaining})
    }
}
#[cfg(feature = "serialization")]
impl Serialize for Field {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut s = s.serialize_struct("Field", 3)?;
        s.serialize_field("dimensions", &self.dimensions)?;
        s.serialize_field("cells", &self.storage)?;
        s.serialize_field("mines_remaining", &self.mines_remaining)?;
        s.end()
    }
}
#[cfg(feature = "serialization")]
impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        const FIELDS: &[&str] = &["dimensions", "cells", "mines_remaining"];
        #[derive(Deserialize)]
        #[serde(field_identifier, rename_all = "snake_case")]
        enum StructField { Dimensions, Cells, MinesRemaining }

        struct FieldVisitor;
        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = Field;

            fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                formatter.write_str("struct Field")
            }

            fn visit_seq<V: SeqAccess<'de>>(self, mut seq: V) -> Result<Self::Value, V::Error> {
                let dimensions = seq.next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let cells = seq.next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let mines_remaining = seq.next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                Field::restore(dimensions, cells, mines_remaining).map_err(de::Error::custom)
            }

            fn visit_map<V: MapAccess<'de>>(self, mut map: V) -> Result<Self::Value, V::Error> {
                let mut dimensions: Option<FieldDimensions> = None;
                let mut cells: Option<Vec<Cell>> = None;
                let mut mines_remaining: Option<usize> = None;
                while let Some(key) = map.next_key()? {
                    match key {
                        StructField::Dimensions => {
                            if dimensions.is_some() {
                                return Err(de::Error::duplicate_field("dimensions"));
                            }
                            dimensions = Some(map.next_value()?);
                        }
                        StructField::Cells => {
                            if cells.is_some() {
                                return Err(de::Error::duplicate_field("cells"));
                            }
                            cells = Some(map.next_value()?);
                        }
                        StructField::MinesRemaining => {
                            if mines_remaining.is_some() {
                                return Err(de::Error::duplicate_field("mines_remaining"));
                            }
                            mines_remaining = Some(map.next_value()?);
                        }
                    }
                }
                let dimensions = dimensions.ok_or_else(|| de::Error::missing_field("dimensions"))?;
                let cells = cells.ok_or_else(|| de::Error::missing_field("cells"))?;
                let mines_remaining = mines_remaining.ok_or_else(|| de::Error::missing_field("mines_remaining"))?;
                Field::restore(dimensions, cells, mines_remaining).map_err(de::Error::custom)
            }
        }
        d.deserialize_struct("Field", FIELDS, FieldVisitor)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use proptest::prelude::*;
    #[cfg(feature = "generation")]
    use rand::SeedableRng;
    #[cfg(feature = "generation")]
    use rand_pcg::Pcg32;

    use super::*;

    fn dims(width: usize, height: usize) -> FieldDimensions {
        [NonZeroUsize::new(width).unwrap(), NonZeroUsize::new(height).unwrap()]
    }

    fn opened(cells: usize) -> RevealOutcome {
        RevealOutcome::Opened(NonZeroUsize::new(cells).unwrap())
    }

    fn states(field: &Field) -> Vec<CellState> {
        field.rows().flatten().map(Cell::state).collect()
    }

    /// Counts mined neighbors by scanning every cell of the field.
    #[cfg(feature = "generation")]
    fn brute_force_count(field: &Field, [x, y]: FieldCoordinates) -> u8 {
        let mut count = 0;
        for ny in 0..field.height() {
            for nx in 0..field.width() {
                let (dx, dy) = (nx.abs_diff(x), ny.abs_diff(y));
                if (dx, dy) != (0, 0) && dx <= 1 && dy <= 1 && field[[nx, ny]].has_mine() {
                    count += 1;
                }
            }
        }
        count
    }

    #[cfg(feature = "generation")]
    #[test]
    fn test_too_many_mines_is_rejected() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(
            Field::with_rng(dims(2, 2), 5, &mut rng),
            Err(FieldError::InvalidConfiguration {width: 2, height: 2, mines: 5})
        );
    }

    #[cfg(feature = "generation")]
    #[test]
    fn test_full_and_empty_fields() {
        let mut rng = Pcg32::seed_from_u64(1);
        let full = Field::with_rng(dims(3, 2), 6, &mut rng).unwrap();
        assert!(full.rows().flatten().all(Cell::has_mine));
        assert!(full.rows().flatten().all(|cell| cell.adjacent_mine_count() == 0));

        let empty = Field::with_rng(dims(3, 2), 0, &mut rng).unwrap();
        assert_eq!(empty.mine_count(), 0);
        assert_eq!(empty.mines_remaining(), 0);
        assert!(!empty.rows().flatten().any(Cell::has_mine));
    }

    #[cfg(feature = "generation")]
    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = Field::with_rng(dims(16, 16), 40, &mut Pcg32::seed_from_u64(42)).unwrap();
        let b = Field::with_rng(dims(16, 16), 40, &mut Pcg32::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_adjacency_on_small_board() {
        let field = Field::from_mines(dims(3, 3), &[[1, 1]]).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                let expected = if [x, y] == [1, 1] { 0 } else { 1 };
                assert_eq!(field[[x, y]].adjacent_mine_count(), expected, "at {:?}", [x, y]);
            }
        }
        let corner = Field::from_mines(dims(3, 3), &[[0, 0], [2, 2]]).unwrap();
        assert_eq!(corner[[1, 1]].adjacent_mine_count(), 2);
        assert_eq!(corner[[2, 0]].adjacent_mine_count(), 0);
        assert_eq!(corner.count_neighboring_mines([1, 0]), 1);
    }

    #[test]
    fn test_from_mines_validation() {
        assert!(matches!(
            Field::from_mines(dims(2, 2), &[[2, 0]]),
            Err(FieldError::OutOfBounds {coordinates: [2, 0], ..})
        ));
        assert!(Field::from_mines(dims(2, 2), &[[1, 1], [1, 1]]).unwrap_err().is_invalid_configuration());
    }

    #[test]
    fn test_out_of_bounds_operations() {
        let mut field = Field::from_mines(dims(2, 2), &[[0, 0]]).unwrap();
        assert!(field.reveal([0, 2]).unwrap_err().is_out_of_bounds());
        assert!(field.toggle_flag([5, 0]).unwrap_err().is_out_of_bounds());
        assert_eq!(field.get([2, 1]), None);
        assert!(states(&field).iter().all(|state| state.is_hidden()));
    }

    #[test]
    fn test_toggle_flag_is_its_own_inverse() {
        let mut field = Field::from_mines(dims(3, 1), &[[0, 0]]).unwrap();
        assert!(field.toggle_flag([2, 0]).unwrap());
        assert_eq!(field.mines_remaining(), 0);
        assert_eq!(field.count_flagged(), 1);
        assert!(field.toggle_flag([2, 0]).unwrap());
        assert_eq!(field[[2, 0]].state(), CellState::Hidden);
        assert_eq!(field.mines_remaining(), 1);
    }

    #[test]
    fn test_flag_budget_is_enforced() {
        let mut field = Field::from_mines(dims(3, 1), &[[0, 0]]).unwrap();
        // The flag is misplaced, but it still uses up the budget.
        assert!(field.toggle_flag([2, 0]).unwrap());
        assert!(!field.toggle_flag([0, 0]).unwrap());
        assert_eq!(field[[0, 0]].state(), CellState::Hidden);
        assert_eq!(field.mines_remaining(), 0);
        // Unflagging always works.
        assert!(field.toggle_flag([2, 0]).unwrap());
        assert!(field.toggle_flag([0, 0]).unwrap());
    }

    #[test]
    fn test_flagging_open_cell_is_a_no_op() {
        let mut field = Field::from_mines(dims(3, 1), &[[0, 0]]).unwrap();
        assert_eq!(field.reveal([1, 0]).unwrap(), opened(1));
        assert!(!field.toggle_flag([1, 0]).unwrap());
        assert_eq!(field.mines_remaining(), 1);
    }

    #[test]
    fn test_reveal_number_does_not_cascade() {
        let mut field = Field::from_mines(dims(3, 3), &[[0, 0]]).unwrap();
        assert_eq!(field.reveal([1, 1]).unwrap(), opened(1));
        assert_eq!(field.count_revealed(), 1);
        assert_eq!(field.reveal([1, 1]).unwrap(), RevealOutcome::Ignored);
    }

    #[test]
    fn test_reveal_cascades_through_clearing() {
        let mut field = Field::from_mines(dims(4, 4), &[[0, 0]]).unwrap();
        assert_eq!(field.reveal([3, 3]).unwrap(), opened(15));
        assert_eq!(field[[0, 0]].state(), CellState::Hidden);
        assert_eq!(field.safe_cells_left(), 0);
        assert!(!field.is_cleared());
        assert!(field.toggle_flag([0, 0]).unwrap());
        assert!(field.is_cleared());
    }

    #[test]
    fn test_cascade_stops_at_flags() {
        // A wall of flags in the middle column splits an empty field in two.
        let mut field = Field::from_mines(dims(5, 3), &[[4, 0], [4, 1], [4, 2]]).unwrap();
        for y in 0..3 {
            // Mines are all in the last column; flagging safe cells is allowed up to the budget.
            assert!(field.toggle_flag([2, y]).unwrap());
        }
        assert_eq!(field.reveal([0, 1]).unwrap(), opened(6));
        for y in 0..3 {
            assert_eq!(field[[2, y]].state(), CellState::Flagged);
            assert_eq!(field[[3, y]].state(), CellState::Hidden);
        }
        assert_eq!(field.count_revealed(), 6);
    }

    #[test]
    fn test_flagged_cell_cannot_be_revealed() {
        let mut field = Field::from_mines(dims(2, 1), &[[0, 0]]).unwrap();
        field.toggle_flag([0, 0]).unwrap();
        assert_eq!(field.reveal([0, 0]).unwrap(), RevealOutcome::Ignored);
        assert_eq!(field[[0, 0]].state(), CellState::Flagged);
    }

    #[test]
    fn test_detonation_changes_only_that_cell() {
        let mut field = Field::from_mines(dims(3, 3), &[[1, 1]]).unwrap();
        let before = states(&field);
        assert_eq!(field.reveal([1, 1]).unwrap(), RevealOutcome::Detonated);
        let after = states(&field);
        for (index, (old, new)) in before.iter().zip(&after).enumerate() {
            if index == 4 {
                assert_eq!(*new, CellState::Detonated);
            } else {
                assert_eq!(old, new);
            }
        }
        assert_eq!(field.reveal([1, 1]).unwrap(), RevealOutcome::Ignored);
    }

    #[test]
    fn test_win_requires_both_conditions() {
        let mut field = Field::from_mines(dims(2, 1), &[[0, 0]]).unwrap();
        assert!(!field.is_cleared());
        field.toggle_flag([0, 0]).unwrap();
        assert_eq!(field[[1, 0]].state(), CellState::Hidden);
        assert!(!field.is_cleared());
        field.reveal([1, 0]).unwrap();
        assert_eq!(field[[1, 0]].state(), CellState::Revealed);
        assert!(field.is_cleared());

        let mut unflagged = Field::from_mines(dims(2, 1), &[[0, 0]]).unwrap();
        unflagged.reveal([1, 0]).unwrap();
        assert!(!unflagged.is_cleared());
    }

    #[test]
    fn test_mine_free_field_is_won_by_one_click() {
        let mut field = Field::from_mines(dims(64, 64), &[]).unwrap();
        assert_eq!(field.reveal([10, 20]).unwrap(), opened(64 * 64));
        assert!(field.is_cleared());
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn test_serialization_round_trip_preserves_behavior() {
        let mut field = Field::from_mines(dims(4, 3), &[[0, 0], [3, 2]]).unwrap();
        field.toggle_flag([0, 0]).unwrap();
        field.reveal([3, 0]).unwrap();

        let json = serde_json::to_string(&field).unwrap();
        let mut restored: Field = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, field);
        assert_eq!(restored.mines_remaining(), 1);
        assert_eq!(restored.is_cleared(), field.is_cleared());
        assert_eq!(restored.reveal([3, 2]).unwrap(), field.reveal([3, 2]).unwrap());
        assert_eq!(restored.toggle_flag([1, 1]).unwrap(), field.toggle_flag([1, 1]).unwrap());
        assert_eq!(restored, field);
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn test_restore_rejects_corrupt_fields() {
        let field = Field::from_mines(dims(2, 1), &[[0, 0]]).unwrap();
        let mut value = serde_json::to_value(&field).unwrap();
        value["mines_remaining"] = serde_json::json!(0);
        assert!(serde_json::from_value::<Field>(value).is_err());

        let mut value = serde_json::to_value(&field).unwrap();
        value["cells"][1]["adjacent_mines"] = serde_json::json!(0);
        assert!(serde_json::from_value::<Field>(value).is_err());

        let mut value = serde_json::to_value(&field).unwrap();
        value["cells"][1]["state"] = serde_json::json!("Detonated");
        assert!(serde_json::from_value::<Field>(value).is_err());

        let mut value = serde_json::to_value(&field).unwrap();
        value["cells"].as_array_mut().unwrap().pop();
        assert!(serde_json::from_value::<Field>(value).is_err());
    }

    #[cfg(feature = "generation")]
    fn config() -> impl Strategy<Value = (usize, usize, usize, u64)> {
        (1_usize..12, 1_usize..12)
            .prop_flat_map(|(w, h)| (Just(w), Just(h), 0..=w * h, any::<u64>()))
    }

    #[cfg(feature = "generation")]
    proptest! {
        #[test]
        fn prop_mine_count_is_exact((w, h, mines, seed) in config()) {
            let field = Field::with_rng(dims(w, h), mines, &mut Pcg32::seed_from_u64(seed)).unwrap();
            prop_assert_eq!(field.rows().flatten().filter(|cell| cell.has_mine()).count(), mines);
            prop_assert_eq!(field.mine_count(), mines);
            prop_assert_eq!(field.mines_remaining(), mines);
        }

        #[test]
        fn prop_adjacency_matches_brute_force((w, h, mines, seed) in config()) {
            let field = Field::with_rng(dims(w, h), mines, &mut Pcg32::seed_from_u64(seed)).unwrap();
            for y in 0..h {
                for x in 0..w {
                    let cell = field[[x, y]];
                    let expected = if cell.has_mine() { 0 } else { brute_force_count(&field, [x, y]) };
                    prop_assert_eq!(cell.adjacent_mine_count(), expected);
                }
            }
        }

        #[test]
        fn prop_reveal_opens_each_cell_once((w, h, mines, seed) in config(), x in 0_usize..12, y in 0_usize..12) {
            let mut field = Field::with_rng(dims(w, h), mines, &mut Pcg32::seed_from_u64(seed)).unwrap();
            let target = [x % w, y % h];
            let outcome = field.reveal(target).unwrap();
            let revealed = field.count_revealed();
            match outcome {
                RevealOutcome::Opened(count) => prop_assert_eq!(count.get(), revealed),
                RevealOutcome::Detonated => prop_assert_eq!(revealed, 0),
                RevealOutcome::Ignored => prop_assert!(false, "a fresh field never ignores a reveal"),
            }
            prop_assert!(field.rows().flatten().all(|cell| !(cell.has_mine() && cell.state().is_revealed())));
        }
    }

    proptest! {
        #[test]
        fn prop_cascade_never_crosses_flags(seed in any::<u64>(), column in 1_usize..7) {
            // An empty field with the budget spent on a full column of flags.
            let mines: Vec<FieldCoordinates> = (0..6).map(|y| [7, y]).collect();
            let mut field = Field::from_mines(dims(8, 6), &mines).unwrap();
            for y in 0..6 {
                prop_assert!(field.toggle_flag([column, y]).unwrap());
            }
            let start = [(seed % column as u64) as usize, (seed % 6) as usize];
            field.reveal(start).unwrap();
            for y in 0..6 {
                prop_assert_eq!(field[[column, y]].state(), CellState::Flagged);
                for x in column + 1..8 {
                    prop_assert_eq!(field[[x, y]].state(), CellState::Hidden);
                }
                for x in 0..column {
                    prop_assert_eq!(field[[x, y]].state(), CellState::Revealed);
                }
            }
        }
    }

    #[test]
    fn test_layout_helpers() {
        let layout = vec![true, false, false, false];
        assert_eq!(count_mines_around(dims(2, 2), &layout, [1, 1]), 1);
        assert_eq!(count_mines_around(dims(2, 2), &layout, [0, 0]), 0);
        assert_eq!(check_mine_count(dims(2, 2), 4), Ok(4));
    }
}
