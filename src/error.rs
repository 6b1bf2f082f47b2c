//! The error type shared by field construction and field operations.

use crate::{FieldCoordinates, FieldDimensions};

/// Errors produced when constructing a field or addressing its cells.
///
/// Ordinary gameplay mis-clicks, like flagging an already opened cell, are **not** errors: those are reported through the return values of [`Field::toggle_flag`][tf] and [`Field::reveal`][rv].
///
/// [tf]: crate::Field::toggle_flag
/// [rv]: crate::Field::reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum FieldError {
    /// There is no valid layout for the requested number of mines, or the requested field has no cells.
    #[display("no valid layout for {mines} mines on a {width}x{height} field")]
    InvalidConfiguration {
        /// The requested number of columns.
        width: usize,
        /// The requested number of rows.
        height: usize,
        /// The requested number of mines.
        mines: usize,
    },
    /// The coordinates lie outside the field.
    #[display("coordinates {coordinates:?} are outside of a {}x{} field", dimensions[0], dimensions[1])]
    OutOfBounds {
        /// The offending coordinates.
        coordinates: FieldCoordinates,
        /// The dimensions of the field which was addressed.
        dimensions: FieldDimensions,
    },
    /// The game has already been won or lost and accepts no further moves.
    #[display("the game is over")]
    GameOver,
}
