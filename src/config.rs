//! Field configuration: plain sizes and mine counts, and the classic difficulty presets.

use core::num::NonZeroUsize;
#[cfg(feature = "serialization")]
use serde::{Serialize, Deserialize};
#[cfg(feature = "generation")]
use crate::Field;
use crate::{FieldDimensions, FieldError};

/// The size and mine count of a field, as loaded from a settings file or chosen in a menu.
///
/// Unlike [`FieldDimensions`], the sizes are plain integers, so a configuration can describe an impossible field; [`dimensions`][FieldConfig::dimensions] and the constructors check it. Missing keys in a deserialized configuration fall back to [`Difficulty::Expert`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct FieldConfig {
    /// The number of columns.
    pub width: usize,
    /// The number of rows.
    pub height: usize,
    /// The number of mines.
    pub mines: usize,
}
impl FieldConfig {
    /// Creates a configuration.
    #[inline(always)]
    pub const fn new(width: usize, height: usize, mines: usize) -> Self {
        Self {width, height, mines}
    }
    /// Returns the dimensions of the configured field.
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidConfiguration`] if the field would have no cells or the mines would not fit on it.
    pub fn dimensions(self) -> Result<FieldDimensions, FieldError> {
        let invalid = FieldError::InvalidConfiguration {
            width: self.width,
            height: self.height,
            mines: self.mines,
        };
        let (Some(width), Some(height)) = (NonZeroUsize::new(self.width), NonZeroUsize::new(self.height)) else {
            return Err(invalid);
        };
        match self.width.checked_mul(self.height) {
            Some(area) if self.mines <= area => Ok([width, height]),
            _ => Err(invalid),
        }
    }
    /// Creates a randomly mined field using the thread-local random number generator.
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidConfiguration`] if the configuration is impossible.
    #[cfg(all(feature = "generation", feature = "std"))]
    pub fn build(self) -> Result<Field, FieldError> {
        Field::new(self.dimensions()?, self.mines)
    }
    /// Creates a randomly mined field using the specified random number generator.
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidConfiguration`] if the configuration is impossible.
    #[cfg(feature = "generation")]
    pub fn build_with_rng<R>(self, rng: &mut R) -> Result<Field, FieldError>
    where R: rand::Rng + ?Sized {
        Field::with_rng(self.dimensions()?, self.mines, rng)
    }
}
impl Default for FieldConfig {
    /// Returns the expert preset, 30x16 with 99 mines.
    #[inline(always)]
    fn default() -> Self {
        Difficulty::Expert.config()
    }
}
impl From<Difficulty> for FieldConfig {
    #[inline(always)]
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

/// The classic difficulty presets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Difficulty {
    /// 9x9 with 10 mines.
    Beginner,
    /// 16x16 with 40 mines.
    Intermediate,
    /// 30x16 with 99 mines.
    #[default]
    Expert,
}
impl Difficulty {
    /// All presets, from the easiest to the hardest.
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    /// Returns the field configuration of this preset.
    #[inline]
    pub const fn config(self) -> FieldConfig {
        match self {
            Self::Beginner => FieldConfig::new(9, 9, 10),
            Self::Intermediate => FieldConfig::new(16, 16, 40),
            Self::Expert => FieldConfig::new(30, 16, 99),
        }
    }
}
