//! A single game of Minesweeper: a field plus whether the game is still going.
//!
//! [`Field`] reports detonations and answers whether it is cleared, but leaves ending the game to its caller. `Game` is that caller for implementations which don't want to track it themselves: once the game is won or lost, it refuses any further moves.

#[cfg(feature = "serialization")]
use serde::{Serialize, Deserialize};
use crate::{Field, FieldConfig, FieldCoordinates, FieldError, RevealOutcome};

/// Whether a game is still being played, and how it ended otherwise.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, derive_more::IsVariant)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum GameState {
    /// The game accepts moves.
    #[default]
    Playing,
    /// Every mine is flagged and every other cell is revealed.
    Won,
    /// A mine went off.
    Lost,
}
impl GameState {
    /// Returns `true` for `Won` and `Lost`.
    #[inline]
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Playing)
    }
    /// Derives the state of a game from its field.
    fn of(field: &Field) -> Self {
        if field.rows().flatten().any(|cell| cell.state().is_detonated()) {
            Self::Lost
        } else if field.is_cleared() {
            Self::Won
        } else {
            Self::Playing
        }
    }
}

/// A game in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(try_from = "SavedGame", into = "SavedGame"))]
pub struct Game {
    config: FieldConfig,
    field: Field,
    state: GameState,
}
impl Game {
    /// Starts a game on a randomly mined field, using the thread-local random number generator.
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidConfiguration`] if the configuration is impossible.
    #[cfg(all(feature = "generation", feature = "std"))]
    pub fn new(config: FieldConfig) -> Result<Self, FieldError> {
        Self::with_rng(config, &mut rand::rng())
    }
    /// Starts a game on a randomly mined field, using the specified random number generator.
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidConfiguration`] if the configuration is impossible.
    #[cfg(feature = "generation")]
    pub fn with_rng<R>(config: FieldConfig, rng: &mut R) -> Result<Self, FieldError>
    where R: rand::Rng + ?Sized {
        let field = config.build_with_rng(rng)?;
        log::info!("new {}x{} game with {} mines", config.width, config.height, config.mines);
        Ok(Self {config, field, state: GameState::Playing})
    }
    /// Continues a game on an existing field. The state is derived from the field, so a field with a detonated mine gives a lost game.
    pub fn from_field(field: Field) -> Self {
        let config = FieldConfig::new(field.width(), field.height(), field.mine_count());
        let state = GameState::of(&field);
        Self {config, field, state}
    }
    /// Replaces the field with a freshly mined one of the same configuration and starts playing again.
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidConfiguration`] if the configuration is impossible, which can't happen for games created or restored through this crate.
    #[cfg(all(feature = "generation", feature = "std"))]
    pub fn restart(&mut self) -> Result<(), FieldError> {
        self.restart_with_rng(&mut rand::rng())
    }
    /// Replaces the field with a freshly mined one of the same configuration, using the specified random number generator, and starts playing again.
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidConfiguration`] if the configuration is impossible, which can't happen for games created or restored through this crate.
    #[cfg(feature = "generation")]
    pub fn restart_with_rng<R>(&mut self, rng: &mut R) -> Result<(), FieldError>
    where R: rand::Rng + ?Sized {
        *self = Self::with_rng(self.config, rng)?;
        Ok(())
    }

    /// Returns the field the game is played on.
    #[inline(always)]
    pub const fn field(&self) -> &Field {
        &self.field
    }
    /// Returns the configuration new fields are created with on restart.
    #[inline(always)]
    pub const fn config(&self) -> FieldConfig {
        self.config
    }
    /// Returns the current state of the game.
    #[inline(always)]
    pub const fn state(&self) -> GameState {
        self.state
    }
    /// Returns whether renderers should show every mine, which is the case once the game is lost.
    #[inline]
    pub const fn show_mines(&self) -> bool {
        matches!(self.state, GameState::Lost)
    }

    /// Reveals a cell, as with [`Field::reveal`], and updates the state of the game.
    ///
    /// # Errors
    /// Returns [`FieldError::GameOver`] if the game has already ended, or [`FieldError::OutOfBounds`] for coordinates outside the field.
    pub fn reveal(&mut self, coordinates: FieldCoordinates) -> Result<RevealOutcome, FieldError> {
        self.ensure_playing()?;
        let outcome = self.field.reveal(coordinates)?;
        match outcome {
            RevealOutcome::Detonated => self.finish(GameState::Lost),
            RevealOutcome::Opened(_) => self.check_win_condition(),
            RevealOutcome::Ignored => {}
        }
        Ok(outcome)
    }
    /// Toggles a flag, as with [`Field::toggle_flag`], and updates the state of the game.
    ///
    /// # Errors
    /// Returns [`FieldError::GameOver`] if the game has already ended, or [`FieldError::OutOfBounds`] for coordinates outside the field.
    pub fn toggle_flag(&mut self, coordinates: FieldCoordinates) -> Result<bool, FieldError> {
        self.ensure_playing()?;
        let toggled = self.field.toggle_flag(coordinates)?;
        if toggled {
            self.check_win_condition();
        }
        Ok(toggled)
    }

    fn ensure_playing(&self) -> Result<(), FieldError> {
        if self.state.is_finished() {
            return Err(FieldError::GameOver);
        }
        Ok(())
    }
    fn check_win_condition(&mut self) {
        if self.field.is_cleared() {
            self.finish(GameState::Won);
        }
    }
    fn finish(&mut self, state: GameState) {
        log::info!("game {}", if state.is_won() { "won" } else { "lost" });
        self.state = state;
    }
}

/// The persisted form of a game. The state is not stored, since it follows from the field.
#[cfg(feature = "serialization")]
#[derive(Serialize, Deserialize)]
struct SavedGame {
    config: FieldConfig,
    field: Field,
}
/// A saved game whose configuration doesn't describe its field.
#[cfg(feature = "serialization")]
#[derive(Copy, Clone, Debug, PartialEq, Eq, derive_more::Display)]
#[display("saved configuration {saved:?} does not match the {}x{} field with {} mines", actual.width, actual.height, actual.mines)]
struct ConfigMismatch {
    saved: FieldConfig,
    actual: FieldConfig,
}
#[cfg(feature = "serialization")]
impl TryFrom<SavedGame> for Game {
    type Error = ConfigMismatch;
    fn try_from(saved: SavedGame) -> Result<Self, Self::Error> {
        let game = Self::from_field(saved.field);
        if saved.config != game.config {
            log::debug!("rejected saved game with configuration {:?}", saved.config);
            return Err(ConfigMismatch {saved: saved.config, actual: game.config});
        }
        Ok(game)
    }
}
#[cfg(feature = "serialization")]
impl From<Game> for SavedGame {
    fn from(game: Game) -> Self {
        Self {config: game.config, field: game.field}
    }
}

/// Win and loss counters across games, for a statistics screen to persist and display.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct Statistics {
    /// The number of games won.
    pub games_won: u64,
    /// The number of games lost.
    pub games_lost: u64,
}
impl Statistics {
    /// Counts a finished game. Games still being played are not counted.
    pub fn record(&mut self, state: GameState) {
        match state {
            GameState::Won => self.games_won += 1,
            GameState::Lost => self.games_lost += 1,
            GameState::Playing => {}
        }
    }
    /// Returns the number of finished games.
    #[inline(always)]
    pub const fn games_played(&self) -> u64 {
        self.games_won + self.games_lost
    }
}
