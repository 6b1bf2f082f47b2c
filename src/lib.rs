//! The playing field of a Minesweeper game, without any of the rendering.
//!
//! The purpose of such a crate is to keep the rules of Minesweeper in one place and leave drawing, sound, input and timing to the implementation. Such implementations can be seen as frontends to this library: they turn clicks into grid coordinates, call [`Field::reveal`] or [`Field::toggle_flag`], and redraw from the cells afterwards.
//!
//! [`Game`] wraps a field for frontends which also want the library to refuse moves after the game has ended.
//!
//! # Feature gates
//! - `std` — enable a dependency on the hosted standard library (**enabled by default**)
//!
//!   Without this feature, the crate only depends on `core` and `alloc`, allowing it to run in a freestanding environment. Random fields then have to be created with an explicitly provided random number generator.
//!
//! - `generation` — enable random generation (**enabled by default**)
//!
//!   Enables the dependency on `rand`, used for generating random fields. Disable to remove said dependency if you'd like to use your own field generator together with [`Field::from_mines`].
//!
//! - `serialization` — enable support for field serialization (**enabled by default**, disable to speed up compilation)
//!
//!   Enables the dependency on `serde`, which allows one to save a field or a game and restore it later. Restoring checks that the saved data describes a field this crate could have produced.
//!
//! # Logging
//! Field construction, detonations and game results are reported through the `log` facade. No logger is installed by this crate.

#![warn(clippy::pedantic, clippy::cargo, clippy::nursery)]
#![warn(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

mod cell;
pub use cell::*;
mod config;
pub use config::*;
mod error;
pub use error::*;
mod field;
pub use field::*;
mod game;
pub use game::*;
pub mod iter;
pub use iter::*;
mod view;
pub use view::*;
