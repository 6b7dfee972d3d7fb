//! Backgammon board and move engine for jasper game comments.
//!
//! A game is recorded as a text comment, one roll or move per line. The
//! board is a cache rebuilt by replaying that text.
//!
//! # Architecture
//!
//! - **Board**: 24 spot stacks, a shared bar and a shared off-tray
//! - **Notation**: parser and canonical writer for log lines
//! - **Game**: the move engine, with a silent [`Game::try_move`] primitive and
//!   a [`Game::drop`] boundary that raises [`IllegalMoveError`]
//! - **Merge**: policy deciding when a three-way merge conflict over the
//!   comment can be resolved without asking a person
//!
//! # Example
//!
//! ```
//! use jasper_backgammon::{Dice, Game, Location, MoveRequest, Piece};
//!
//! let mut game = Game::new();
//! game.roll(Piece::Red, Dice::new(3, 1).unwrap());
//! let from = Location::spot(0).unwrap();
//! let to = Location::spot(3).unwrap();
//! game.drop(MoveRequest::new(Piece::Red, from, to)).unwrap();
//! assert_eq!(game.comment(), "r 3-1\nr 1 4");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
pub mod contracts;
mod dice;
mod game;
pub mod invariants;
pub mod merge;
mod notation;
pub mod rules;
mod types;

pub use action::{IllegalMoveError, MoveRequest, MoveResult};
pub use board::Board;
pub use dice::{ActiveRoll, Dice, MAX_FACE};
pub use game::{Game, LINE_SEPARATOR};
pub use merge::{
    Conflict, LineKind, MergeRegion, auto_merge, can_auto_resolve, can_auto_resolve_move_conflict,
    can_auto_resolve_roll_conflict, classify,
};
pub use notation::{NotationError, Record};
pub use types::{BAR_RAW, Location, OFF_RAW, PIECES_PER_COLOR, Piece, SPOT_COUNT, SpotIndex};
