//! First-class action types for backgammon.
//!
//! A drop is the player's intent to move one piece. It can be validated
//! against the game before anything is mutated.

use crate::notation::Record;
use crate::types::{Location, Piece};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A request to move one piece, as produced by a drag-and-drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRequest {
    /// The colour being moved.
    pub piece: Piece,
    /// Where the piece is picked up.
    pub from: Location,
    /// Where the piece is dropped.
    pub to: Location,
}

impl MoveRequest {
    /// Creates a new request.
    #[instrument]
    pub fn new(piece: Piece, from: Location, to: Location) -> Self {
        Self { piece, from, to }
    }

    /// Creates a request from raw UI values (`-1` bar, `-2` off).
    #[instrument]
    pub fn from_raw(piece: Piece, from: i8, to: i8) -> Result<Self, IllegalMoveError> {
        let from = Location::from_raw(from).ok_or(IllegalMoveError::InvalidLocation(from))?;
        let to = Location::from_raw(to).ok_or(IllegalMoveError::InvalidLocation(to))?;
        Ok(Self { piece, from, to })
    }
}

impl std::fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {}", self.piece, self.from, self.to)
    }
}

/// What an accepted move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MoveResult {
    /// The colour moved.
    piece: Piece,
    /// Source location.
    from: Location,
    /// Destination location.
    to: Location,
    /// Pips travelled.
    distance: u8,
    /// Whether a lone opposing piece was sent to the bar.
    hit: bool,
    /// The log line appended for this move.
    record: Record,
}

impl MoveResult {
    pub(crate) fn new(
        piece: Piece,
        from: Location,
        to: Location,
        distance: u8,
        hit: bool,
        record: Record,
    ) -> Self {
        Self {
            piece,
            from,
            to,
            distance,
            hit,
            record,
        }
    }
}

/// Why a user-initiated move was refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum IllegalMoveError {
    /// The colour holds no unspent dice.
    #[display("{} has no dice remaining", _0)]
    NoDiceRemaining(Piece),

    /// Pieces on the bar must re-enter before anything else moves.
    #[display("{} must enter from the bar first", _0)]
    MustEnterFromBar(Piece),

    /// Nothing of the moving colour at the source.
    #[display("No {} piece at {}", _0, _1)]
    NoPieceAtSource(Piece, Location),

    /// Destination holds two or more opposing pieces.
    #[display("Spot {} is blocked", _0)]
    Blocked(Location),

    /// Bearing off while pieces remain outside the home region.
    #[display("{} cannot bear off until every piece is home", _0)]
    NotAllHome(Piece),

    /// No remaining die covers this move.
    #[display("No die moves {} from {} to {}", _0, _1, _2)]
    NoMatchingDie(Piece, Location, Location),

    /// A raw location value outside the board.
    #[display("Invalid location {}", _0)]
    InvalidLocation(i8),

    /// A postcondition failed after applying the move.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for IllegalMoveError {}
