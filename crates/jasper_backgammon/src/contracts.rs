//! Contract-based validation for user drops.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} drop {Q}. The silent [`Game::try_move`] primitive has no contract;
//! these exist for the user-facing [`Game::drop`] boundary.

use crate::action::{IllegalMoveError, MoveRequest};
use crate::invariants::{BackgammonInvariants, InvariantSet};
use crate::rules::{Occupancy, can_bear_off, legal_destinations, occupancy, source_holds};
use crate::types::{Location, Piece};
use crate::Game;
use strum::IntoEnumIterator;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), IllegalMoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), IllegalMoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Drop Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the moving colour holds unspent dice.
pub struct HoldsDice;

impl HoldsDice {
    /// Fails unless the moving colour owns an unexhausted roll.
    #[instrument(skip(game))]
    pub fn check(request: &MoveRequest, game: &Game) -> Result<(), IllegalMoveError> {
        match game.active_roll() {
            Some(roll) if roll.usable_by(request.piece) => Ok(()),
            _ => Err(IllegalMoveError::NoDiceRemaining(request.piece)),
        }
    }
}

/// Precondition: pieces on the bar re-enter before any spot moves.
pub struct BarFirst;

impl BarFirst {
    /// Fails when the colour has pieces on the bar and moves from a spot.
    #[instrument(skip(game))]
    pub fn check(request: &MoveRequest, game: &Game) -> Result<(), IllegalMoveError> {
        if request.from != Location::Bar && game.board().bar_count(request.piece) > 0 {
            Err(IllegalMoveError::MustEnterFromBar(request.piece))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the source holds a piece of the moving colour.
pub struct OwnsSource;

impl OwnsSource {
    /// Fails when the source holds nothing of the moving colour.
    #[instrument(skip(game))]
    pub fn check(request: &MoveRequest, game: &Game) -> Result<(), IllegalMoveError> {
        if source_holds(game.board(), request.piece, request.from) {
            Ok(())
        } else {
            Err(IllegalMoveError::NoPieceAtSource(request.piece, request.from))
        }
    }
}

/// Precondition: the destination is among the legal destinations.
///
/// When it is not, reports the most specific reason.
pub struct DestinationLegal;

impl DestinationLegal {
    /// Fails when no unspent die reaches the destination.
    #[instrument(skip(game))]
    pub fn check(request: &MoveRequest, game: &Game) -> Result<(), IllegalMoveError> {
        let MoveRequest { piece, from, to } = *request;
        let legal = legal_destinations(game.board(), game.active_roll(), piece, from);
        if legal.contains(&to) {
            return Ok(());
        }

        match to {
            Location::Spot(spot) if occupancy(game.board(), piece, spot) == Occupancy::Blocked => {
                Err(IllegalMoveError::Blocked(to))
            }
            Location::Off if !can_bear_off(game.board(), piece) => {
                Err(IllegalMoveError::NotAllHome(piece))
            }
            _ => Err(IllegalMoveError::NoMatchingDie(piece, from, to)),
        }
    }
}

/// Composite precondition for a user drop.
pub struct LegalDrop;

impl LegalDrop {
    /// Validates all preconditions for a drop, in order.
    #[instrument(skip(game))]
    pub fn check(request: &MoveRequest, game: &Game) -> Result<(), IllegalMoveError> {
        HoldsDice::check(request, game)?;
        BarFirst::check(request, game)?;
        OwnsSource::check(request, game)?;
        DestinationLegal::check(request, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Drop Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for drop actions.
///
/// Preconditions:
/// - Colour holds dice
/// - Bar cleared first
/// - Source holds the colour
/// - Destination legal for an unspent die
///
/// Postconditions:
/// - Piece counts per colour unchanged
/// - All board invariants hold
pub struct DropContract;

impl Contract<Game, MoveRequest> for DropContract {
    fn pre(game: &Game, request: &MoveRequest) -> Result<(), IllegalMoveError> {
        LegalDrop::check(request, game)
    }

    fn post(before: &Game, after: &Game) -> Result<(), IllegalMoveError> {
        PiecesConserved::check(before, after)?;
        BackgammonInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            IllegalMoveError::InvariantViolation(format!(
                "Postcondition failed: {}",
                descriptions
            ))
        })
    }
}

/// Postcondition: pieces only move between spots, bar and off-tray.
pub struct PiecesConserved;

impl PiecesConserved {
    /// Fails when either colour's piece count changed.
    #[instrument(skip(before, after))]
    pub fn check(before: &Game, after: &Game) -> Result<(), IllegalMoveError> {
        for piece in Piece::iter() {
            let was = before.board().count(piece);
            let now = after.board().count(piece);
            if was != now {
                warn!(%piece, was, now, "Piece conservation violated");
                return Err(IllegalMoveError::InvariantViolation(format!(
                    "{} piece count changed from {} to {}",
                    piece, was, now
                )));
            }
        }
        Ok(())
    }
}
