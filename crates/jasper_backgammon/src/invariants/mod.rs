//! First-class invariants for backgammon.
//!
//! Invariants are logical properties that must hold after every applied
//! move. They are testable independently of the move engine.

pub mod piece_limit;
pub mod remaining_pips;
pub mod single_color;

pub use piece_limit::PieceLimitInvariant;
pub use remaining_pips::RemainingPipsInvariant;
pub use single_color::SingleColorSpotsInvariant;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for triples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        collect(violations)
    }
}

/// All backgammon invariants as a composable set.
pub type BackgammonInvariants = (
    SingleColorSpotsInvariant,
    PieceLimitInvariant,
    RemainingPipsInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Game, Location, Piece};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        assert!(BackgammonInvariants::check_all(&Game::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_replay() {
        let game = Game::from_comment("r 3-1\nr 17 20\nr 19 20\nb 6-5\nb 24 18\nb 13 8");
        assert!(BackgammonInvariants::check_all(&game).is_ok());
        assert_eq!(game.log().len(), 6);
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut game = Game::new();
        game.board.place(Location::spot(0).unwrap(), Piece::Black, 1);
        game.board.place(Location::Off, Piece::Black, 1);

        let violations = BackgammonInvariants::check_all(&game).unwrap_err();
        assert_eq!(violations.len(), 2);
    }
}
