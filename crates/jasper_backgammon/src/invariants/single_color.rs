//! Single colour invariant: no spot mixes colours.

use super::Invariant;
use crate::Game;

/// Invariant: every spot stack holds pieces of one colour only.
///
/// A hit evicts the blot before the moving piece lands, so a mixed stack
/// is never observable between moves.
pub struct SingleColorSpotsInvariant;

impl Invariant<Game> for SingleColorSpotsInvariant {
    fn holds(game: &Game) -> bool {
        game.board()
            .spots()
            .iter()
            .all(|stack| stack.windows(2).all(|pair| pair[0] == pair[1]))
    }

    fn description() -> &'static str {
        "Every spot holds a single colour"
    }
}
