//! Piece limit invariant: no colour ever exceeds its starting count.

use super::Invariant;
use crate::types::PIECES_PER_COLOR;
use crate::{Game, Piece};
use strum::IntoEnumIterator;

/// Invariant: each colour has at most fifteen pieces across spots, bar and
/// off-tray.
pub struct PieceLimitInvariant;

impl Invariant<Game> for PieceLimitInvariant {
    fn holds(game: &Game) -> bool {
        Piece::iter().all(|piece| game.board().count(piece) <= PIECES_PER_COLOR)
    }

    fn description() -> &'static str {
        "No colour has more than fifteen pieces"
    }
}
