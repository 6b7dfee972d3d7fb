//! Remaining pips invariant: unspent dice always come from a real roll.

use super::Invariant;
use crate::Game;
use crate::dice::is_face;

/// Invariant: at most four unspent pips, each a valid die face.
pub struct RemainingPipsInvariant;

impl Invariant<Game> for RemainingPipsInvariant {
    fn holds(game: &Game) -> bool {
        match game.active_roll() {
            Some(roll) => {
                let remaining = roll.remaining();
                let limit = roll.dice().pips().len();
                remaining.len() <= limit && remaining.iter().all(|pip| is_face(*pip))
            }
            None => true,
        }
    }

    fn description() -> &'static str {
        "Unspent pips are valid faces from the active roll"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dice, Piece};

    #[test]
    fn test_no_roll_holds() {
        assert!(RemainingPipsInvariant::holds(&Game::new()));
    }

    #[test]
    fn test_double_holds() {
        let mut game = Game::new();
        game.roll(Piece::Black, Dice::new(6, 6).unwrap());
        assert!(RemainingPipsInvariant::holds(&game));
        assert_eq!(game.active_roll().unwrap().remaining().len(), 4);
    }
}
