//! Legal destinations for a piece given the dice in hand.

use super::bear_off::{can_bear_off, is_farthest_back};
use super::movement::{Occupancy, occupancy, source_holds};
use crate::board::Board;
use crate::dice::ActiveRoll;
use crate::types::{Location, OFF_PROGRESS, Piece};
use tracing::{instrument, trace};

/// Every location `piece` may reach from `from` with one unspent die.
///
/// Empty when the colour holds no dice, when it still has pieces on the bar
/// and `from` is a spot, or when `from` holds nothing of that colour.
#[instrument(skip(board, roll))]
pub fn legal_destinations(
    board: &Board,
    roll: Option<&ActiveRoll>,
    piece: Piece,
    from: Location,
) -> Vec<Location> {
    let Some(roll) = roll.filter(|roll| roll.usable_by(piece)) else {
        return Vec::new();
    };
    if from != Location::Bar && board.bar_count(piece) > 0 {
        return Vec::new();
    }
    if !source_holds(board, piece, from) {
        return Vec::new();
    }

    let start = piece.progress(from);
    let mut destinations = Vec::new();
    for pip in roll.distinct_pips() {
        let target = start + pip;
        let destination = if target < OFF_PROGRESS {
            piece.landing(target)
        } else if target == OFF_PROGRESS || is_farthest_back(board, piece, from) {
            Some(Location::Off)
        } else {
            None
        };

        let allowed = match destination {
            Some(Location::Spot(spot)) => occupancy(board, piece, spot) != Occupancy::Blocked,
            Some(Location::Off) => can_bear_off(board, piece),
            Some(Location::Bar) | None => false,
        };

        if let Some(destination) = destination.filter(|_| allowed) {
            if !destinations.contains(&destination) {
                destinations.push(destination);
            }
        }
    }

    trace!(count = destinations.len(), "Computed legal destinations");
    destinations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Dice;

    fn spot(index: usize) -> Location {
        Location::spot(index).unwrap()
    }

    fn roll(piece: Piece, first: u8, second: u8) -> ActiveRoll {
        ActiveRoll::new(piece, Dice::new(first, second).unwrap())
    }

    #[test]
    fn test_no_dice_no_moves() {
        let board = Board::new();
        assert!(legal_destinations(&board, None, Piece::Red, spot(0)).is_empty());
        let black = roll(Piece::Black, 3, 4);
        assert!(legal_destinations(&board, Some(&black), Piece::Red, spot(0)).is_empty());
    }

    #[test]
    fn test_opening_moves_skip_blocked_spot() {
        let board = Board::new();
        let dice = roll(Piece::Red, 3, 5);
        // Spot 5 holds five black pieces.
        let destinations = legal_destinations(&board, Some(&dice), Piece::Red, spot(0));
        assert_eq!(destinations, vec![spot(3)]);
    }

    #[test]
    fn test_bar_must_be_cleared_first() {
        let mut board = Board::empty();
        board.place(Location::Bar, Piece::Red, 1).place(spot(0), Piece::Red, 1);
        let dice = roll(Piece::Red, 2, 4);
        assert!(legal_destinations(&board, Some(&dice), Piece::Red, spot(0)).is_empty());
        assert_eq!(
            legal_destinations(&board, Some(&dice), Piece::Red, Location::Bar),
            vec![spot(1), spot(3)]
        );
    }

    #[test]
    fn test_black_enters_on_high_spots() {
        let mut board = Board::empty();
        board.place(Location::Bar, Piece::Black, 1);
        let dice = roll(Piece::Black, 1, 6);
        assert_eq!(
            legal_destinations(&board, Some(&dice), Piece::Black, Location::Bar),
            vec![spot(23), spot(18)]
        );
    }

    #[test]
    fn test_bear_off_exact_and_larger_die() {
        let mut board = Board::empty();
        board.place(spot(20), Piece::Red, 1).place(spot(22), Piece::Red, 1);
        let dice = roll(Piece::Red, 6, 2);
        // From 20 (progress 21): a 2 lands on 22, a 6 overshoots and 20 is farthest back.
        assert_eq!(
            legal_destinations(&board, Some(&dice), Piece::Red, spot(20)),
            vec![spot(22), Location::Off]
        );
        // From 22 (progress 23): a 2 bears off exactly, a 6 overshoots but 20 is farther back.
        assert_eq!(
            legal_destinations(&board, Some(&dice), Piece::Red, spot(22)),
            vec![Location::Off]
        );
    }

    #[test]
    fn test_no_bear_off_with_pieces_outside_home() {
        let mut board = Board::empty();
        board.place(spot(23), Piece::Red, 1).place(spot(10), Piece::Red, 1);
        let dice = roll(Piece::Red, 1, 1);
        assert!(legal_destinations(&board, Some(&dice), Piece::Red, spot(23)).is_empty());
    }
}
