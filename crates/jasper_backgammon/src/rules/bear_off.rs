//! Bearing-off rules.

use crate::board::Board;
use crate::types::{Location, Piece, SpotIndex};
use tracing::instrument;

/// Whether a colour may bear off at all: nothing on the bar and nothing
/// outside its home region.
#[instrument(skip(board))]
pub fn can_bear_off(board: &Board, piece: Piece) -> bool {
    board.all_home(piece)
}

/// Whether no piece of this colour sits farther from home than `from`.
///
/// A die larger than the exact distance may only bear off the farthest
/// piece back.
#[instrument(skip(board))]
pub fn is_farthest_back(board: &Board, piece: Piece, from: Location) -> bool {
    let start = piece.progress(from);
    SpotIndex::all()
        .filter(|spot| piece.progress(Location::Spot(*spot)) < start)
        .all(|spot| board.count_at(Location::Spot(spot), piece) == 0)
        && board.bar_count(piece) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spot(index: usize) -> Location {
        Location::spot(index).unwrap()
    }

    #[test]
    fn test_farthest_back_red() {
        let mut board = Board::empty();
        board.place(spot(19), Piece::Red, 1).place(spot(22), Piece::Red, 2);
        assert!(is_farthest_back(&board, Piece::Red, spot(19)));
        assert!(!is_farthest_back(&board, Piece::Red, spot(22)));
    }

    #[test]
    fn test_farthest_back_black() {
        let mut board = Board::empty();
        board.place(spot(4), Piece::Black, 1).place(spot(1), Piece::Black, 2);
        assert!(is_farthest_back(&board, Piece::Black, spot(4)));
        assert!(!is_farthest_back(&board, Piece::Black, spot(1)));
    }

    #[test]
    fn test_opponent_pieces_do_not_count() {
        let mut board = Board::empty();
        board.place(spot(22), Piece::Red, 1).place(spot(10), Piece::Black, 3);
        assert!(can_bear_off(&board, Piece::Red));
        assert!(is_farthest_back(&board, Piece::Red, spot(22)));
    }
}
