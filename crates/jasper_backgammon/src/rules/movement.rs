//! Direction, range and occupancy rules for a single move.

use crate::board::Board;
use crate::dice::MAX_FACE;
use crate::types::{Location, Piece, SpotIndex};
use tracing::instrument;

/// What a destination spot means for the moving colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    /// Empty, or already holding the moving colour.
    Open,
    /// Exactly one opposing piece.
    Blot,
    /// Two or more opposing pieces.
    Blocked,
}

/// Pip distance of a single-die move, `None` if the move is backwards,
/// longer than one die, or starts/ends somewhere no move can.
///
/// Bar moves are measured from the colour's entry point, bear-off moves to
/// its exit point.
#[instrument]
pub fn pip_distance(piece: Piece, from: Location, to: Location) -> Option<u8> {
    if from == Location::Off || to == Location::Bar {
        return None;
    }
    let start = piece.progress(from);
    let end = piece.progress(to);
    let distance = end.checked_sub(start)?;
    (1..=MAX_FACE).contains(&distance).then_some(distance)
}

/// Whether a location holds a piece of the moving colour.
pub fn source_holds(board: &Board, piece: Piece, from: Location) -> bool {
    match from {
        Location::Off => false,
        location => board.count_at(location, piece) > 0,
    }
}

/// Classifies a destination spot for the moving colour.
pub fn occupancy(board: &Board, piece: Piece, spot: SpotIndex) -> Occupancy {
    let opposing = board.count_at(Location::Spot(spot), piece.opponent());
    match opposing {
        0 => Occupancy::Open,
        1 => Occupancy::Blot,
        _ => Occupancy::Blocked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spot(index: usize) -> Location {
        Location::spot(index).unwrap()
    }

    #[test]
    fn test_red_moves_up_black_moves_down() {
        assert_eq!(pip_distance(Piece::Red, spot(0), spot(3)), Some(3));
        assert_eq!(pip_distance(Piece::Red, spot(3), spot(0)), None);
        assert_eq!(pip_distance(Piece::Black, spot(12), spot(7)), Some(5));
        assert_eq!(pip_distance(Piece::Black, spot(7), spot(12)), None);
    }

    #[test]
    fn test_range_limited_to_one_die() {
        assert_eq!(pip_distance(Piece::Red, spot(0), spot(6)), Some(6));
        assert_eq!(pip_distance(Piece::Red, spot(0), spot(7)), None);
    }

    #[test]
    fn test_bar_entry_measured_from_entry_point() {
        assert_eq!(pip_distance(Piece::Red, Location::Bar, spot(0)), Some(1));
        assert_eq!(pip_distance(Piece::Red, Location::Bar, spot(5)), Some(6));
        assert_eq!(pip_distance(Piece::Red, Location::Bar, spot(6)), None);
        assert_eq!(pip_distance(Piece::Black, Location::Bar, spot(23)), Some(1));
        assert_eq!(pip_distance(Piece::Black, Location::Bar, spot(18)), Some(6));
        assert_eq!(pip_distance(Piece::Black, Location::Bar, spot(17)), None);
    }

    #[test]
    fn test_bear_off_measured_to_exit() {
        assert_eq!(pip_distance(Piece::Red, spot(23), Location::Off), Some(1));
        assert_eq!(pip_distance(Piece::Red, spot(18), Location::Off), Some(6));
        assert_eq!(pip_distance(Piece::Red, spot(17), Location::Off), None);
        assert_eq!(pip_distance(Piece::Black, spot(0), Location::Off), Some(1));
    }

    #[test]
    fn test_no_moves_onto_bar_or_out_of_off() {
        assert_eq!(pip_distance(Piece::Red, spot(0), Location::Bar), None);
        assert_eq!(pip_distance(Piece::Red, Location::Off, spot(0)), None);
    }

    #[test]
    fn test_occupancy() {
        let mut board = Board::empty();
        board
            .place(spot(3), Piece::Black, 1)
            .place(spot(5), Piece::Black, 2)
            .place(spot(7), Piece::Red, 4);
        let index = |i| SpotIndex::new(i).unwrap();
        assert_eq!(occupancy(&board, Piece::Red, index(3)), Occupancy::Blot);
        assert_eq!(occupancy(&board, Piece::Red, index(5)), Occupancy::Blocked);
        assert_eq!(occupancy(&board, Piece::Red, index(7)), Occupancy::Open);
        assert_eq!(occupancy(&board, Piece::Red, index(9)), Occupancy::Open);
    }
}
