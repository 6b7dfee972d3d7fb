//! Board state: 24 spot stacks, the bar and the off-tray.

use crate::types::{Location, Piece, SPOT_COUNT, SpotIndex};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Standard starting layout as `(spot, piece, count)`.
const STARTING_LAYOUT: [(usize, Piece, usize); 8] = [
    (0, Piece::Red, 2),
    (5, Piece::Black, 5),
    (7, Piece::Black, 3),
    (11, Piece::Red, 5),
    (12, Piece::Black, 5),
    (16, Piece::Red, 3),
    (18, Piece::Red, 5),
    (23, Piece::Black, 2),
];

/// A backgammon board.
///
/// Each spot owns an ordered stack of pieces. The bar and the off-tray are
/// single stacks shared by both colours; entries keep their colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    spots: Vec<Vec<Piece>>,
    bar: Vec<Piece>,
    off: Vec<Piece>,
}

impl Board {
    /// Creates a board with the standard starting layout.
    #[instrument]
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (index, piece, count) in STARTING_LAYOUT {
            if let Some(spot) = SpotIndex::new(index) {
                board.place(Location::Spot(spot), piece, count);
            }
        }
        board
    }

    /// Creates a board with no pieces anywhere.
    pub fn empty() -> Self {
        Self {
            spots: vec![Vec::new(); SPOT_COUNT],
            bar: Vec::new(),
            off: Vec::new(),
        }
    }

    /// Pushes `count` pieces onto a location.
    pub fn place(&mut self, location: Location, piece: Piece, count: usize) -> &mut Self {
        let stack = self.stack_mut(location);
        stack.extend(std::iter::repeat_n(piece, count));
        self
    }

    /// Returns the stack at a location.
    pub fn stack(&self, location: Location) -> &[Piece] {
        match location {
            Location::Bar => &self.bar,
            Location::Off => &self.off,
            Location::Spot(spot) => &self.spots[spot.index()],
        }
    }

    pub(crate) fn stack_mut(&mut self, location: Location) -> &mut Vec<Piece> {
        match location {
            Location::Bar => &mut self.bar,
            Location::Off => &mut self.off,
            Location::Spot(spot) => &mut self.spots[spot.index()],
        }
    }

    /// Top piece of a spot, if any.
    pub fn top(&self, spot: SpotIndex) -> Option<Piece> {
        self.spots[spot.index()].last().copied()
    }

    /// Number of pieces of a colour at a location.
    pub fn count_at(&self, location: Location, piece: Piece) -> usize {
        self.stack(location).iter().filter(|p| **p == piece).count()
    }

    /// Number of pieces of a colour anywhere: spots, bar and off-tray.
    pub fn count(&self, piece: Piece) -> usize {
        self.spots
            .iter()
            .chain([&self.bar, &self.off])
            .flat_map(|stack| stack.iter())
            .filter(|p| **p == piece)
            .count()
    }

    /// Pieces of a colour waiting on the bar.
    pub fn bar_count(&self, piece: Piece) -> usize {
        self.count_at(Location::Bar, piece)
    }

    /// Pieces of a colour already borne off.
    pub fn off_count(&self, piece: Piece) -> usize {
        self.count_at(Location::Off, piece)
    }

    /// All spot stacks in index order.
    pub fn spots(&self) -> &[Vec<Piece>] {
        &self.spots
    }

    /// Whether every piece of a colour still in play sits in its home region.
    #[instrument(skip(self))]
    pub fn all_home(&self, piece: Piece) -> bool {
        self.bar_count(piece) == 0
            && SpotIndex::all()
                .filter(|spot| !piece.is_home(*spot))
                .all(|spot| self.count_at(Location::Spot(spot), piece) == 0)
    }

    /// Removes one piece of `piece`'s colour from a location.
    ///
    /// Searches from the top so spot stacks keep their rendering order.
    pub(crate) fn take(&mut self, location: Location, piece: Piece) -> bool {
        let stack = self.stack_mut(location);
        match stack.iter().rposition(|p| *p == piece) {
            Some(position) => {
                stack.remove(position);
                true
            }
            None => false,
        }
    }

    /// Formats the board as a human-readable string.
    ///
    /// Top row shows spots 13..=24, bottom row 12..=1, each cell as colour and
    /// count (`r2`, `b5`) or `.` when empty.
    pub fn display(&self) -> String {
        let cell = |index: usize| {
            let stack = &self.spots[index];
            match stack.last() {
                Some(piece) => format!("{}{:<2}", piece, stack.len()),
                None => " . ".to_string(),
            }
        };

        let top: Vec<String> = (12..24).map(&cell).collect();
        let bottom: Vec<String> = (0..12).rev().map(&cell).collect();
        let numbers_top: Vec<String> = (13..=24).map(|n| format!("{:<3}", n)).collect();
        let numbers_bottom: Vec<String> = (1..=12).rev().map(|n| format!("{:<3}", n)).collect();

        let tray = |stack: &[Piece]| {
            format!(
                "r{} b{}",
                stack.iter().filter(|p| **p == Piece::Red).count(),
                stack.iter().filter(|p| **p == Piece::Black).count()
            )
        };

        let mut result = String::new();
        result.push_str(&numbers_top.join(" "));
        result.push('\n');
        result.push_str(&top.join(" "));
        result.push('\n');
        result.push_str(&bottom.join(" "));
        result.push('\n');
        result.push_str(&numbers_bottom.join(" "));
        result.push('\n');
        result.push_str(&format!("bar: {}  off: {}", tray(&self.bar), tray(&self.off)));
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
