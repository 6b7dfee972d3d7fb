//! Core domain types for backgammon.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of points on the board.
pub const SPOT_COUNT: usize = 24;

/// Number of pieces each colour starts with.
pub const PIECES_PER_COLOR: usize = 15;

/// Raw sentinel UI callers use for the bar.
pub const BAR_RAW: i8 = -1;

/// Raw sentinel UI callers use for the off-tray.
pub const OFF_RAW: i8 = -2;

/// Progress value of a borne-off piece (one past the last spot).
pub const OFF_PROGRESS: u8 = 25;

/// A piece colour. Pieces carry no identity beyond colour.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Piece {
    /// Red, moves from low index to high index.
    Red,
    /// Black, moves from high index to low index.
    Black,
}

impl Piece {
    /// Returns the opposing colour.
    pub fn opponent(self) -> Self {
        match self {
            Piece::Red => Piece::Black,
            Piece::Black => Piece::Red,
        }
    }

    /// Notation symbol (`r` or `b`).
    pub fn symbol(self) -> char {
        match self {
            Piece::Red => 'r',
            Piece::Black => 'b',
        }
    }

    /// Parses a notation symbol, accepting either case.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "r" | "R" => Some(Piece::Red),
            "b" | "B" => Some(Piece::Black),
            _ => None,
        }
    }

    /// How far along its own track a location is for this colour.
    ///
    /// The bar is 0, spots are 1..=24 walking in this colour's direction,
    /// and the off-tray is [`OFF_PROGRESS`]. Pip distance between two
    /// locations is the difference of their progress values.
    #[instrument]
    pub fn progress(self, location: Location) -> u8 {
        match (self, location) {
            (_, Location::Bar) => 0,
            (_, Location::Off) => OFF_PROGRESS,
            (Piece::Red, Location::Spot(spot)) => spot.get() + 1,
            (Piece::Black, Location::Spot(spot)) => SPOT_COUNT as u8 - spot.get(),
        }
    }

    /// Inverse of [`Piece::progress`] for landing squares (1..=25).
    #[instrument]
    pub fn landing(self, progress: u8) -> Option<Location> {
        match progress {
            0 => None,
            OFF_PROGRESS => Some(Location::Off),
            p if p < OFF_PROGRESS => {
                let index = match self {
                    Piece::Red => p - 1,
                    Piece::Black => SPOT_COUNT as u8 - p,
                };
                SpotIndex::new(index as usize).map(Location::Spot)
            }
            _ => None,
        }
    }

    /// Whether a spot lies inside this colour's home region.
    ///
    /// Red's home is spots 18..=23, Black's is 0..=5.
    pub fn is_home(self, spot: SpotIndex) -> bool {
        match self {
            Piece::Red => spot.index() >= 18,
            Piece::Black => spot.index() <= 5,
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A 0-based board point index (0..24).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SpotIndex(u8);

impl SpotIndex {
    /// Creates an index, `None` when out of range.
    pub fn new(index: usize) -> Option<Self> {
        (index < SPOT_COUNT).then_some(Self(index as u8))
    }

    /// Creates an index from a 1-based notation number.
    pub fn from_number(number: u8) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|index| Self::new(index as usize))
    }

    /// The raw 0-based value.
    pub fn get(self) -> u8 {
        self.0
    }

    /// The 0-based value as an array index.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The 1-based number used in notation.
    pub fn number(self) -> u8 {
        self.0 + 1
    }

    /// All 24 spots in index order.
    pub fn all() -> impl Iterator<Item = SpotIndex> {
        (0..SPOT_COUNT as u8).map(SpotIndex)
    }
}

impl TryFrom<u8> for SpotIndex {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value as usize).ok_or_else(|| format!("Spot index {} out of range", value))
    }
}

impl From<SpotIndex> for u8 {
    fn from(spot: SpotIndex) -> Self {
        spot.0
    }
}

impl std::fmt::Display for SpotIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Where a piece can be: on a spot, on the bar, or borne off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// The shared bar holding hit pieces.
    Bar,
    /// One of the 24 board points.
    Spot(SpotIndex),
    /// The shared off-tray.
    Off,
}

impl Location {
    /// Converts a raw UI value (`-1` bar, `-2` off, `0..24` spot).
    pub fn from_raw(raw: i8) -> Option<Self> {
        match raw {
            BAR_RAW => Some(Location::Bar),
            OFF_RAW => Some(Location::Off),
            r if r >= 0 => SpotIndex::new(r as usize).map(Location::Spot),
            _ => None,
        }
    }

    /// Converts back to the raw UI value.
    pub fn to_raw(self) -> i8 {
        match self {
            Location::Bar => BAR_RAW,
            Location::Off => OFF_RAW,
            Location::Spot(spot) => spot.get() as i8,
        }
    }

    /// Shorthand for a spot location; `None` when out of range.
    pub fn spot(index: usize) -> Option<Self> {
        SpotIndex::new(index).map(Location::Spot)
    }

    /// Returns the spot index, if this is a spot.
    pub fn as_spot(self) -> Option<SpotIndex> {
        match self {
            Location::Spot(spot) => Some(spot),
            _ => None,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Bar => write!(f, "bar"),
            Location::Off => write!(f, "off"),
            Location::Spot(spot) => write!(f, "{}", spot),
        }
    }
}
