//! Text notation for rolls and moves.
//!
//! One record per line, spot numbers 1-based:
//!
//! - roll: `r 5-2`
//! - move: `r 1 4`, `r 1/4`, or `r 13-7`
//! - hit: `r 1x4` (`X` accepted), `r x4` when entering from the bar
//! - bar entry: `r 4`
//! - bear off: `r 20 off`, `r 20/off`
//!
//! `<piece> <a>-<b>` with both numbers valid die faces parses as a roll;
//! replay reads it as a move instead while that colour still holds a die
//! covering it (see [`Record::as_move`]). Canonical output writes moves space-separated so they never collide with
//! rolls.

use crate::dice::{Dice, is_face};
use crate::types::{Location, Piece, SpotIndex};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// One line of the game log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Record {
    /// A player rolled the dice.
    Roll {
        /// Who rolled.
        piece: Piece,
        /// The faces rolled.
        dice: Dice,
    },
    /// A plain move between two spots.
    Move {
        /// Moving colour.
        piece: Piece,
        /// Source spot.
        from: SpotIndex,
        /// Destination spot.
        to: SpotIndex,
    },
    /// A move that sent a lone opposing piece to the bar.
    Hit {
        /// Moving colour.
        piece: Piece,
        /// Source spot, or the bar.
        from: Location,
        /// Destination spot.
        to: SpotIndex,
    },
    /// A piece re-entering from the bar.
    BarEntry {
        /// Entering colour.
        piece: Piece,
        /// Entry spot.
        to: SpotIndex,
    },
    /// A piece borne off.
    BearOff {
        /// Colour borne off.
        piece: Piece,
        /// Source spot.
        from: SpotIndex,
    },
}

impl Record {
    /// Builds the record for an applied move.
    pub fn for_move(piece: Piece, from: Location, to: Location, hit: bool) -> Option<Self> {
        match (from, to) {
            (_, Location::Spot(to)) if hit => Some(Record::Hit { piece, from, to }),
            (Location::Bar, Location::Spot(to)) => Some(Record::BarEntry { piece, to }),
            (Location::Spot(from), Location::Spot(to)) => Some(Record::Move { piece, from, to }),
            (Location::Spot(from), Location::Off) => Some(Record::BearOff { piece, from }),
            _ => None,
        }
    }

    /// The colour this record belongs to.
    pub fn piece(&self) -> Piece {
        match self {
            Record::Roll { piece, .. }
            | Record::Move { piece, .. }
            | Record::Hit { piece, .. }
            | Record::BarEntry { piece, .. }
            | Record::BearOff { piece, .. } => *piece,
        }
    }

    /// Whether this is a dice roll.
    pub fn is_roll(&self) -> bool {
        matches!(self, Record::Roll { .. })
    }

    /// Whether this moves a piece.
    pub fn is_move(&self) -> bool {
        !self.is_roll()
    }

    /// Source and destination for moving records.
    pub fn endpoints(&self) -> Option<(Location, Location)> {
        match *self {
            Record::Roll { .. } => None,
            Record::Move { from, to, .. } => Some((Location::Spot(from), Location::Spot(to))),
            Record::Hit { from, to, .. } => Some((from, Location::Spot(to))),
            Record::BarEntry { to, .. } => Some((Location::Bar, Location::Spot(to))),
            Record::BearOff { from, .. } => Some((Location::Spot(from), Location::Off)),
        }
    }

    /// The `<from>-<to>` move a roll line would be if read as a move.
    ///
    /// Every roll is written `a-b`, which is also the dashed move grammar.
    pub fn as_move(&self) -> Option<Record> {
        match *self {
            Record::Roll { piece, dice } => Some(Record::Move {
                piece,
                from: SpotIndex::from_number(dice.first())?,
                to: SpotIndex::from_number(dice.second())?,
            }),
            _ => None,
        }
    }

    /// Parses one notation line.
    #[instrument]
    pub fn parse(line: &str) -> Result<Self, NotationError> {
        let line = line.trim();
        let mut tokens = line.split_whitespace();
        let symbol = tokens.next().ok_or(NotationError::Empty)?;
        let piece = Piece::from_symbol(symbol)
            .ok_or_else(|| NotationError::UnknownPiece(symbol.to_string()))?;

        let rest: Vec<&str> = tokens.collect();
        match rest.as_slice() {
            [token] => parse_token(piece, token),
            [from, to] => parse_pair(piece, from, to),
            _ => Err(NotationError::Malformed(line.to_string())),
        }
    }
}

fn parse_token(piece: Piece, token: &str) -> Result<Record, NotationError> {
    if let Some((from, to)) = token.split_once(['x', 'X']) {
        let to = parse_spot(to)?;
        let from = if from.is_empty() || from.eq_ignore_ascii_case("bar") {
            Location::Bar
        } else {
            Location::Spot(parse_spot(from)?)
        };
        return Ok(Record::Hit { piece, from, to });
    }

    if let Some((from, to)) = token.split_once('/') {
        return parse_pair(piece, from, to);
    }

    if let Some((first, second)) = token.split_once('-') {
        if let Some(dice) = parse_dice(first, second) {
            return Ok(Record::Roll { piece, dice });
        }
        return parse_pair(piece, first, second);
    }

    Ok(Record::BarEntry {
        piece,
        to: parse_spot(token)?,
    })
}

fn parse_pair(piece: Piece, from: &str, to: &str) -> Result<Record, NotationError> {
    if from.eq_ignore_ascii_case("bar") {
        return Ok(Record::BarEntry {
            piece,
            to: parse_spot(to)?,
        });
    }

    let from = parse_spot(from)?;
    if to.eq_ignore_ascii_case("off") {
        Ok(Record::BearOff { piece, from })
    } else {
        Ok(Record::Move {
            piece,
            from,
            to: parse_spot(to)?,
        })
    }
}

fn parse_dice(first: &str, second: &str) -> Option<Dice> {
    let first: u8 = first.parse().ok()?;
    let second: u8 = second.parse().ok()?;
    if is_face(first) && is_face(second) {
        Dice::new(first, second)
    } else {
        None
    }
}

fn parse_spot(token: &str) -> Result<SpotIndex, NotationError> {
    let number: u8 = token
        .parse()
        .map_err(|_| NotationError::NotANumber(token.to_string()))?;
    SpotIndex::from_number(number).ok_or(NotationError::SpotOutOfRange(number))
}

impl FromStr for Record {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Record::parse(s)
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Record::Roll { piece, dice } => {
                write!(f, "{} {}-{}", piece, dice.first(), dice.second())
            }
            Record::Move { piece, from, to } => write!(f, "{} {} {}", piece, from, to),
            Record::Hit {
                piece,
                from: Location::Spot(from),
                to,
            } => write!(f, "{} {}x{}", piece, from, to),
            Record::Hit { piece, to, .. } => write!(f, "{} x{}", piece, to),
            Record::BarEntry { piece, to } => write!(f, "{} {}", piece, to),
            Record::BearOff { piece, from } => write!(f, "{} {} off", piece, from),
        }
    }
}

/// Error produced when a notation line cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum NotationError {
    /// Blank line.
    #[display("Empty notation line")]
    Empty,

    /// First token is not `r` or `b`.
    #[display("Unknown piece {:?}", _0)]
    UnknownPiece(String),

    /// A spot token is not a number.
    #[display("Expected a spot number, found {:?}", _0)]
    NotANumber(String),

    /// A spot number outside 1..=24.
    #[display("Spot {} is off the board", _0)]
    SpotOutOfRange(u8),

    /// Wrong number of tokens.
    #[display("Malformed notation line {:?}", _0)]
    Malformed(String),
}

impl std::error::Error for NotationError {}
