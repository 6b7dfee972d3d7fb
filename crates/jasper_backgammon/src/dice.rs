//! Dice and the pips a player still has to spend.

use crate::types::Piece;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Highest face on a die.
pub const MAX_FACE: u8 = 6;

/// A validated pair of die faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice {
    first: u8,
    second: u8,
}

impl Dice {
    /// Creates a pair, `None` unless both faces are in 1..=6.
    pub fn new(first: u8, second: u8) -> Option<Self> {
        (is_face(first) && is_face(second)).then_some(Self { first, second })
    }

    /// Rolls two dice.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            first: rng.random_range(1..=MAX_FACE),
            second: rng.random_range(1..=MAX_FACE),
        }
    }

    /// The first face.
    pub fn first(&self) -> u8 {
        self.first
    }

    /// The second face.
    pub fn second(&self) -> u8 {
        self.second
    }

    /// Whether both faces match.
    pub fn is_double(&self) -> bool {
        self.first == self.second
    }

    /// Pips this roll grants: two, or four for a double.
    pub fn pips(&self) -> Vec<u8> {
        if self.is_double() {
            vec![self.first; 4]
        } else {
            vec![self.first, self.second]
        }
    }
}

/// Whether a value is a legal die face.
pub fn is_face(value: u8) -> bool {
    (1..=MAX_FACE).contains(&value)
}

/// The dice currently held by one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveRoll {
    owner: Piece,
    dice: Dice,
    remaining: Vec<u8>,
}

impl ActiveRoll {
    /// Hands a fresh roll to a player.
    #[instrument]
    pub fn new(owner: Piece, dice: Dice) -> Self {
        Self {
            owner,
            dice,
            remaining: dice.pips(),
        }
    }

    /// The player holding the dice.
    pub fn owner(&self) -> Piece {
        self.owner
    }

    /// The roll these pips came from.
    pub fn dice(&self) -> Dice {
        self.dice
    }

    /// Pips not yet spent.
    pub fn remaining(&self) -> &[u8] {
        &self.remaining
    }

    /// Whether every pip has been spent.
    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Whether `piece` can still move with these dice.
    pub fn usable_by(&self, piece: Piece) -> bool {
        self.owner == piece && !self.is_exhausted()
    }

    /// Distinct unspent pips, smallest first.
    pub fn distinct_pips(&self) -> Vec<u8> {
        let mut pips = self.remaining.clone();
        pips.sort_unstable();
        pips.dedup();
        pips
    }

    /// Spends the pip that covers a move of `distance`.
    ///
    /// Prefers an exact pip. When bearing off, the smallest larger pip may
    /// be spent instead. Returns the pip spent.
    #[instrument(skip(self))]
    pub fn consume_for(&mut self, distance: u8, bearing_off: bool) -> Option<u8> {
        let exact = self.remaining.iter().position(|pip| *pip == distance);
        let position = exact.or_else(|| {
            if !bearing_off {
                return None;
            }
            self.remaining
                .iter()
                .enumerate()
                .filter(|(_, pip)| **pip > distance)
                .min_by_key(|(_, pip)| **pip)
                .map(|(position, _)| position)
        })?;
        Some(self.remaining.remove(position))
    }
}
