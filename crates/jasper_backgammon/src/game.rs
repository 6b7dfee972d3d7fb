//! The move engine: a board, its log, and the dice in hand.
//!
//! The log is the authoritative game record. The board is derived from it by
//! replaying every line onto a fresh starting layout.

use crate::action::{IllegalMoveError, MoveRequest, MoveResult};
use crate::board::Board;
use crate::contracts::{Contract, DropContract};
use crate::dice::{ActiveRoll, Dice};
use crate::notation::{NotationError, Record};
use crate::rules::{Occupancy, can_bear_off, legal_destinations, occupancy, pip_distance, source_holds};
use crate::types::{Location, Piece};
use tracing::{debug, instrument, trace, warn};

/// Separator between log lines in a serialized comment.
pub const LINE_SEPARATOR: &str = "\n";

/// A backgammon game owned by one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub(crate) board: Board,
    pub(crate) log: Vec<Record>,
    pub(crate) roll: Option<ActiveRoll>,
}

impl Game {
    /// Creates a game at the standard starting layout with an empty log.
    #[instrument]
    pub fn new() -> Self {
        Self::with_board(Board::new())
    }

    /// Creates a game from a custom position with an empty log.
    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            log: Vec::new(),
            roll: None,
        }
    }

    /// Rebuilds a game from a serialized comment.
    #[instrument(skip(comment))]
    pub fn from_comment(comment: &str) -> Self {
        let mut game = Self::new();
        game.reset(Some(comment));
        game
    }

    /// Resets to the starting layout, then replays `serialized_log` if given.
    ///
    /// Lines are replayed in literal order. Lines that do not parse, and
    /// moves the engine rejects, are skipped and leave no log entry. Returns
    /// how many non-blank lines were skipped.
    #[instrument(skip(self, serialized_log))]
    pub fn reset(&mut self, serialized_log: Option<&str>) -> usize {
        self.board = Board::new();
        self.log.clear();
        self.roll = None;

        let Some(text) = serialized_log else {
            return 0;
        };

        let mut skipped = 0usize;
        for (number, line) in text.lines().enumerate() {
            match Record::parse(line) {
                Ok(record) => {
                    if !self.replay(record) {
                        warn!(line = number + 1, text = %line, "Rejected replayed move");
                        skipped += 1;
                    }
                }
                Err(NotationError::Empty) => {}
                Err(error) => {
                    warn!(line = number + 1, text = %line, %error, "Skipping unreadable notation");
                    skipped += 1;
                }
            }
        }
        debug!(records = self.log.len(), skipped, "Replayed comment");
        skipped
    }

    /// Applies one parsed record. Returns false when a move is rejected.
    fn replay(&mut self, record: Record) -> bool {
        match record {
            Record::Roll { piece, dice } => match self.dashed_move(&record) {
                Some(mv) => {
                    trace!(line = %mv, "Reading dashed line as a move");
                    self.replay_move(mv)
                }
                None => {
                    self.roll(piece, dice);
                    true
                }
            },
            _ => self.replay_move(record),
        }
    }

    /// The move reading of an `a-b` roll line, when the same colour is mid
    /// turn and holds a die that makes that move legal.
    fn dashed_move(&self, record: &Record) -> Option<Record> {
        let mv = record.as_move()?;
        let (from, to) = mv.endpoints()?;
        self.legal_destinations(mv.piece(), from)
            .contains(&to)
            .then_some(mv)
    }

    fn replay_move(&mut self, record: Record) -> bool {
        let Some((from, to)) = record.endpoints() else {
            return false;
        };
        match self.try_move(record.piece(), from, to) {
            Some(result) => {
                self.spend_die(&result);
                true
            }
            None => false,
        }
    }

    /// Hands dice to a player and records the roll.
    #[instrument(skip(self))]
    pub fn roll(&mut self, piece: Piece, dice: Dice) {
        self.roll = Some(ActiveRoll::new(piece, dice));
        self.log.push(Record::Roll { piece, dice });
        debug!(%piece, first = dice.first(), second = dice.second(), "Dice rolled");
    }

    /// Validates and applies a single-die move without touching the dice.
    ///
    /// Returns `None`, changing nothing, when `from == to`, the move runs
    /// against the colour's direction, exceeds one die, starts where the
    /// colour has no piece, lands on two or more opposing pieces, or bears
    /// off before every piece of the colour is home. Landing on a lone
    /// opposing piece sends it to the bar.
    #[instrument(skip(self))]
    pub fn try_move(&mut self, piece: Piece, from: Location, to: Location) -> Option<MoveResult> {
        if from == to {
            return None;
        }
        let distance = pip_distance(piece, from, to)?;
        if !source_holds(&self.board, piece, from) {
            trace!("No piece at source");
            return None;
        }

        let hit = match to {
            Location::Spot(spot) => match occupancy(&self.board, piece, spot) {
                Occupancy::Open => false,
                Occupancy::Blot => true,
                Occupancy::Blocked => {
                    trace!("Destination blocked");
                    return None;
                }
            },
            Location::Off => {
                if !can_bear_off(&self.board, piece) {
                    trace!("Pieces remain outside home");
                    return None;
                }
                false
            }
            Location::Bar => return None,
        };
        let record = Record::for_move(piece, from, to, hit)?;

        self.board.take(from, piece);
        if hit {
            self.board.take(to, piece.opponent());
            self.board.place(Location::Bar, piece.opponent(), 1);
        }
        self.board.place(to, piece, 1);
        self.log.push(record);

        debug!(line = %record, hit, "Move applied");
        Some(MoveResult::new(piece, from, to, distance, hit, record))
    }

    /// Applies a user drop, spending the die it used.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMoveError`] when the request is not among the legal
    /// destinations for the dice in hand; the game is left unchanged.
    #[instrument(skip(self))]
    pub fn drop(&mut self, request: MoveRequest) -> Result<MoveResult, IllegalMoveError> {
        #[cfg(debug_assertions)]
        let before = self.clone();

        DropContract::pre(self, &request)?;

        let result = self
            .try_move(request.piece, request.from, request.to)
            .ok_or(IllegalMoveError::NoMatchingDie(request.piece, request.from, request.to))?;
        self.spend_die(&result);

        #[cfg(debug_assertions)]
        DropContract::post(&before, self)?;

        Ok(result)
    }

    /// [`Game::drop`] for raw UI values (`-1` bar, `-2` off).
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMoveError::InvalidLocation`] for values off the board,
    /// otherwise as [`Game::drop`].
    pub fn drop_raw(&mut self, piece: Piece, from: i8, to: i8) -> Result<MoveResult, IllegalMoveError> {
        self.drop(MoveRequest::from_raw(piece, from, to)?)
    }

    fn spend_die(&mut self, result: &MoveResult) {
        if let Some(roll) = self.roll.as_mut().filter(|roll| roll.owner() == *result.piece()) {
            let bearing_off = *result.to() == Location::Off;
            if roll.consume_for(*result.distance(), bearing_off).is_none() {
                trace!("No die matched replayed move");
            }
        }
    }

    /// Every location `piece` may currently reach from `from`.
    pub fn legal_destinations(&self, piece: Piece, from: Location) -> Vec<Location> {
        legal_destinations(&self.board, self.roll.as_ref(), piece, from)
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The ordered log of applied rolls and moves.
    pub fn log(&self) -> &[Record] {
        &self.log
    }

    /// The dice currently in hand, if anyone has rolled.
    pub fn active_roll(&self) -> Option<&ActiveRoll> {
        self.roll.as_ref()
    }

    /// Log lines in canonical notation.
    pub fn lines(&self) -> Vec<String> {
        self.log.iter().map(Record::to_string).collect()
    }

    /// The serialized comment: log lines joined by [`LINE_SEPARATOR`].
    pub fn comment(&self) -> String {
        self.comment_with(LINE_SEPARATOR)
    }

    /// The serialized comment joined by a custom separator.
    pub fn comment_with(&self, separator: &str) -> String {
        self.lines().join(separator)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spot(index: usize) -> Location {
        Location::spot(index).unwrap()
    }

    #[test]
    fn test_same_location_is_noop() {
        let mut game = Game::new();
        assert!(game.try_move(Piece::Red, spot(0), spot(0)).is_none());
        assert!(game.log().is_empty());
        assert_eq!(game.board(), &Board::new());
    }

    #[test]
    fn test_wrong_direction_rejected_silently() {
        let mut game = Game::new();
        assert!(game.try_move(Piece::Red, spot(11), spot(9)).is_none());
        assert!(game.try_move(Piece::Black, spot(12), spot(14)).is_none());
        assert!(game.log().is_empty());
    }

    #[test]
    fn test_move_appends_canonical_line() {
        let mut game = Game::new();
        let result = game.try_move(Piece::Red, spot(0), spot(2)).unwrap();
        assert!(!*result.hit());
        assert_eq!(*result.distance(), 2);
        assert_eq!(game.comment(), "r 1 3");
    }

    #[test]
    fn test_bar_entry_line() {
        let mut board = Board::empty();
        board.place(Location::Bar, Piece::Black, 1);
        let mut game = Game::with_board(board);
        game.try_move(Piece::Black, Location::Bar, spot(20)).unwrap();
        assert_eq!(game.comment(), "b 21");
        assert_eq!(game.board().bar_count(Piece::Black), 0);
    }

    #[test]
    fn test_bear_off_moves_to_shared_tray() {
        let mut board = Board::empty();
        board.place(spot(1), Piece::Black, 1).place(Location::Off, Piece::Red, 3);
        let mut game = Game::with_board(board);
        game.try_move(Piece::Black, spot(1), Location::Off).unwrap();
        assert_eq!(game.board().off_count(Piece::Black), 1);
        assert_eq!(game.board().off_count(Piece::Red), 3);
        assert_eq!(game.comment(), "b 2 off");
    }

    #[test]
    fn test_drop_spends_dice() {
        let mut game = Game::new();
        game.roll(Piece::Red, Dice::new(3, 1).unwrap());
        game.drop(MoveRequest::new(Piece::Red, spot(0), spot(3))).unwrap();
        assert_eq!(game.active_roll().unwrap().remaining(), &[1]);
        game.drop(MoveRequest::new(Piece::Red, spot(3), spot(4))).unwrap();
        assert!(game.active_roll().unwrap().is_exhausted());

        let err = game
            .drop(MoveRequest::new(Piece::Red, spot(0), spot(1)))
            .unwrap_err();
        assert_eq!(err, IllegalMoveError::NoDiceRemaining(Piece::Red));
        assert_eq!(game.comment(), "r 3-1\nr 1 4\nr 4 5");
    }

    #[test]
    fn test_drop_raw_rejects_bad_location() {
        let mut game = Game::new();
        assert_eq!(
            game.drop_raw(Piece::Red, 0, 30),
            Err(IllegalMoveError::InvalidLocation(30))
        );
    }

    #[test]
    fn test_failed_drop_leaves_game_unchanged() {
        let mut game = Game::new();
        game.roll(Piece::Red, Dice::new(5, 5).unwrap());
        let before = game.clone();
        assert!(game.drop(MoveRequest::new(Piece::Red, spot(0), spot(5))).is_err());
        assert_eq!(game, before);
    }

    #[test]
    fn test_replay_skips_malformed_lines() {
        let game = Game::from_comment("r 3-1\nnonsense\nr 1 4\n\nr 99 100\nr 4 5");
        assert_eq!(game.comment(), "r 3-1\nr 1 4\nr 4 5");
    }

    #[test]
    fn test_replay_skips_rejected_moves() {
        // Spot 6 (1-based) holds five black pieces.
        let game = Game::from_comment("r 5-2\nr 1 6\nr 1 3");
        assert_eq!(game.comment(), "r 5-2\nr 1 3");
        assert_eq!(game.active_roll().unwrap().remaining(), &[5]);
    }

    #[test]
    fn test_reset_without_log_restores_start() {
        let mut game = Game::from_comment("r 3-1\nr 1 4");
        game.reset(None);
        assert_eq!(game, Game::new());
    }

    #[test]
    fn test_dashed_move_mid_turn_replays_as_move() {
        let game = Game::from_comment("r 3-2\nr 1-4");
        assert_eq!(game.board().count_at(spot(3), Piece::Red), 1);
        assert_eq!(game.board().count_at(spot(0), Piece::Red), 1);
        assert_eq!(game.active_roll().unwrap().remaining(), &[2]);
        assert_eq!(game.comment(), "r 3-2\nr 1 4");
    }

    #[test]
    fn test_dashed_line_without_covering_die_is_a_roll() {
        // Red holds a 6-5, so 1-4 cannot be a move.
        let game = Game::from_comment("r 6-5\nr 1-4");
        assert_eq!(game.board().count_at(spot(0), Piece::Red), 2);
        assert_eq!(game.active_roll().unwrap().remaining(), &[1, 4]);

        // The other colour holds the dice, so this starts Black's turn.
        let game = Game::from_comment("r 3-2\nb 1-4");
        let roll = game.active_roll().unwrap();
        assert_eq!(roll.owner(), Piece::Black);
        assert_eq!(roll.remaining(), &[1, 4]);
    }

    #[test]
    fn test_reset_reports_skipped_lines() {
        let mut game = Game::new();
        assert_eq!(game.reset(Some("r 3-1\nnonsense\n\nr 1 6\nr 1 4")), 2);
        assert_eq!(game.reset(None), 0);
    }

    #[test]
    fn test_later_roll_replaces_dice() {
        let game = Game::from_comment("r 3-1\nb 6-4");
        let roll = game.active_roll().unwrap();
        assert_eq!(roll.owner(), Piece::Black);
        assert_eq!(roll.remaining(), &[6, 4]);
    }
}
