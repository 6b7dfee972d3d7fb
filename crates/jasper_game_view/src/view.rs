//! One controller per open game view.
//!
//! The view owns the [`Game`] for a single document and is the only thing
//! that mutates it. Every accepted action is saved immediately; when another
//! client saved first, the view re-merges against the stored comment and
//! retries.

use crate::config::SyncConfig;
use crate::merger::ThreeWayMerge;
use crate::store::{CommentStore, SaveOutcome, StoreError, StoredComment, Version};
use jasper_backgammon::{
    Dice, Game, IllegalMoveError, Location, MoveRequest, MoveResult, Piece, auto_merge,
};
use tracing::{debug, info, instrument, warn};

/// What happened to the local comment after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The comment was persisted.
    Saved {
        /// Comment this view last persisted before the save. A remote
        /// revision merged in along the way is not reflected here.
        previous: String,
        /// Comment now persisted.
        comment: String,
        /// Version of the persisted comment.
        version: Version,
        /// Whether a concurrent edit was merged in first.
        merged: bool,
    },
    /// A concurrent edit could not be merged automatically; a person must
    /// pick one text and pass it to [`GameView::resolve_with`].
    NeedsManualResolution {
        /// The local comment that failed to save.
        local: String,
        /// The comment another client persisted.
        remote: StoredComment,
    },
}

impl SyncOutcome {
    /// Whether the comment was persisted.
    pub fn is_saved(&self) -> bool {
        matches!(self, SyncOutcome::Saved { .. })
    }
}

/// Failure of a game view action.
#[derive(Debug, Clone, derive_more::Display)]
pub enum ViewError {
    /// The requested move is not legal.
    #[display("Illegal move: {}", _0)]
    Illegal(IllegalMoveError),

    /// The document store failed.
    #[display("{}", _0)]
    Store(StoreError),

    /// Every save attempt met a newer version.
    #[display("Gave up saving after {} conflicting attempts", attempts)]
    AttemptsExhausted {
        /// Attempts made.
        attempts: u32,
    },
}

impl std::error::Error for ViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewError::Illegal(e) => Some(e),
            ViewError::Store(e) => Some(e),
            ViewError::AttemptsExhausted { .. } => None,
        }
    }
}

impl From<IllegalMoveError> for ViewError {
    fn from(err: IllegalMoveError) -> Self {
        ViewError::Illegal(err)
    }
}

impl From<StoreError> for ViewError {
    fn from(err: StoreError) -> Self {
        ViewError::Store(err)
    }
}

/// A single open game backed by a stored comment.
pub struct GameView<S, M> {
    game: Game,
    base: StoredComment,
    pending: Option<StoredComment>,
    store: S,
    merger: M,
    config: SyncConfig,
}

impl<S, M> GameView<S, M>
where
    S: CommentStore,
    M: ThreeWayMerge,
{
    /// Creates a view over an already fetched comment.
    #[instrument(skip_all, fields(version = %stored.version()))]
    pub fn new(store: S, merger: M, config: SyncConfig, stored: StoredComment) -> Self {
        let game = Game::from_comment(stored.comment());
        Self {
            game,
            base: stored,
            pending: None,
            store,
            merger,
            config,
        }
    }

    /// Fetches the comment from the store and opens a view on it.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Store`] if the fetch fails.
    #[instrument(skip_all)]
    pub async fn open(store: S, merger: M, config: SyncConfig) -> Result<Self, ViewError> {
        let stored = store.fetch().await?;
        info!(version = %stored.version(), "Opened game view");
        Ok(Self::new(store, merger, config, stored))
    }

    /// The game as currently derived.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// The comment as last persisted by this view.
    pub fn base(&self) -> &StoredComment {
        &self.base
    }

    /// The remote comment awaiting a manual decision, if any.
    pub fn pending(&self) -> Option<&StoredComment> {
        self.pending.as_ref()
    }

    /// The store backing this view.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The local comment text.
    pub fn comment(&self) -> String {
        self.game.comment_with(self.config.line_separator())
    }

    /// Legal destinations for a piece picked up at `from`.
    pub fn legal_destinations(&self, piece: Piece, from: Location) -> Vec<Location> {
        self.game.legal_destinations(piece, from)
    }

    /// Records a roll and saves.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError`] if saving fails.
    #[instrument(skip(self))]
    pub async fn roll(&mut self, piece: Piece, dice: Dice) -> Result<SyncOutcome, ViewError> {
        self.game.roll(piece, dice);
        self.save().await
    }

    /// Applies a user drop and saves.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Illegal`] without saving when the drop is not
    /// legal, otherwise any error from [`GameView::save`].
    #[instrument(skip(self))]
    pub async fn drop(
        &mut self,
        request: MoveRequest,
    ) -> Result<(MoveResult, SyncOutcome), ViewError> {
        let result = self.game.drop(request)?;
        let outcome = self.save().await?;
        Ok((result, outcome))
    }

    /// Saves the local comment, re-merging on version conflicts.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Store`] on store failure and
    /// [`ViewError::AttemptsExhausted`] when every attempt conflicted.
    #[instrument(skip(self), fields(version = %self.base.version()))]
    pub async fn save(&mut self) -> Result<SyncOutcome, ViewError> {
        let previous = self.base.comment().clone();
        let attempts = *self.config.max_merge_attempts();
        let mut merged = false;

        for attempt in 1..=attempts {
            let local = self.comment();
            match self.store.save(&local, self.base.version()).await? {
                SaveOutcome::Saved(version) => {
                    info!(attempt, %version, merged, "Comment saved");
                    self.base = StoredComment::new(local.clone(), version.clone());
                    self.pending = None;
                    return Ok(SyncOutcome::Saved {
                        previous,
                        comment: local,
                        version,
                        merged,
                    });
                }
                SaveOutcome::Conflict(remote) => {
                    debug!(attempt, remote = %remote.version(), "Save conflicted");
                    let regions = self
                        .merger
                        .merge(self.base.comment(), &local, remote.comment());
                    match auto_merge(&regions) {
                        Some(lines) => {
                            let text = lines.join(self.config.line_separator());
                            let skipped = self.game.reset(Some(&text));
                            if skipped > 0 {
                                warn!(skipped, "Merged comment no longer replays cleanly");
                                self.game.reset(Some(&local));
                                return Ok(self.needs_manual_resolution(local, remote));
                            }
                            info!(lines = lines.len(), "Auto-merged concurrent edit");
                            self.base = remote;
                            merged = true;
                        }
                        None => return Ok(self.needs_manual_resolution(local, remote)),
                    }
                }
            }
        }

        warn!(attempts, "Giving up after repeated conflicts");
        Err(ViewError::AttemptsExhausted { attempts })
    }

    fn needs_manual_resolution(&mut self, local: String, remote: StoredComment) -> SyncOutcome {
        warn!(remote = %remote.version(), "Conflict needs manual resolution");
        self.pending = Some(remote.clone());
        SyncOutcome::NeedsManualResolution { local, remote }
    }

    /// Adopts the text a person picked for a pending conflict and saves it.
    ///
    /// # Errors
    ///
    /// As [`GameView::save`].
    #[instrument(skip(self, comment))]
    pub async fn resolve_with(&mut self, comment: &str) -> Result<SyncOutcome, ViewError> {
        if let Some(remote) = self.pending.take() {
            self.base = remote;
        }
        self.game.reset(Some(comment));
        self.save().await
    }

    /// Rebuilds the board when the document changed identity elsewhere.
    ///
    /// Unsaved local edits are discarded. Returns whether anything changed.
    #[instrument(skip(self, stored), fields(version = %stored.version()))]
    pub fn refresh(&mut self, stored: StoredComment) -> bool {
        if stored.version() == self.base.version() {
            return false;
        }
        self.game.reset(Some(stored.comment()));
        self.base = stored;
        self.pending = None;
        true
    }
}
