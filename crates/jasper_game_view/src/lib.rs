//! Game view controller for backgammon comments.
//!
//! Owns one [`jasper_backgammon::Game`] per open document, saves every
//! accepted action to a [`CommentStore`] and re-merges concurrent edits
//! using the auto-resolution policy.
//!
//! # Architecture
//!
//! - **Store**: async persistence with optimistic version checks
//! - **Merger**: pluggable line-based three-way merge
//! - **View**: the save and re-merge loop
//! - **Config**: retry and serialization settings
//!
//! # Example
//!
//! ```
//! use jasper_backgammon::{Dice, MergeRegion, Piece};
//! use jasper_game_view::{GameView, MemoryStore, SyncConfig};
//!
//! # async fn example() -> Result<(), jasper_game_view::ViewError> {
//! let merger = |_: &str, _: &str, _: &str| Vec::<MergeRegion>::new();
//! let mut view = GameView::open(MemoryStore::new(""), merger, SyncConfig::default()).await?;
//! let outcome = view.roll(Piece::Red, Dice::new(3, 1).unwrap()).await?;
//! assert!(outcome.is_saved());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod merger;
mod store;
mod view;

pub use config::{ConfigError, SyncConfig};
pub use merger::ThreeWayMerge;
pub use store::{CommentStore, MemoryStore, SaveOutcome, StoreError, StoredComment, Version};
pub use view::{GameView, SyncOutcome, ViewError};
