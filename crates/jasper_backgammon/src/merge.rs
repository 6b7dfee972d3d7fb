//! Auto-resolution policy for three-way merges of a game comment.
//!
//! Two clients appending to the same comment collide at the text level even
//! when their edits are compatible: both players moved, or both rolled. The
//! policy inspects only the last line of each side of a conflict region.
//! Multi-line conflicts reduce to that single comparison.

use crate::notation::Record;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// How a single log line reads to the merge policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum LineKind {
    /// `<piece> <die>-<die>`.
    Roll,
    /// Any other parseable record.
    Move,
    /// Blank or unparseable.
    Unknown,
}

/// Classifies one notation line.
#[instrument]
pub fn classify(line: &str) -> LineKind {
    match Record::parse(line) {
        Ok(record) if record.is_roll() => LineKind::Roll,
        Ok(_) => LineKind::Move,
        Err(_) => LineKind::Unknown,
    }
}

/// One region of a line-based three-way merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeRegion {
    /// Lines every side agrees on.
    Ok(Vec<String>),
    /// Lines the sides disagree on.
    Conflict(Conflict),
}

/// Competing candidates for one conflicting region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    /// Local lines.
    pub a: Vec<String>,
    /// Offset of the local lines.
    #[serde(default)]
    pub a_index: usize,
    /// Remote lines.
    pub b: Vec<String>,
    /// Offset of the remote lines.
    #[serde(default)]
    pub b_index: usize,
    /// Common ancestor lines.
    #[serde(default)]
    pub o: Vec<String>,
    /// Offset of the ancestor lines.
    #[serde(default)]
    pub o_index: usize,
}

impl Conflict {
    /// Creates a conflict from local and remote lines with no ancestor.
    pub fn new<A, B>(a: A, b: B) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        Self {
            a: a.into_iter().map(Into::into).collect(),
            b: b.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    fn last_kinds(&self) -> Option<(LineKind, LineKind)> {
        let local = self.a.last()?;
        let remote = self.b.last()?;
        Some((classify(local), classify(remote)))
    }
}

/// Whether both sides last recorded a move, so both can be kept.
///
/// False when either side is empty or last recorded a roll.
#[instrument]
pub fn can_auto_resolve_move_conflict(conflict: &Conflict) -> bool {
    matches!(conflict.last_kinds(), Some((LineKind::Move, LineKind::Move)))
}

/// Whether both sides last recorded a roll, so both can be kept.
///
/// Covers the same player rolling from two sessions and each player rolling
/// once. False when either side is empty or last recorded a move.
#[instrument]
pub fn can_auto_resolve_roll_conflict(conflict: &Conflict) -> bool {
    matches!(conflict.last_kinds(), Some((LineKind::Roll, LineKind::Roll)))
}

/// Whether either resolver accepts the conflict.
pub fn can_auto_resolve(conflict: &Conflict) -> bool {
    can_auto_resolve_move_conflict(conflict) || can_auto_resolve_roll_conflict(conflict)
}

/// Merges regions into one log without human input.
///
/// Ok regions are kept as-is. Each resolvable conflict contributes the remote
/// lines followed by the local lines, since the remote side is already
/// persisted. Returns `None` when any conflict needs a person to choose.
#[instrument(skip(regions), fields(regions = regions.len()))]
pub fn auto_merge(regions: &[MergeRegion]) -> Option<Vec<String>> {
    let mut lines = Vec::new();
    for region in regions {
        match region {
            MergeRegion::Ok(agreed) => lines.extend(agreed.iter().cloned()),
            MergeRegion::Conflict(conflict) if can_auto_resolve(conflict) => {
                lines.extend(conflict.b.iter().cloned());
                lines.extend(conflict.a.iter().cloned());
            }
            MergeRegion::Conflict(conflict) => {
                debug!(local = ?conflict.a.last(), remote = ?conflict.b.last(), "Conflict needs manual resolution");
                return None;
            }
        }
    }
    debug!(lines = lines.len(), "Auto-merged comment");
    Some(lines)
}
