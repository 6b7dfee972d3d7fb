//! Three-way merge collaborator.

use jasper_backgammon::MergeRegion;

/// A line-based diff3 over (ancestor, local, remote) comment texts.
///
/// Implementations return ordered regions of agreed lines and conflicts;
/// the game view only reads each conflict's local and remote lines.
pub trait ThreeWayMerge: Send + Sync {
    /// Merges `local` and `remote`, both derived from `ancestor`.
    fn merge(&self, ancestor: &str, local: &str, remote: &str) -> Vec<MergeRegion>;
}

impl<F> ThreeWayMerge for F
where
    F: Fn(&str, &str, &str) -> Vec<MergeRegion> + Send + Sync,
{
    fn merge(&self, ancestor: &str, local: &str, remote: &str) -> Vec<MergeRegion> {
        self(ancestor, local, remote)
    }
}
