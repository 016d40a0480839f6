use super::{ReachableTree, ReachableTreeError, ReachableTreeQuery};

/// anything that can produce the reachable tree of a query, such as a
/// remote routing service.
pub trait ReachableTreeSource {
    fn reachable_tree(&self, query: &ReachableTreeQuery)
        -> Result<ReachableTree, ReachableTreeError>;
}
