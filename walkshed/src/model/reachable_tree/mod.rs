mod access_map_client;
mod fetch_ops;
mod reachable_tree_error;
mod reachable_tree_query;
mod reachable_tree_response;
mod reachable_tree_source;

pub use access_map_client::AccessMapClient;
pub use fetch_ops::{fetch_walksheds, write_reachable_tree, FetchSummary};
pub use reachable_tree_error::ReachableTreeError;
pub use reachable_tree_query::ReachableTreeQuery;
pub use reachable_tree_response::{ReachableTree, ReachableTreeLayer};
pub use reachable_tree_source::ReachableTreeSource;
