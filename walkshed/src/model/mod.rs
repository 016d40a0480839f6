pub mod batch_ops;
pub mod join;
pub mod pipeline;
pub mod reachable_tree;
pub mod report;
pub mod scan;
