pub mod merge;
pub mod node;

pub use merge::{merge, MergeSummary};
pub use node::{DependencyNode, DependencyTree, Walk};
