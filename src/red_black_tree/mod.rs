//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.

mod node;
mod tree;

pub use self::node::{Child, Color, Leaf, NodeId, NodeRef};
pub use self::tree::{RedBlackTree, RedBlackTreeIter};
