//! Classic data structures: a red black tree, a simple graph with greedy coloring and a chained
//! hash map that remembers insertion order.

pub mod arena;
pub mod graph;
pub mod hash_map;
pub mod red_black_tree;
