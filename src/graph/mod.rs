//! Simple undirected graph with greedy vertex coloring.

mod node;
mod simple_graph;

pub use self::node::{Edge, Node};
pub use self::simple_graph::SimpleGraph;

use std::error;
use std::fmt;
use std::result;

/// An enum representing the ways a graph removal or query can fail.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    NodeNotFound(usize),
    EdgeNotFound(Edge),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NodeNotFound(id) => write!(f, "node {} does not exist", id),
            Error::EdgeNotFound(edge) => write!(f, "edge ({}, {}) does not exist", edge.a, edge.b),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
