use serde_derive::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A vertex of a `SimpleGraph`. A color of `0` means the node is uncolored.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Node {
    pub id: usize,
    pub color: usize,
}

impl Node {
    pub fn new(id: usize) -> Self {
        Node { id, color: 0 }
    }
}

/// An undirected edge between the nodes `a` and `b`.
///
/// Edges are unordered pairs: `Edge::new(1, 2)` and `Edge::new(2, 1)` are equal and hash the same.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub fn new(a: usize, b: usize) -> Self {
        Edge { a, b }
    }

    /// Returns `true` if `id` is one of the endpoints of the edge.
    pub fn is_incident(&self, id: usize) -> bool {
        self.a == id || self.b == id
    }

    /// Returns the endpoint opposite to `id`, or `None` if `id` is not an endpoint.
    pub fn other(&self, id: usize) -> Option<usize> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }

    fn normalized(&self) -> (usize, usize) {
        if self.a <= self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Edge) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl From<(usize, usize)> for Edge {
    fn from(pair: (usize, usize)) -> Self {
        Edge::new(pair.0, pair.1)
    }
}
