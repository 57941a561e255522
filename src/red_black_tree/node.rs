use crate::arena::{Handle, TypedArena};
use serde_derive::{Deserialize, Serialize};

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Color {
    Red,
    Black,
}

/// An opaque identifier of a node in a `RedBlackTree`.
///
/// Identifiers stay valid until the node holding the key is deleted, and may be reused by later
/// insertions afterwards.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeId(pub(crate) Handle);

pub(crate) struct Node {
    pub key: i32,
    pub color: Color,
    pub parent: Option<Handle>,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
}

impl Node {
    pub fn new(key: i32, parent: Option<Handle>) -> Self {
        Node {
            key,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }
}

/// A read-only view of an internal node of a red black tree.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    arena: &'a TypedArena<Node>,
    handle: Handle,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(arena: &'a TypedArena<Node>, handle: Handle) -> Self {
        NodeRef { arena, handle }
    }

    fn node(&self) -> &'a Node {
        &self.arena[self.handle]
    }

    fn child(&self, child: Option<Handle>) -> Child<'a> {
        match child {
            Some(handle) => Child::Node(NodeRef::new(self.arena, handle)),
            None => Child::Leaf(Leaf { parent: *self }),
        }
    }

    pub fn id(&self) -> NodeId {
        NodeId(self.handle)
    }

    pub fn key(&self) -> i32 {
        self.node().key
    }

    pub fn color(&self) -> Color {
        self.node().color
    }

    /// Returns the parent of the node, or `None` for the root.
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node()
            .parent
            .map(|handle| NodeRef::new(self.arena, handle))
    }

    pub fn left(&self) -> Child<'a> {
        self.child(self.node().left)
    }

    pub fn right(&self) -> Child<'a> {
        self.child(self.node().right)
    }
}

/// A nil leaf of a red black tree. Leaves are always black.
#[derive(Clone, Copy)]
pub struct Leaf<'a> {
    parent: NodeRef<'a>,
}

impl<'a> Leaf<'a> {
    pub fn color(&self) -> Color {
        Color::Black
    }

    pub fn parent(&self) -> NodeRef<'a> {
        self.parent
    }
}

/// A child slot of a node: either another internal node or a nil leaf.
#[derive(Clone, Copy)]
pub enum Child<'a> {
    Node(NodeRef<'a>),
    Leaf(Leaf<'a>),
}

impl<'a> Child<'a> {
    pub fn color(&self) -> Color {
        match self {
            Child::Node(node) => node.color(),
            Child::Leaf(leaf) => leaf.color(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        match self {
            Child::Node(_) => false,
            Child::Leaf(_) => true,
        }
    }
}
