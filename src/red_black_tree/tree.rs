use crate::arena::{Handle, TypedArena};
use crate::red_black_tree::node::{Child, Color, Leaf, Node, NodeId, NodeRef};
use log::trace;
use std::cmp::Ordering;

/// An ordered set of `i32` keys implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree where every node is colored red or
/// black. The tree maintains three invariants:
///
/// 1. Every nil leaf is black.
/// 2. A red node only has black children.
/// 3. Every path from the root to a nil leaf contains the same number of black nodes.
///
/// Nodes live in an arena and refer to their parent through a non-owning handle, so the tree can
/// walk upwards while restoring the invariants after an insertion or a deletion.
///
/// # Examples
///
/// ```
/// use classic_collections::red_black_tree::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// let (inserted, id) = tree.insert(2);
/// assert!(inserted);
/// assert_eq!(tree.insert(2), (false, id));
///
/// assert_eq!(tree.find(2), Some(id));
/// assert!(tree.delete(2));
/// assert!(!tree.delete(2));
/// assert_eq!(tree.find(2), None);
/// ```
pub struct RedBlackTree {
    arena: TypedArena<Node>,
    root: Option<Handle>,
}

impl RedBlackTree {
    /// Constructs a new, empty `RedBlackTree`.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::red_black_tree::RedBlackTree;
    ///
    /// let tree = RedBlackTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        RedBlackTree {
            arena: TypedArena::new(),
            root: None,
        }
    }

    fn parent_of(&self, handle: Handle) -> Option<Handle> {
        self.arena[handle].parent
    }

    fn left_of(&self, handle: Handle) -> Option<Handle> {
        self.arena[handle].left
    }

    fn right_of(&self, handle: Handle) -> Option<Handle> {
        self.arena[handle].right
    }

    // nil leaves are black
    fn color_of(&self, handle: Option<Handle>) -> Color {
        match handle {
            Some(handle) => self.arena[handle].color,
            None => Color::Black,
        }
    }

    fn is_red(&self, handle: Option<Handle>) -> bool {
        self.color_of(handle) == Color::Red
    }

    fn set_color(&mut self, handle: Handle, color: Color) {
        self.arena[handle].color = color;
    }

    fn find_handle(&self, key: i32) -> Option<Handle> {
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            curr = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    fn minimum(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.left_of(handle) {
            handle = left;
        }
        handle
    }

    fn maximum(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.right_of(handle) {
            handle = right;
        }
        handle
    }

    // Points the link that referred to `old` at `new` instead. The parent link of `new` is left to
    // the caller.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                if self.left_of(parent) == Some(old) {
                    self.arena[parent].left = new;
                } else {
                    self.arena[parent].right = new;
                }
            },
        }
    }

    fn transplant(&mut self, old: Handle, new: Option<Handle>) {
        let parent = self.parent_of(old);
        self.replace_child(parent, old, new);
        if let Some(new) = new {
            self.arena[new].parent = parent;
        }
    }

    fn rotate_left(&mut self, handle: Handle) {
        let child = self
            .right_of(handle)
            .expect("Expected right child node to be `Some`.");
        trace!("rotating left around key {}", self.arena[handle].key);

        let inner = self.left_of(child);
        self.arena[handle].right = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(handle);
        }

        self.transplant(handle, Some(child));
        self.arena[child].left = Some(handle);
        self.arena[handle].parent = Some(child);
    }

    fn rotate_right(&mut self, handle: Handle) {
        let child = self
            .left_of(handle)
            .expect("Expected left child node to be `Some`.");
        trace!("rotating right around key {}", self.arena[handle].key);

        let inner = self.right_of(child);
        self.arena[handle].left = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(handle);
        }

        self.transplant(handle, Some(child));
        self.arena[child].right = Some(handle);
        self.arena[handle].parent = Some(child);
    }

    fn insert_fixup(&mut self, mut curr: Handle) {
        while let Some(parent) = self.parent_of(curr) {
            if !self.is_red(Some(parent)) {
                break;
            }
            // a red node is never the root, so the grandparent exists
            let grandparent = self
                .parent_of(parent)
                .expect("Expected red node to have a parent.");

            if self.left_of(grandparent) == Some(parent) {
                let uncle = self.right_of(grandparent);
                if let (true, Some(uncle)) = (self.is_red(uncle), uncle) {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    curr = grandparent;
                    continue;
                }
                if self.right_of(parent) == Some(curr) {
                    curr = parent;
                    self.rotate_left(curr);
                }
                let parent = self.parent_of(curr).expect("Expected parent node to be `Some`.");
                self.set_color(parent, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate_right(grandparent);
            } else {
                let uncle = self.left_of(grandparent);
                if let (true, Some(uncle)) = (self.is_red(uncle), uncle) {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    curr = grandparent;
                    continue;
                }
                if self.left_of(parent) == Some(curr) {
                    curr = parent;
                    self.rotate_right(curr);
                }
                let parent = self.parent_of(curr).expect("Expected parent node to be `Some`.");
                self.set_color(parent, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate_left(grandparent);
            }
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    // `curr` carries an extra black. It may be a nil leaf, so its parent is tracked separately.
    fn delete_fixup(&mut self, mut curr: Option<Handle>, mut parent: Option<Handle>) {
        while curr != self.root && !self.is_red(curr) {
            let curr_parent = match parent {
                Some(curr_parent) => curr_parent,
                None => break,
            };

            if self.left_of(curr_parent) == curr {
                let mut sibling = self
                    .right_of(curr_parent)
                    .expect("Expected sibling of a doubly black node to be `Some`.");
                if self.is_red(Some(sibling)) {
                    self.set_color(sibling, Color::Black);
                    self.set_color(curr_parent, Color::Red);
                    self.rotate_left(curr_parent);
                    sibling = self
                        .right_of(curr_parent)
                        .expect("Expected sibling of a doubly black node to be `Some`.");
                }

                if !self.is_red(self.left_of(sibling)) && !self.is_red(self.right_of(sibling)) {
                    self.set_color(sibling, Color::Red);
                    curr = Some(curr_parent);
                    parent = self.parent_of(curr_parent);
                } else {
                    if !self.is_red(self.right_of(sibling)) {
                        let nephew = self
                            .left_of(sibling)
                            .expect("Expected red nephew node to be `Some`.");
                        self.set_color(nephew, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_right(sibling);
                        sibling = self
                            .right_of(curr_parent)
                            .expect("Expected sibling of a doubly black node to be `Some`.");
                    }
                    let parent_color = self.arena[curr_parent].color;
                    self.set_color(sibling, parent_color);
                    self.set_color(curr_parent, Color::Black);
                    if let Some(nephew) = self.right_of(sibling) {
                        self.set_color(nephew, Color::Black);
                    }
                    self.rotate_left(curr_parent);
                    curr = self.root;
                    parent = None;
                }
            } else {
                let mut sibling = self
                    .left_of(curr_parent)
                    .expect("Expected sibling of a doubly black node to be `Some`.");
                if self.is_red(Some(sibling)) {
                    self.set_color(sibling, Color::Black);
                    self.set_color(curr_parent, Color::Red);
                    self.rotate_right(curr_parent);
                    sibling = self
                        .left_of(curr_parent)
                        .expect("Expected sibling of a doubly black node to be `Some`.");
                }

                if !self.is_red(self.left_of(sibling)) && !self.is_red(self.right_of(sibling)) {
                    self.set_color(sibling, Color::Red);
                    curr = Some(curr_parent);
                    parent = self.parent_of(curr_parent);
                } else {
                    if !self.is_red(self.left_of(sibling)) {
                        let nephew = self
                            .right_of(sibling)
                            .expect("Expected red nephew node to be `Some`.");
                        self.set_color(nephew, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_left(sibling);
                        sibling = self
                            .left_of(curr_parent)
                            .expect("Expected sibling of a doubly black node to be `Some`.");
                    }
                    let parent_color = self.arena[curr_parent].color;
                    self.set_color(sibling, parent_color);
                    self.set_color(curr_parent, Color::Black);
                    if let Some(nephew) = self.left_of(sibling) {
                        self.set_color(nephew, Color::Black);
                    }
                    self.rotate_right(curr_parent);
                    curr = self.root;
                    parent = None;
                }
            }
        }

        if let Some(curr) = curr {
            self.set_color(curr, Color::Black);
        }
    }

    /// Inserts a key into the tree. Returns `(true, id)` with the identifier of the new node, or
    /// `(false, id)` with the identifier of the existing node if the key was already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// let (inserted, id) = tree.insert(1);
    /// assert!(inserted);
    /// assert_eq!(tree.node(id).map(|node| node.key()), Some(1));
    /// assert_eq!(tree.insert(1), (false, id));
    /// ```
    pub fn insert(&mut self, key: i32) -> (bool, NodeId) {
        let mut parent = None;
        let mut curr = self.root;
        let mut ordering = Ordering::Equal;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            ordering = key.cmp(&node.key);
            parent = Some(handle);
            curr = match ordering {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return (false, NodeId(handle)),
            };
        }

        let handle = self.arena.allocate(Node::new(key, parent));
        match parent {
            None => self.root = Some(handle),
            Some(parent) => {
                if ordering == Ordering::Less {
                    self.arena[parent].left = Some(handle);
                } else {
                    self.arena[parent].right = Some(handle);
                }
            },
        }

        self.insert_fixup(handle);
        (true, NodeId(handle))
    }

    /// Deletes a key from the tree. Returns `true` if the key was present; otherwise the tree is
    /// left unchanged and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// assert!(!tree.delete(2));
    /// assert!(tree.delete(1));
    /// assert!(tree.is_empty());
    /// ```
    pub fn delete(&mut self, key: i32) -> bool {
        let target = match self.find_handle(key) {
            Some(target) => target,
            None => return false,
        };

        let mut removed_color = self.arena[target].color;
        let replacement;
        let replacement_parent;

        match (self.left_of(target), self.right_of(target)) {
            (None, right) => {
                replacement = right;
                replacement_parent = self.parent_of(target);
                self.transplant(target, right);
            },
            (left, None) => {
                replacement = left;
                replacement_parent = self.parent_of(target);
                self.transplant(target, left);
            },
            (Some(left), Some(right)) => {
                let successor = self.minimum(right);
                removed_color = self.arena[successor].color;
                replacement = self.right_of(successor);

                if successor == right {
                    replacement_parent = Some(successor);
                } else {
                    replacement_parent = self.parent_of(successor);
                    self.transplant(successor, replacement);
                    self.arena[successor].right = Some(right);
                    self.arena[right].parent = Some(successor);
                }

                self.transplant(target, Some(successor));
                self.arena[successor].left = Some(left);
                self.arena[left].parent = Some(successor);
                let target_color = self.arena[target].color;
                self.set_color(successor, target_color);
            },
        }

        self.arena.free(target);

        if removed_color == Color::Black {
            self.delete_fixup(replacement, replacement_parent);
        }
        true
    }

    /// Returns the identifier of the node holding `key`, or `None` if the key is absent.
    pub fn find(&self, key: i32) -> Option<NodeId> {
        self.find_handle(key).map(NodeId)
    }

    /// Checks if a key exists in the tree.
    pub fn contains(&self, key: i32) -> bool {
        self.find_handle(key).is_some()
    }

    /// Returns a view of the node with identifier `id`, or `None` if it has been deleted.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.arena.get(id.0).map(|_| NodeRef::new(&self.arena, id.0))
    }

    /// Returns a view of the root node, or `None` if the tree is empty.
    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.root.map(|handle| NodeRef::new(&self.arena, handle))
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every key from the tree.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Returns the minimum key of the tree. Returns `None` if the tree is empty.
    pub fn min(&self) -> Option<i32> {
        self.root.map(|root| self.arena[self.minimum(root)].key)
    }

    /// Returns the maximum key of the tree. Returns `None` if the tree is empty.
    pub fn max(&self) -> Option<i32> {
        self.root.map(|root| self.arena[self.maximum(root)].key)
    }

    /// Returns the greatest key that is less than or equal to `key`. Returns `None` if such a key
    /// does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.floor(0), None);
    /// assert_eq!(tree.floor(2), Some(1));
    /// ```
    pub fn floor(&self, key: i32) -> Option<i32> {
        let mut ret = None;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            curr = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => {
                    ret = Some(node.key);
                    node.right
                },
                Ordering::Equal => return Some(node.key),
            };
        }
        ret
    }

    /// Returns the least key that is greater than or equal to `key`. Returns `None` if such a key
    /// does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.ceil(0), Some(1));
    /// assert_eq!(tree.ceil(2), None);
    /// ```
    pub fn ceil(&self, key: i32) -> Option<i32> {
        let mut ret = None;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            curr = match key.cmp(&node.key) {
                Ordering::Greater => node.right,
                Ordering::Less => {
                    ret = Some(node.key);
                    node.left
                },
                Ordering::Equal => return Some(node.key),
            };
        }
        ret
    }

    /// Returns views of every internal node using in-order traversal.
    pub fn all_nodes(&self) -> Vec<NodeRef<'_>> {
        let mut ret = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut curr = self.root;
        while curr.is_some() || !stack.is_empty() {
            while let Some(handle) = curr {
                stack.push(handle);
                curr = self.left_of(handle);
            }
            if let Some(handle) = stack.pop() {
                ret.push(NodeRef::new(&self.arena, handle));
                curr = self.right_of(handle);
            }
        }
        ret
    }

    /// Returns every nil leaf of the tree, ordered from left to right. An empty tree has no leaves.
    pub fn leaf_nodes(&self) -> Vec<Leaf<'_>> {
        let mut ret = Vec::with_capacity(self.len() + 1);
        for node in self.all_nodes() {
            if let Child::Leaf(leaf) = node.left() {
                ret.push(leaf);
            }
            if let Child::Leaf(leaf) = node.right() {
                ret.push(leaf);
            }
        }
        ret
    }

    /// Returns an iterator over the keys of the tree in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(3);
    /// tree.insert(1);
    ///
    /// let mut iterator = tree.iter();
    /// assert_eq!(iterator.next(), Some(1));
    /// assert_eq!(iterator.next(), Some(3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackTreeIter<'_> {
        RedBlackTreeIter {
            tree: self,
            stack: Vec::new(),
            curr: self.root,
        }
    }
}

impl Default for RedBlackTree {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a RedBlackTree {
    type IntoIter = RedBlackTreeIter<'a>;
    type Item = i32;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for `RedBlackTree`.
///
/// This iterator traverses the keys of the tree in-order.
pub struct RedBlackTreeIter<'a> {
    tree: &'a RedBlackTree,
    stack: Vec<Handle>,
    curr: Option<Handle>,
}

impl<'a> Iterator for RedBlackTreeIter<'a> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(handle) = self.curr {
            self.stack.push(handle);
            self.curr = self.tree.left_of(handle);
        }
        self.stack.pop().map(|handle| {
            self.curr = self.tree.right_of(handle);
            self.tree.arena[handle].key
        })
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackTree;
    use crate::red_black_tree::{Child, Color};

    fn black_height(tree: &RedBlackTree) -> usize {
        let mut height = 0;
        let mut curr = tree.root();
        while let Some(node) = curr {
            if node.color() == Color::Black {
                height += 1;
            }
            curr = match node.left() {
                Child::Node(child) => Some(child),
                Child::Leaf(_) => None,
            };
        }
        height
    }

    #[test]
    fn test_len_empty() {
        let tree = RedBlackTree::new();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
    }

    #[test]
    fn test_min_max_empty() {
        let tree = RedBlackTree::new();
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
    }

    #[test]
    fn test_insert_root_is_black() {
        let mut tree = RedBlackTree::new();
        let (inserted, id) = tree.insert(1);
        assert!(inserted);
        let root = tree.root().unwrap();
        assert_eq!(root.id(), id);
        assert_eq!(root.color(), Color::Black);
        assert!(root.parent().is_none());
        assert!(root.left().is_leaf());
        assert!(root.right().is_leaf());
    }

    #[test]
    fn test_insert_ascending_rotates() {
        let mut tree = RedBlackTree::new();
        tree.insert(1);
        tree.insert(2);
        tree.insert(3);

        let root = tree.root().unwrap();
        assert_eq!(root.key(), 2);
        assert_eq!(root.left().color(), Color::Red);
        assert_eq!(root.right().color(), Color::Red);
        assert_eq!(black_height(&tree), 1);
    }

    #[test]
    fn test_insert_uncle_recolor() {
        let mut tree = RedBlackTree::new();
        for key in &[2, 1, 3, 4] {
            tree.insert(*key);
        }

        let root = tree.root().unwrap();
        assert_eq!(root.key(), 2);
        assert_eq!(root.left().color(), Color::Black);
        assert_eq!(root.right().color(), Color::Black);
        let four = tree.node(tree.find(4).unwrap()).unwrap();
        assert_eq!(four.color(), Color::Red);
        assert_eq!(four.parent().map(|node| node.key()), Some(3));
    }

    #[test]
    fn test_delete_root_with_two_children() {
        let mut tree = RedBlackTree::new();
        for key in &[2, 1, 3] {
            tree.insert(*key);
        }
        assert!(tree.delete(2));
        let root = tree.root().unwrap();
        assert_eq!(root.key(), 3);
        assert_eq!(root.color(), Color::Black);
        assert_eq!(tree.iter().collect::<Vec<i32>>(), vec![1, 3]);
    }

    #[test]
    fn test_delete_black_leaf() {
        let mut tree = RedBlackTree::new();
        for key in &[2, 1, 3, 4] {
            tree.insert(*key);
        }
        assert!(tree.delete(1));
        assert_eq!(tree.root().map(|node| node.key()), Some(3));
        assert_eq!(black_height(&tree), 2);
        assert_eq!(tree.iter().collect::<Vec<i32>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_delete_last_key() {
        let mut tree = RedBlackTree::new();
        tree.insert(1);
        assert!(tree.delete(1));
        assert!(tree.is_empty());
        assert!(tree.leaf_nodes().is_empty());
    }

    #[test]
    fn test_node_after_delete() {
        let mut tree = RedBlackTree::new();
        let (_, id) = tree.insert(1);
        tree.delete(1);
        assert!(tree.node(id).is_none());
    }

    #[test]
    fn test_leaf_nodes() {
        let mut tree = RedBlackTree::new();
        for key in &[2, 1, 3] {
            tree.insert(*key);
        }
        let leaves = tree.leaf_nodes();
        assert_eq!(leaves.len(), 4);
        assert_eq!(
            leaves.iter().map(|leaf| leaf.parent().key()).collect::<Vec<i32>>(),
            vec![1, 1, 3, 3],
        );
        assert!(leaves.iter().all(|leaf| leaf.color() == Color::Black));
    }

    #[test]
    fn test_floor_ceil() {
        let mut tree = RedBlackTree::new();
        tree.insert(1);
        tree.insert(3);
        tree.insert(5);

        assert_eq!(tree.floor(0), None);
        assert_eq!(tree.floor(2), Some(1));
        assert_eq!(tree.floor(4), Some(3));
        assert_eq!(tree.floor(6), Some(5));

        assert_eq!(tree.ceil(0), Some(1));
        assert_eq!(tree.ceil(2), Some(3));
        assert_eq!(tree.ceil(4), Some(5));
        assert_eq!(tree.ceil(6), None);
    }

    #[test]
    fn test_clear() {
        let mut tree = RedBlackTree::new();
        tree.insert(1);
        tree.insert(2);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.find(1), None);
    }

    #[test]
    fn test_iter() {
        let mut tree = RedBlackTree::new();
        tree.insert(1);
        tree.insert(5);
        tree.insert(3);

        assert_eq!(tree.iter().collect::<Vec<i32>>(), vec![1, 3, 5]);
        assert_eq!(
            tree.all_nodes().iter().map(|node| node.key()).collect::<Vec<i32>>(),
            vec![1, 3, 5],
        );
    }
}
