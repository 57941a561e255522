//! Slab allocator that hands out copyable handles.

use std::mem;
use std::ops::{Index, IndexMut};

/// A handle to an object stored in a `TypedArena<T>`.
///
/// Handles are plain indices, so they can be copied freely and used as non-owning links between
/// objects of the same arena.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    index: usize,
}

enum Slot<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// A single-type allocator backed by one `Vec`.
///
/// Freed slots are threaded into a free list and reused by later allocations, so a handle may be
/// handed out again once the object it referred to has been freed. All objects are dropped when the
/// arena is dropped or cleared.
///
/// # Examples
///
/// ```
/// use classic_collections::arena::TypedArena;
///
/// let mut arena = TypedArena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// ```
pub struct TypedArena<T> {
    head: Option<Handle>,
    slots: Vec<Slot<T>>,
    len: usize,
}

impl<T> TypedArena<T> {
    /// Constructs a new, empty `TypedArena<T>`.
    pub fn new() -> Self {
        TypedArena {
            head: None,
            slots: Vec::new(),
            len: 0,
        }
    }

    /// Allocates an object in the arena and returns a handle to it.
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.head.take() {
            None => {
                self.slots.push(Slot::Occupied(value));
                Handle {
                    index: self.slots.len() - 1,
                }
            },
            Some(handle) => {
                let vacant_slot = mem::replace(&mut self.slots[handle.index], Slot::Occupied(value));
                match vacant_slot {
                    Slot::Vacant(next) => {
                        self.head = next;
                        handle
                    },
                    Slot::Occupied(_) => panic!("Expected a vacant slot at the head of the free list."),
                }
            },
        }
    }

    /// Deallocates an object in the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the handle refers to an out of bounds or vacant slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// assert_eq!(arena.get(x), None);
    /// ```
    pub fn free(&mut self, handle: Handle) -> T {
        if handle.index >= self.slots.len() {
            panic!("Error: attempting to free invalid slot.");
        }
        let old_slot = mem::replace(&mut self.slots[handle.index], Slot::Vacant(self.head));
        match old_slot {
            Slot::Vacant(next) => {
                self.slots[handle.index] = Slot::Vacant(next);
                panic!("Error: attempting to free vacant slot.");
            },
            Slot::Occupied(value) => {
                self.len -= 1;
                self.head = Some(handle);
                value
            },
        }
    }

    /// Returns an immutable reference to an object in the arena, or `None` if the handle does not
    /// refer to a live object.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.slots.get(handle.index) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the arena, or `None` if the handle does not
    /// refer to a live object.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.slots.get_mut(handle.index) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every object in the arena. Previously issued handles become invalid.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.len = 0;
    }
}

impl<T> Default for TypedArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle out of bounds.")
    }
}
