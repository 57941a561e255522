use crate::arena::{Handle, TypedArena};
use crate::hash_map::item::Item;
use crate::hash_map::{Error, Result, DEFAULT_CAPACITY, MIN_CAPACITY};
use log::debug;
use std::cmp;
use std::collections::hash_map::DefaultHasher;
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};

/// A hash map from `String` keys to `i32` values that resolves collisions by chaining items
/// inside a bucket array and remembers the order in which keys were inserted.
///
/// Every item is linked into the chain of its bucket and into a map-wide insertion order chain, so
/// `first`, `last` and ordered iteration are cheap. Once more than two thirds of the buckets would
/// be used, the bucket array doubles in size. Removing keys never shrinks it; only `reserve` can.
///
/// The default hasher is deterministic, so bucket placement is the same on every run.
///
/// # Examples
///
/// ```
/// use classic_collections::hash_map::{ChainedHashMap, Error};
///
/// let mut map = ChainedHashMap::new();
/// assert_eq!(map.put("first", 55), Ok(()));
/// assert_eq!(map.put("first", 66), Err(Error::KeyAlreadyExists));
///
/// assert_eq!(map.get("first"), Ok(55));
/// assert_eq!(map.pop("first"), Ok(55));
/// assert_eq!(map.get("first"), Err(Error::KeyError));
/// assert_eq!(map.capacity(), 8);
/// ```
pub struct ChainedHashMap<S = BuildHasherDefault<DefaultHasher>> {
    items: TypedArena<Item>,
    buckets: Vec<Option<Handle>>,
    first: Option<Handle>,
    last: Option<Handle>,
    hash_builder: S,
}

impl ChainedHashMap {
    /// Constructs a new, empty `ChainedHashMap` with `DEFAULT_CAPACITY` buckets.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::hash_map::ChainedHashMap;
    ///
    /// let map = ChainedHashMap::new();
    /// assert_eq!(map.capacity(), 8);
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Constructs a new, empty `ChainedHashMap` with a specific number of buckets. The capacity is
    /// raised to `MIN_CAPACITY` if it is smaller.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, BuildHasherDefault::default())
    }
}

impl<S> ChainedHashMap<S>
where
    S: BuildHasher,
{
    /// Constructs a new, empty `ChainedHashMap` with `DEFAULT_CAPACITY` buckets that uses
    /// `hash_builder` to hash keys.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hash_builder)
    }

    /// Constructs a new, empty `ChainedHashMap` with a specific number of buckets that uses
    /// `hash_builder` to hash keys.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        ChainedHashMap {
            items: TypedArena::new(),
            buckets: vec![None; cmp::max(capacity, MIN_CAPACITY)],
            first: None,
            last: None,
            hash_builder,
        }
    }

    fn hash(&self, key: &str) -> u64 {
        let mut hasher = self.hash_builder.build_hasher();
        key.hash(&mut hasher);
        hasher.finish()
    }

    fn bucket_index(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    fn find(&self, key: &str) -> Option<Handle> {
        let hash = self.hash(key);
        let mut curr = self.buckets[self.bucket_index(hash)];
        while let Some(handle) = curr {
            let item = &self.items[handle];
            if item.hash == hash && item.key == key {
                return Some(handle);
            }
            curr = item.bucket_next;
        }
        None
    }

    fn link_bucket(&mut self, handle: Handle) {
        let index = self.bucket_index(self.items[handle].hash);
        self.items[handle].bucket_next = self.buckets[index];
        self.buckets[index] = Some(handle);
    }

    fn unlink_bucket(&mut self, handle: Handle) {
        let index = self.bucket_index(self.items[handle].hash);
        let bucket_next = self.items[handle].bucket_next;

        if self.buckets[index] == Some(handle) {
            self.buckets[index] = bucket_next;
            return;
        }

        let mut curr = self.buckets[index];
        while let Some(prev) = curr {
            if self.items[prev].bucket_next == Some(handle) {
                self.items[prev].bucket_next = bucket_next;
                return;
            }
            curr = self.items[prev].bucket_next;
        }
    }

    fn link_back(&mut self, handle: Handle) {
        self.items[handle].prev = self.last;
        self.items[handle].next = None;
        match self.last {
            Some(last) => self.items[last].next = Some(handle),
            None => self.first = Some(handle),
        }
        self.last = Some(handle);
    }

    fn unlink_order(&mut self, handle: Handle) {
        let prev = self.items[handle].prev;
        let next = self.items[handle].next;
        match prev {
            Some(prev) => self.items[prev].next = next,
            None => self.first = next,
        }
        match next {
            Some(next) => self.items[next].prev = prev,
            None => self.last = prev,
        }
    }

    // Rebuilds every bucket chain for a new bucket count. Items stay where they are in the arena,
    // so the insertion order chain is untouched.
    fn rehash(&mut self, capacity: usize) {
        debug!(
            "rehashing {} entries from {} to {} buckets",
            self.len(),
            self.capacity(),
            capacity,
        );
        self.buckets = vec![None; capacity];
        let mut curr = self.first;
        while let Some(handle) = curr {
            curr = self.items[handle].next;
            self.link_bucket(handle);
        }
    }

    /// Inserts a key-value pair at the end of the insertion order, doubling the number of buckets
    /// while the load factor exceeds two thirds.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyAlreadyExists` if the key is already in the map. The stored value is
    /// left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::hash_map::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::new();
    /// for key in &["a", "b", "c", "d", "e"] {
    ///     map.put(key, 0).unwrap();
    /// }
    /// assert_eq!(map.capacity(), 8);
    /// map.put("f", 0).unwrap();
    /// assert_eq!(map.capacity(), 16);
    /// ```
    pub fn put(&mut self, key: &str, value: i32) -> Result<()> {
        if self.find(key).is_some() {
            return Err(Error::KeyAlreadyExists);
        }

        let hash = self.hash(key);
        let handle = self.items.allocate(Item::new(key.to_owned(), value, hash));
        self.link_bucket(handle);
        self.link_back(handle);

        let mut capacity = self.capacity();
        while self.len() * 3 > capacity * 2 {
            capacity *= 2;
        }
        if capacity != self.capacity() {
            self.rehash(capacity);
        }
        Ok(())
    }

    /// Returns the value associated with a key.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyError` if the key does not exist.
    pub fn get(&self, key: &str) -> Result<i32> {
        self.find(key)
            .map(|handle| self.items[handle].value)
            .ok_or(Error::KeyError)
    }

    /// Removes a key from the map and returns its value. The number of buckets is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyError` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::hash_map::{ChainedHashMap, Error};
    ///
    /// let mut map = ChainedHashMap::new();
    /// map.put("first", 55).unwrap();
    /// assert_eq!(map.pop("first"), Ok(55));
    /// assert_eq!(map.pop("first"), Err(Error::KeyError));
    /// assert!(!map.contains("first"));
    /// ```
    pub fn pop(&mut self, key: &str) -> Result<i32> {
        let handle = self.find(key).ok_or(Error::KeyError)?;
        self.unlink_bucket(handle);
        self.unlink_order(handle);
        Ok(self.items.free(handle).value)
    }

    /// Removes a key from the map, discarding its value.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyError` if the key does not exist.
    pub fn remove(&mut self, key: &str) -> Result<()> {
        self.pop(key).map(|_| ())
    }

    /// Checks if a key exists in the map.
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of buckets of the map.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Rehashes the map into `capacity` buckets, or `MIN_CAPACITY` buckets if `capacity` is
    /// smaller. The map may shrink as long as the capacity is not below the number of entries.
    ///
    /// # Errors
    ///
    /// Returns `Error::ValueError` if `capacity` is smaller than the number of entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::hash_map::{ChainedHashMap, Error};
    ///
    /// let mut map = ChainedHashMap::new();
    /// map.put("first", 55).unwrap();
    /// map.put("second", 66).unwrap();
    /// assert_eq!(map.reserve(16), Ok(()));
    /// assert_eq!(map.capacity(), 16);
    /// assert_eq!(map.reserve(1), Err(Error::ValueError));
    /// ```
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity < self.len() {
            return Err(Error::ValueError);
        }
        let capacity = cmp::max(capacity, MIN_CAPACITY);
        if capacity != self.capacity() {
            self.rehash(capacity);
        }
        Ok(())
    }

    /// Removes every entry from the map. The number of buckets is unchanged.
    pub fn clear(&mut self) {
        self.items.clear();
        for bucket in &mut self.buckets {
            *bucket = None;
        }
        self.first = None;
        self.last = None;
    }

    /// Returns the earliest inserted entry that is still in the map.
    pub fn first(&self) -> Option<(&str, i32)> {
        self.first.map(|handle| {
            let item = &self.items[handle];
            (item.key.as_str(), item.value)
        })
    }

    /// Returns the latest inserted entry.
    pub fn last(&self) -> Option<(&str, i32)> {
        self.last.map(|handle| {
            let item = &self.items[handle];
            (item.key.as_str(), item.value)
        })
    }

    /// Returns an iterator over the map that yields entries in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::hash_map::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::new();
    /// map.put("b", 1).unwrap();
    /// map.put("a", 2).unwrap();
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some(("b", 1)));
    /// assert_eq!(iterator.next(), Some(("a", 2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> ChainedHashMapIter<'_> {
        ChainedHashMapIter {
            items: &self.items,
            curr: self.first,
        }
    }
}

impl Default for ChainedHashMap {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, S> IntoIterator for &'a ChainedHashMap<S>
where
    S: BuildHasher,
{
    type IntoIter = ChainedHashMapIter<'a>;
    type Item = (&'a str, i32);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for `ChainedHashMap`.
///
/// This iterator yields entries in insertion order.
pub struct ChainedHashMapIter<'a> {
    items: &'a TypedArena<Item>,
    curr: Option<Handle>,
}

impl<'a> Iterator for ChainedHashMapIter<'a> {
    type Item = (&'a str, i32);

    fn next(&mut self) -> Option<Self::Item> {
        let items = self.items;
        self.curr.map(|handle| {
            let item = &items[handle];
            self.curr = item.next;
            (item.key.as_str(), item.value)
        })
    }
}
