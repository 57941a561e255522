//! String keyed hash map with chained buckets that remembers insertion order.

mod item;
mod map;

pub use self::map::{ChainedHashMap, ChainedHashMapIter};

use std::error;
use std::fmt;
use std::result;

/// Number of buckets allocated by `ChainedHashMap::new`.
pub const DEFAULT_CAPACITY: usize = 8;

/// Smallest number of buckets a `ChainedHashMap` will ever allocate.
pub const MIN_CAPACITY: usize = 1;

/// An enum representing the ways a hash map operation can fail.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The key does not exist in the map.
    KeyError,
    /// The key already exists in the map.
    KeyAlreadyExists,
    /// The requested capacity cannot hold the entries already in the map.
    ValueError,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::KeyError => write!(f, "key does not exist"),
            Error::KeyAlreadyExists => write!(f, "key already exists"),
            Error::ValueError => write!(f, "capacity is smaller than the number of entries"),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
