use crate::arena::Handle;

// An entry of the map. Every item sits on two chains at once: the chain of its bucket and the
// insertion order chain shared by the whole map.
pub struct Item {
    pub key: String,
    pub value: i32,
    pub hash: u64,
    pub bucket_next: Option<Handle>,
    pub prev: Option<Handle>,
    pub next: Option<Handle>,
}

impl Item {
    pub fn new(key: String, value: i32, hash: u64) -> Self {
        Item {
            key,
            value,
            hash,
            bucket_next: None,
            prev: None,
            next: None,
        }
    }
}
