use crate::{
    error::TableError,
    seperate_chaining::{Bucket, SCHashTable},
};

/// High level hash table over string keys and values
pub trait HashTable: Sized {
    fn with_capacity(capacity: usize) -> Result<Self, TableError>;
    fn insert(&mut self, key: String, value: String) -> Option<String>;
    fn remove(&mut self, key: &str) -> Result<String, TableError>;
    fn get(&self, key: &str) -> Option<&str>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn capacity(&self) -> usize;
    fn clear(&mut self);
    /// Doubles the number of buckets, consuming the old table.
    fn resize(self) -> Result<Self, TableError>;
}

impl<B: Bucket> HashTable for SCHashTable<B> {
    fn with_capacity(capacity: usize) -> Result<Self, TableError> {
        SCHashTable::with_capacity(capacity)
    }

    fn insert(&mut self, key: String, value: String) -> Option<String> {
        SCHashTable::insert(self, key, value)
    }

    fn remove(&mut self, key: &str) -> Result<String, TableError> {
        SCHashTable::remove(self, key)
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.retrieve(key)
    }

    fn len(&self) -> usize {
        SCHashTable::len(self)
    }

    fn capacity(&self) -> usize {
        SCHashTable::capacity(self)
    }

    fn clear(&mut self) {
        SCHashTable::clear(self)
    }

    fn resize(self) -> Result<Self, TableError> {
        SCHashTable::resize(self)
    }
}
