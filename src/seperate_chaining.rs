use core::{
    fmt::{self, Debug, Formatter},
    mem, slice,
};

use log::{debug, info, trace, warn};

pub mod buckets;
pub use buckets::{Bucket, SLLBucket};

use crate::{config::DEFAULT_CAPACITY, error::TableError, hash};

pub type ChainedHashTable = SCHashTable<SLLBucket>;

/// This hashtable resolves collisions by chaining entries inside each bucket.
///
/// The bucket count is fixed until the caller asks for more room with
/// [`SCHashTable::grow`] or [`SCHashTable::resize`]; insertion never resizes on its own.
pub struct SCHashTable<B: Bucket = SLLBucket> {
    buckets: Vec<B>,
    len: usize,
}

impl<B: Bucket> SCHashTable<B> {
    /// Creates a table with `capacity` empty buckets.
    ///
    /// # Errors
    /// [`TableError::InvalidCapacity`] for a capacity of zero and
    /// [`TableError::AllocationFailure`] when the bucket array can't be reserved.
    pub fn with_capacity(capacity: usize) -> Result<Self, TableError> {
        let buckets = Self::new_mem(capacity)?;
        debug!("created hash table with {} buckets", capacity);
        Ok(Self { buckets, len: 0 })
    }

    fn new_mem(capacity: usize) -> Result<Vec<B>, TableError> {
        if capacity == 0 {
            return Err(TableError::InvalidCapacity(capacity));
        }
        let mut buckets = Vec::new();
        buckets.try_reserve_exact(capacity)?;
        buckets.resize_with(capacity, B::default);
        Ok(buckets)
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the bucket `key` belongs to under the current capacity.
    pub fn bucket_index(&self, key: &str) -> usize {
        hash::bucket_index(key, self.capacity())
    }

    /// Number of entries chained in bucket `index`, `None` when out of range.
    pub fn bucket_len(&self, index: usize) -> Option<usize> {
        self.buckets.get(index).map(B::len)
    }

    /// Stores `value` under `key` and returns the value it replaced.
    ///
    /// A key that is already present keeps its place in its chain, a new key
    /// is appended to the end of its bucket's chain.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let old = self.insert_unchecked(key.into(), value.into());
        if old.is_none() {
            self.len += 1;
        }
        old
    }

    // does not touch `len`
    fn insert_unchecked(&mut self, key: String, value: String) -> Option<String> {
        let index = self.bucket_index(&key);
        trace!("inserting key {} into bucket {}", key, index);
        self.buckets[index].insert(key, value)
    }

    /// Removes `key` and returns its value.
    ///
    /// # Errors
    /// [`TableError::KeyNotFound`] when no entry has that key, in which case
    /// the table is left untouched.
    pub fn remove(&mut self, key: &str) -> Result<String, TableError> {
        let index = self.bucket_index(key);
        match self.buckets[index].remove(key) {
            Some((_, value)) => {
                self.len -= 1;
                debug!("removed key {} from bucket {}", key, index);
                Ok(value)
            }
            None => {
                warn!("Unable to remove entry with key: {}", key);
                Err(TableError::KeyNotFound(key.to_owned()))
            }
        }
    }

    /// Looks up the value stored under `key`. A miss is logged.
    pub fn retrieve(&self, key: &str) -> Option<&str> {
        let value = self.lookup(key);
        if value.is_none() {
            warn!("Unable to retrieve entry with key: {}", key);
        }
        value
    }

    /// Like [`SCHashTable::retrieve`] but reports a miss as an error instead
    /// of logging it.
    pub fn try_retrieve(&self, key: &str) -> Result<&str, TableError> {
        self.lookup(key)
            .ok_or_else(|| TableError::KeyNotFound(key.to_owned()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        self.buckets[self.bucket_index(key)].get(key)
    }

    /// Drops every entry but keeps the bucket count.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Releases every entry and the bucket storage.
    pub fn destroy(self) {
        debug!(
            "destroying hash table with {} entries in {} buckets",
            self.len,
            self.capacity()
        );
        drop(self);
    }

    /// Doubles the bucket count and rehashes every entry, visiting buckets
    /// in index order and each chain front to back.
    ///
    /// Fails before any entry moves, so on error the table is unchanged.
    ///
    /// # Errors
    /// [`TableError::CapacityOverflow`] when the doubled capacity does not fit
    /// in `usize`, [`TableError::AllocationFailure`] when the new bucket array
    /// can't be reserved.
    pub fn grow(&mut self) -> Result<(), TableError> {
        let old_capacity = self.capacity();
        let new_capacity = doubled(old_capacity)?;
        let new_buckets = Self::new_mem(new_capacity)?;

        info!(
            "Resizing hash table from {} to {}",
            old_capacity, new_capacity
        );
        let mut old_buckets = mem::replace(&mut self.buckets, new_buckets);
        for bucket in old_buckets.iter_mut() {
            for (key, value) in bucket.drain() {
                let replaced = self.insert_unchecked(key, value);
                debug_assert!(replaced.is_none(), "duplicate key across buckets");
            }
        }
        Ok(())
    }

    /// Consumes the table and returns one with twice the buckets and the same
    /// entries. See [`SCHashTable::grow`] for the in-place version, which
    /// keeps the table when resizing fails.
    pub fn resize(mut self) -> Result<Self, TableError> {
        self.grow()?;
        Ok(self)
    }

    /// Visits entries bucket by bucket, each chain front to back.
    pub fn iter(&self) -> Iter<'_, B> {
        Iter {
            buckets: self.buckets.iter(),
            current: None,
        }
    }
}

// Only reachable past `usize::MAX / 2` buckets, so `grow` is tested for it
// through `doubling_overflow` below.
fn doubled(capacity: usize) -> Result<usize, TableError> {
    capacity
        .checked_mul(2)
        .ok_or(TableError::CapacityOverflow(capacity))
}

impl<B: Bucket> Default for SCHashTable<B> {
    fn default() -> Self {
        let mut buckets = Vec::with_capacity(DEFAULT_CAPACITY);
        buckets.resize_with(DEFAULT_CAPACITY, B::default);
        Self { buckets, len: 0 }
    }
}

impl<B: Bucket> Debug for SCHashTable<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hashtable {{ capacity: {}, size: {}, elements: {{",
            self.capacity(),
            self.len
        )?;
        let mut iter = self.iter();
        if let Some((key, value)) = iter.next() {
            write!(f, "{:?}: {:?}", key, value)?;
        }
        for (key, value) in iter {
            write!(f, ", {:?}: {:?}", key, value)?;
        }
        write!(f, "}} }}")
    }
}

impl<'a, B: Bucket> IntoIterator for &'a SCHashTable<B> {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ------------------------------------------ ITER ---------------------------------------------

pub struct Iter<'a, B: Bucket + 'a> {
    buckets: slice::Iter<'a, B>,
    current: Option<B::Iter<'a>>,
}

impl<'a, B: Bucket + 'a> Iterator for Iter<'a, B> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.as_mut().and_then(Iterator::next) {
                return Some(entry);
            }
            // runs out together with the bucket slice
            self.current = Some(self.buckets.next()?.iter());
        }
    }
}
