pub mod singly_linked_list;

pub use singly_linked_list::SLLBucket;

/// A single bucket of a separate chaining table.
///
/// Implementors hold every entry whose key hashed to this bucket and keep
/// keys unique within the bucket.
pub trait Bucket: Default {
    type Iter<'a>: Iterator<Item = (&'a str, &'a str)>
    where
        Self: 'a;
    type Drain<'a>: Iterator<Item = (String, String)>
    where
        Self: 'a;

    /// Stores `value` under `key`. An existing entry keeps its position in
    /// the bucket and its old value is returned, otherwise the entry is
    /// appended after the last one.
    fn insert(&mut self, key: String, value: String) -> Option<String>;
    fn get(&self, key: &str) -> Option<&str>;
    /// Unlinks the entry for `key`, leaving the rest of the bucket in order.
    fn remove(&mut self, key: &str) -> Option<(String, String)>;
    fn is_empty(&self) -> bool;
    fn len(&self) -> usize {
        self.iter().count()
    }
    fn clear(&mut self);
    fn iter(&self) -> Self::Iter<'_>;
    /// Moves the entries out front to back. Entries not yielded stay in the
    /// bucket.
    fn drain(&mut self) -> Self::Drain<'_>;
}
