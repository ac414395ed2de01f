use core::mem;

use log::trace;

use super::Bucket;

type Link = Option<Box<Entry>>;

struct Entry {
    key: String,
    value: String,
    next: Link,
}

impl Entry {
    fn boxed(key: String, value: String) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            next: None,
        })
    }

    fn into_pair(self: Box<Self>) -> (String, String) {
        let Entry { key, value, .. } = *self;
        (key, value)
    }
}

/// Bucket backed by a singly linked list. Each entry owns the next one, so
/// the head owns the whole chain.
#[derive(Default)]
pub struct SLLBucket {
    head: Link,
}

impl Bucket for SLLBucket {
    type Iter<'a> = SLLBucketIter<'a>;
    type Drain<'a> = SLLBucketDrain<'a>;

    fn insert(&mut self, key: String, value: String) -> Option<String> {
        let mut entry = match self.head.as_deref_mut() {
            Some(entry) => entry,
            None => {
                self.head = Some(Entry::boxed(key, value));
                return None;
            }
        };
        loop {
            if entry.key == key {
                trace!("updating value for key {}", key);
                return Some(mem::replace(&mut entry.value, value));
            }
            match entry.next {
                Some(ref mut next) => entry = &mut **next,
                None => {
                    entry.next = Some(Entry::boxed(key, value));
                    return None;
                }
            }
        }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    fn remove(&mut self, key: &str) -> Option<(String, String)> {
        if self.head.as_ref()?.key == key {
            let mut removed = self.head.take()?;
            self.head = removed.next.take();
            return Some(removed.into_pair());
        }

        let mut prev = self.head.as_deref_mut()?;
        loop {
            let found = match prev.next.as_deref() {
                Some(next) => next.key == key,
                None => return None,
            };
            if found {
                let mut removed = prev.next.take()?;
                prev.next = removed.next.take();
                return Some(removed.into_pair());
            }
            prev = prev.next.as_deref_mut()?;
        }
    }

    fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn clear(&mut self) {
        let mut head = self.head.take();
        while let Some(mut entry) = head {
            head = entry.next.take();
        }
    }

    fn iter(&self) -> SLLBucketIter<'_> {
        SLLBucketIter {
            head: self.head.as_deref(),
        }
    }

    fn drain(&mut self) -> SLLBucketDrain<'_> {
        SLLBucketDrain {
            head: &mut self.head,
        }
    }
}

// unlink one entry at a time, the default recursive drop would use stack
// proportional to the chain length
impl Drop for SLLBucket {
    fn drop(&mut self) {
        self.clear();
    }
}

pub struct SLLBucketIter<'a> {
    head: Option<&'a Entry>,
}

impl<'a> Iterator for SLLBucketIter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.head?;
        self.head = entry.next.as_deref();
        Some((entry.key.as_str(), entry.value.as_str()))
    }
}

pub struct SLLBucketDrain<'a> {
    head: &'a mut Link,
}

impl Iterator for SLLBucketDrain<'_> {
    type Item = (String, String);

    fn next(&mut self) -> Option<Self::Item> {
        let mut entry = self.head.take()?;
        *self.head = entry.next.take();
        Some(entry.into_pair())
    }
}
