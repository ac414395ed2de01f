//! A separate-chaining hash table for string keys and string values.
//!
//! Buckets are indexed with djb2 and every bucket owns a singly linked chain
//! of entries. Growth is never automatic: callers double the bucket count with
//! [`SCHashTable::resize`] (or [`SCHashTable::grow`]) when they see fit.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod hash;
pub mod prelude;
pub mod seperate_chaining;
pub mod traits;

pub use error::TableError;
pub use seperate_chaining::{ChainedHashTable, SCHashTable};
