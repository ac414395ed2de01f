pub use crate::{
    error::TableError,
    hash::{djb2, hash},
    seperate_chaining::{Bucket, ChainedHashTable, SCHashTable, SLLBucket},
    traits::HashTable,
};
