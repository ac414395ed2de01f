use std::{collections::BTreeMap, marker::PhantomData};

use chained_hash_table::{traits::HashTable, TableError};
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{FuzzSettings, MAX_CAPACITY, MIN_KEYS};

/// deterministically applies an operation to a T returning the result.
/// Ownership of the target is threaded through so consuming operations fit.
pub trait Operation<T> {
    type Result: Sized;
    fn apply(&self, target: T) -> Result<(T, Self::Result), TableError>;
}

// deterministically generates a sequence of valid operations with their
// expected results
pub trait OperationGenerator:
    Iterator<Item = (Self::Operation, Self::Result)> + Sized
{
    type Operation;
    type Result;
    type ReferenceImpl;
    fn from_settings(settings: &FuzzSettings) -> Self;
    fn data(self) -> Self::ReferenceImpl;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HashTableOperation {
    Insert(String, String),
    Retrieve(String),
    Remove(String),
    Resize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Inserted(Option<String>),
    Retrieved(Option<String>),
    Removed(Option<String>),
    Resized { capacity: usize, len: usize },
}

impl<T: HashTable> Operation<T> for HashTableOperation {
    type Result = Outcome;

    fn apply(&self, mut table: T) -> Result<(T, Outcome), TableError> {
        let outcome = match self {
            Self::Insert(key, value) => Outcome::Inserted(table.insert(key.clone(), value.clone())),
            Self::Retrieve(key) => Outcome::Retrieved(table.get(key).map(str::to_owned)),
            Self::Remove(key) => match table.remove(key) {
                Ok(value) => Outcome::Removed(Some(value)),
                Err(err) if err.is_not_found() => Outcome::Removed(None),
                Err(err) => return Err(err),
            },
            Self::Resize => {
                table = table.resize()?;
                Outcome::Resized {
                    capacity: table.capacity(),
                    len: table.len(),
                }
            }
        };
        Ok((table, outcome))
    }
}

/// What the table should contain after the generated operations.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Reference {
    pub data: BTreeMap<String, String>,
    pub capacity: usize,
}

pub struct HashTableOperationGenerator<T: HashTable, R = StdRng> {
    rng: R,
    reference: Reference,
    key_space: usize,
    marker: PhantomData<T>,
}

pub type SeededGenerator<T> = HashTableOperationGenerator<T, StdRng>;

impl<T: HashTable, R: Rng + SeedableRng> HashTableOperationGenerator<T, R> {
    fn random_key(&mut self) -> String {
        format!("key_{}", self.rng.gen_range(0..self.key_space))
    }

    // 3 out of 4 lookups target a key that is known to be present
    fn lookup_key(&mut self) -> String {
        if self.rng.gen_bool(0.75) {
            let ind = self.rng.gen_range(0..self.reference.data.len());
            if let Some(key) = self.reference.data.keys().nth(ind) {
                return key.clone();
            }
        }
        self.random_key()
    }

    fn insert(&mut self) -> (HashTableOperation, Outcome) {
        let key = self.random_key();
        let value = if self.rng.gen_bool(0.1) {
            String::new()
        } else {
            format!("value_{}", self.rng.gen::<u32>())
        };
        let res = self.reference.data.insert(key.clone(), value.clone());
        (HashTableOperation::Insert(key, value), Outcome::Inserted(res))
    }
}

impl<T: HashTable, R: Rng + SeedableRng> OperationGenerator for HashTableOperationGenerator<T, R> {
    type Operation = HashTableOperation;
    type Result = Outcome;
    type ReferenceImpl = Reference;

    fn from_settings(settings: &FuzzSettings) -> Self {
        Self {
            rng: R::seed_from_u64(settings.seed),
            reference: Reference {
                data: BTreeMap::new(),
                capacity: settings.starting_capacity,
            },
            key_space: settings.key_space.max(MIN_KEYS),
            marker: PhantomData,
        }
    }

    fn data(self) -> Reference {
        self.reference
    }
}

impl<T: HashTable, R: Rng + SeedableRng> Iterator for HashTableOperationGenerator<T, R> {
    type Item = (HashTableOperation, Outcome);

    fn next(&mut self) -> Option<Self::Item> {
        //  only inserts until there are enough keys to look up
        if self.reference.data.len() < MIN_KEYS {
            return Some(self.insert());
        }

        let roll = self.rng.gen_range(0..100);
        let item = match roll {
            0..=44 => self.insert(),
            45..=74 => {
                let key = self.lookup_key();
                let res = self.reference.data.get(&key).cloned();
                (HashTableOperation::Retrieve(key), Outcome::Retrieved(res))
            }
            75..=96 => {
                let key = self.lookup_key();
                let res = self.reference.data.remove(&key);
                (HashTableOperation::Remove(key), Outcome::Removed(res))
            }
            _ if self.reference.capacity < MAX_CAPACITY => {
                self.reference.capacity *= 2;
                let res = Outcome::Resized {
                    capacity: self.reference.capacity,
                    len: self.reference.data.len(),
                };
                (HashTableOperation::Resize, res)
            }
            _ => self.insert(),
        };
        Some(item)
    }
}
