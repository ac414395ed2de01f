use std::fmt::Debug;

use chained_hash_table::{traits::HashTable, TableError};
use log::{debug, info};
use thiserror::Error;

mod traits;
pub use traits::*;

/// Keys the reference must hold before lookups and removals are generated.
pub const MIN_KEYS: usize = 10;
/// Resizes are only generated while the table is smaller than this.
pub const MAX_CAPACITY: usize = 1 << 12;

#[derive(Debug, Clone)]
pub struct FuzzSettings {
    pub seed: u64,
    pub ops: usize,
    pub starting_capacity: usize,
    pub key_space: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzReport {
    pub seed: u64,
    pub operations: usize,
    pub len: usize,
    pub capacity: usize,
}

#[derive(Error, Debug)]
pub enum OperationFailure {
    #[error("seed {seed}: operation {op_num} {operation:?} expected {expected:?}, got {actual:?}")]
    Mismatch {
        seed: u64,
        op_num: usize,
        operation: HashTableOperation,
        expected: Outcome,
        actual: Outcome,
    },
    #[error("seed {seed}: operation {op_num} {operation:?} failed")]
    Table {
        seed: u64,
        op_num: usize,
        operation: Option<HashTableOperation>,
        #[source]
        source: TableError,
    },
    #[error("seed {seed}: table diverged from the reference after the run, {detail}")]
    Contents { seed: u64, detail: String },
}

impl OperationFailure {
    /// Index of the operation that failed, if a single one is to blame.
    pub fn op_num(&self) -> Option<usize> {
        match self {
            Self::Mismatch { op_num, .. } => Some(*op_num),
            Self::Table {
                op_num,
                operation: Some(_),
                ..
            } => Some(*op_num),
            _ => None,
        }
    }
}

/// Runs `settings.ops` generated operations against a fresh `T` and checks
/// every result against a reference map.
pub fn test_hashtable<T: HashTable>(settings: &FuzzSettings) -> Result<FuzzReport, OperationFailure> {
    let seed = settings.seed;
    info!(
        "fuzzing with seed {} for {} operations, starting capacity {}",
        seed, settings.ops, settings.starting_capacity
    );

    let mut table =
        T::with_capacity(settings.starting_capacity).map_err(|source| OperationFailure::Table {
            seed,
            op_num: 0,
            operation: None,
            source,
        })?;

    let mut generator = SeededGenerator::<T>::from_settings(settings);
    for (op_num, (operation, expected)) in (&mut generator).take(settings.ops).enumerate() {
        let (next, actual) = match operation.apply(table) {
            Ok(applied) => applied,
            Err(source) => {
                return Err(OperationFailure::Table {
                    seed,
                    op_num,
                    operation: Some(operation),
                    source,
                })
            }
        };
        table = next;
        if actual != expected {
            return Err(OperationFailure::Mismatch {
                seed,
                op_num,
                operation,
                expected,
                actual,
            });
        }
    }

    let reference = generator.data();
    verify_contents(&table, &reference)
        .map_err(|detail| OperationFailure::Contents { seed, detail })?;

    debug!(
        "seed {} finished with {} entries in {} buckets",
        seed,
        table.len(),
        table.capacity()
    );
    Ok(FuzzReport {
        seed,
        operations: settings.ops,
        len: table.len(),
        capacity: table.capacity(),
    })
}

fn verify_contents<T: HashTable>(table: &T, reference: &Reference) -> Result<(), String> {
    if table.len() != reference.data.len() {
        return Err(format!(
            "table holds {} entries, reference holds {}",
            table.len(),
            reference.data.len()
        ));
    }
    if table.capacity() != reference.capacity {
        return Err(format!(
            "table has {} buckets, reference expects {}",
            table.capacity(),
            reference.capacity
        ));
    }
    // same length and every reference key present means no extra keys either
    for (key, value) in &reference.data {
        let actual = table.get(key);
        if actual != Some(value.as_str()) {
            return Err(format!(
                "key {} maps to {:?}, expected {:?}",
                key, actual, value
            ));
        }
    }
    Ok(())
}

/// Replays the operations leading up to `op_num`, logging the last few with
/// the table state after each one.
pub fn playback<T: HashTable + Debug>(settings: &FuzzSettings, op_num: usize) -> Result<(), TableError> {
    info!("running playback");
    let mut table = T::with_capacity(settings.starting_capacity)?;
    let lower = op_num.saturating_sub(5);

    let generator = SeededGenerator::<T>::from_settings(settings);
    for (ind, (operation, expected)) in generator.take(op_num + 1).enumerate() {
        let (next, actual) = operation.apply(table)?;
        table = next;
        if ind >= lower {
            info!("--------- operation {} ----------", ind);
            info!("operation: {:?}", operation);
            info!("table_state: {:?}", table);
            info!("expected / actual : {:?}, {:?}", expected, actual);
        }
    }
    Ok(())
}
