use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Unable to find entry with key: {0}")]
    KeyNotFound(String),
    #[error("Invalid capacity {0}, a table needs at least one bucket")]
    InvalidCapacity(usize),
    #[error("Doubling capacity {0} overflows usize")]
    CapacityOverflow(usize),
    #[error("Failed to allocate bucket storage: {0}")]
    AllocationFailure(#[from] TryReserveError),
}

impl TableError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TableError::KeyNotFound(_))
    }
}
