//! djb2 bucket indexing.
//!
//! The accumulator is a wrapping `u64`, so the same key lands in the same
//! bucket on every platform regardless of `usize` width.

use crate::error::TableError;

const DJB2_SEED: u64 = 5381;

/// Runs djb2 over `bytes` and returns the unreduced accumulator.
pub fn djb2(bytes: &[u8]) -> u64 {
    bytes.iter().fold(DJB2_SEED, |acc, &c| {
        (acc << 5).wrapping_add(acc).wrapping_add(u64::from(c))
    })
}

/// Maps `key` to a bucket index in `[0, max)`.
///
/// # Errors
/// `max == 0` has no valid index and is reported as
/// [`TableError::InvalidCapacity`].
pub fn hash(key: &str, max: usize) -> Result<usize, TableError> {
    if max == 0 {
        return Err(TableError::InvalidCapacity(max));
    }
    Ok(bucket_index(key, max))
}

/// Same as [`hash`] for callers that already hold a non-zero bucket count.
pub(crate) fn bucket_index(key: &str, max: usize) -> usize {
    debug_assert!(max != 0);
    // the remainder is < max, which always fits back into usize
    (djb2(key.as_bytes()) % max as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_the_seed() {
        assert_eq!(djb2(b""), 5381);
        assert_eq!(hash("", 7).unwrap(), 5381 % 7);
    }

    #[test]
    fn known_values() {
        assert_eq!(djb2(b"a"), 177670);
        assert_eq!(djb2(b"ab"), 5863208);
        assert_eq!(djb2(b"line_1"), 6953744351581);
        assert_eq!(hash("line_1", 1024).unwrap(), 349);
        assert_eq!(hash("line_2", 2).unwrap(), 0);
        assert_eq!(hash("line_3", 2).unwrap(), 1);
    }

    #[test]
    fn long_keys_wrap() {
        assert_eq!(
            djb2(b"the quick brown fox jumps over the lazy dog"),
            1653687373046440190
        );
    }

    #[test]
    fn bytes_are_unsigned() {
        // 'é' encodes to 0xC3 0xA9, both above i8::MAX
        assert_eq!(djb2("héllo".as_bytes()), 6953696671296);
        assert_eq!(hash("héllo", 1024).unwrap(), 576);
    }

    #[test]
    fn deterministic_and_in_range() {
        let first = hash("line_1", 1024).unwrap();
        for _ in 0..10 {
            assert_eq!(hash("line_1", 1024).unwrap(), first);
        }
        for max in 1..64 {
            for key in ["", "a", "line_1", "line_2", "a much longer key than the others"] {
                assert!(hash(key, max).unwrap() < max);
            }
        }
    }

    #[test]
    fn zero_modulus_is_rejected() {
        assert_eq!(hash("line_1", 0), Err(TableError::InvalidCapacity(0)));
    }
}
