/// Number of buckets used by `Default`.
pub const DEFAULT_CAPACITY: usize = 50;

/// Starting capacity of the demonstration table. Small on purpose so that
/// the demo keys share buckets.
pub const DEMO_CAPACITY: usize = 2;
