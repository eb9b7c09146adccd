//! Synthetic fact-table identifiers

/// Bits reserved for the per-shard sequence
const SHARD_SHIFT: u32 = 33;

/// Monotonically increasing id generator for songplay rows
///
/// Ids are unique and order-correlated within one generator: the shard id
/// occupies the high bits and a sequence counts up from zero in the low
/// bits. Values are not contiguous across shards and two separate generator
/// instances must not share a shard id.
#[derive(Debug, Clone)]
pub struct SongplayIdGenerator {
    next: i64,
}

impl SongplayIdGenerator {
    /// Create a generator for the given shard
    pub fn new(shard: u16) -> Self {
        Self {
            next: i64::from(shard) << SHARD_SHIFT,
        }
    }

    /// Produce the next id
    pub fn next_id(&mut self) -> i64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for SongplayIdGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}
