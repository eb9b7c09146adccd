//! Star-schema table model
//!
//! Row types for the four dimension tables (songs, artists, users, times)
//! and the songplays fact table, each with an explicit Arrow schema and a
//! rows-to-`RecordBatch` builder. Nothing here is inferred from the data;
//! schemas are fixed up front.

mod id;
mod time;
mod types;

pub use id::SongplayIdGenerator;
pub use time::{calendar_parts, utc_from_epoch_ms, CalendarParts};
pub use types::{ArtistRow, SongRow, SongplayRow, TimeRow, UserRow};

use std::collections::HashSet;
use std::hash::Hash;

/// Remove exact-duplicate rows, keeping the first occurrence in input order
///
/// `key` must cover every column of the row (full-row dedup); float columns
/// hash via their bit pattern.
pub fn dedup_rows<T, K, F>(rows: Vec<T>, key: F) -> Vec<T>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    rows.into_iter().filter(|row| seen.insert(key(row))).collect()
}

#[cfg(test)]
mod tests;
