//! Raw input layer
//!
//! Reads the semi-structured JSON inputs into typed records. Each record
//! type carries an explicit serde schema so a malformed or mismatched record
//! fails the run immediately, naming the object and line it came from.
//!
//! # Input layout
//!
//! - `<input_root>/song_data/*/*/*/*.json` - catalog (song) records
//! - `<input_root>/log_data/*/*/*.json` - event (log) records
//!
//! Each file holds one JSON object per line.

mod reader;
mod types;

pub use reader::{list_json_objects, read_jsonl, read_log_data, read_song_data};
pub use types::{EventRecord, SongRecord};

/// Page value identifying song-play events; everything else is discarded
pub const NEXT_SONG_PAGE: &str = "NextSong";
