//! Row types and Arrow batch builders for each output table

use super::time::{calendar_parts, utc_from_epoch_ms};
use crate::error::Result;
use crate::source::{EventRecord, SongRecord};
use arrow::array::{
    ArrayRef, Float64Array, Int32Array, Int64Array, StringArray, TimestampMillisecondArray,
};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use arrow::record_batch::RecordBatch;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Millisecond-precision timestamp column type
fn timestamp_ms() -> DataType {
    DataType::Timestamp(TimeUnit::Millisecond, None)
}

// ============================================================================
// Songs Dimension
// ============================================================================

static SONGS_SCHEMA: Lazy<SchemaRef> = Lazy::new(|| {
    Arc::new(Schema::new(vec![
        Field::new("song_id", DataType::Utf8, false),
        Field::new("title", DataType::Utf8, false),
        Field::new("artist_id", DataType::Utf8, false),
        Field::new("year", DataType::Int32, false),
        Field::new("duration", DataType::Float64, false),
    ]))
});

/// One row of the songs dimension; partitioned by `year` on write
#[derive(Debug, Clone, PartialEq)]
pub struct SongRow {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: i32,
    pub duration: f64,
}

impl SongRow {
    /// Project a raw catalog record onto the songs columns
    pub fn from_record(record: &SongRecord) -> Self {
        Self {
            song_id: record.song_id.clone(),
            title: record.title.clone(),
            artist_id: record.artist_id.clone(),
            year: record.year,
            duration: record.duration,
        }
    }

    /// Full-row dedup key
    pub fn dedup_key(&self) -> (String, String, String, i32, u64) {
        (
            self.song_id.clone(),
            self.title.clone(),
            self.artist_id.clone(),
            self.year,
            self.duration.to_bits(),
        )
    }

    /// Partition column values for this row
    pub fn partition(&self) -> Vec<(String, String)> {
        vec![("year".to_string(), self.year.to_string())]
    }

    /// The table's Arrow schema
    pub fn schema() -> SchemaRef {
        Arc::clone(&SONGS_SCHEMA)
    }

    /// Build a RecordBatch from rows
    pub fn to_batch(rows: &[Self]) -> Result<RecordBatch> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.song_id.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.title.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.artist_id.as_str()),
            )),
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|r| r.duration),
            )),
        ];
        Ok(RecordBatch::try_new(Self::schema(), columns)?)
    }
}

// ============================================================================
// Artists Dimension
// ============================================================================

static ARTISTS_SCHEMA: Lazy<SchemaRef> = Lazy::new(|| {
    Arc::new(Schema::new(vec![
        Field::new("artist_id", DataType::Utf8, false),
        Field::new("name", DataType::Utf8, false),
        Field::new("location", DataType::Utf8, true),
        Field::new("latitude", DataType::Float64, true),
        Field::new("longitude", DataType::Float64, true),
    ]))
});

/// One row of the artists dimension; unpartitioned
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistRow {
    pub artist_id: String,
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl ArtistRow {
    /// Project and rename a raw catalog record onto the artists columns
    pub fn from_record(record: &SongRecord) -> Self {
        Self {
            artist_id: record.artist_id.clone(),
            name: record.artist_name.clone(),
            location: record.artist_location.clone(),
            latitude: record.artist_latitude,
            longitude: record.artist_longitude,
        }
    }

    /// Full-row dedup key
    pub fn dedup_key(&self) -> (String, String, Option<String>, Option<u64>, Option<u64>) {
        (
            self.artist_id.clone(),
            self.name.clone(),
            self.location.clone(),
            self.latitude.map(f64::to_bits),
            self.longitude.map(f64::to_bits),
        )
    }

    /// The table's Arrow schema
    pub fn schema() -> SchemaRef {
        Arc::clone(&ARTISTS_SCHEMA)
    }

    /// Build a RecordBatch from rows
    pub fn to_batch(rows: &[Self]) -> Result<RecordBatch> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.artist_id.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.name.as_str()),
            )),
            Arc::new(StringArray::from_iter(
                rows.iter().map(|r| r.location.as_deref()),
            )),
            Arc::new(Float64Array::from_iter(rows.iter().map(|r| r.latitude))),
            Arc::new(Float64Array::from_iter(rows.iter().map(|r| r.longitude))),
        ];
        Ok(RecordBatch::try_new(Self::schema(), columns)?)
    }
}

// ============================================================================
// Users Dimension
// ============================================================================

static USERS_SCHEMA: Lazy<SchemaRef> = Lazy::new(|| {
    Arc::new(Schema::new(vec![
        Field::new("user_id", DataType::Utf8, false),
        Field::new("first_name", DataType::Utf8, true),
        Field::new("last_name", DataType::Utf8, true),
        Field::new("gender", DataType::Utf8, true),
        Field::new("level", DataType::Utf8, false),
    ]))
});

/// One row of the users dimension; unpartitioned
///
/// Dedup is on the full row only, so the same user_id legitimately survives
/// twice when another column (typically `level`) differs across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserRow {
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: String,
}

impl UserRow {
    /// Project and rename an event record onto the users columns
    pub fn from_event(event: &EventRecord) -> Self {
        Self {
            user_id: event.user_id.clone(),
            first_name: event.first_name.clone(),
            last_name: event.last_name.clone(),
            gender: event.gender.clone(),
            level: event.level.clone(),
        }
    }

    /// The table's Arrow schema
    pub fn schema() -> SchemaRef {
        Arc::clone(&USERS_SCHEMA)
    }

    /// Build a RecordBatch from rows
    pub fn to_batch(rows: &[Self]) -> Result<RecordBatch> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.user_id.as_str()),
            )),
            Arc::new(StringArray::from_iter(
                rows.iter().map(|r| r.first_name.as_deref()),
            )),
            Arc::new(StringArray::from_iter(
                rows.iter().map(|r| r.last_name.as_deref()),
            )),
            Arc::new(StringArray::from_iter(
                rows.iter().map(|r| r.gender.as_deref()),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.level.as_str()),
            )),
        ];
        Ok(RecordBatch::try_new(Self::schema(), columns)?)
    }
}

// ============================================================================
// Time Dimension
// ============================================================================

static TIMES_SCHEMA: Lazy<SchemaRef> = Lazy::new(|| {
    Arc::new(Schema::new(vec![
        Field::new("start_time", timestamp_ms(), false),
        Field::new("hour", DataType::Int32, false),
        Field::new("day", DataType::Int32, false),
        Field::new("week", DataType::Int32, false),
        Field::new("month", DataType::Int32, false),
        Field::new("year", DataType::Int32, false),
        Field::new("weekday", DataType::Int32, false),
    ]))
});

/// One row of the time dimension; partitioned by (year, month) on write
///
/// No dedup is applied: one row per filtered event, duplicate start_times
/// included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRow {
    /// Epoch milliseconds, UTC
    pub start_time: i64,
    pub hour: i32,
    pub day: i32,
    pub week: i32,
    pub month: i32,
    pub year: i32,
    pub weekday: i32,
}

impl TimeRow {
    /// Derive a time row from an event's epoch-millisecond timestamp
    pub fn from_epoch_ms(ms: i64) -> Result<Self> {
        let ts = utc_from_epoch_ms(ms)?;
        let parts = calendar_parts(ts);
        Ok(Self {
            start_time: ms,
            hour: parts.hour,
            day: parts.day,
            week: parts.week,
            month: parts.month,
            year: parts.year,
            weekday: parts.weekday,
        })
    }

    /// Partition column values for this row
    pub fn partition(&self) -> Vec<(String, String)> {
        vec![
            ("year".to_string(), self.year.to_string()),
            ("month".to_string(), self.month.to_string()),
        ]
    }

    /// The table's Arrow schema
    pub fn schema() -> SchemaRef {
        Arc::clone(&TIMES_SCHEMA)
    }

    /// Build a RecordBatch from rows
    pub fn to_batch(rows: &[Self]) -> Result<RecordBatch> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(TimestampMillisecondArray::from_iter_values(
                rows.iter().map(|r| r.start_time),
            )),
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.hour))),
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.day))),
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.week))),
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.month))),
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(Int32Array::from_iter_values(
                rows.iter().map(|r| r.weekday),
            )),
        ];
        Ok(RecordBatch::try_new(Self::schema(), columns)?)
    }
}

// ============================================================================
// Songplays Fact Table
// ============================================================================

static SONGPLAYS_SCHEMA: Lazy<SchemaRef> = Lazy::new(|| {
    Arc::new(Schema::new(vec![
        Field::new("songplay_id", DataType::Int64, false),
        Field::new("start_time", timestamp_ms(), false),
        Field::new("user_id", DataType::Utf8, false),
        Field::new("level", DataType::Utf8, false),
        Field::new("song_id", DataType::Utf8, true),
        Field::new("artist_id", DataType::Utf8, true),
        Field::new("session_id", DataType::Int64, false),
        Field::new("location", DataType::Utf8, true),
        Field::new("user_agent", DataType::Utf8, true),
        Field::new("year", DataType::Int32, false),
        Field::new("month", DataType::Int32, false),
    ]))
});

/// One row of the songplays fact table; partitioned by (year, month)
///
/// `song_id`/`artist_id` are null when the catalog join found no match.
/// `year` and `month` are derived from `start_time` for partitioning only.
#[derive(Debug, Clone, PartialEq)]
pub struct SongplayRow {
    pub songplay_id: i64,
    /// Epoch milliseconds, UTC
    pub start_time: i64,
    pub user_id: String,
    pub level: String,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: i64,
    pub location: Option<String>,
    pub user_agent: Option<String>,
    pub year: i32,
    pub month: i32,
}

impl SongplayRow {
    /// Partition column values for this row
    pub fn partition(&self) -> Vec<(String, String)> {
        vec![
            ("year".to_string(), self.year.to_string()),
            ("month".to_string(), self.month.to_string()),
        ]
    }

    /// The table's Arrow schema
    pub fn schema() -> SchemaRef {
        Arc::clone(&SONGPLAYS_SCHEMA)
    }

    /// Build a RecordBatch from rows
    pub fn to_batch(rows: &[Self]) -> Result<RecordBatch> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from_iter_values(
                rows.iter().map(|r| r.songplay_id),
            )),
            Arc::new(TimestampMillisecondArray::from_iter_values(
                rows.iter().map(|r| r.start_time),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.user_id.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.level.as_str()),
            )),
            Arc::new(StringArray::from_iter(
                rows.iter().map(|r| r.song_id.as_deref()),
            )),
            Arc::new(StringArray::from_iter(
                rows.iter().map(|r| r.artist_id.as_deref()),
            )),
            Arc::new(Int64Array::from_iter_values(
                rows.iter().map(|r| r.session_id),
            )),
            Arc::new(StringArray::from_iter(
                rows.iter().map(|r| r.location.as_deref()),
            )),
            Arc::new(StringArray::from_iter(
                rows.iter().map(|r| r.user_agent.as_deref()),
            )),
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.month))),
        ];
        Ok(RecordBatch::try_new(Self::schema(), columns)?)
    }
}
