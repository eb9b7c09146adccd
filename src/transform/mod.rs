//! The two pipeline stages
//!
//! `process_catalog` shapes raw song data into the songs and artists
//! dimensions; `process_events` shapes raw log data into the users and times
//! dimensions plus the songplays fact table. Both run against the shared
//! [`ExecutionContext`](crate::context::ExecutionContext), sequentially, and
//! return per-table row counts for the runner to log.

mod catalog;
mod events;

pub use catalog::{process_catalog, CatalogStats};
pub use events::{process_events, EventStats};
