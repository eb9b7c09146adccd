//! Object-store listing and JSONL decoding

use super::types::{EventRecord, SongRecord};
use crate::context::StoreLocation;
use crate::error::{Error, Result};
use futures::TryStreamExt;
use object_store::path::Path as ObjectPath;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Glob depth of `song_data/*/*/*/*.json`
const SONG_DATA_DEPTH: usize = 4;

/// Glob depth of `log_data/*/*/*.json`
const LOG_DATA_DEPTH: usize = 3;

/// List `.json` objects exactly `depth` path segments below `subdir`
///
/// This is the fixed nested glob of the input layout: a listing under the
/// subdir prefix, filtered by relative depth and extension. Results are
/// sorted for a deterministic read order.
pub async fn list_json_objects(
    location: &StoreLocation,
    subdir: &str,
    depth: usize,
) -> Result<Vec<ObjectPath>> {
    let base = location.path(subdir);
    let base_str = base.as_ref().to_string();

    let metas: Vec<object_store::ObjectMeta> =
        location.store().list(Some(&base)).try_collect().await?;

    let mut paths: Vec<ObjectPath> = metas
        .into_iter()
        .map(|meta| meta.location)
        .filter(|path| matches_glob(path.as_ref(), &base_str, depth))
        .collect();
    paths.sort_unstable();

    debug!(subdir, count = paths.len(), "listed input objects");
    Ok(paths)
}

/// Check whether `path` sits exactly `depth` segments below `base` and ends
/// with `.json`
fn matches_glob(path: &str, base: &str, depth: usize) -> bool {
    let Some(relative) = path.strip_prefix(base).and_then(|r| r.strip_prefix('/')) else {
        return false;
    };
    relative.ends_with(".json") && relative.split('/').count() == depth
}

/// Decode one JSONL object (one JSON record per line) into typed rows
///
/// Blank lines are skipped. Any malformed line or schema mismatch aborts the
/// run with the object path and line number; there is no row-skipping policy.
pub async fn read_jsonl<T: DeserializeOwned>(
    location: &StoreLocation,
    path: &ObjectPath,
) -> Result<Vec<T>> {
    let data = location.store().get(path).await?.bytes().await?;
    let text = std::str::from_utf8(&data)
        .map_err(|e| Error::decode(path.to_string(), 0, format!("invalid UTF-8: {e}")))?;

    let mut records = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record: T = serde_json::from_str(line)
            .map_err(|e| Error::decode(path.to_string(), idx + 1, e.to_string()))?;
        records.push(record);
    }

    debug!(path = %path, count = records.len(), "decoded records");
    Ok(records)
}

/// Read every catalog record under `song_data/*/*/*/*.json`
pub async fn read_song_data(location: &StoreLocation) -> Result<Vec<SongRecord>> {
    read_dataset(location, "song_data", SONG_DATA_DEPTH).await
}

/// Read every event record under `log_data/*/*/*.json`
pub async fn read_log_data(location: &StoreLocation) -> Result<Vec<EventRecord>> {
    read_dataset(location, "log_data", LOG_DATA_DEPTH).await
}

async fn read_dataset<T: DeserializeOwned>(
    location: &StoreLocation,
    subdir: &str,
    depth: usize,
) -> Result<Vec<T>> {
    let paths = list_json_objects(location, subdir, depth).await?;
    let mut records = Vec::new();
    for path in &paths {
        records.extend(read_jsonl::<T>(location, path).await?);
    }
    Ok(records)
}
