//! Partitioned, overwrite-mode table writes

use super::writer::{batch_to_parquet_bytes, ParquetWriterConfig};
use crate::context::StoreLocation;
use crate::error::Result;
use arrow::record_batch::RecordBatch;
use futures::TryStreamExt;
use std::collections::BTreeMap;
use tracing::debug;

/// File name of the single data file written per partition
const DATA_FILE: &str = "data.parquet";

/// Partition column values as (name, value) pairs, in path order
pub type PartitionValues = Vec<(String, String)>;

/// Build the relative path of one partition's data file
///
/// `songs` + `[("year", "1982")]` becomes `songs/year=1982/data.parquet`;
/// an empty partition list is the unpartitioned case, `songs/data.parquet`.
pub fn partition_path(table: &str, partition: &[(String, String)]) -> String {
    let mut path = table.to_string();
    for (name, value) in partition {
        path.push('/');
        path.push_str(name);
        path.push('=');
        path.push_str(value);
    }
    path.push('/');
    path.push_str(DATA_FILE);
    path
}

/// Group rows by their partition column values, in sorted partition order
pub fn group_by_partition<T, F>(
    rows: Vec<T>,
    partition: F,
) -> BTreeMap<PartitionValues, Vec<T>>
where
    F: Fn(&T) -> PartitionValues,
{
    let mut groups: BTreeMap<PartitionValues, Vec<T>> = BTreeMap::new();
    for row in rows {
        groups.entry(partition(&row)).or_default().push(row);
    }
    groups
}

/// Delete every object currently under a table's prefix
///
/// Overwrite mode replaces ALL prior output of the table, not just the
/// partitions touched by this run. Returns the number of deleted objects.
pub async fn overwrite_table(location: &StoreLocation, table: &str) -> Result<usize> {
    let prefix = location.path(table);
    let metas: Vec<object_store::ObjectMeta> =
        location.store().list(Some(&prefix)).try_collect().await?;

    let mut deleted = 0;
    for meta in metas {
        location.store().delete(&meta.location).await?;
        deleted += 1;
    }

    if deleted > 0 {
        debug!(table, deleted, "cleared prior table output");
    }
    Ok(deleted)
}

/// Encode one partition's batch and write its data file
///
/// The call blocks until the object is fully persisted. Returns the path
/// written, relative to the output root.
pub async fn write_table_partition(
    location: &StoreLocation,
    table: &str,
    partition: &[(String, String)],
    batch: &RecordBatch,
    config: &ParquetWriterConfig,
) -> Result<String> {
    let relative = partition_path(table, partition);
    let data = batch_to_parquet_bytes(batch, config)?;
    let path = location.path(&relative);

    location.store().put(&path, data.into()).await?;

    debug!(path = %path, rows = batch.num_rows(), "wrote partition");
    Ok(relative)
}
