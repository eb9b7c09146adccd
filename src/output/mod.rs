//! Output module
//!
//! Parquet encoding and partitioned, overwrite-mode table writes through the
//! object store.
//!
//! # Layout
//!
//! Hive-style partition directories under the output root:
//!
//! - `songs/year=1982/data.parquet`
//! - `artists/data.parquet`
//! - `users/data.parquet`
//! - `times/year=2018/month=11/data.parquet`
//! - `songplays/year=2018/month=11/data.parquet`

mod partition;
mod writer;

pub use partition::{
    group_by_partition, overwrite_table, partition_path, write_table_partition,
};
pub use writer::{batch_to_parquet_bytes, ParquetWriterConfig};

#[cfg(test)]
mod tests;
