//! Tests for the output module

use super::*;
use crate::context::StoreLocation;
use crate::tables::SongRow;
use bytes::Bytes;
use object_store::path::Path as ObjectPath;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use pretty_assertions::assert_eq;

fn sample_rows() -> Vec<SongRow> {
    vec![
        SongRow {
            song_id: "SO1".to_string(),
            title: "Setanta matins".to_string(),
            artist_id: "AR1".to_string(),
            year: 1982,
            duration: 233.4,
        },
        SongRow {
            song_id: "SO2".to_string(),
            title: "Intro".to_string(),
            artist_id: "AR2".to_string(),
            year: 1982,
            duration: 75.7,
        },
        SongRow {
            song_id: "SO3".to_string(),
            title: "Unknown".to_string(),
            artist_id: "AR3".to_string(),
            year: 0,
            duration: 181.2,
        },
    ]
}

// ============================================================================
// Partition Path Tests
// ============================================================================

#[test]
fn test_partition_path_single_column() {
    let partition = vec![("year".to_string(), "1982".to_string())];
    assert_eq!(
        partition_path("songs", &partition),
        "songs/year=1982/data.parquet"
    );
}

#[test]
fn test_partition_path_two_columns() {
    let partition = vec![
        ("year".to_string(), "2018".to_string()),
        ("month".to_string(), "11".to_string()),
    ];
    assert_eq!(
        partition_path("songplays", &partition),
        "songplays/year=2018/month=11/data.parquet"
    );
}

#[test]
fn test_partition_path_unpartitioned() {
    assert_eq!(partition_path("artists", &[]), "artists/data.parquet");
}

// ============================================================================
// Grouping Tests
// ============================================================================

#[test]
fn test_group_by_partition_splits_by_year() {
    let groups = group_by_partition(sample_rows(), SongRow::partition);
    assert_eq!(groups.len(), 2);

    let y1982 = &groups[&vec![("year".to_string(), "1982".to_string())]];
    assert_eq!(y1982.len(), 2);
    let y0 = &groups[&vec![("year".to_string(), "0".to_string())]];
    assert_eq!(y0.len(), 1);
}

#[test]
fn test_group_rows_match_their_partition() {
    // Partition correctness: every grouped row's column value matches the
    // partition it landed in
    let groups = group_by_partition(sample_rows(), SongRow::partition);
    for (partition, rows) in &groups {
        let year: i32 = partition[0].1.parse().unwrap();
        for row in rows {
            assert_eq!(row.year, year);
        }
    }
}

// ============================================================================
// Parquet Round-Trip Tests
// ============================================================================

#[test]
fn test_parquet_bytes_readable() {
    let batch = SongRow::to_batch(&sample_rows()).unwrap();
    let bytes = batch_to_parquet_bytes(&batch, &ParquetWriterConfig::default()).unwrap();

    let reader = ParquetRecordBatchReaderBuilder::try_new(bytes)
        .unwrap()
        .build()
        .unwrap();
    let batches: Vec<_> = reader.map(Result::unwrap).collect();
    let total: usize = batches.iter().map(|b| b.num_rows()).sum();
    assert_eq!(total, 3);
    assert_eq!(batches[0].schema().field(0).name(), "song_id");
}

#[test]
fn test_writer_config_builder() {
    let config = ParquetWriterConfig::new()
        .uncompressed()
        .with_row_group_size(128)
        .with_dictionary(false)
        .with_statistics(false);
    let batch = SongRow::to_batch(&sample_rows()).unwrap();
    // Still produces a readable file under non-default settings
    let bytes = batch_to_parquet_bytes(&batch, &config).unwrap();
    let reader = ParquetRecordBatchReaderBuilder::try_new(bytes)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(reader.map(Result::unwrap).count(), 1);
}

// ============================================================================
// Overwrite Tests
// ============================================================================

#[tokio::test]
async fn test_overwrite_clears_only_the_table() {
    let dir = tempfile::tempdir().unwrap();
    let loc = StoreLocation::parse(dir.path().to_str().unwrap()).unwrap();
    let store = loc.store();

    for path in [
        "songs/year=1982/data.parquet",
        "songs/year=2004/data.parquet",
        "artists/data.parquet",
    ] {
        store
            .put(&ObjectPath::from(path), Bytes::from_static(b"x").into())
            .await
            .unwrap();
    }

    let deleted = overwrite_table(&loc, "songs").await.unwrap();
    assert_eq!(deleted, 2);

    // The other table is untouched
    assert!(store
        .get(&ObjectPath::from("artists/data.parquet"))
        .await
        .is_ok());
    assert!(store
        .get(&ObjectPath::from("songs/year=1982/data.parquet"))
        .await
        .is_err());
}

#[tokio::test]
async fn test_overwrite_empty_table_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let loc = StoreLocation::parse(dir.path().to_str().unwrap()).unwrap();
    assert_eq!(overwrite_table(&loc, "songs").await.unwrap(), 0);
}

#[tokio::test]
async fn test_write_table_partition_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let loc = StoreLocation::parse(dir.path().to_str().unwrap()).unwrap();

    let batch = SongRow::to_batch(&sample_rows()).unwrap();
    let partition = vec![("year".to_string(), "1982".to_string())];
    let written = write_table_partition(
        &loc,
        "songs",
        &partition,
        &batch,
        &ParquetWriterConfig::default(),
    )
    .await
    .unwrap();
    assert_eq!(written, "songs/year=1982/data.parquet");

    let data = loc
        .store()
        .get(&ObjectPath::from(written))
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    let reader = ParquetRecordBatchReaderBuilder::try_new(data)
        .unwrap()
        .build()
        .unwrap();
    let total: usize = reader.map(|b| b.unwrap().num_rows()).sum();
    assert_eq!(total, 3);
}
