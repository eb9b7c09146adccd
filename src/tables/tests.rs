//! Tests for the table model

use super::*;
use crate::source::SongRecord;
use arrow::array::{Array, Int32Array, Int64Array, StringArray};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn song_record(song_id: &str, artist_id: &str, year: i32, duration: f64) -> SongRecord {
    SongRecord {
        song_id: song_id.to_string(),
        title: format!("title-{song_id}"),
        duration,
        year,
        artist_id: artist_id.to_string(),
        artist_name: format!("artist-{artist_id}"),
        artist_location: None,
        artist_latitude: None,
        artist_longitude: None,
    }
}

// ============================================================================
// Dedup Tests
// ============================================================================

#[test]
fn test_dedup_exact_duplicates() {
    let a = SongRow::from_record(&song_record("SO1", "AR1", 1999, 200.0));
    let rows = vec![a.clone(), a.clone(), a.clone()];
    let deduped = dedup_rows(rows, SongRow::dedup_key);
    assert_eq!(deduped.len(), 1);
}

#[test]
fn test_dedup_preserves_first_occurrence_order() {
    let a = SongRow::from_record(&song_record("SO1", "AR1", 1999, 200.0));
    let b = SongRow::from_record(&song_record("SO2", "AR1", 2004, 181.5));
    let deduped = dedup_rows(
        vec![a.clone(), b.clone(), a.clone()],
        SongRow::dedup_key,
    );
    assert_eq!(deduped, vec![a, b]);
}

#[test]
fn test_dedup_distinguishes_duration_bits() {
    let a = SongRow::from_record(&song_record("SO1", "AR1", 1999, 210.5));
    let b = SongRow::from_record(&song_record("SO1", "AR1", 1999, 210.49999));
    let deduped = dedup_rows(vec![a, b], SongRow::dedup_key);
    assert_eq!(deduped.len(), 2);
}

#[test]
fn test_user_dedup_keeps_level_change() {
    // Same user_id, different level: both rows survive full-row dedup
    let free = UserRow {
        user_id: "15".to_string(),
        first_name: Some("Lily".to_string()),
        last_name: Some("Koch".to_string()),
        gender: Some("F".to_string()),
        level: "free".to_string(),
    };
    let paid = UserRow {
        level: "paid".to_string(),
        ..free.clone()
    };
    let deduped = dedup_rows(vec![free.clone(), paid.clone(), free.clone()], Clone::clone);
    assert_eq!(deduped, vec![free, paid]);
}

#[test]
fn test_artist_dedup_with_null_coordinates() {
    let with_nulls = ArtistRow {
        artist_id: "AR1".to_string(),
        name: "Elena".to_string(),
        location: None,
        latitude: None,
        longitude: None,
    };
    let with_coords = ArtistRow {
        latitude: Some(35.14968),
        longitude: Some(-90.04892),
        ..with_nulls.clone()
    };
    let deduped = dedup_rows(
        vec![with_nulls.clone(), with_coords, with_nulls],
        ArtistRow::dedup_key,
    );
    assert_eq!(deduped.len(), 2);
}

// ============================================================================
// Calendar Derivation Tests
// ============================================================================

#[test]
fn test_timestamp_derivation_reference_value() {
    // 1541440000000 ms = 2018-11-05T17:46:40Z, a Monday
    let row = TimeRow::from_epoch_ms(1_541_440_000_000).unwrap();
    assert_eq!(row.start_time, 1_541_440_000_000);
    assert_eq!(row.year, 2018);
    assert_eq!(row.month, 11);
    assert_eq!(row.day, 5);
    assert_eq!(row.hour, 17);
    assert_eq!(row.week, 45);
    assert_eq!(row.weekday, 2);
}

#[test_case(1_541_289_600_000, 1 ; "sunday 2018-11-04")]
#[test_case(1_541_440_000_000, 2 ; "monday 2018-11-05")]
#[test_case(1_541_785_600_000, 6 ; "friday 2018-11-09")]
#[test_case(1_541_872_000_000, 7 ; "saturday 2018-11-10")]
fn test_weekday_numbering_sunday_first(ms: i64, expected: i32) {
    let row = TimeRow::from_epoch_ms(ms).unwrap();
    assert_eq!(row.weekday, expected);
}

#[test]
fn test_millisecond_precision_preserved() {
    let ts = utc_from_epoch_ms(1_542_837_407_796).unwrap();
    assert_eq!(ts.timestamp_millis(), 1_542_837_407_796);
}

#[test]
fn test_invalid_epoch_ms_is_fatal() {
    assert!(TimeRow::from_epoch_ms(i64::MAX).is_err());
}

// ============================================================================
// Id Generator Tests
// ============================================================================

#[test]
fn test_ids_monotonic_and_distinct() {
    let mut generator = SongplayIdGenerator::default();
    let ids: Vec<i64> = (0..100).map(|_| generator.next_id()).collect();
    for pair in ids.windows(2) {
        assert!(pair[0] < pair[1]);
    }
    let unique: std::collections::HashSet<i64> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn test_ids_disjoint_across_shards() {
    let mut shard0 = SongplayIdGenerator::new(0);
    let mut shard1 = SongplayIdGenerator::new(1);
    let first = shard1.next_id();
    // Shard 1 starts far above anything shard 0 reaches in one run
    assert_eq!(first, 1i64 << 33);
    assert!(shard0.next_id() < first);
}

// ============================================================================
// Batch Builder Tests
// ============================================================================

#[test]
fn test_songs_batch_schema_and_values() {
    let rows = vec![
        SongRow::from_record(&song_record("SO1", "AR1", 1982, 233.4)),
        SongRow::from_record(&song_record("SO2", "AR2", 0, 181.2)),
    ];
    let batch = SongRow::to_batch(&rows).unwrap();
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.schema(), SongRow::schema());

    let ids = batch
        .column(0)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(ids.value(0), "SO1");
    let years = batch
        .column(3)
        .as_any()
        .downcast_ref::<Int32Array>()
        .unwrap();
    assert_eq!(years.value(1), 0);
}

#[test]
fn test_artists_batch_nullable_columns() {
    let rows = vec![ArtistRow {
        artist_id: "AR1".to_string(),
        name: "Elena".to_string(),
        location: None,
        latitude: None,
        longitude: None,
    }];
    let batch = ArtistRow::to_batch(&rows).unwrap();
    assert!(batch.column(2).is_null(0));
    assert!(batch.column(3).is_null(0));
    assert!(batch.column(4).is_null(0));
}

#[test]
fn test_songplays_batch_null_join_columns() {
    let rows = vec![SongplayRow {
        songplay_id: 0,
        start_time: 1_541_440_000_000,
        user_id: "26".to_string(),
        level: "free".to_string(),
        song_id: None,
        artist_id: None,
        session_id: 169,
        location: None,
        user_agent: None,
        year: 2018,
        month: 11,
    }];
    let batch = SongplayRow::to_batch(&rows).unwrap();
    assert_eq!(batch.num_rows(), 1);
    assert!(batch.column(4).is_null(0)); // song_id
    assert!(batch.column(5).is_null(0)); // artist_id
    let session = batch
        .column(6)
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(session.value(0), 169);
}

#[test]
fn test_partition_values() {
    let song = SongRow::from_record(&song_record("SO1", "AR1", 1982, 233.4));
    assert_eq!(
        song.partition(),
        vec![("year".to_string(), "1982".to_string())]
    );

    let time = TimeRow::from_epoch_ms(1_541_440_000_000).unwrap();
    assert_eq!(
        time.partition(),
        vec![
            ("year".to_string(), "2018".to_string()),
            ("month".to_string(), "11".to_string()),
        ]
    );
}
