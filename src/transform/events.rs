//! Event transformer: raw log data to the users and times dimensions and the
//! songplays fact table

use crate::context::ExecutionContext;
use crate::error::Result;
use crate::output::{
    group_by_partition, overwrite_table, write_table_partition, ParquetWriterConfig,
};
use crate::source::{self, EventRecord, SongRecord, NEXT_SONG_PAGE};
use crate::tables::{
    calendar_parts, dedup_rows, utc_from_epoch_ms, SongplayIdGenerator, SongplayRow, TimeRow,
    UserRow,
};
use std::collections::HashMap;
use tracing::info;

/// Row counts from one event-stage run
#[derive(Debug, Clone, Copy, Default)]
pub struct EventStats {
    /// Raw event records read
    pub events_read: usize,
    /// Events surviving the NextSong filter
    pub plays: usize,
    /// Users rows written after dedup
    pub users_written: usize,
    /// Times rows written (no dedup)
    pub times_written: usize,
    /// Songplays rows written (one per filtered event)
    pub songplays_written: usize,
    /// Songplays rows with a catalog match
    pub songplays_matched: usize,
}

/// Catalog lookup key: (artist name, song title, duration bit pattern)
///
/// Duration matches on exact bit equality, the original join's semantics.
type JoinKey = (String, String, u64);

/// Index the catalog dataset for the songplays join
///
/// When several catalog rows share one key, the first wins: each event must
/// appear exactly once in the fact table.
fn catalog_index(records: &[SongRecord]) -> HashMap<JoinKey, (String, String)> {
    let mut index = HashMap::with_capacity(records.len());
    for record in records {
        index
            .entry((
                record.artist_name.clone(),
                record.title.clone(),
                record.duration.to_bits(),
            ))
            .or_insert_with(|| (record.song_id.clone(), record.artist_id.clone()));
    }
    index
}

/// Build an event's join key; a null artist, song or length never matches
fn join_key(event: &EventRecord) -> Option<JoinKey> {
    Some((
        event.artist.clone()?,
        event.song.clone()?,
        event.length?.to_bits(),
    ))
}

/// Run the event stage
///
/// Reads every `log_data/*/*/*.json` record, filters to NextSong events,
/// writes the users dimension, the times dimension (partitioned by year and
/// month), and the songplays fact table joined against a fresh read of the
/// catalog dataset. All writes are overwrite mode.
pub async fn process_events(ctx: &ExecutionContext) -> Result<EventStats> {
    let writer_config = ParquetWriterConfig::default();
    let mut stats = EventStats::default();

    info!("event stage: reading log data");
    let events = source::read_log_data(&ctx.input).await?;
    stats.events_read = events.len();

    // Only song-play actions feed the downstream tables
    let plays: Vec<EventRecord> = events
        .into_iter()
        .filter(|event| event.page == NEXT_SONG_PAGE)
        .collect();
    stats.plays = plays.len();

    // Users: project/rename, dedup on the full row
    let users = dedup_rows(plays.iter().map(UserRow::from_event).collect(), Clone::clone);
    stats.users_written = users.len();
    overwrite_table(&ctx.output, "users").await?;
    let batch = UserRow::to_batch(&users)?;
    write_table_partition(&ctx.output, "users", &[], &batch, &writer_config).await?;

    // Times: one row per filtered event, duplicates included
    let times: Vec<TimeRow> = plays
        .iter()
        .map(|event| TimeRow::from_epoch_ms(event.ts))
        .collect::<Result<_>>()?;
    stats.times_written = times.len();
    overwrite_table(&ctx.output, "times").await?;
    for (partition, rows) in &group_by_partition(times, TimeRow::partition) {
        let batch = TimeRow::to_batch(rows)?;
        write_table_partition(&ctx.output, "times", partition, &batch, &writer_config).await?;
    }

    // Songplays: left-outer join against a fresh read of the catalog
    // dataset, not the catalog stage's in-memory result
    let catalog = source::read_song_data(&ctx.input).await?;
    let index = catalog_index(&catalog);

    let mut id_generator = SongplayIdGenerator::default();
    let mut songplays = Vec::with_capacity(plays.len());
    for event in &plays {
        let matched = join_key(event).and_then(|key| index.get(&key));
        if matched.is_some() {
            stats.songplays_matched += 1;
        }
        let parts = calendar_parts(utc_from_epoch_ms(event.ts)?);
        songplays.push(SongplayRow {
            songplay_id: id_generator.next_id(),
            start_time: event.ts,
            user_id: event.user_id.clone(),
            level: event.level.clone(),
            song_id: matched.map(|(song_id, _)| song_id.clone()),
            artist_id: matched.map(|(_, artist_id)| artist_id.clone()),
            session_id: event.session_id,
            location: event.location.clone(),
            user_agent: event.user_agent.clone(),
            year: parts.year,
            month: parts.month,
        });
    }
    stats.songplays_written = songplays.len();

    overwrite_table(&ctx.output, "songplays").await?;
    for (partition, rows) in &group_by_partition(songplays, SongplayRow::partition) {
        let batch = SongplayRow::to_batch(rows)?;
        write_table_partition(&ctx.output, "songplays", partition, &batch, &writer_config)
            .await?;
    }

    info!(
        events = stats.events_read,
        plays = stats.plays,
        users = stats.users_written,
        times = stats.times_written,
        songplays = stats.songplays_written,
        matched = stats.songplays_matched,
        "event stage complete"
    );
    Ok(stats)
}
