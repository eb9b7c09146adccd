//! Catalog transformer: raw song data to the songs and artists dimensions

use crate::context::ExecutionContext;
use crate::error::Result;
use crate::output::{
    group_by_partition, overwrite_table, write_table_partition, ParquetWriterConfig,
};
use crate::source;
use crate::tables::{dedup_rows, ArtistRow, SongRow};
use tracing::info;

/// Row counts from one catalog-stage run
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogStats {
    /// Raw catalog records read
    pub records_read: usize,
    /// Songs rows written after dedup
    pub songs_written: usize,
    /// Distinct year partitions under `songs/`
    pub song_partitions: usize,
    /// Artists rows written after dedup
    pub artists_written: usize,
}

/// Run the catalog stage
///
/// Reads every `song_data/*/*/*/*.json` record, writes the songs dimension
/// partitioned by year and the artists dimension unpartitioned, both in
/// overwrite mode.
pub async fn process_catalog(ctx: &ExecutionContext) -> Result<CatalogStats> {
    let writer_config = ParquetWriterConfig::default();
    let mut stats = CatalogStats::default();

    info!("catalog stage: reading song data");
    let records = source::read_song_data(&ctx.input).await?;
    stats.records_read = records.len();

    // Songs: project, dedup exact rows, partition by year
    let songs = dedup_rows(
        records.iter().map(SongRow::from_record).collect(),
        SongRow::dedup_key,
    );
    overwrite_table(&ctx.output, "songs").await?;
    let groups = group_by_partition(songs, SongRow::partition);
    stats.song_partitions = groups.len();
    for (partition, rows) in &groups {
        let batch = SongRow::to_batch(rows)?;
        write_table_partition(&ctx.output, "songs", partition, &batch, &writer_config).await?;
        stats.songs_written += rows.len();
    }

    // Artists: project/rename, dedup exact rows, single file
    let artists = dedup_rows(
        records.iter().map(ArtistRow::from_record).collect(),
        ArtistRow::dedup_key,
    );
    stats.artists_written = artists.len();
    overwrite_table(&ctx.output, "artists").await?;
    let batch = ArtistRow::to_batch(&artists)?;
    write_table_partition(&ctx.output, "artists", &[], &batch, &writer_config).await?;

    info!(
        records = stats.records_read,
        songs = stats.songs_written,
        song_partitions = stats.song_partitions,
        artists = stats.artists_written,
        "catalog stage complete"
    );
    Ok(stats)
}
