//! Typed input record schemas

use serde::Deserialize;

/// One raw catalog record describing a song and its artist
///
/// `year` is 0 when unknown; latitude/longitude/location are frequently null
/// in the raw data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SongRecord {
    pub song_id: String,
    pub title: String,
    pub duration: f64,
    pub year: i32,
    pub artist_id: String,
    pub artist_name: String,
    #[serde(default)]
    pub artist_location: Option<String>,
    #[serde(default)]
    pub artist_latitude: Option<f64>,
    #[serde(default)]
    pub artist_longitude: Option<f64>,
}

/// One raw event record describing a user action
///
/// Field names follow the source's camelCase convention. `ts` is epoch
/// milliseconds. `user_id` arrives as a string-typed numeric. The song
/// fields (`artist`, `song`, `length`) are null on non-playback events.
/// Fields the pipeline never touches (auth, method, status, registration,
/// itemInSession) are ignored at decode time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub page: String,
    pub ts: i64,
    pub user_id: String,
    pub level: String,
    pub session_id: i64,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub song: Option<String>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}
