use std::collections::HashSet;

use rand::{Rng, distr::Alphanumeric};

use crate::{
    config::Settings,
    error::Result,
    types::{ExportRow, Term, Track},
};

pub const PLAYLIST_EMBED_URL: &str = "https://open.spotify.com/embed/playlist";

/// Maps a UI term label to the fragment used in storage keys.
///
/// `"Long Term"` becomes `"long_term"`. Exporters write objects under these
/// exact names, so the transform must stay a plain space replacement followed
/// by lowercasing.
pub fn term_key(label: &str) -> String {
    label.replace(' ', "_").to_lowercase()
}

pub fn top_tracks_key(term: Term) -> String {
    format!("top_tracks_{}.json", term.key())
}

pub fn top_artists_key(term: Term) -> String {
    format!("top_artists_{}.json", term.key())
}

/// Drops every track whose `song_name` was already seen, keeping the first.
///
/// Identity is the song name alone, so two different songs sharing a title
/// collapse into one entry.
pub fn dedupe_by_name(records: Vec<Track>) -> Result<Vec<Track>> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(records.len());

    for record in records {
        if seen.insert(record.song_name()?.to_string()) {
            unique.push(record);
        }
    }

    Ok(unique)
}

pub fn to_export_table(records: &[Track]) -> Result<Vec<ExportRow>> {
    records
        .iter()
        .enumerate()
        .map(|(i, t)| {
            Ok(ExportRow {
                index: i + 1,
                track_name: t.song_name()?.to_string(),
                artist_name: t.artist_name()?.to_string(),
            })
        })
        .collect()
}

/// Link to the exporter backend that refreshes the stored data.
///
/// With a term, the backend also recreates the playlist for that window.
/// The dashboard only hands this URL to the user and never requests it.
pub fn refresh_url(settings: &Settings, term: Option<Term>) -> String {
    let mut url = format!(
        "http://{host}/login?client_id={client_id}",
        host = settings.host_url.as_deref().unwrap_or_default(),
        client_id = settings.client_id.as_deref().unwrap_or_default(),
    );
    if let Some(term) = term {
        url.push_str(&format!("&action=create-playlist-{}", term.key()));
    }
    url
}

pub fn playlist_embed_url(playlist_id: &str) -> String {
    format!("{}/{}", PLAYLIST_EMBED_URL, playlist_id)
}

pub const SESSION_ID_LEN: usize = 48;

pub fn generate_session_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_ID_LEN)
        .map(char::from)
        .collect()
}

/// Whether `id` has the shape of an id from [`generate_session_id`].
pub fn is_session_id(id: &str) -> bool {
    id.len() == SESSION_ID_LEN && id.bytes().all(|b| b.is_ascii_alphanumeric())
}
