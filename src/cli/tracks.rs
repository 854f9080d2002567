use tabled::Table;

use crate::{
    cli::spinner,
    config::Settings,
    error, readers, success,
    types::{Term, TrackTableRow},
    utils,
};

pub async fn tracks(settings: &Settings, term: Term) {
    let pb = spinner(&format!("Fetching top tracks ({})...", term));
    let result = readers::load_top_tracks(settings, term).await;
    pb.finish_and_clear();

    let tracks = match result.and_then(utils::dedupe_by_name) {
        Ok(tracks) => tracks,
        Err(e) => error!("Cannot load top tracks. Err: {}", e),
    };

    let rows: Vec<TrackTableRow> = tracks
        .into_iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            rank: i + 1,
            song: t.song_name.unwrap_or_default(),
            artist: t.artist_name.unwrap_or_default(),
            url: t.song_url.unwrap_or_default(),
        })
        .collect();

    success!("{} unique tracks for {}", rows.len(), term);
    println!("{}", Table::new(rows));
}
