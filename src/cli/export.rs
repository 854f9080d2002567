use tabled::Table;

use crate::{cli::spinner, config::Settings, error, info, readers, types::Term, utils};

pub async fn export(settings: &Settings, term: Term) {
    let pb = spinner("Collecting export data...");
    let tracks = readers::load_top_tracks(settings, term).await;
    let playlist_id = readers::load_playlist_id(settings).await;
    pb.finish_and_clear();

    let rows = match tracks
        .and_then(utils::dedupe_by_name)
        .and_then(|t| utils::to_export_table(&t))
    {
        Ok(rows) => rows,
        Err(e) => error!("Cannot build export table. Err: {}", e),
    };

    let playlist_id = match playlist_id {
        Ok(id) => id,
        Err(e) => error!("Cannot read the latest playlist id. Err: {}", e),
    };

    info!("Playlist Name: My Top Tracks Playlist");
    info!(
        "Spotify User ID: {}",
        settings.spotify_user_id.as_deref().unwrap_or_default()
    );
    info!("Playlist Description: Generated playlist based on your top tracks");
    println!("{}", Table::new(rows));
    info!("Latest playlist: {}", utils::playlist_embed_url(&playlist_id));
    info!("Update Data: {}", utils::refresh_url(settings, Some(term)));
}
