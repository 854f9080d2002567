use tabled::Table;

use crate::{
    cli::spinner,
    config::Settings,
    error, readers, success,
    types::{ArtistTableRow, Term},
};

pub async fn artists(settings: &Settings, term: Term) {
    let pb = spinner(&format!("Fetching top artists ({})...", term));
    let result = readers::load_top_artists(settings, term).await;
    pb.finish_and_clear();

    let artists = match result {
        Ok(artists) => artists,
        Err(e) => error!("Cannot load top artists. Err: {}", e),
    };

    let rows: Vec<ArtistTableRow> = artists
        .into_iter()
        .enumerate()
        .map(|(i, a)| ArtistTableRow {
            rank: i + 1,
            name: a.artist_name.unwrap_or_default(),
            followers: a
                .artist_followers
                .map(|f| f.to_string())
                .unwrap_or_default(),
            url: a.artist_url.unwrap_or_default(),
        })
        .collect();

    success!("{} artists for {}", rows.len(), term);
    println!("{}", Table::new(rows));
}
