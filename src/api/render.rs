use axum::http::StatusCode;

use crate::{
    config::Settings,
    error::Result,
    types::{Artist, ExportRow, Term, Track},
    utils,
};

const GRID_SIZE: usize = 5;

const STYLE: &str = "\
body{margin:0;font-family:sans-serif;background:#121212;color:#eee;display:flex;min-height:100vh}\
nav{width:220px;padding:1.5rem;background:#000}\
nav a{display:block;color:#1db954;margin:.5rem 0;text-decoration:none}\
main{flex:1;padding:2rem}\
.grid{display:grid;grid-template-columns:repeat(5,1fr);gap:1rem}\
.grid figure{margin:0}.grid img{width:100%}\
.button{display:inline-block;padding:.4rem 1rem;background:#1db954;color:#000;border-radius:4px;text-decoration:none}\
.warning{background:#4d3b00;padding:.75rem;border-radius:4px}\
table{border-collapse:collapse;width:100%}td,th{border:1px solid #333;padding:.3rem .6rem;text-align:left}\
.columns{display:flex;gap:2rem}.columns>div:first-child{flex:2}.columns>div:last-child{flex:3}\
input[disabled]{width:100%;margin-bottom:.75rem}";

pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, sidebar: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <title>{title}</title><style>{STYLE}</style></head>\
         <body><nav><strong>&#9835; Spotify Dashboard</strong>\
         <a href=\"/\">Home</a>\
         <a href=\"/listening-habits\">Listening Habits</a>\
         <a href=\"/export\">Export Listening Habits</a>{sidebar}</nav>\
         <main><h1>{title}</h1>{body}</main></body></html>",
        title = escape(title),
    )
}

fn term_selector(path: &str, selected: Term) -> String {
    let options: String = Term::ALL
        .into_iter()
        .map(|t| {
            format!(
                "<option{sel}>{label}</option>",
                sel = if t == selected { " selected" } else { "" },
                label = t.label()
            )
        })
        .collect();

    format!(
        "<form method=\"get\" action=\"{path}\"><p>Sample Habits</p>\
         <select name=\"term\" onchange=\"this.form.submit()\">{options}</select>\
         <noscript><button type=\"submit\">Show</button></noscript></form>"
    )
}

fn link_button(label: &str, url: &str) -> String {
    format!(
        "<a class=\"button\" href=\"{url}\" target=\"_blank\" rel=\"noopener\">{label}</a>",
        url = escape(url),
        label = escape(label)
    )
}

fn card(url: Option<&str>, img: Option<&str>, caption: &str) -> String {
    format!(
        "<figure>{button}<img src=\"{img}\" alt=\"\"><figcaption>{caption}</figcaption></figure>",
        button = link_button("Explore", url.unwrap_or("#")),
        img = escape(img.unwrap_or_default()),
        caption = escape(caption)
    )
}

pub fn login_page(next: &str, warning: Option<&str>) -> String {
    let warning = warning
        .map(|w| format!("<p class=\"warning\">{}</p>", escape(w)))
        .unwrap_or_default();

    let body = format!(
        "<form method=\"post\" action=\"/login\" style=\"max-width:24rem\">\
         <input type=\"hidden\" name=\"next\" value=\"{next}\">\
         <p><label>Username<br><input name=\"username\" autocomplete=\"username\"></label></p>\
         <p><label>Password<br><input name=\"password\" type=\"password\" \
         autocomplete=\"current-password\"></label></p>\
         <p><button class=\"button\" type=\"submit\">Login</button></p>{warning}</form>",
        next = escape(next)
    );
    layout("Login Page", "", &body)
}

pub fn home_page(settings: &Settings) -> String {
    let body = format!(
        "<details open><summary>Project Overview</summary>\
         <p>A personal dashboard over Spotify listening statistics. A separate exporter \
         authenticates against the Spotify Web API and writes top tracks, top artists and \
         generated playlists to blob storage; this dashboard reads those exports and presents \
         them as pages you can browse by sampling window.</p></details>\
         <p>{button}</p>",
        button = link_button("Update Data", &utils::refresh_url(settings, None))
    );
    layout("Spotify Dashboard", "", &body)
}

pub fn listening_habits_page(term: Term, tracks: &[Track], artists: &[Artist]) -> Result<String> {
    let mut songs = String::new();
    for (i, t) in tracks.iter().take(GRID_SIZE).enumerate() {
        let caption = format!("{}. {} - {}", i + 1, t.song_name()?, t.artist_name()?);
        songs.push_str(&card(t.song_url.as_deref(), t.song_img.as_deref(), &caption));
    }

    let mut top_artists = String::new();
    for (i, a) in artists.iter().take(GRID_SIZE).enumerate() {
        let caption = format!("{}. {}", i + 1, a.artist_name()?);
        top_artists.push_str(&card(a.artist_url.as_deref(), a.artist_img.as_deref(), &caption));
    }

    let body = format!(
        "<h2>Top Songs</h2><div class=\"grid\">{songs}</div>\
         <h2>Top Artists</h2><div class=\"grid\">{top_artists}</div>"
    );
    Ok(layout(
        "Spotify Overview",
        &term_selector("/listening-habits", term),
        &body,
    ))
}

pub fn export_page(
    settings: &Settings,
    term: Term,
    rows: &[ExportRow],
    playlist_id: &str,
) -> String {
    let table_rows: String = rows
        .iter()
        .map(|r| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                r.index,
                escape(&r.track_name),
                escape(&r.artist_name)
            )
        })
        .collect();

    let body = format!(
        "<div class=\"columns\"><div>\
         <label>Playlist Name<input disabled value=\"My Top Tracks Playlist\"></label>\
         <label>Spotify User ID<input disabled value=\"{user_id}\"></label>\
         <label>Playlist Description\
         <input disabled value=\"Generated playlist based on your top tracks\"></label>\
         <details><summary>Songs to Add to the Playlist</summary>\
         <div style=\"max-height:250px;overflow:auto\"><table>\
         <tr><th></th><th>Track Name</th><th>Artist Name</th></tr>{table_rows}</table></div>\
         </details><p>{update} <a class=\"button\" href=\"/export?term={term_q}\">Refresh Page</a></p>\
         </div><div><iframe src=\"{embed}\" width=\"100%\" height=\"500\" frameborder=\"0\" \
         allow=\"encrypted-media\"></iframe></div></div>",
        user_id = escape(settings.spotify_user_id.as_deref().unwrap_or_default()),
        update = link_button("Update Data", &utils::refresh_url(settings, Some(term))),
        term_q = term.key(),
        embed = escape(&utils::playlist_embed_url(playlist_id)),
    );
    layout("Export Listening Habits", &term_selector("/export", term), &body)
}

pub fn failure_page(status: StatusCode) -> String {
    let message = if status == StatusCode::NOT_FOUND {
        "The requested data has not been exported yet."
    } else {
        "The dashboard could not load its data. Please try again later."
    };
    layout(
        "Something went wrong",
        "",
        &format!("<p class=\"warning\">{}</p>", message),
    )
}

pub fn bad_request_page(reason: &str) -> String {
    layout(
        "Bad request",
        "",
        &format!("<p class=\"warning\">{}</p>", escape(reason)),
    )
}
