use std::sync::Arc;

use axum::{
    Extension,
    extract::Query,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    api::render,
    config::Settings,
    error::Result,
    readers,
    server::{SessionId, SharedSessions},
    types::Term,
    utils,
};

#[derive(Debug, Deserialize)]
pub struct TermQuery {
    pub term: Option<String>,
}

impl TermQuery {
    fn term(&self) -> std::result::Result<Term, String> {
        match &self.term {
            Some(label) => label.parse(),
            None => Ok(Term::default()),
        }
    }
}

pub(crate) async fn gate_allows(
    sessions: &SharedSessions,
    session: &SessionId,
    settings: &Settings,
) -> bool {
    sessions.lock().await.allows(&session.0, settings)
}

fn login_in_place(uri: &Uri) -> Response {
    let next = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");
    Html(render::login_page(next, None)).into_response()
}

fn bad_request(reason: &str) -> Response {
    (StatusCode::BAD_REQUEST, Html(render::bad_request_page(reason))).into_response()
}

pub async fn home(
    uri: Uri,
    Extension(settings): Extension<Arc<Settings>>,
    Extension(sessions): Extension<SharedSessions>,
    Extension(session): Extension<SessionId>,
) -> Response {
    if !gate_allows(&sessions, &session, &settings).await {
        return login_in_place(&uri);
    }
    Html(render::home_page(&settings)).into_response()
}

pub async fn listening_habits(
    uri: Uri,
    Query(query): Query<TermQuery>,
    Extension(settings): Extension<Arc<Settings>>,
    Extension(sessions): Extension<SharedSessions>,
    Extension(session): Extension<SessionId>,
) -> Result<Response> {
    if !gate_allows(&sessions, &session, &settings).await {
        return Ok(login_in_place(&uri));
    }
    let term = match query.term() {
        Ok(term) => term,
        Err(reason) => return Ok(bad_request(&reason)),
    };

    let tracks = utils::dedupe_by_name(readers::load_top_tracks(&settings, term).await?)?;
    let artists = readers::load_top_artists(&settings, term).await?;

    let page = render::listening_habits_page(term, &tracks, &artists)?;
    Ok(Html(page).into_response())
}

pub async fn export(
    uri: Uri,
    Query(query): Query<TermQuery>,
    Extension(settings): Extension<Arc<Settings>>,
    Extension(sessions): Extension<SharedSessions>,
    Extension(session): Extension<SessionId>,
) -> Result<Response> {
    if !gate_allows(&sessions, &session, &settings).await {
        return Ok(login_in_place(&uri));
    }
    let term = match query.term() {
        Ok(term) => term,
        Err(reason) => return Ok(bad_request(&reason)),
    };

    let tracks = utils::dedupe_by_name(readers::load_top_tracks(&settings, term).await?)?;
    let playlist_id = readers::load_playlist_id(&settings).await?;
    let rows = utils::to_export_table(&tracks)?;

    Ok(Html(render::export_page(&settings, term, &rows, &playlist_id)).into_response())
}
