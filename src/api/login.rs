use std::sync::Arc;

use axum::{
    Extension, Form,
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    api::{pages::gate_allows, render},
    config::Settings,
    info,
    server::{SessionId, SharedSessions},
    warning,
};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

pub async fn login_page(
    Query(query): Query<NextQuery>,
    Extension(settings): Extension<Arc<Settings>>,
    Extension(sessions): Extension<SharedSessions>,
    Extension(session): Extension<SessionId>,
) -> Response {
    let next = safe_next(query.next.as_deref());
    if gate_allows(&sessions, &session, &settings).await {
        return Redirect::to(next).into_response();
    }
    Html(render::login_page(next, None)).into_response()
}

pub async fn login(
    Extension(settings): Extension<Arc<Settings>>,
    Extension(sessions): Extension<SharedSessions>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<LoginForm>,
) -> Response {
    let next = safe_next(form.next.as_deref());

    let outcome = sessions
        .lock()
        .await
        .login(&session.0, &form.username, &form.password, &settings);

    match outcome {
        // Redirect so the gated page renders again with the new state.
        Ok(()) => {
            info!("Session logged in");
            Redirect::to(next).into_response()
        }
        Err(e) => {
            warning!("Login attempt rejected: {}", e);
            (
                StatusCode::UNAUTHORIZED,
                Html(render::login_page(next, Some(&e.to_string()))),
            )
                .into_response()
        }
    }
}

/// Only same-site absolute paths are accepted as redirect targets.
///
/// Anything else falls back to `/`. Whitespace and control characters are
/// refused outright: browsers strip some of them from `Location`, which can
/// turn `/\t/host` into `//host`.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && path.chars().all(|c| c.is_ascii_graphic()) =>
        {
            path
        }
        _ => "/",
    }
}
