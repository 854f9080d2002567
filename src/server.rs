use axum::{
    Extension, Router,
    extract::Request,
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
    },
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{Res, api, config::Settings, session::SessionStore, success, utils};

pub const SESSION_COOKIE: &str = "spotdash_session";

pub type SharedSessions = Arc<Mutex<SessionStore>>;

/// Id of the session the current request belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

pub fn router(settings: Arc<Settings>) -> Router {
    router_with_sessions(settings, Arc::new(Mutex::new(SessionStore::new())))
}

pub fn router_with_sessions(settings: Arc<Settings>, sessions: SharedSessions) -> Router {
    let pages = Router::new()
        .route("/", get(api::home))
        .route("/listening-habits", get(api::listening_habits))
        .route("/export", get(api::export))
        .route("/login", get(api::login_page).post(api::login))
        .layer(middleware::from_fn(ensure_session))
        .layer(Extension(sessions));

    Router::new()
        .route("/health", get(api::health))
        .merge(pages)
        .layer(Extension(settings))
}

pub async fn serve(listener: TcpListener, settings: Arc<Settings>) -> Res<()> {
    axum::serve(listener, router(settings)).await?;
    Ok(())
}

pub async fn bind(address: &str) -> Res<TcpListener> {
    let addr = SocketAddr::from_str(address)
        .map_err(|e| format!("Failed to parse server address '{}': {}", address, e))?;

    let listener = TcpListener::bind(&addr).await?;
    success!("Dashboard listening on http://{}", listener.local_addr()?);
    Ok(listener)
}

// Attaches a `SessionId` to every page request. A missing or malformed
// cookie gets a fresh id. Nothing is stored until that session logs in.
async fn ensure_session(mut req: Request, next: Next) -> Response {
    let (id, issued) = match cookie_value(req.headers(), SESSION_COOKIE) {
        Some(id) if utils::is_session_id(&id) => (id, false),
        _ => (utils::generate_session_id(), true),
    };

    req.extensions_mut().insert(SessionId(id.clone()));
    let mut response = next.run(req).await;

    if issued {
        let cookie = format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax");
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}

pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
}
