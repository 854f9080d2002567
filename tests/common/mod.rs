#![allow(dead_code)]

use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use axum::{
    Extension, Router,
    extract::{Path, RawQuery},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use spotdash::{
    config::Settings,
    server::{self, SharedSessions},
    session::SessionStore,
};
use tokio::{net::TcpListener, sync::Mutex};

pub const TEST_SAS: &str = "sv=2022-11-02&sig=test-signature";

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub key: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub ms_version: Option<String>,
}

#[derive(Clone, Default)]
pub struct MockStorage {
    objects: Arc<HashMap<String, (StatusCode, String)>>,
    pub seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl MockStorage {
    pub fn new(objects: Vec<(&str, StatusCode, &str)>) -> Self {
        Self {
            objects: Arc::new(
                objects
                    .into_iter()
                    .map(|(k, s, b)| (k.to_string(), (s, b.to_string())))
                    .collect(),
            ),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

async fn serve_blob(
    Path(key): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    Extension(storage): Extension<MockStorage>,
) -> impl IntoResponse {
    storage.seen.lock().await.push(SeenRequest {
        key: key.clone(),
        query,
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        ms_version: headers
            .get("x-ms-version")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    match storage.objects.get(&key) {
        Some((status, body)) => (*status, body.clone()),
        None => (StatusCode::NOT_FOUND, "BlobNotFound".to_string()),
    }
}

/// Starts a blob service stand-in and returns its address.
pub async fn spawn_storage(storage: MockStorage) -> SocketAddr {
    let app = Router::new()
        .route("/spotify/{key}", get(serve_blob))
        .route("/devacct/spotify/{key}", get(serve_blob))
        .layer(Extension(storage));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

pub fn settings_with(vars: &[(&str, &str)]) -> Settings {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_lookup(|key| vars.get(key).cloned())
}

pub fn sas_connection_string(addr: SocketAddr) -> String {
    format!("BlobEndpoint=http://{addr};SharedAccessSignature={TEST_SAS}")
}

pub fn storage_settings(addr: SocketAddr) -> Settings {
    let conn = sas_connection_string(addr);
    settings_with(&[("blob_storage_connection_string", conn.as_str())])
}

/// Starts the dashboard itself and returns its base URL.
pub async fn spawn_dashboard(settings: Settings) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        server::serve(listener, Arc::new(settings)).await.unwrap();
    });
    format!("http://{addr}")
}

/// Like [`spawn_dashboard`], but hands back the session store as well.
pub async fn spawn_dashboard_with_sessions(settings: Settings) -> (String, SharedSessions) {
    let sessions: SharedSessions = Arc::new(Mutex::new(SessionStore::new()));
    let app = server::router_with_sessions(Arc::new(settings), sessions.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), sessions)
}

pub const TRACKS_JSON: &str = r#"[
    {"song_name": "A", "artist_name": "Artist One", "song_url": "https://open.spotify.com/album/a", "song_uri": "spotify:track:a", "song_img": "https://i.scdn.co/image/a"},
    {"song_name": "B", "artist_name": "Artist Two", "song_url": "https://open.spotify.com/album/b", "song_uri": "spotify:track:b", "song_img": "https://i.scdn.co/image/b"},
    {"song_name": "A", "artist_name": "Artist Three", "song_url": "https://open.spotify.com/album/c", "song_uri": "spotify:track:c", "song_img": "https://i.scdn.co/image/c"}
]"#;

pub const ARTISTS_JSON: &str = r#"[
    {"artist_name": "Artist One", "artist_url": "https://open.spotify.com/artist/1", "artist_followers": 1200, "artist_img": "https://i.scdn.co/image/1"},
    {"artist_name": "Artist Two", "artist_url": "https://open.spotify.com/artist/2", "artist_img": "https://i.scdn.co/image/2"}
]"#;
