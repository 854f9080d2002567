mod common;

use std::net::SocketAddr;

use axum::http::StatusCode;
use reqwest::{Client, redirect::Policy, header};
use spotdash::{config::Settings, server::SESSION_COOKIE};

use common::*;

fn client() -> Client {
    Client::builder().redirect(Policy::none()).build().unwrap()
}

fn dashboard_settings(storage: SocketAddr, login_required: &str) -> Settings {
    let conn = sas_connection_string(storage);
    settings_with(&[
        ("blob_storage_connection_string", conn.as_str()),
        ("LOGIN_REQUIRED", login_required),
        ("APP_USERNAME", "user1"),
        ("APP_PASSWORD", "password"),
        ("host_url", "backend.local:3000"),
        ("client_id", "cid"),
        ("spotify_user_id", "listener42"),
    ])
}

async fn seeded_storage() -> SocketAddr {
    spawn_storage(MockStorage::new(vec![
        ("top_tracks_long_term.json", StatusCode::OK, TRACKS_JSON),
        ("top_artists_long_term.json", StatusCode::OK, ARTISTS_JSON),
        ("top_tracks_short_term.json", StatusCode::OK, TRACKS_JSON),
        ("playlist_id.json", StatusCode::OK, r#"{"playlist_id": "123"}"#),
    ]))
    .await
}

fn session_cookie(response: &reqwest::Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

async fn logged_in_cookie(base: &str) -> String {
    let first = client().get(format!("{base}/")).send().await.unwrap();
    let cookie = session_cookie(&first);

    let response = client()
        .post(format!("{base}/login"))
        .header(header::COOKIE, &cookie)
        .form(&[("username", "user1"), ("password", "password"), ("next", "/")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    cookie
}

#[tokio::test]
async fn test_health() {
    let base = spawn_dashboard(settings_with(&[])).await;

    let response = client().get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_gated_page_renders_login_and_issues_cookie() {
    let base = spawn_dashboard(dashboard_settings(seeded_storage().await, "True")).await;

    let response = client().get(format!("{base}/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = session_cookie(&response);
    assert!(cookie.starts_with(&format!("{SESSION_COOKIE}=")));

    let body = response.text().await.unwrap();
    assert!(body.contains("Login Page"));
    assert!(!body.contains("Project Overview"));
}

#[tokio::test]
async fn test_failed_login_shows_warning() {
    let base = spawn_dashboard(dashboard_settings(seeded_storage().await, "True")).await;
    let first = client().get(format!("{base}/")).send().await.unwrap();
    let cookie = session_cookie(&first);

    let response = client()
        .post(format!("{base}/login"))
        .header(header::COOKIE, &cookie)
        .form(&[("username", "username"), ("password", "password")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response.text().await.unwrap();
    assert!(body.contains("Login Page"));
    assert!(body.contains("Username/Password invalid"));

    // Still logged out
    let home = client()
        .get(format!("{base}/"))
        .header(header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert!(home.text().await.unwrap().contains("Login Page"));
}

#[tokio::test]
async fn test_successful_login_redirects_and_unlocks_session() {
    let base = spawn_dashboard(dashboard_settings(seeded_storage().await, "True")).await;
    let first = client().get(format!("{base}/")).send().await.unwrap();
    let cookie = session_cookie(&first);

    let response = client()
        .post(format!("{base}/login"))
        .header(header::COOKIE, &cookie)
        .form(&[
            ("username", "user1"),
            ("password", "password"),
            ("next", "/export?term=Short+Term"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/export?term=Short+Term"
    );
    // Known session, no new cookie
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let home = client()
        .get(format!("{base}/"))
        .header(header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    let body = home.text().await.unwrap();
    assert!(body.contains("Spotify Dashboard"));
    assert!(body.contains("Project Overview"));
    assert!(body.contains("http://backend.local:3000/login?client_id=cid"));

    // Another browser session is still gated
    let other = client().get(format!("{base}/")).send().await.unwrap();
    assert!(other.text().await.unwrap().contains("Login Page"));
}

#[tokio::test]
async fn test_content_reachable_without_login_when_not_required() {
    let base = spawn_dashboard(dashboard_settings(seeded_storage().await, "False")).await;

    let response = client().get(format!("{base}/")).send().await.unwrap();
    let body = response.text().await.unwrap();
    assert!(body.contains("Project Overview"));
    assert!(!body.contains("Login Page"));
}

#[tokio::test]
async fn test_listening_habits_page() {
    let base = spawn_dashboard(dashboard_settings(seeded_storage().await, "True")).await;
    let cookie = logged_in_cookie(&base).await;

    let response = client()
        .get(format!("{base}/listening-habits?term=Long+Term"))
        .header(header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(body.contains("Spotify Overview"));
    assert!(body.contains("1. A - Artist One"));
    assert!(body.contains("2. B - Artist Two"));
    // Duplicate title dropped
    assert!(!body.contains("Artist Three"));
    assert!(body.contains("1. Artist One"));
    assert!(body.contains("https://open.spotify.com/artist/2"));
}

#[tokio::test]
async fn test_export_page() {
    let base = spawn_dashboard(dashboard_settings(seeded_storage().await, "False")).await;

    let response = client()
        .get(format!("{base}/export?term=short"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(body.contains("Export Listening Habits"));
    assert!(body.contains("<tr><td>1</td><td>A</td><td>Artist One</td></tr>"));
    assert!(body.contains("<tr><td>2</td><td>B</td><td>Artist Two</td></tr>"));
    assert!(!body.contains("<td>3</td>"));
    assert!(body.contains("listener42"));
    assert!(body.contains("https://open.spotify.com/embed/playlist/123"));
    assert!(body.contains(
        "http://backend.local:3000/login?client_id=cid&amp;action=create-playlist-short_term"
    ));
}

#[tokio::test]
async fn test_missing_object_fails_page_but_not_server() {
    let base = spawn_dashboard(dashboard_settings(seeded_storage().await, "False")).await;

    // Nothing stored for the medium term
    let response = client()
        .get(format!("{base}/listening-habits?term=Medium+Term"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response.text().await.unwrap();
    assert!(body.contains("Something went wrong"));
    assert!(!body.contains("Top Songs"));

    // The server keeps serving
    let response = client()
        .get(format!("{base}/listening-habits"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_storage_outage_renders_generic_failure() {
    let settings = settings_with(&[
        ("LOGIN_REQUIRED", "False"),
        ("blob_storage_connection_string", "garbage"),
    ]);
    let base = spawn_dashboard(settings).await;

    let response = client().get(format!("{base}/export")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.text().await.unwrap();
    assert!(body.contains("could not load its data"));
    assert!(!body.contains("garbage"));
}

#[tokio::test]
async fn test_unknown_term_is_rejected() {
    let base = spawn_dashboard(dashboard_settings(seeded_storage().await, "False")).await;

    let response = client()
        .get(format!("{base}/export?term=Forever"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_with_unsafe_next_redirects_home() {
    let base = spawn_dashboard(dashboard_settings(seeded_storage().await, "True")).await;

    for next in ["/\n", "/\t/evil.example", "/\r\nSet-Cookie: x=1"] {
        let first = client().get(format!("{base}/")).send().await.unwrap();
        let cookie = session_cookie(&first);

        let response = client()
            .post(format!("{base}/login"))
            .header(header::COOKIE, &cookie)
            .form(&[("username", "user1"), ("password", "password"), ("next", next)])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "next = {next:?}");
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    }
}

#[tokio::test]
async fn test_anonymous_requests_do_not_grow_session_store() {
    let settings = dashboard_settings(seeded_storage().await, "True");
    let (base, sessions) = spawn_dashboard_with_sessions(settings).await;

    let mut issued = Vec::new();
    for _ in 0..20 {
        let response = client().get(format!("{base}/")).send().await.unwrap();
        issued.push(session_cookie(&response));
    }
    issued.sort();
    issued.dedup();
    assert_eq!(issued.len(), 20);
    assert_eq!(sessions.lock().await.len(), 0);

    // Failed logins store nothing either
    let response = client()
        .post(format!("{base}/login"))
        .header(header::COOKIE, &issued[0])
        .form(&[("username", "user1"), ("password", "wrong")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(sessions.lock().await.len(), 0);

    let response = client()
        .post(format!("{base}/login"))
        .header(header::COOKIE, &issued[0])
        .form(&[("username", "user1"), ("password", "password")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(sessions.lock().await.len(), 1);
}

#[tokio::test]
async fn test_malformed_session_cookie_is_replaced() {
    let base = spawn_dashboard(dashboard_settings(seeded_storage().await, "True")).await;

    let response = client()
        .get(format!("{base}/"))
        .header(header::COOKIE, format!("{SESSION_COOKIE}=forged"))
        .send()
        .await
        .unwrap();
    let cookie = session_cookie(&response);
    assert_ne!(cookie, format!("{SESSION_COOKIE}=forged"));
}
