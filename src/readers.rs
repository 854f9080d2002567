use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{
    config::Settings,
    error::{DashboardError, Result},
    storage,
    types::{Artist, Term, Track},
    utils,
};

pub const PLAYLIST_ID_KEY: &str = "playlist_id.json";

/// Reads one scalar field out of a JSON mapping stored under `key`.
///
/// Strings are returned unchanged. Numbers and booleans come back as their
/// JSON text, anything else is a [`DashboardError::MalformedPayload`].
pub async fn read_scalar_field(settings: &Settings, key: &str, field: &str) -> Result<String> {
    let value = storage::read_object(settings, key).await?;
    let Value::Object(mut mapping) = value else {
        return Err(DashboardError::MalformedPayload(format!(
            "{key}: expected a JSON object"
        )));
    };

    match mapping.remove(field) {
        None => Err(DashboardError::FieldMissing(format!("{key}: {field}"))),
        Some(Value::String(s)) => Ok(s),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(v.to_string()),
        Some(_) => Err(DashboardError::MalformedPayload(format!(
            "{key}: field '{field}' is not a scalar"
        ))),
    }
}

/// Reads the list of records stored under a term-qualified `key`.
///
/// Elements are returned as they are stored. Shaping them is up to the
/// caller.
pub async fn read_term_list(settings: &Settings, key: &str) -> Result<Vec<Map<String, Value>>> {
    let value = storage::read_object(settings, key).await?;
    let Value::Array(items) = value else {
        return Err(DashboardError::MalformedPayload(format!(
            "{key}: expected a JSON array"
        )));
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(record) => Ok(record),
            _ => Err(DashboardError::MalformedPayload(format!(
                "{key}: expected every element to be an object"
            ))),
        })
        .collect()
}

pub async fn load_top_tracks(settings: &Settings, term: Term) -> Result<Vec<Track>> {
    let key = utils::top_tracks_key(term);
    typed_records(&key, read_term_list(settings, &key).await?)
}

pub async fn load_top_artists(settings: &Settings, term: Term) -> Result<Vec<Artist>> {
    let key = utils::top_artists_key(term);
    typed_records(&key, read_term_list(settings, &key).await?)
}

pub async fn load_playlist_id(settings: &Settings) -> Result<String> {
    read_scalar_field(settings, PLAYLIST_ID_KEY, "playlist_id").await
}

fn typed_records<T: DeserializeOwned>(key: &str, records: Vec<Map<String, Value>>) -> Result<Vec<T>> {
    records
        .into_iter()
        .map(|r| {
            serde_json::from_value(Value::Object(r))
                .map_err(|e| DashboardError::MalformedPayload(format!("{key}: {e}")))
        })
        .collect()
}
