//! # Storage Module
//!
//! Read access to the Azure Blob Storage container the exporter writes to.
//!
//! The dashboard treats storage as a blind key-value store: every object is
//! a whole JSON document that is downloaded in one request and parsed in
//! memory. Nothing is cached, so each call reflects whatever the service
//! returns at that moment.
//!
//! ## Layout
//!
//! - [`connection`] - parses connection strings into a [`StorageAccount`]
//! - [`signing`] - Shared Key request signing for account-key credentials
//! - [`blob`] - the HTTP download itself
//!
//! ## Errors
//!
//! | Condition                                   | Error                |
//! |---------------------------------------------|----------------------|
//! | missing or invalid connection string        | `StorageUnavailable` |
//! | network failure, rejected credentials       | `StorageUnavailable` |
//! | object or container does not exist          | `ObjectNotFound`     |
//! | body is not JSON                            | `MalformedPayload`   |

pub mod blob;
pub mod connection;
pub mod signing;

use serde_json::Value;

pub use blob::BlobClient;
pub use connection::{Credentials, StorageAccount};

use crate::{
    config::Settings,
    error::{DashboardError, Result},
    info,
};

/// Container every exported object is written to.
pub const CONTAINER: &str = "spotify";

/// Blob service REST version sent with every request.
pub const API_VERSION: &str = "2021-08-06";

/// Downloads object `key` from the dashboard container and parses it as JSON.
///
/// A fresh client is built from `settings.blob_storage_connection_string` on
/// every call. The caller is suspended until the whole object has arrived.
///
/// # Example
///
/// ```
/// let value = storage::read_object(&settings, "playlist_id.json").await?;
/// ```
pub async fn read_object(settings: &Settings, key: &str) -> Result<Value> {
    let connection_string = settings
        .blob_storage_connection_string
        .as_deref()
        .ok_or_else(|| {
            DashboardError::StorageUnavailable(
                "blob_storage_connection_string is not set".to_string(),
            )
        })?;

    let account = StorageAccount::parse(connection_string)?;
    info!("Reading {}/{} from storage", CONTAINER, key);
    let bytes = BlobClient::new(account).download(CONTAINER, key).await?;

    serde_json::from_slice(&bytes)
        .map_err(|e| DashboardError::MalformedPayload(format!("{key}: {e}")))
}
