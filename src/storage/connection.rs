use std::collections::HashMap;

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Url;

use crate::error::{DashboardError, Result};

const DEV_STORAGE_ACCOUNT: &str = "devstoreaccount1";
const DEV_STORAGE_ENDPOINT: &str = "http://127.0.0.1:10000/devstoreaccount1";
// Published well-known key of the local storage emulator.
const DEV_STORAGE_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";

#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    SharedKey { account: String, key: Vec<u8> },
    SharedAccessSignature(String),
    Anonymous,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::SharedKey { account, .. } => f
                .debug_struct("SharedKey")
                .field("account", account)
                .finish_non_exhaustive(),
            Credentials::SharedAccessSignature(_) => f.write_str("SharedAccessSignature"),
            Credentials::Anonymous => f.write_str("Anonymous"),
        }
    }
}

/// Where the blob service lives and how requests to it are authorized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageAccount {
    pub blob_endpoint: Url,
    pub credentials: Credentials,
}

impl StorageAccount {
    /// Parses an Azure storage connection string.
    ///
    /// Supported forms:
    /// - `DefaultEndpointsProtocol=https;AccountName=..;AccountKey=..;EndpointSuffix=..`
    /// - `BlobEndpoint=..;SharedAccessSignature=..`
    /// - `UseDevelopmentStorage=true`
    ///
    /// Setting names are matched case-insensitively. Every failure is
    /// reported as [`DashboardError::StorageUnavailable`].
    pub fn parse(connection_string: &str) -> Result<Self> {
        let mut settings: HashMap<String, String> = HashMap::new();
        for segment in connection_string.split(';').map(str::trim) {
            if segment.is_empty() {
                continue;
            }
            let Some((name, value)) = segment.split_once('=') else {
                return Err(invalid("found a setting without '='".to_string()));
            };
            settings.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }

        if settings.is_empty() {
            return Err(invalid("connection string is empty".to_string()));
        }

        if settings
            .get("usedevelopmentstorage")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
        {
            return Ok(Self {
                blob_endpoint: parse_url(DEV_STORAGE_ENDPOINT)?,
                credentials: Credentials::SharedKey {
                    account: DEV_STORAGE_ACCOUNT.to_string(),
                    key: decode_key(DEV_STORAGE_KEY)?,
                },
            });
        }

        let account_name = settings.get("accountname").cloned();

        let blob_endpoint = match (settings.get("blobendpoint"), &account_name) {
            (Some(endpoint), _) => parse_url(endpoint)?,
            (None, Some(account)) => {
                let protocol = settings
                    .get("defaultendpointsprotocol")
                    .map(String::as_str)
                    .unwrap_or("https");
                let suffix = settings
                    .get("endpointsuffix")
                    .map(String::as_str)
                    .unwrap_or("core.windows.net");
                parse_url(&format!("{protocol}://{account}.blob.{suffix}"))?
            }
            (None, None) => {
                return Err(invalid(
                    "either BlobEndpoint or AccountName is required".to_string(),
                ));
            }
        };

        let credentials = if let Some(sas) = settings.get("sharedaccesssignature") {
            Credentials::SharedAccessSignature(sas.trim_start_matches('?').to_string())
        } else if let Some(key) = settings.get("accountkey") {
            let Some(account) = account_name else {
                return Err(invalid("AccountKey requires AccountName".to_string()));
            };
            Credentials::SharedKey {
                account,
                key: decode_key(key)?,
            }
        } else {
            Credentials::Anonymous
        };

        Ok(Self {
            blob_endpoint,
            credentials,
        })
    }

    /// URL of `key` inside `container`, with the key percent-encoded as a
    /// single path segment.
    pub fn blob_url(&self, container: &str, key: &str) -> Result<Url> {
        let mut url = self.blob_endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| invalid(format!("'{}' cannot be a base URL", self.blob_endpoint)))?
            .pop_if_empty()
            .push(container)
            .push(key);

        if let Credentials::SharedAccessSignature(sas) = &self.credentials {
            url.set_query(Some(sas));
        }
        Ok(url)
    }
}

fn parse_url(value: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| invalid(format!("invalid endpoint '{}': {}", value, e)))
}

fn decode_key(value: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(value)
        .map_err(|e| invalid(format!("AccountKey is not valid base64: {}", e)))
}

fn invalid(reason: String) -> DashboardError {
    DashboardError::StorageUnavailable(format!("invalid connection string: {}", reason))
}
