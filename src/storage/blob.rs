use chrono::Utc;
use reqwest::{Client, StatusCode};

use crate::{
    error::{DashboardError, Result},
    storage::{
        API_VERSION,
        connection::{Credentials, StorageAccount},
        signing,
    },
};

/// Downloads whole blobs from one storage account.
pub struct BlobClient {
    account: StorageAccount,
    client: Client,
}

impl BlobClient {
    pub fn new(account: StorageAccount) -> Self {
        Self {
            account,
            client: Client::new(),
        }
    }

    /// Fetches `container/key` fully into memory.
    ///
    /// A `404` maps to [`DashboardError::ObjectNotFound`]; transport errors
    /// and every other failing status map to
    /// [`DashboardError::StorageUnavailable`]. There is no retry and no
    /// timeout.
    pub async fn download(&self, container: &str, key: &str) -> Result<Vec<u8>> {
        let url = self.account.blob_url(container, key)?;
        let ms_date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();

        let mut request = self
            .client
            .get(url.clone())
            .header("x-ms-date", ms_date.as_str())
            .header("x-ms-version", API_VERSION);

        if let Credentials::SharedKey {
            account,
            key: account_key,
        } = &self.account.credentials
        {
            let authorization =
                signing::authorization_header(account, account_key, &url, &ms_date, API_VERSION)?;
            request = request.header("Authorization", authorization);
        }

        let response = request.send().await?;

        match response.status() {
            status if status.is_success() => Ok(response.bytes().await?.to_vec()),
            StatusCode::NOT_FOUND => Err(DashboardError::ObjectNotFound(format!(
                "{container}/{key}"
            ))),
            status => Err(DashboardError::StorageUnavailable(format!(
                "reading {container}/{key} failed with status {status}"
            ))),
        }
    }
}
