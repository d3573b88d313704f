//! Kaggle client module
//!
//! Provides `KaggleClient` for the two dataset endpoints the pipeline needs:
//! listing a dataset's files and downloading the dataset as a zip archive.

use super::Credentials;
use crate::dataset::{DatasetApi, DatasetFile, DatasetRef};
use eyre::{Context, Result, eyre};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

/// Kaggle REST API client
///
/// Every request carries HTTP Basic credentials built from the Kaggle
/// username and API key.
///
/// # Example
/// ```no_run
/// use kaggle_duck::client::{Credentials, KaggleClient};
/// use kaggle_duck::dataset::{DatasetApi, DatasetRef};
///
/// # async fn example() -> eyre::Result<()> {
/// let client = KaggleClient::try_default(Credentials::new("user", "key"))?;
/// let dataset = DatasetRef::new("rahulvyasm", "netflix-movies-and-tv-shows");
///
/// for file in client.list_files(&dataset).await? {
///     println!("{}", file);
/// }
/// let archive = client.download(&dataset).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct KaggleClient {
    client: Client,
    url: Url,
}

/// Body of `GET datasets/list/{owner}/{name}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListFilesResponse {
    #[serde(default)]
    dataset_files: Vec<DatasetFile>,
    #[serde(default)]
    error_message: Option<String>,
}

impl KaggleClient {
    /// Public Kaggle API endpoint
    pub const DEFAULT_URL: &'static str = "https://www.kaggle.com/api/v1/";

    /// Create a client for the API rooted at `url`
    ///
    /// # Errors
    /// Returns an error if the credentials don't form a valid header or the
    /// HTTP client cannot be built
    pub fn try_new(mut url: Url, credentials: Credentials) -> Result<Self> {
        // Url::join replaces the last segment unless the base ends in '/'
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            credentials.basic_header().parse()?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("kaggle-duck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, url })
    }

    /// Create a client for the public Kaggle API
    pub fn try_default(credentials: Credentials) -> Result<Self> {
        Self::try_new(Url::parse(Self::DEFAULT_URL)?, credentials)
    }

    /// Get the base URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// URL of `datasets/{action}/{owner}/{name}`
    fn dataset_url(&self, action: &str, dataset: &DatasetRef) -> Result<Url> {
        let path = format!("datasets/{}/{}/{}", action, dataset.owner, dataset.name);
        self.url
            .join(&path)
            .with_context(|| format!("Invalid dataset path: {}", path))
    }

    /// Send a GET request and fail on non-success statuses
    async fn get(&self, url: Url, dataset: &DatasetRef) -> Result<reqwest::Response> {
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| eyre!("Failed to send request: {}", e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => eyre::bail!("Dataset {} not found ({}): {}", dataset, status, body),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                eyre::bail!("Kaggle rejected the credentials ({}): {}", status, body)
            }
            _ => eyre::bail!("Kaggle API request failed ({}): {}", status, body),
        }
    }
}

impl DatasetApi for KaggleClient {
    async fn list_files(&self, dataset: &DatasetRef) -> Result<Vec<DatasetFile>> {
        let url = self.dataset_url("list", dataset)?;
        let response = self.get(url, dataset).await?;

        let listing: ListFilesResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse dataset file listing")?;

        if let Some(message) = listing.error_message.filter(|m| !m.is_empty()) {
            eyre::bail!("Kaggle API error for {}: {}", dataset, message);
        }

        Ok(listing.dataset_files)
    }

    async fn download(&self, dataset: &DatasetRef) -> Result<Vec<u8>> {
        let url = self.dataset_url("download", dataset)?;
        let response = self.get(url, dataset).await?;

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read archive body for {}", dataset))?;

        Ok(bytes.to_vec())
    }
}

impl std::fmt::Display for KaggleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}
