//! Test utilities for dataset fetching.
//!
//! [`StubDatasetApi`] is a deterministic stand-in for a remote dataset API
//! that serves pre-configured listings, archive bytes, or errors without
//! making HTTP requests.

use super::{DatasetApi, DatasetFile, DatasetRef};
use eyre::{Result, eyre};

/// Stub [`DatasetApi`] for testing.
///
/// # Example
///
/// ```
/// use kaggle_duck::dataset::test_support::StubDatasetApi;
/// use kaggle_duck::dataset::{DatasetApi, DatasetRef};
///
/// # async fn example() -> eyre::Result<()> {
/// let api = StubDatasetApi::with_archive(b"PK".to_vec());
/// let bytes = api.download(&DatasetRef::new("o", "n")).await?;
/// assert_eq!(bytes, b"PK");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct StubDatasetApi {
    files: Vec<DatasetFile>,
    archive: Vec<u8>,
    listing_error: Option<String>,
    download_error: Option<String>,
}

impl StubDatasetApi {
    /// Serve the given bytes as the dataset archive
    #[must_use]
    pub fn with_archive(archive: Vec<u8>) -> Self {
        Self {
            archive,
            ..Self::default()
        }
    }

    /// Fail every download with the given message
    #[must_use]
    pub fn with_download_error(message: impl Into<String>) -> Self {
        Self {
            download_error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Fail every listing with the given message
    #[must_use]
    pub fn with_listing_error(message: impl Into<String>) -> Self {
        Self {
            listing_error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Serve the given file listing
    #[must_use]
    pub fn with_files(mut self, files: Vec<DatasetFile>) -> Self {
        self.files = files;
        self
    }
}

impl DatasetApi for StubDatasetApi {
    async fn list_files(&self, _dataset: &DatasetRef) -> Result<Vec<DatasetFile>> {
        match &self.listing_error {
            Some(message) => Err(eyre!("{}", message)),
            None => Ok(self.files.clone()),
        }
    }

    async fn download(&self, _dataset: &DatasetRef) -> Result<Vec<u8>> {
        match &self.download_error {
            Some(message) => Err(eyre!("{}", message)),
            None => Ok(self.archive.clone()),
        }
    }
}
