//! Dataset download step
//!
//! Fetches a dataset archive through a [`DatasetApi`] and stores it in the
//! raw-data folder.

use super::{DatasetApi, DatasetFile, DatasetRef};
use crate::etl::Extractor;
use crate::storage::{ArchiveHandle, PathBundle};

use eyre::{Context, Result};
use std::path::{Path, PathBuf};

/// Extractor that downloads a dataset archive to disk
///
/// The file listing is fetched first and logged for information, then the
/// full dataset is downloaded and written to `<raw_data>/netflix.zip`,
/// replacing any previous download. API errors are logged and returned
/// unchanged; nothing is retried.
///
/// # Example
/// ```no_run
/// use kaggle_duck::client::{Credentials, KaggleClient};
/// use kaggle_duck::dataset::{DatasetFetcher, DatasetRef};
/// use kaggle_duck::etl::Extractor;
/// use kaggle_duck::storage::PathBundle;
///
/// # async fn example() -> eyre::Result<()> {
/// let client = KaggleClient::try_default(Credentials::resolve()?)?;
/// let paths = PathBundle::resolve(".")?;
/// let dataset = DatasetRef::new("rahulvyasm", "netflix-movies-and-tv-shows");
///
/// let fetcher = DatasetFetcher::for_paths(client, dataset, &paths);
/// let archive = fetcher.extract().await?;
/// # Ok(())
/// # }
/// ```
pub struct DatasetFetcher<A> {
    api: A,
    dataset: DatasetRef,
    archive_path: PathBuf,
}

impl<A: DatasetApi> DatasetFetcher<A> {
    /// Create a fetcher writing into `raw_data_dir`
    pub fn new(api: A, dataset: DatasetRef, raw_data_dir: impl AsRef<Path>) -> Self {
        Self {
            api,
            dataset,
            archive_path: raw_data_dir.as_ref().join(PathBundle::ARCHIVE_FILE),
        }
    }

    /// Create a fetcher writing into the layout's raw-data folder
    pub fn for_paths(api: A, dataset: DatasetRef, paths: &PathBundle) -> Self {
        Self::new(api, dataset, &paths.raw_data)
    }

    pub fn dataset(&self) -> &DatasetRef {
        &self.dataset
    }

    /// Where the archive will be written
    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// Fetch the dataset's file listing
    pub async fn list_files(&self) -> Result<Vec<DatasetFile>> {
        self.api.list_files(&self.dataset).await.inspect_err(|e| {
            log::error!("Failed to list files of {}: {:#}", self.dataset, e);
        })
    }

    /// Download the dataset archive and write it to disk
    ///
    /// # Errors
    /// Returns the API error unchanged if listing or downloading fails, or
    /// an I/O error if the archive cannot be written.
    pub async fn download(&self) -> Result<ArchiveHandle> {
        let files = self.list_files().await?;
        log::info!("Dataset {} has {} file(s)", self.dataset, files.len());
        for file in &files {
            log::info!("  {}", file);
        }

        log::debug!("Downloading {}", self.dataset);
        let bytes = self.api.download(&self.dataset).await.inspect_err(|e| {
            log::error!("Failed to download {}: {:#}", self.dataset, e);
        })?;

        std::fs::write(&self.archive_path, &bytes).with_context(|| {
            format!("Failed to write archive: {}", self.archive_path.display())
        })?;

        log::info!(
            "Saved {} bytes to {}",
            bytes.len(),
            self.archive_path.display()
        );

        Ok(ArchiveHandle::new(&self.archive_path, bytes.len() as u64))
    }
}

impl<A: DatasetApi> Extractor for DatasetFetcher<A> {
    type Item = ArchiveHandle;

    async fn extract(&self) -> Result<Self::Item> {
        self.download().await
    }
}
