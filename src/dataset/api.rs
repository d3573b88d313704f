//! Remote dataset API abstraction

use super::{DatasetFile, DatasetRef};
use eyre::Result;

/// Operations consumed from a dataset-hosting service
///
/// [`KaggleClient`](crate::client::KaggleClient) implements this against the
/// Kaggle REST API; tests substitute an in-memory stub.
pub trait DatasetApi: Send + Sync {
    /// List the files in a dataset
    ///
    /// # Errors
    /// Returns an error on transport failures or non-success responses
    fn list_files(
        &self,
        dataset: &DatasetRef,
    ) -> impl std::future::Future<Output = Result<Vec<DatasetFile>>> + Send;

    /// Download the whole dataset as the raw bytes of a zip archive
    ///
    /// # Errors
    /// Returns an error on transport failures or non-success responses
    fn download(
        &self,
        dataset: &DatasetRef,
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}
