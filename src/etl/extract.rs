//! Extractor trait for pulling data out of a source

use eyre::Result;

/// Extractor trait for extracting a value from a source
///
/// Implementors define how to pull data from sources like:
/// - Remote dataset APIs
/// - File systems
///
/// # Example
/// ```no_run
/// use kaggle_duck::etl::Extractor;
/// use eyre::Result;
/// use std::path::PathBuf;
///
/// struct FileExtractor {
///     path: PathBuf,
/// }
///
/// impl Extractor for FileExtractor {
///     type Item = Vec<u8>;
///
///     async fn extract(&self) -> Result<Self::Item> {
///         Ok(std::fs::read(&self.path)?)
///     }
/// }
/// ```
pub trait Extractor: Send + Sync {
    /// The type of value extracted
    type Item: Send;

    /// Extract a value from the source
    ///
    /// # Errors
    /// Returns an error if extraction fails (network, I/O, API, etc.)
    fn extract(&self) -> impl std::future::Future<Output = Result<Self::Item>> + Send;
}
