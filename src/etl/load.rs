//! Loader trait for loading data to destinations

use async_trait::async_trait;
use eyre::Result;

/// Loader trait for loading a value into a destination
///
/// Implementors define how to load data to destinations such as an
/// embedded database, and what they report back once done.
///
/// # Example
/// ```no_run
/// use kaggle_duck::etl::Loader;
/// use async_trait::async_trait;
/// use eyre::Result;
/// use std::path::PathBuf;
///
/// struct FileLoader {
///     output: PathBuf,
/// }
///
/// #[async_trait]
/// impl Loader for FileLoader {
///     type Item = String;
///     type Report = usize;
///
///     async fn load(&self, item: Self::Item) -> Result<Self::Report> {
///         std::fs::write(&self.output, &item)?;
///         Ok(item.len())
///     }
/// }
/// ```
#[async_trait]
pub trait Loader: Send + Sync {
    /// The type of value to load
    type Item: Send;

    /// What the loader reports after a successful load
    type Report: Send;

    /// Load a value into the destination
    ///
    /// # Errors
    /// Returns an error if loading fails (I/O, template, SQL, etc.)
    async fn load(&self, item: Self::Item) -> Result<Self::Report>;
}
