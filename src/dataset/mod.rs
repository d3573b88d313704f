//! Dataset retrieval
//!
//! Provides the [`DatasetApi`] abstraction over a dataset-hosting service and
//! the [`DatasetFetcher`] step that downloads a dataset archive to disk.

mod api;
mod fetcher;
mod reference;
pub mod test_support;

pub use api::DatasetApi;
pub use fetcher::DatasetFetcher;
pub use reference::{DatasetFile, DatasetRef};
