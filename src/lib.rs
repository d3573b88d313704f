//! Kaggle Duck
//!
//! Downloads a Kaggle dataset, unpacks it, and loads it into DuckDB

pub mod cli;
pub mod client;
pub mod config;
pub mod dataset;
pub mod etl;
pub mod storage;
pub mod warehouse;

// Re-exports for convenience
pub use client::{Credentials, KaggleClient};
pub use config::PipelineConfig;
pub use dataset::{DatasetApi, DatasetFetcher, DatasetFile, DatasetRef};
pub use etl::{Extractor, Loader, Pipeline, Transformer};
pub use storage::{ArchiveHandle, ArchiveUnpacker, ExtractedData, PathBundle};
pub use warehouse::{LoadReport, LoadTemplate, TableLoader, Warehouse};
