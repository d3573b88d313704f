//! CLI helper functions
//!
//! Each helper runs one step (or the whole pipeline) for a
//! [`PipelineConfig`]. The pipeline itself is the explicit sequence in
//! [`run_pipeline`]: resolve paths, download, extract, load.

use crate::{
    client::{Credentials, KaggleClient},
    config::PipelineConfig,
    dataset::{DatasetApi, DatasetFetcher, DatasetFile},
    etl::Pipeline,
    storage::{ArchiveHandle, ArchiveUnpacker, ExtractedData, PathBundle},
    warehouse::{LoadReport, LoadTemplate, TableLoader, Warehouse},
};
use eyre::{Context, Result};
use std::path::Path;
use url::Url;

/// Load Kaggle client from environment variables
///
/// Expected environment variables:
/// - KAGGLE_USERNAME / KAGGLE_KEY: API credentials (optional, falls back to kaggle.json)
/// - KAGGLE_CONFIG_DIR: Directory holding kaggle.json (optional, defaults to ~/.kaggle)
/// - KAGGLE_API_URL: API base URL (optional, defaults to the public endpoint)
pub fn load_kaggle_client() -> Result<KaggleClient> {
    let credentials = Credentials::resolve().context("Failed to load Kaggle credentials")?;
    log::debug!("Authenticating as {}", credentials);

    let client = match std::env::var("KAGGLE_API_URL") {
        Ok(url_str) => {
            let url =
                Url::parse(&url_str).with_context(|| format!("Invalid KAGGLE_API_URL: {}", url_str))?;
            KaggleClient::try_new(url, credentials)
        }
        Err(_) => KaggleClient::try_default(credentials),
    };
    client.context("Failed to create Kaggle client")
}

/// Resolve the layout for a configuration, creating its data folders
pub fn resolve_paths(config: &PipelineConfig) -> Result<PathBundle> {
    PathBundle::resolve(&config.base_folder)
}

/// List the files of the configured dataset
pub async fn list_dataset_files<A: DatasetApi>(
    config: &PipelineConfig,
    api: A,
) -> Result<Vec<DatasetFile>> {
    let paths = PathBundle::new(&config.base_folder);
    DatasetFetcher::for_paths(api, config.dataset(), &paths)
        .list_files()
        .await
}

/// Download the configured dataset into the raw-data folder
pub async fn download_dataset<A: DatasetApi>(
    config: &PipelineConfig,
    api: A,
) -> Result<ArchiveHandle> {
    let paths = resolve_paths(config)?;
    DatasetFetcher::for_paths(api, config.dataset(), &paths)
        .download()
        .await
}

/// Unpack a previously downloaded archive
pub fn extract_archive(config: &PipelineConfig) -> Result<ExtractedData> {
    let paths = resolve_paths(config)?;
    let archive = ArchiveHandle::from_path(paths.archive_file())?;
    ArchiveUnpacker::for_paths(&paths).unpack(&archive)
}

/// Load previously extracted files into the database
pub fn load_table(config: &PipelineConfig) -> Result<LoadReport> {
    let paths = resolve_paths(config)?;
    let data = ExtractedData::from_dir(paths.extraction_dir())?;
    TableLoader::new(&paths).load_table(&data)
}

/// Run the full pipeline
///
/// Pipeline: PathBundle → DatasetFetcher → ArchiveUnpacker → TableLoader
pub async fn run_pipeline<A: DatasetApi>(config: &PipelineConfig, api: A) -> Result<LoadReport> {
    log::info!("Resolving paths under {}", config.base_folder.display());
    let paths = resolve_paths(config)?;
    log::debug!("Path bundle:\n{}", paths);

    let pipeline = Pipeline::new(
        DatasetFetcher::for_paths(api, config.dataset(), &paths),
        ArchiveUnpacker::for_paths(&paths),
        TableLoader::new(&paths),
    );

    pipeline.run().await
}

/// Create the project layout and the default load template
///
/// Existing files are never overwritten. When `config_file` is given the
/// configuration is written there as well.
pub fn init_project(config: &PipelineConfig, config_file: Option<&Path>) -> Result<PathBundle> {
    let paths = resolve_paths(config)?;
    std::fs::create_dir_all(&paths.sql)
        .with_context(|| format!("Failed to create directory: {}", paths.sql.display()))?;

    let template_file = paths.template_file();
    if template_file.exists() {
        log::info!("Keeping existing template {}", template_file.display());
    } else {
        std::fs::write(&template_file, LoadTemplate::DEFAULT).with_context(|| {
            format!("Failed to write template: {}", template_file.display())
        })?;
        log::info!("Wrote default template {}", template_file.display());
    }

    if let Some(path) = config_file {
        if path.exists() {
            log::info!("Keeping existing config {}", path.display());
        } else {
            config.write(path)?;
            log::info!("Wrote config {}", path.display());
        }
    }

    Ok(paths)
}

/// Open the configured database, failing if it hasn't been created yet
fn open_warehouse(config: &PipelineConfig) -> Result<Warehouse> {
    let database_file = PathBundle::new(&config.base_folder).database_file();
    if !database_file.exists() {
        eyre::bail!(
            "Database not found: {} (run the pipeline first)",
            database_file.display()
        );
    }
    Warehouse::open(database_file)
}

/// Count the rows of a table in the configured database
pub fn count_rows(config: &PipelineConfig, table: &str) -> Result<i64> {
    open_warehouse(config)?.row_count(table)
}

/// List the tables in the configured database
pub fn list_tables(config: &PipelineConfig) -> Result<Vec<String>> {
    open_warehouse(config)?.tables()
}
