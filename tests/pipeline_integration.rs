//! Integration tests for the full ingestion pipeline
//!
//! These tests run every step against real files and a real DuckDB
//! database, with a stub standing in for the remote dataset API.

use eyre::Result;
use kaggle_duck::cli::{self, init_project, run_pipeline};
use kaggle_duck::dataset::test_support::StubDatasetApi;
use kaggle_duck::etl::{Extractor, Pipeline, Transformer};
use kaggle_duck::{
    ArchiveUnpacker, DatasetFetcher, DatasetRef, PathBundle, PipelineConfig, TableLoader,
    Warehouse,
};
use std::io::{Cursor, Write};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Build a zip archive in memory from (name, content) pairs
fn zip_bytes(entries: &[(&str, &str)]) -> Result<Vec<u8>> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer.start_file(*name, SimpleFileOptions::default())?;
        writer.write_all(content.as_bytes())?;
    }
    Ok(writer.finish()?.into_inner())
}

fn netflix_archive() -> Result<Vec<u8>> {
    zip_bytes(&[
        (
            "a.csv",
            "show_id,type,title\ns1,Movie,Dick Johnson Is Dead\ns2,TV Show,Blood & Water\n",
        ),
        (
            "b.csv",
            "show_id,type,title\ns3,TV Show,Ganglands\ns4,TV Show,Kota Factory\ns5,Movie,Sankofa\n",
        ),
    ])
}

#[tokio::test]
async fn test_run_pipeline_loads_all_rows() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = PipelineConfig::new("o", "n", temp_dir.path());
    init_project(&config, None)?;

    let api = StubDatasetApi::with_archive(netflix_archive()?);
    let report = run_pipeline(&config, api).await?;

    let paths = PathBundle::new(temp_dir.path());
    assert_eq!(report.database, paths.database_file());
    assert!(paths.archive_file().exists());
    assert!(paths.extraction_dir().join("a.csv").exists());
    assert!(paths.extraction_dir().join("b.csv").exists());

    let warehouse = Warehouse::open(paths.database_file())?;
    assert_eq!(warehouse.row_count("netflix")?, 5);
    assert_eq!(cli::count_rows(&config, "netflix")?, 5);
    assert_eq!(cli::list_tables(&config)?, vec!["netflix"]);

    Ok(())
}

#[tokio::test]
async fn test_rerun_overwrites_previous_state() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = PipelineConfig::new("o", "n", temp_dir.path());
    init_project(&config, None)?;

    run_pipeline(&config, StubDatasetApi::with_archive(netflix_archive()?)).await?;

    let smaller = zip_bytes(&[("a.csv", "show_id,type,title\ns9,Movie,Rerun\n")])?;
    run_pipeline(&config, StubDatasetApi::with_archive(smaller)).await?;

    // b.csv from the first run is still on disk, so both files are matched
    assert_eq!(cli::count_rows(&config, "netflix")?, 4);

    Ok(())
}

#[tokio::test]
async fn test_not_found_aborts_before_any_file_is_written() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = PipelineConfig::new("o", "missing", temp_dir.path());
    init_project(&config, None)?;

    let api = StubDatasetApi::with_download_error("Dataset o/missing not found (404 Not Found)");
    let err = run_pipeline(&config, api).await.unwrap_err();

    assert_eq!(err.to_string(), "Dataset o/missing not found (404 Not Found)");

    let paths = PathBundle::new(temp_dir.path());
    assert!(!paths.archive_file().exists());
    assert!(!paths.extraction_dir().exists());
    assert!(!paths.database_file().exists());

    Ok(())
}

#[tokio::test]
async fn test_missing_template_fails_load_stage() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = PipelineConfig::new("o", "n", temp_dir.path());

    let api = StubDatasetApi::with_archive(netflix_archive()?);
    let err = run_pipeline(&config, api).await.unwrap_err();

    assert!(err.to_string().contains("Failed to read load template"));
    // Earlier steps leave their output behind
    let paths = PathBundle::new(temp_dir.path());
    assert!(paths.archive_file().exists());
    assert!(paths.extraction_dir().join("a.csv").exists());

    Ok(())
}

#[tokio::test]
async fn test_corrupt_archive_fails_extract_stage() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = PipelineConfig::new("o", "n", temp_dir.path());
    init_project(&config, None)?;

    let api = StubDatasetApi::with_archive(b"<html>rate limited</html>".to_vec());
    let result = run_pipeline(&config, api).await;

    assert!(result.is_err());
    assert!(!PathBundle::new(temp_dir.path()).database_file().exists());

    Ok(())
}

#[tokio::test]
async fn test_steps_compose_one_at_a_time() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = PipelineConfig::new("o", "n", temp_dir.path());
    let paths = init_project(&config, None)?;

    let fetcher = DatasetFetcher::for_paths(
        StubDatasetApi::with_archive(netflix_archive()?),
        DatasetRef::new("o", "n"),
        &paths,
    );
    let archive = fetcher.extract().await?;
    assert_eq!(archive.bytes, std::fs::metadata(&archive.path)?.len());

    let extracted = ArchiveUnpacker::for_paths(&paths).transform(archive)?;
    assert_eq!(extracted.entries, 2);

    // Same steps, reusing the files on disk
    assert_eq!(cli::extract_archive(&config)?.entries, 2);
    cli::load_table(&config)?;
    assert_eq!(cli::count_rows(&config, "netflix")?, 5);

    Ok(())
}

#[tokio::test]
async fn test_pipeline_with_explicit_stages() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = PipelineConfig::new("o", "n", temp_dir.path());
    let paths = init_project(&config, None)?;

    let pipeline = Pipeline::new(
        DatasetFetcher::for_paths(
            StubDatasetApi::with_archive(netflix_archive()?),
            config.dataset(),
            &paths,
        ),
        ArchiveUnpacker::for_paths(&paths),
        TableLoader::new(&paths),
    );
    let report = pipeline.run().await?;

    assert!(report.statement.contains("read_csv_auto"));
    assert!(report.statement.contains(&format!(
        "{}/*.csv",
        paths.extraction_dir().display()
    )));

    Ok(())
}
