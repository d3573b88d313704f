//! Project directory layout

use eyre::{Context, Result};
use std::path::{Path, PathBuf};

/// Resolved filesystem locations shared by every pipeline step
///
/// All paths are derived from a single base folder:
/// ```text
/// <base>/data/raw                           archive + extracted files
/// <base>/data/database/netflix.db           DuckDB database file
/// <base>/sql/create_netflix_table.sql       load-statement template
/// ```
///
/// The bundle is immutable once built; steps receive it by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathBundle {
    /// `<base>/data`
    pub data: PathBuf,
    /// `<base>/data/raw`
    pub raw_data: PathBuf,
    /// `<base>/data/database`
    pub database: PathBuf,
    /// `<base>/sql`
    pub sql: PathBuf,
}

impl PathBundle {
    /// File name of the downloaded archive inside `raw_data`
    pub const ARCHIVE_FILE: &'static str = "netflix.zip";
    /// Directory inside `raw_data` the archive is unpacked into
    pub const EXTRACT_DIR: &'static str = "netflix";
    /// Database file name inside `database`
    pub const DATABASE_FILE: &'static str = "netflix.db";
    /// Load-statement template file name inside `sql`
    pub const TEMPLATE_FILE: &'static str = "create_netflix_table.sql";

    /// Compute the layout for a base folder without touching the disk
    pub fn new(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        let data = base.join("data");
        Self {
            raw_data: data.join("raw"),
            database: data.join("database"),
            sql: base.join("sql"),
            data,
        }
    }

    /// Compute the layout and create the raw-data and database folders
    ///
    /// Safe to call repeatedly; existing folders are left alone.
    ///
    /// # Errors
    /// Returns an error if a folder cannot be created (permissions, a file
    /// in the way, etc.)
    pub fn resolve(base: impl AsRef<Path>) -> Result<Self> {
        let paths = Self::new(base);
        paths.create_dirs()?;
        Ok(paths)
    }

    /// Create the raw-data and database folders
    pub fn create_dirs(&self) -> Result<()> {
        for dir in [&self.raw_data, &self.database] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Path the downloaded archive is written to
    pub fn archive_file(&self) -> PathBuf {
        self.raw_data.join(Self::ARCHIVE_FILE)
    }

    /// Directory the archive is extracted into
    pub fn extraction_dir(&self) -> PathBuf {
        self.raw_data.join(Self::EXTRACT_DIR)
    }

    /// Path of the DuckDB database file
    pub fn database_file(&self) -> PathBuf {
        self.database.join(Self::DATABASE_FILE)
    }

    /// Path of the load-statement template
    pub fn template_file(&self) -> PathBuf {
        self.sql.join(Self::TEMPLATE_FILE)
    }
}

impl std::fmt::Display for PathBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "data:     {}", self.data.display())?;
        writeln!(f, "raw:      {}", self.raw_data.display())?;
        writeln!(f, "database: {}", self.database.display())?;
        write!(f, "sql:      {}", self.sql.display())
    }
}
