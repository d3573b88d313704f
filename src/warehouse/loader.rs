//! Table load step
//!
//! Loads extracted CSV files into DuckDB by executing the rendered
//! load-statement template.

use super::{LoadTemplate, Warehouse};
use crate::etl::Loader;
use crate::storage::{ExtractedData, PathBundle};

use async_trait::async_trait;
use eyre::Result;
use std::path::{Path, PathBuf};

/// Outcome of a table load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Database file the statement ran against
    pub database: PathBuf,
    /// The rendered statement that was executed
    pub statement: String,
}

/// Loader that runs the load-statement template against DuckDB
///
/// The database file is opened (and created if absent) before the
/// template is read, so a run that fails on the template still leaves an
/// empty database behind. Errors from the template or the engine are
/// returned unchanged; no rollback is attempted beyond what DuckDB does
/// for a failed statement.
///
/// # Example
/// ```no_run
/// use kaggle_duck::storage::{ExtractedData, PathBundle};
/// use kaggle_duck::warehouse::TableLoader;
///
/// # fn example() -> eyre::Result<()> {
/// let paths = PathBundle::resolve(".")?;
/// let loader = TableLoader::new(&paths);
/// let report = loader.load_table(&ExtractedData::from_dir(paths.extraction_dir())?)?;
/// println!("{}", report.statement);
/// # Ok(())
/// # }
/// ```
pub struct TableLoader {
    database_file: PathBuf,
    template_file: PathBuf,
}

impl TableLoader {
    /// Create a loader using the layout's database file and template
    pub fn new(paths: &PathBundle) -> Self {
        Self {
            database_file: paths.database_file(),
            template_file: paths.template_file(),
        }
    }

    /// Use a different template file
    pub fn with_template(mut self, path: impl AsRef<Path>) -> Self {
        self.template_file = path.as_ref().to_path_buf();
        self
    }

    pub fn database_file(&self) -> &Path {
        &self.database_file
    }

    pub fn template_file(&self) -> &Path {
        &self.template_file
    }

    /// Render the template for `data` and execute it
    pub fn load_table(&self, data: &ExtractedData) -> Result<LoadReport> {
        let warehouse = Warehouse::open(&self.database_file)?;

        let template = LoadTemplate::read(&self.template_file)?;
        let statement = template.render(&data.glob())?;
        log::info!("Executing load statement:\n{}", statement);

        warehouse.execute(&statement)?;
        log::info!(
            "Loaded {} into {}",
            data.dir.display(),
            self.database_file.display()
        );

        Ok(LoadReport {
            database: self.database_file.clone(),
            statement,
        })
    }
}

#[async_trait]
impl Loader for TableLoader {
    type Item = ExtractedData;
    type Report = LoadReport;

    async fn load(&self, item: Self::Item) -> Result<Self::Report> {
        self.load_table(&item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup(template: &str) -> (TempDir, PathBundle, ExtractedData) {
        let temp = TempDir::new().unwrap();
        let paths = PathBundle::resolve(temp.path()).unwrap();
        std::fs::create_dir_all(&paths.sql).unwrap();
        std::fs::write(paths.template_file(), template).unwrap();

        let dir = paths.extraction_dir();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a.csv"), "id,title\n1,Alpha\n2,Beta\n").unwrap();
        std::fs::write(dir.join("b.csv"), "id,title\n3,Gamma\n4,Delta\n5,Omega\n").unwrap();
        let data = ExtractedData::from_dir(&dir).unwrap();

        (temp, paths, data)
    }

    #[test]
    fn test_load_all_matching_files() {
        let (_temp, paths, data) = setup(LoadTemplate::DEFAULT);

        let report = TableLoader::new(&paths).load_table(&data).unwrap();

        assert_eq!(report.database, paths.database_file());
        assert!(report.statement.contains(&data.glob()));
        let warehouse = Warehouse::open(paths.database_file()).unwrap();
        assert_eq!(warehouse.row_count("netflix").unwrap(), 5);
    }

    #[test]
    fn test_reload_replaces_table() {
        let (_temp, paths, data) = setup(LoadTemplate::DEFAULT);
        let loader = TableLoader::new(&paths);

        loader.load_table(&data).unwrap();
        loader.load_table(&data).unwrap();

        let warehouse = Warehouse::open(paths.database_file()).unwrap();
        assert_eq!(warehouse.row_count("netflix").unwrap(), 5);
    }

    #[test]
    fn test_missing_template_still_creates_database() {
        let (_temp, paths, data) = setup(LoadTemplate::DEFAULT);
        std::fs::remove_file(paths.template_file()).unwrap();

        let err = TableLoader::new(&paths).load_table(&data).unwrap_err();

        assert!(err.to_string().contains("Failed to read load template"));
        assert!(paths.database_file().exists());
    }

    #[test]
    fn test_sql_error_propagates() {
        let (_temp, paths, data) = setup("CREATE TABLE broken AS SELEC * FROM '{{ csv_file_path }}';");

        let result = TableLoader::new(&paths).load_table(&data);
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_template() {
        let (temp, paths, data) = setup(LoadTemplate::DEFAULT);
        let custom = temp.path().join("titles.sql");
        std::fs::write(
            &custom,
            "CREATE OR REPLACE TABLE titles AS SELECT title FROM read_csv_auto('{{ csv_file_path }}');",
        )
        .unwrap();

        let loader = TableLoader::new(&paths).with_template(&custom);
        loader.load_table(&data).unwrap();

        let warehouse = Warehouse::open(paths.database_file()).unwrap();
        assert_eq!(warehouse.row_count("titles").unwrap(), 5);
    }
}
