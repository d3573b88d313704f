//! DuckDB database access

use eyre::{Context, Result};
use std::path::{Path, PathBuf};

/// A file-backed DuckDB database
///
/// Opening creates the file if it does not exist yet.
pub struct Warehouse {
    conn: duckdb::Connection,
    path: PathBuf,
}

impl Warehouse {
    /// Open or create the database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Opening database {}", path.display());
        let conn = duckdb::Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Execute one or more SQL statements
    pub fn execute(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    /// Count the rows of a table
    ///
    /// # Errors
    /// Returns an error if `table` is not a plain identifier or the query fails
    pub fn row_count(&self, table: &str) -> Result<i64> {
        if !is_identifier(table) {
            eyre::bail!("Invalid table name: '{}'", table);
        }
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM \"{}\"", table), [], |row| {
                row.get(0)
            })
            .with_context(|| format!("Failed to count rows of table {}", table))?;
        Ok(count)
    }

    /// Names of the tables in the main schema, sorted
    pub fn tables(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT table_name FROM information_schema.tables \
             WHERE table_schema = 'main' ORDER BY table_name",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
