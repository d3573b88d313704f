//! Load-statement templates
//!
//! A template is SQL with a `{{ csv_file_path }}` placeholder standing for the
//! glob of the extracted CSV files, e.g.
//!
//! ```sql
//! CREATE OR REPLACE TABLE netflix AS
//! SELECT * FROM read_csv_auto('{{ csv_file_path }}', header = true);
//! ```

use eyre::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)?\s*\}\}").expect("placeholder pattern is valid")
});

/// A SQL statement template with a single glob variable
#[derive(Debug, Clone)]
pub struct LoadTemplate {
    source: String,
    path: Option<PathBuf>,
}

impl LoadTemplate {
    /// The only variable a template may reference
    pub const GLOB_VARIABLE: &'static str = "csv_file_path";

    /// Statement shipped as `sql/create_netflix_table.sql`
    pub const DEFAULT: &'static str = include_str!("../../sql/create_netflix_table.sql");

    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            path: None,
        }
    }

    /// Read a template file
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read load template: {}", path.display()))?;
        Ok(Self {
            source,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Substitute `glob` for every `{{ csv_file_path }}`
    ///
    /// Unlike Jinja, an undefined variable is an error rather than an empty
    /// string.
    ///
    /// # Errors
    /// Returns an error for placeholders naming any other variable and for
    /// a `{{` that is never closed
    pub fn render(&self, glob: &str) -> Result<String> {
        let mut rendered = String::with_capacity(self.source.len() + glob.len());
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(&self.source) {
            let Some(whole) = caps.get(0) else { continue };
            let literal = &self.source[last..whole.start()];
            self.check_literal(literal)?;

            let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            if name != Self::GLOB_VARIABLE {
                eyre::bail!(
                    "Undefined template variable '{}' in {}",
                    name,
                    self.origin()
                );
            }

            rendered.push_str(literal);
            rendered.push_str(glob);
            last = whole.end();
        }

        let rest = &self.source[last..];
        self.check_literal(rest)?;
        rendered.push_str(rest);

        Ok(rendered)
    }

    fn check_literal(&self, literal: &str) -> Result<()> {
        if literal.contains("{{") {
            eyre::bail!("Unclosed placeholder in {}", self.origin());
        }
        Ok(())
    }

    fn origin(&self) -> String {
        match &self.path {
            Some(path) => format!("load template {}", path.display()),
            None => "load template".to_string(),
        }
    }
}

impl Default for LoadTemplate {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_substitutes_glob() {
        let template = LoadTemplate::new("SELECT * FROM read_csv_auto('{{ csv_file_path }}');");
        assert_eq!(
            template.render("/data/*.csv").unwrap(),
            "SELECT * FROM read_csv_auto('/data/*.csv');"
        );
    }

    #[test]
    fn test_render_tolerates_spacing_and_repeats() {
        let template = LoadTemplate::new("{{csv_file_path}} | {{   csv_file_path }}");
        assert_eq!(template.render("g").unwrap(), "g | g");
    }

    #[test]
    fn test_render_without_placeholder() {
        let template = LoadTemplate::new("SELECT 1;");
        assert_eq!(template.render("ignored").unwrap(), "SELECT 1;");
    }

    #[test]
    fn test_undefined_variable() {
        let template = LoadTemplate::new("SELECT * FROM '{{ table_name }}';");
        let err = template.render("g").unwrap_err();
        assert!(err.to_string().contains("Undefined template variable 'table_name'"));
    }

    #[test]
    fn test_unclosed_placeholder() {
        let template = LoadTemplate::new("SELECT * FROM '{{ csv_file_path';");
        assert!(template.render("g").unwrap_err().to_string().contains("Unclosed placeholder"));

        let template = LoadTemplate::new("{{ oops {{ csv_file_path }}");
        assert!(template.render("g").unwrap_err().to_string().contains("Unclosed placeholder"));
    }

    #[test]
    fn test_default_template() {
        let rendered = LoadTemplate::default().render("/x/*.csv").unwrap();
        assert!(rendered.contains("CREATE OR REPLACE TABLE netflix"));
        assert!(rendered.contains("read_csv_auto('/x/*.csv', header = true)"));
    }

    #[test]
    fn test_default_matches_shipped_file() {
        let shipped = std::fs::read_to_string(
            Path::new(env!("CARGO_MANIFEST_DIR")).join("sql/create_netflix_table.sql"),
        )
        .unwrap();
        assert_eq!(LoadTemplate::DEFAULT, shipped);
    }

    #[test]
    fn test_read_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = LoadTemplate::read(temp.path().join("missing.sql")).unwrap_err();
        assert!(err.to_string().contains("Failed to read load template"));
    }

    #[test]
    fn test_error_names_template_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.sql");
        std::fs::write(&path, "{{ nope }}").unwrap();

        let err = LoadTemplate::read(&path).unwrap().render("g").unwrap_err();
        assert!(err.to_string().contains("bad.sql"));
    }
}
