//! Pipeline configuration
//!
//! The configuration names the dataset to fetch and the base folder the
//! layout is resolved under. It can be stored as YAML:
//!
//! ```yaml
//! dataset_owner: rahulvyasm
//! dataset_name: netflix-movies-and-tv-shows
//! base_folder: /usr/local/airflow/include
//! ```

use crate::dataset::DatasetRef;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Parameters of a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Account that owns the dataset
    pub dataset_owner: String,
    /// Dataset slug
    pub dataset_name: String,
    /// Folder the `data/` and `sql/` directories live under
    pub base_folder: PathBuf,
}

impl PipelineConfig {
    pub const DEFAULT_OWNER: &'static str = "rahulvyasm";
    pub const DEFAULT_DATASET: &'static str = "netflix-movies-and-tv-shows";

    pub fn new(
        dataset_owner: impl Into<String>,
        dataset_name: impl Into<String>,
        base_folder: impl AsRef<Path>,
    ) -> Self {
        Self {
            dataset_owner: dataset_owner.into(),
            dataset_name: dataset_name.into(),
            base_folder: base_folder.as_ref().to_path_buf(),
        }
    }

    /// The dataset this configuration points at
    pub fn dataset(&self) -> DatasetRef {
        DatasetRef::new(&self.dataset_owner, &self.dataset_name)
    }

    /// Replace any field for which an override is given
    pub fn with_overrides(
        mut self,
        owner: Option<String>,
        name: Option<String>,
        base: Option<PathBuf>,
    ) -> Self {
        if let Some(owner) = owner {
            self.dataset_owner = owner;
        }
        if let Some(name) = name {
            self.dataset_name = name;
        }
        if let Some(base) = base {
            self.base_folder = base;
        }
        self
    }

    /// Read configuration from a YAML file
    ///
    /// Missing keys fall back to their defaults.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file: {}", path.as_ref().display())
        })?;

        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        Ok(config)
    }

    /// Write configuration to a YAML file
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml =
            serde_yaml::to_string(self).with_context(|| "Failed to serialize config to YAML")?;

        std::fs::write(path.as_ref(), yaml).with_context(|| {
            format!("Failed to write config file: {}", path.as_ref().display())
        })?;

        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_OWNER, Self::DEFAULT_DATASET, ".")
    }
}
