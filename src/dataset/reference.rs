//! Dataset identifiers and listing entries

use serde::{Deserialize, Serialize};

/// A dataset on the hosting service, identified by owner and name
///
/// Displays as `owner/name`, the form the Kaggle API uses in its paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRef {
    pub owner: String,
    pub name: String,
}

impl DatasetRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for DatasetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// One file in a dataset's listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetFile {
    pub name: String,
    #[serde(default)]
    pub total_bytes: u64,
    #[serde(default)]
    pub creation_date: Option<String>,
}

impl std::fmt::Display for DatasetFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} bytes)", self.name, self.total_bytes)?;
        if let Some(created) = &self.creation_date {
            write!(f, ", created {}", created)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_display() {
        let dataset = DatasetRef::new("rahulvyasm", "netflix-movies-and-tv-shows");
        assert_eq!(dataset.to_string(), "rahulvyasm/netflix-movies-and-tv-shows");
    }

    #[test]
    fn test_file_from_api_json() {
        let file: DatasetFile = serde_json::from_str(
            r#"{"name": "netflix_titles.csv", "totalBytes": 3399671, "creationDate": "2024-03-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(file.name, "netflix_titles.csv");
        assert_eq!(file.total_bytes, 3399671);
        assert_eq!(
            file.to_string(),
            "netflix_titles.csv (3399671 bytes), created 2024-03-01T10:00:00Z"
        );
    }

    #[test]
    fn test_file_missing_optional_fields() {
        let file: DatasetFile = serde_json::from_str(r#"{"name": "a.csv"}"#).unwrap();
        assert_eq!(file.total_bytes, 0);
        assert_eq!(file.creation_date, None);
    }
}
