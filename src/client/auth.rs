use base64::Engine;
use eyre::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Kaggle API credentials: an account name and its API key
///
/// Resolved, in order, from the `KAGGLE_USERNAME` and `KAGGLE_KEY`
/// environment variables, `$KAGGLE_CONFIG_DIR/kaggle.json`, or
/// `$HOME/.kaggle/kaggle.json`.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub key: String,
}

impl Credentials {
    /// Name of the key file inside the Kaggle config directory
    pub const KEY_FILE: &'static str = "kaggle.json";

    pub fn new(username: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            key: key.into(),
        }
    }

    /// Resolve credentials from the process environment
    pub fn resolve() -> Result<Self> {
        Self::resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve credentials using `lookup` to read environment variables
    pub fn resolve_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let (Some(username), Some(key)) = (lookup("KAGGLE_USERNAME"), lookup("KAGGLE_KEY")) {
            log::debug!("Using Kaggle credentials from environment");
            return Ok(Self::new(username, key));
        }

        let path = match (lookup("KAGGLE_CONFIG_DIR"), lookup("HOME")) {
            (Some(dir), _) => PathBuf::from(dir).join(Self::KEY_FILE),
            (None, Some(home)) => PathBuf::from(home).join(".kaggle").join(Self::KEY_FILE),
            (None, None) => eyre::bail!(
                "No Kaggle credentials: set KAGGLE_USERNAME and KAGGLE_KEY, or KAGGLE_CONFIG_DIR"
            ),
        };
        Self::read(path)
    }

    /// Read credentials from a `kaggle.json` key file
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Reading Kaggle credentials from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read Kaggle key file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse Kaggle key file: {}", path.display()))
    }

    /// Value for the HTTP `Authorization` header
    pub fn basic_header(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.username, self.key));
        format!("Basic {}", encoded)
    }
}

// Keep the key out of logs and panics
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("key", &"***")
            .finish()
    }
}

impl std::fmt::Display for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.username)
    }
}
