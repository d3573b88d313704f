//! Zip archive handling
//!
//! Holds the handles passed between pipeline steps and the
//! [`ArchiveUnpacker`] that turns a downloaded archive into a directory of
//! tabular files.

use super::PathBundle;
use crate::etl::Transformer;
use eyre::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// A downloaded archive on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveHandle {
    /// Location of the archive file
    pub path: PathBuf,
    /// Number of bytes written to `path`
    pub bytes: u64,
}

impl ArchiveHandle {
    pub fn new(path: impl AsRef<Path>, bytes: u64) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            bytes,
        }
    }

    /// Build a handle for an archive that already exists on disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Archive not found: {}", path.display()))?;
        Ok(Self::new(path, metadata.len()))
    }
}

/// A directory of extracted tabular files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedData {
    /// Directory holding the extracted files
    pub dir: PathBuf,
    /// Number of files the directory holds
    pub entries: usize,
}

impl ExtractedData {
    pub fn new(dir: impl AsRef<Path>, entries: usize) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            entries,
        }
    }

    /// Build a handle for a directory that was extracted earlier
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut entries = 0;
        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("Extraction directory not found: {}", dir.display()))?
        {
            let entry = entry
                .with_context(|| format!("Failed to read directory entry in {}", dir.display()))?;
            if entry.path().is_file() {
                entries += 1;
            }
        }
        Ok(Self::new(dir, entries))
    }

    /// Glob pattern matching the CSV files in the directory
    pub fn glob(&self) -> String {
        format!("{}/*.csv", self.dir.display())
    }
}

/// Unpacks a zip archive into a fixed directory
///
/// Every entry is written below the target directory, overwriting files
/// left by a previous run. Archive contents are not validated.
///
/// # Example
/// ```no_run
/// use kaggle_duck::storage::{ArchiveHandle, ArchiveUnpacker, PathBundle};
///
/// # fn example() -> eyre::Result<()> {
/// let paths = PathBundle::resolve("/tmp/netflix")?;
/// let unpacker = ArchiveUnpacker::for_paths(&paths);
/// let extracted = unpacker.unpack(&ArchiveHandle::from_path(paths.archive_file())?)?;
/// println!("{} files in {}", extracted.entries, extracted.dir.display());
/// # Ok(())
/// # }
/// ```
pub struct ArchiveUnpacker {
    target: PathBuf,
}

impl ArchiveUnpacker {
    pub fn new(target: impl AsRef<Path>) -> Self {
        Self {
            target: target.as_ref().to_path_buf(),
        }
    }

    /// Unpacker targeting the layout's extraction directory
    pub fn for_paths(paths: &PathBundle) -> Self {
        Self::new(paths.extraction_dir())
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Extract every entry of the archive into the target directory
    ///
    /// # Errors
    /// Returns the zip library's error for corrupt archives, an error for
    /// entries whose path would escape the target, and any I/O error.
    pub fn unpack(&self, archive: &ArchiveHandle) -> Result<ExtractedData> {
        log::debug!(
            "Unpacking {} into {}",
            archive.path.display(),
            self.target.display()
        );

        let file = File::open(&archive.path)
            .with_context(|| format!("Failed to open archive: {}", archive.path.display()))?;
        let mut zip = ZipArchive::new(file)
            .with_context(|| format!("Failed to read archive: {}", archive.path.display()))?;

        std::fs::create_dir_all(&self.target).with_context(|| {
            format!("Failed to create directory: {}", self.target.display())
        })?;

        let mut files = 0;
        for i in 0..zip.len() {
            let mut entry = zip.by_index(i)?;
            let Some(name) = entry.enclosed_name() else {
                eyre::bail!("Archive entry has an unsafe path: {}", entry.name());
            };
            let out_path = self.target.join(name);

            if entry.is_dir() {
                std::fs::create_dir_all(&out_path)?;
                continue;
            }

            if let Some(parent) = out_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut out = File::create(&out_path)
                .with_context(|| format!("Failed to create file: {}", out_path.display()))?;
            std::io::copy(&mut entry, &mut out)
                .with_context(|| format!("Failed to extract: {}", out_path.display()))?;
            log::trace!("Extracted {}", out_path.display());
            files += 1;
        }

        log::info!(
            "Extracted {} file(s) to {}",
            files,
            self.target.display()
        );

        Ok(ExtractedData::new(&self.target, files))
    }
}

impl Transformer for ArchiveUnpacker {
    type Input = ArchiveHandle;
    type Output = ExtractedData;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        self.unpack(&input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, entries: &[(&str, &str)]) -> ArchiveHandle {
        let file = File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, content) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        ArchiveHandle::from_path(path).unwrap()
    }

    #[test]
    fn test_unpack_every_entry() {
        let temp = TempDir::new().unwrap();
        let archive = write_zip(
            &temp.path().join("data.zip"),
            &[("a.csv", "x\n1\n"), ("nested/b.csv", "x\n2\n")],
        );

        let unpacker = ArchiveUnpacker::new(temp.path().join("out"));
        let extracted = unpacker.unpack(&archive).unwrap();

        assert_eq!(extracted.entries, 2);
        assert_eq!(
            std::fs::read_to_string(temp.path().join("out/a.csv")).unwrap(),
            "x\n1\n"
        );
        assert!(temp.path().join("out/nested/b.csv").exists());
    }

    #[test]
    fn test_unpack_twice_overwrites() {
        let temp = TempDir::new().unwrap();
        let zip_path = temp.path().join("data.zip");
        let unpacker = ArchiveUnpacker::new(temp.path().join("out"));

        let archive = write_zip(&zip_path, &[("a.csv", "old\n")]);
        unpacker.unpack(&archive).unwrap();

        let archive = write_zip(&zip_path, &[("a.csv", "new\n")]);
        let extracted = unpacker.unpack(&archive).unwrap();

        assert_eq!(extracted.entries, 1);
        assert_eq!(
            std::fs::read_to_string(temp.path().join("out/a.csv")).unwrap(),
            "new\n"
        );
    }

    #[test]
    fn test_unpack_corrupt_archive_fails() {
        let temp = TempDir::new().unwrap();
        let zip_path = temp.path().join("broken.zip");
        std::fs::write(&zip_path, b"definitely not a zip").unwrap();

        let unpacker = ArchiveUnpacker::new(temp.path().join("out"));
        let result = unpacker.unpack(&ArchiveHandle::from_path(&zip_path).unwrap());

        assert!(result.is_err());
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn test_extracted_glob() {
        let data = ExtractedData::new("/tmp/x/data/raw/netflix", 1);
        assert_eq!(data.glob(), "/tmp/x/data/raw/netflix/*.csv");
    }

    #[test]
    fn test_from_dir_counts_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.csv"), "x\n").unwrap();
        std::fs::write(temp.path().join("b.csv"), "x\n").unwrap();
        std::fs::create_dir(temp.path().join("sub")).unwrap();

        let data = ExtractedData::from_dir(temp.path()).unwrap();
        assert_eq!(data.entries, 2);

        assert!(ExtractedData::from_dir(temp.path().join("missing")).is_err());
    }

    #[test]
    fn test_from_dir_on_file_fails() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.csv");
        std::fs::write(&file, "x\n").unwrap();

        let err = ExtractedData::from_dir(&file).unwrap_err();
        assert!(err.to_string().contains("Extraction directory not found"));
    }
}
