//! File system storage operations
//!
//! This module handles the on-disk side of the pipeline:
//! - Directory layout resolution
//! - Zip archive extraction

mod archive;
mod layout;

pub use archive::{ArchiveHandle, ArchiveUnpacker, ExtractedData};
pub use layout::PathBundle;
