//! Core ETL (Extract, Transform, Load) abstractions
//!
//! This module provides trait definitions for building the ingestion
//! pipeline: a source is extracted into a value, the value is transformed,
//! and the result is loaded into a destination.

mod extract;
mod load;
mod pipeline;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::Pipeline;
pub use transform::Transformer;
