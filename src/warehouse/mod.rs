//! DuckDB warehouse
//!
//! Provides the [`TableLoader`] step that loads extracted files into DuckDB,
//! the [`LoadTemplate`] it renders, and [`Warehouse`] for querying the result.

mod database;
mod loader;
mod template;

pub use database::Warehouse;
pub use loader::{LoadReport, TableLoader};
pub use template::LoadTemplate;
