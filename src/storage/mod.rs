//! Storage module for persisting ranked crawl results
//!
//! This module handles all database operations for the pipeline, including:
//! - SQLite database initialization and schema management
//! - Appending ranked result sets
//! - Query surfaces over the accumulated link corpus

mod schema;
mod sqlite;
mod traits;

pub use schema::initialize_schema;
pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::FiscrawlError;
use std::path::Path;

/// A ranked link as stored in the database
#[derive(Debug, Clone, PartialEq)]
pub struct StoredLink {
    pub url: String,
    pub anchor_text: String,
    pub score: f64,
    pub scraped_from: String,
    /// Domain of the page the link was scraped from
    pub domain: String,
}

/// Mean relevance score for one domain
#[derive(Debug, Clone, PartialEq)]
pub struct DomainScore {
    pub domain: String,
    pub avg_score: f64,
}

/// Initializes or opens a storage database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
pub fn open_storage(path: &Path) -> Result<SqliteStorage, FiscrawlError> {
    SqliteStorage::new(path)
}
