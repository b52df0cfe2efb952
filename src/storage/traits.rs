//! Storage trait definitions

use crate::crawler::RankedResultSet;
use crate::storage::{DomainScore, StoredLink};
use thiserror::Error;

/// Errors raised by storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence for ranked crawl results
///
/// The trait seam keeps the expansion and query layers testable against
/// an in-memory database.
pub trait Storage {
    /// Appends every link in a result set, returning how many were written
    ///
    /// The stored domain is derived from the page the link was scraped
    /// from, so per-domain queries group by the site that published the
    /// link rather than where it points.
    fn append_results(&mut self, results: &RankedResultSet) -> StorageResult<usize>;

    /// Highest-scoring links, optionally restricted to one domain
    fn top_links(&self, limit: u32, domain: Option<&str>) -> StorageResult<Vec<StoredLink>>;

    /// Every link scraped from one domain, highest score first
    fn links_from_domain(&self, domain: &str) -> StorageResult<Vec<StoredLink>>;

    /// Links pointing at document files (pdf, xls, xlsx, doc, docx)
    fn document_links(&self) -> StorageResult<Vec<StoredLink>>;

    /// Links whose anchor text contains the given keyword,
    /// case-insensitively
    fn search_by_keyword(&self, keyword: &str) -> StorageResult<Vec<StoredLink>>;

    /// Links scoring strictly above the threshold
    fn links_above_score(&self, threshold: f64) -> StorageResult<Vec<StoredLink>>;

    /// Mean score per domain, highest first
    fn avg_score_per_domain(&self) -> StorageResult<Vec<DomainScore>>;

    /// Total number of stored links
    fn count_links(&self) -> StorageResult<u64>;
}
