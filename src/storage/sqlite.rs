//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::crawler::RankedResultSet;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageResult};
use crate::storage::{DomainScore, StoredLink};
use crate::url::extract_domain;
use crate::FiscrawlError;
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(FiscrawlError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, FiscrawlError> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self, FiscrawlError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn query_links(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> StorageResult<Vec<StoredLink>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, map_link)?;
        let mut links = Vec::new();
        for row in rows {
            links.push(row?);
        }
        Ok(links)
    }
}

fn map_link(row: &Row<'_>) -> rusqlite::Result<StoredLink> {
    Ok(StoredLink {
        url: row.get(0)?,
        anchor_text: row.get(1)?,
        score: row.get(2)?,
        scraped_from: row.get(3)?,
        domain: row.get(4)?,
    })
}

const LINK_COLUMNS: &str = "url, anchor_text, score, scraped_from, domain";

impl Storage for SqliteStorage {
    fn append_results(&mut self, results: &RankedResultSet) -> StorageResult<usize> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        for link in results.iter() {
            let domain = extract_domain(&link.scraped_from).unwrap_or_default();
            tx.execute(
                "INSERT INTO links (url, anchor_text, score, scraped_from, domain, discovered_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    link.url,
                    link.anchor_text,
                    link.score,
                    link.scraped_from,
                    domain,
                    now
                ],
            )?;
        }

        tx.commit()?;
        Ok(results.len())
    }

    fn top_links(&self, limit: u32, domain: Option<&str>) -> StorageResult<Vec<StoredLink>> {
        match domain {
            Some(domain) => self.query_links(
                &format!(
                    "SELECT {LINK_COLUMNS} FROM links WHERE domain = ?1
                     ORDER BY score DESC LIMIT ?2"
                ),
                &[&domain, &limit],
            ),
            None => self.query_links(
                &format!("SELECT {LINK_COLUMNS} FROM links ORDER BY score DESC LIMIT ?1"),
                &[&limit],
            ),
        }
    }

    fn links_from_domain(&self, domain: &str) -> StorageResult<Vec<StoredLink>> {
        self.query_links(
            &format!(
                "SELECT {LINK_COLUMNS} FROM links WHERE domain = ?1 ORDER BY score DESC"
            ),
            &[&domain],
        )
    }

    fn document_links(&self) -> StorageResult<Vec<StoredLink>> {
        self.query_links(
            &format!(
                "SELECT {LINK_COLUMNS} FROM links
                 WHERE url LIKE '%.pdf' OR url LIKE '%.xls' OR url LIKE '%.xlsx'
                    OR url LIKE '%.doc' OR url LIKE '%.docx'
                 ORDER BY score DESC"
            ),
            &[],
        )
    }

    fn search_by_keyword(&self, keyword: &str) -> StorageResult<Vec<StoredLink>> {
        let pattern = format!("%{}%", keyword);
        self.query_links(
            &format!(
                "SELECT {LINK_COLUMNS} FROM links WHERE anchor_text LIKE ?1
                 ORDER BY score DESC"
            ),
            &[&pattern],
        )
    }

    fn links_above_score(&self, threshold: f64) -> StorageResult<Vec<StoredLink>> {
        self.query_links(
            &format!(
                "SELECT {LINK_COLUMNS} FROM links WHERE score > ?1 ORDER BY score DESC"
            ),
            &[&threshold],
        )
    }

    fn avg_score_per_domain(&self) -> StorageResult<Vec<DomainScore>> {
        let mut stmt = self.conn.prepare(
            "SELECT domain, AVG(score) FROM links GROUP BY domain ORDER BY AVG(score) DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(DomainScore {
                domain: row.get(0)?,
                avg_score: row.get(1)?,
            })
        })?;

        let mut scores = Vec::new();
        for row in rows {
            scores.push(row?);
        }
        Ok(scores)
    }

    fn count_links(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM links", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
