//! Two-pass crawl expansion
//!
//! Pass one fetches the seed page and ranks every usable link on it. Links
//! that score above the configured threshold and are not file-like are then
//! fetched themselves, and their links ranked the same way. The merged
//! result dedupes by URL with the first occurrence winning, so a link's
//! provenance always points at the page closest to the seed.
//!
//! Second-pass fetch failures are absorbed: one dead high-scoring page
//! never costs the caller the rest of the results.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::{PageFetcher, RawLink};
use crate::model::RelevanceClassifier;
use crate::ranking::{rank, ScoredLink};
use crate::url::{is_file_link, is_valid_link, normalize_link};
use crate::{FiscrawlError, Result};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// A scored link together with the page it was discovered on
#[derive(Debug, Clone, PartialEq)]
pub struct RankedLink {
    pub url: String,
    pub anchor_text: String,
    pub score: f64,
    pub scraped_from: String,
}

/// The merged outcome of a crawl expansion
///
/// Deduplicated by URL (first occurrence wins) and sorted by descending
/// score. Equal scores keep discovery order.
#[derive(Debug, Clone, Default)]
pub struct RankedResultSet {
    links: Vec<RankedLink>,
}

impl RankedResultSet {
    /// Merges groups of ranked links in priority order
    ///
    /// Earlier groups win URL collisions against later ones, so callers
    /// pass the seed's own links first.
    pub fn merge(groups: Vec<Vec<RankedLink>>) -> Self {
        let mut seen: HashSet<String> = HashSet::new();
        let mut links: Vec<RankedLink> = Vec::new();

        for group in groups {
            for link in group {
                if seen.insert(link.url.clone()) {
                    links.push(link);
                }
            }
        }

        links.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Self { links }
    }

    pub fn links(&self) -> &[RankedLink] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedLink> {
        self.links.iter()
    }
}

/// Drives the two-pass expansion against a fetcher and a trained classifier
pub struct CrawlExpansion<F: PageFetcher> {
    fetcher: F,
    classifier: RelevanceClassifier,
    high_score_threshold: f64,
    fetch_timeout: Duration,
}

impl<F: PageFetcher> CrawlExpansion<F> {
    pub fn new(fetcher: F, classifier: RelevanceClassifier, config: &CrawlerConfig) -> Self {
        Self {
            fetcher,
            classifier,
            high_score_threshold: config.high_score_threshold,
            fetch_timeout: Duration::from_millis(config.fetch_timeout_ms),
        }
    }

    /// Runs the full expansion from a seed URL
    ///
    /// # Arguments
    ///
    /// * `seed` - Absolute URL of the page to start from
    ///
    /// # Returns
    ///
    /// The merged, deduplicated, score-sorted result set. An empty or
    /// unparseable seed is an input error; a seed page that yields no
    /// usable links is [`FiscrawlError::NoLinksFound`].
    pub async fn crawl(&self, seed: &str) -> Result<RankedResultSet> {
        let seed = seed.trim();
        if seed.is_empty() {
            return Err(FiscrawlError::InvalidInput(
                "seed URL cannot be empty".to_string(),
            ));
        }
        Url::parse(seed)
            .map_err(|e| FiscrawlError::InvalidInput(format!("invalid seed URL {}: {}", seed, e)))?;

        // Pass one: the seed page itself
        let first_pass = match self.fetch_page_links(seed).await {
            Ok(links) if !links.is_empty() => links,
            Ok(_) => {
                return Err(FiscrawlError::NoLinksFound {
                    url: seed.to_string(),
                })
            }
            Err(e) => {
                warn!(url = seed, error = %e, "Seed fetch failed");
                return Err(FiscrawlError::NoLinksFound {
                    url: seed.to_string(),
                });
            }
        };

        let ranked = self.rank_links(first_pass)?;
        debug!(url = seed, links = ranked.len(), "Ranked seed page");

        let first_group: Vec<RankedLink> = ranked
            .into_iter()
            .map(|link| RankedLink {
                url: link.url,
                anchor_text: link.anchor_text,
                score: link.score,
                scraped_from: seed.to_string(),
            })
            .collect();

        // Pass two: expand high-scoring pages, skipping terminal documents
        let targets: Vec<&RankedLink> = first_group
            .iter()
            .filter(|link| {
                link.score > self.high_score_threshold
                    && is_valid_link(&link.url)
                    && !is_file_link(&link.url)
            })
            .collect();
        debug!(count = targets.len(), "Selected pages for expansion");

        let mut groups = Vec::with_capacity(targets.len() + 1);
        let mut expanded = Vec::with_capacity(targets.len());

        for target in targets {
            let links = match self.fetch_page_links(&target.url).await {
                Ok(links) => links,
                Err(e) => {
                    warn!(url = %target.url, error = %e, "Expansion fetch failed, skipping");
                    continue;
                }
            };
            if links.is_empty() {
                debug!(url = %target.url, "Expansion page had no usable links");
                continue;
            }

            let ranked = self.rank_links(links)?;
            expanded.push(
                ranked
                    .into_iter()
                    .map(|link| RankedLink {
                        url: link.url,
                        anchor_text: link.anchor_text,
                        score: link.score,
                        scraped_from: target.url.clone(),
                    })
                    .collect::<Vec<_>>(),
            );
        }

        groups.push(first_group);
        groups.extend(expanded);

        let merged = RankedResultSet::merge(groups);
        debug!(links = merged.len(), "Crawl expansion complete");
        Ok(merged)
    }

    /// Fetches a page and returns its valid, normalized links
    async fn fetch_page_links(
        &self,
        page_url: &str,
    ) -> std::result::Result<Vec<RawLink>, super::fetcher::FetchError> {
        let raw = self.fetcher.fetch(page_url, self.fetch_timeout).await?;

        let mut links = Vec::with_capacity(raw.len());
        for link in raw {
            if !is_valid_link(&link.href) {
                continue;
            }
            match normalize_link(&link.href, page_url) {
                Ok(url) => links.push(RawLink {
                    href: url,
                    anchor_text: link.anchor_text,
                }),
                Err(e) => {
                    debug!(href = %link.href, error = %e, "Dropping unnormalizable link");
                }
            }
        }
        Ok(links)
    }

    fn rank_links(&self, links: Vec<RawLink>) -> Result<Vec<ScoredLink>> {
        let (urls, texts): (Vec<String>, Vec<String>) = links
            .into_iter()
            .map(|link| (link.href, link.anchor_text))
            .unzip();
        rank(&self.classifier, &urls, &texts)
    }
}
