//! Fetching and two-pass crawl expansion

mod expansion;
mod fetcher;

pub use expansion::{CrawlExpansion, RankedLink, RankedResultSet};
pub use fetcher::{build_http_client, extract_anchors, FetchError, HttpFetcher, PageFetcher, RawLink};
