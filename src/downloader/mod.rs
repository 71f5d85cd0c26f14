//! Outbound operations against the INPI bulletin portal.
//!
//! This module resolves the latest Boletín de Marcas from the portal's index page
//! and proxies bulletin PDFs from the allow-listed upload path. All network access
//! goes through the [`PageFetcher`] trait so callers can inject a test double.
//! The main entry points are [`fetch_latest_bulletin`] and [`download_bulletin`].

mod bulletin_resolver;
mod download_proxy;
mod fetcher;

// Re-export public API
pub use bulletin_resolver::{fetch_latest_bulletin, parse_bulletin_listing, select_latest};
pub use download_proxy::{derive_filename, download_bulletin, save_download, validate_download_url};
pub use fetcher::{FetchedResponse, HttpFetcher, PageFetcher};
