//! boletin-marcas library
//!
//! This crate provides the core functionality for the `boletin-marcas` binary.
//! Keep the crate root minimal: implementation and tests live in their modules.
//!
//! ## Overview
//!
//! The library watches the Argentine trademark office (INPI) bulletin:
//!
//! - [`downloader`] - Resolves the latest Boletín de Marcas and proxies bulletin PDFs
//! - [`scanner`] - Finds published marks similar to a user's own marks in bulletin text
//! - [`server`] - HTTP API over the downloader and scanner
//! - [`cli`] - Command-line interface
//! - [`config`] - TOML configuration with defaults for the live portal
//! - [`models`] - Data structures for bulletin rows and downloads
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use boletin_marcas::config::ResolvedConfig;
//! use boletin_marcas::downloader::{self, HttpFetcher};
//! use boletin_marcas::errors::AppResult;
//!
//! # async fn example() -> AppResult<()> {
//! let config = ResolvedConfig::default();
//! let fetcher = HttpFetcher::from_config(&config)?;
//!
//! let latest = downloader::fetch_latest_bulletin(&fetcher, &config).await?;
//! let pdf = downloader::download_bulletin(&fetcher, latest.as_str(), &config).await?;
//! downloader::save_download(&pdf, &config.download_dir).await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod downloader;
pub mod errors;
pub mod logging;
pub mod models;
pub mod scanner;
pub mod server;
pub mod utils;
