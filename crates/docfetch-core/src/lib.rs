//! # docfetch-core
//!
//! Cached fetching of .NET API reference pages.
//!
//! A page is identified by an [`ItemDescriptor`] (query key, reference pack,
//! target framework) plus the [`Locale`] the fetcher was built with.
//! [`PageFetcher`] answers from the local cache when it can, and otherwise
//! performs one HTTP request and records the outcome, including "this page
//! does not exist", so the same question is never asked upstream twice.
//!
//! ## Architecture
//!
//! - **Fetcher**: cache-first lookup, one GET on a miss, cancellation
//! - **Store**: on-disk layout, not-found marker, atomic writes
//! - **Configuration**: TOML config file with environment overrides
//! - **Error Handling**: one error enum with categories and recovery hints
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docfetch_core::{Config, ItemDescriptor, PageFetcher};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> docfetch_core::Result<()> {
//! let fetcher = PageFetcher::new(Config::load()?.fetcher_config())?;
//! let item = ItemDescriptor::new("System.String", "netcore", "net6.0")?;
//! let html = fetcher.fetch(&item, false, &CancellationToken::new()).await?;
//! println!("{html}");
//! # Ok(())
//! # }
//! ```

/// Configuration file and environment overrides
pub mod config;
/// Item descriptors identifying a page
pub mod descriptor;
/// Error types and result aliases
pub mod error;
/// Cache-first page fetching
pub mod fetcher;
/// Canonical locale tags
pub mod locale;
/// On-disk page cache
pub mod store;

pub use config::Config;
pub use descriptor::ItemDescriptor;
pub use error::{Error, Result};
pub use fetcher::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT, FetcherConfig, PageFetcher};
pub use locale::Locale;
pub use reqwest::StatusCode;
pub use store::{CachedPage, NOT_FOUND_MARKER, PageStore};
