//! Cache-first fetching of documentation pages.
//!
//! [`PageFetcher`] resolves an [`ItemDescriptor`] to page text. It looks in
//! the [`PageStore`] first and only goes to the network on a miss (or when the
//! caller asks it to ignore the cache). Both found pages and confirmed 404s
//! are written back, so a key costs at most one request until its cache file
//! is removed.
//!
//! ```rust,no_run
//! use docfetch_core::{FetcherConfig, ItemDescriptor, Locale, PageFetcher};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> docfetch_core::Result<()> {
//! let config = FetcherConfig::new(Locale::new("en-US")?, "/tmp/docfetch");
//! let fetcher = PageFetcher::new(config)?;
//! let item = ItemDescriptor::new("System.String", "netcore", "net6.0")?;
//!
//! match fetcher.fetch(&item, false, &CancellationToken::new()).await {
//!     Ok(html) => println!("{} bytes", html.len()),
//!     Err(e) if e.is_not_found() => println!("no page for {item}"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::store::{CachedPage, PageStore};
use crate::{Error, ItemDescriptor, Locale, Result};

/// Documentation site used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://docs.microsoft.com";

/// Browser user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/99.0.4844.74 Safari/537.36 Edg/99.0.1150.52";

const MAX_REDIRECTS: usize = 10;

/// Construction settings for [`PageFetcher`].
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Locale pages are requested and cached in.
    pub locale: Locale,
    /// Root directory of the page cache.
    pub cache_root: PathBuf,
    /// Scheme and host of the documentation site, without a trailing path.
    pub base_url: String,
    /// User agent header value.
    pub user_agent: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl FetcherConfig {
    /// Settings for `locale` and `cache_root` with every other option at its
    /// default.
    pub fn new(locale: Locale, cache_root: impl Into<PathBuf>) -> Self {
        Self {
            locale,
            cache_root: cache_root.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Point the fetcher at a different site (e.g. a local mock server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// What the server said about a page.
enum Upstream {
    Page(String),
    Missing,
}

/// Fetches documentation pages through a local cache.
///
/// The HTTP client follows redirects and picks up proxy settings from the
/// environment (`HTTP_PROXY`, `HTTPS_PROXY`, `NO_PROXY`) and, on Windows and
/// macOS, from the system configuration.
///
/// `PageFetcher` is `Send + Sync`; share one behind an `Arc` to fetch from
/// several tasks. Concurrent fetches of the same key are not coalesced.
#[derive(Debug)]
pub struct PageFetcher {
    client: Client,
    store: PageStore,
    locale: Locale,
    base_url: String,
}

impl PageFetcher {
    /// Create a fetcher, making sure the cache root exists.
    ///
    /// Only the root directory is created here; per-key directories are
    /// created when an entry is first written.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUrl`] if the base URL is not an http(s) URL
    /// - [`Error::Storage`] if the cache root cannot be created
    /// - [`Error::Network`] if the HTTP client cannot be built
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let base_url = Self::validate_base_url(&config.base_url)?;

        let store = PageStore::new(&config.cache_root);
        store.ensure_root()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;

        debug!(
            "Page fetcher ready: locale={}, cache={}",
            config.locale,
            store.root().display()
        );

        Ok(Self {
            client,
            store,
            locale: config.locale,
            base_url,
        })
    }

    fn validate_base_url(raw: &str) -> Result<String> {
        let parsed = Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("'{raw}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!(
                "'{raw}': only http and https are supported"
            )));
        }
        Ok(raw.trim_end_matches('/').to_string())
    }

    /// Locale used for every request and cache path.
    #[must_use]
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Root directory of the page cache.
    #[must_use]
    pub fn cache_root(&self) -> &Path {
        self.store.root()
    }

    /// Cache file for `item`: `<root>/<pack>/<framework>/<locale>/<query_key>.html`.
    #[must_use]
    pub fn cache_path(&self, item: &ItemDescriptor) -> PathBuf {
        self.store.entry_path(item, &self.locale)
    }

    /// Remote URL for `item`.
    ///
    /// ```rust
    /// use docfetch_core::{FetcherConfig, ItemDescriptor, Locale, PageFetcher};
    ///
    /// let temp = tempfile::tempdir()?;
    /// let fetcher = PageFetcher::new(FetcherConfig::new(Locale::new("en-us")?, temp.path()))?;
    /// let item = ItemDescriptor::new("System.String", "netcore", "net6.0")?;
    /// assert_eq!(
    ///     fetcher.page_url(&item),
    ///     "https://docs.microsoft.com/en-us/dotnet/api/System.String?view=net6.0"
    /// );
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn page_url(&self, item: &ItemDescriptor) -> String {
        format!(
            "{}/{}/dotnet/api/{}?view={}",
            self.base_url,
            self.locale,
            item.query_key(),
            item.framework_moniker()
        )
    }

    /// Resolve `item` to its page text.
    ///
    /// Unless `ignore_cache` is set, an existing cache entry answers the call
    /// without touching the network. Otherwise a single GET is issued and its
    /// outcome is written back: the body on success, the not-found marker on
    /// 404. Other statuses and transport failures leave the cache untouched.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] for a live or cached 404
    /// - [`Error::RequestFailed`] for any other unsuccessful status
    /// - [`Error::Network`] for transport failures, including timeouts
    /// - [`Error::Cancelled`] if `cancel` fires while waiting on the network
    /// - [`Error::Io`] / [`Error::Storage`] if the cache cannot be read or written
    pub async fn fetch(
        &self,
        item: &ItemDescriptor,
        ignore_cache: bool,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let path = self.cache_path(item);
        let url = self.page_url(item);

        if ignore_cache {
            debug!("Ignoring cache for {}", item);
        } else {
            match self.store.read(&path).await? {
                Some(CachedPage::Page(body)) => return Ok(body),
                Some(CachedPage::NotFound) => {
                    debug!("Cached not-found for {}", item);
                    return Err(Error::NotFound { url });
                },
                None => debug!("Cache miss for {}", item),
            }
        }

        match self.download(&url, cancel).await? {
            Upstream::Page(body) => {
                if CachedPage::is_marker(&body) {
                    warn!(
                        "Page body for {} equals the not-found marker and will read back as missing",
                        url
                    );
                }
                self.store.write_page(&path, &body).await?;
                Ok(body)
            },
            Upstream::Missing => {
                self.store.write_not_found(&path).await?;
                Err(Error::NotFound { url })
            },
        }
    }

    async fn download(&self, url: &str, cancel: &CancellationToken) -> Result<Upstream> {
        let cancelled = || Error::Cancelled {
            url: url.to_string(),
        };

        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(cancelled()),
            response = self.client.get(url).send() => response?,
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            info!("Page not found (404) at {}", url);
            return Ok(Upstream::Missing);
        }
        if !status.is_success() {
            return Err(Error::RequestFailed {
                status,
                url: url.to_string(),
            });
        }

        let body = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(cancelled()),
            body = response.text() => body?,
        };

        info!("Fetched {} bytes from {}", body.len(), url);
        Ok(Upstream::Page(body))
    }
}
