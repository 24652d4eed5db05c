//! On-disk page cache.
//!
//! ## Storage Layout
//!
//! ```text
//! <cache_root>/
//!   netcore/                  # pack name
//!     net6.0/                 # framework moniker
//!       en-us/                # locale
//!         System.String.html  # page body, or the not-found marker
//!         System.Nope.html
//! ```
//!
//! One file per resolved key. A file holds either the page exactly as the
//! server sent it, or the marker [`NOT_FOUND_MARKER`] recording that the page
//! does not exist upstream. Files are committed through a temporary sibling
//! and a rename, so a reader sees either no file or the complete content.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::fs;
use tracing::debug;

use crate::{Error, ItemDescriptor, Locale, Result};

/// Content written in place of a page body when the page does not exist.
///
/// Compared case-insensitively on read.
pub const NOT_FOUND_MARKER: &str = "404NotFound";

/// Extension of every cache file.
pub const PAGE_EXTENSION: &str = "html";

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// What a cache file says about its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedPage {
    /// The page exists; this is its body.
    Page(String),
    /// The page was confirmed absent upstream.
    NotFound,
}

impl CachedPage {
    /// Interpret raw cache file content.
    ///
    /// The format cannot tell a recorded absence apart from a real page whose
    /// body happens to be the marker text (in any letter case); such a page is
    /// reported as [`CachedPage::NotFound`]. The fetcher logs a warning when
    /// it stores a body like that.
    #[must_use]
    pub fn classify(content: String) -> Self {
        if Self::is_marker(&content) {
            Self::NotFound
        } else {
            Self::Page(content)
        }
    }

    /// Whether `content` would be read back as a not-found entry.
    #[must_use]
    pub fn is_marker(content: &str) -> bool {
        content.eq_ignore_ascii_case(NOT_FOUND_MARKER)
    }
}

/// Cache of documentation pages rooted at one directory.
#[derive(Debug, Clone)]
pub struct PageStore {
    root: PathBuf,
}

impl PageStore {
    /// Create a store rooted at `root`. Nothing is touched on disk.
    #[must_use]
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The cache root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if it is missing.
    ///
    /// Succeeds when the directory already exists, including when another
    /// process created it concurrently.
    pub fn ensure_root(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root).map_err(|e| storage_error(&self.root, e))
    }

    /// Path of the cache file for `item` under `locale`.
    ///
    /// `<root>/<pack>/<framework>/<locale>/<query_key>.html`
    #[must_use]
    pub fn entry_path(&self, item: &ItemDescriptor, locale: &Locale) -> PathBuf {
        self.root
            .join(item.pack_name())
            .join(item.framework_moniker())
            .join(locale.as_str())
            .join(format!("{}.{PAGE_EXTENSION}", item.query_key()))
    }

    /// Read a cache file.
    ///
    /// Returns `Ok(None)` when there is no entry at `path`.
    pub async fn read(&self, path: &Path) -> Result<Option<CachedPage>> {
        match fs::read_to_string(path).await {
            Ok(content) => {
                debug!("Cache hit at {}", path.display());
                Ok(Some(CachedPage::classify(content)))
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Store a page body verbatim.
    pub async fn write_page(&self, path: &Path, body: &str) -> Result<()> {
        self.commit(path, body).await
    }

    /// Record that the page at `path` does not exist upstream.
    pub async fn write_not_found(&self, path: &Path) -> Result<()> {
        self.commit(path, NOT_FOUND_MARKER).await
    }

    async fn commit(&self, path: &Path, content: &str) -> Result<()> {
        let parent = path.parent().ok_or_else(|| {
            storage_error(
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "cache path has no parent directory"),
            )
        })?;
        fs::create_dir_all(parent)
            .await
            .map_err(|e| storage_error(parent, e))?;

        // Unique per writer so concurrent fetches of one key never share a temp file
        let seq = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_path = path.with_extension(format!(
            "{PAGE_EXTENSION}.{}.{seq}.tmp",
            std::process::id()
        ));
        fs::write(&tmp_path, content)
            .await
            .map_err(|e| storage_error(&tmp_path, e))?;

        if let Err(e) = fs::rename(&tmp_path, path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(storage_error(path, e));
        }

        debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }
}

fn storage_error(path: &Path, source: io::Error) -> Error {
    Error::Storage {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn item(key: &str) -> ItemDescriptor {
        ItemDescriptor::new(key, "netcore", "net6.0").unwrap()
    }

    fn en_us() -> Locale {
        Locale::new("en-us").unwrap()
    }

    #[test]
    fn test_entry_path_layout() {
        let store = PageStore::new("/cache");
        let path = store.entry_path(&item("System.String"), &en_us());
        assert_eq!(
            path,
            Path::new("/cache/netcore/net6.0/en-us/System.String.html")
        );
    }

    #[test]
    fn test_classify_marker_any_case() {
        assert_eq!(CachedPage::classify("404NotFound".into()), CachedPage::NotFound);
        assert_eq!(CachedPage::classify("404notfound".into()), CachedPage::NotFound);
        assert_eq!(CachedPage::classify("404NOTFOUND".into()), CachedPage::NotFound);
    }

    #[test]
    fn test_classify_page_content() {
        assert_eq!(
            CachedPage::classify("<html>404NotFound</html>".into()),
            CachedPage::Page("<html>404NotFound</html>".into())
        );
        // Surrounding whitespace means it is not the marker
        assert_eq!(
            CachedPage::classify("404NotFound\n".into()),
            CachedPage::Page("404NotFound\n".into())
        );
        assert_eq!(CachedPage::classify(String::new()), CachedPage::Page(String::new()));
    }

    #[tokio::test]
    async fn test_read_missing_entry() {
        let temp = TempDir::new().unwrap();
        let store = PageStore::new(temp.path());
        let path = store.entry_path(&item("System.Missing"), &en_us());

        assert!(store.read(&path).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_page_creates_directories() {
        let temp = TempDir::new().unwrap();
        let store = PageStore::new(temp.path());
        let path = store.entry_path(&item("System.String"), &en_us());

        store.write_page(&path, "<html>string</html>").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html>string</html>");
        assert_eq!(
            store.read(&path).await.unwrap(),
            Some(CachedPage::Page("<html>string</html>".into()))
        );
    }

    #[tokio::test]
    async fn test_write_not_found_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = PageStore::new(temp.path());
        let path = store.entry_path(&item("System.Nope"), &en_us());

        store.write_not_found(&path).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), NOT_FOUND_MARKER);
        assert_eq!(store.read(&path).await.unwrap(), Some(CachedPage::NotFound));
    }

    #[tokio::test]
    async fn test_lowercase_marker_on_disk_reads_as_not_found() {
        let temp = TempDir::new().unwrap();
        let store = PageStore::new(temp.path());
        let path = store.entry_path(&item("System.Nope"), &en_us());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "404notfound").unwrap();

        assert_eq!(store.read(&path).await.unwrap(), Some(CachedPage::NotFound));
    }

    #[tokio::test]
    async fn test_overwrite_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let store = PageStore::new(temp.path());
        let path = store.entry_path(&item("System.String"), &en_us());

        store.write_not_found(&path).await.unwrap();
        store.write_page(&path, "<html>v2</html>").await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html>v2</html>");
    }

    #[test]
    fn test_ensure_root_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("cache");
        let store = PageStore::new(&root);

        store.ensure_root().unwrap();
        store.ensure_root().unwrap();

        assert!(root.is_dir());
        assert_eq!(std::fs::read_dir(&root).unwrap().count(), 0);
    }

    #[test]
    fn test_ensure_root_fails_when_blocked_by_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();
        let store = PageStore::new(blocker.join("cache"));

        match store.ensure_root() {
            Err(Error::Storage { path, .. }) => assert_eq!(path, blocker.join("cache")),
            other => panic!("expected storage error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_write_failure_keeps_io_error() {
        let temp = TempDir::new().unwrap();
        let store = PageStore::new(temp.path());
        std::fs::write(temp.path().join("netcore"), "not a directory").unwrap();
        let path = store.entry_path(&item("System.String"), &en_us());

        let err = store.write_page(&path, "<html/>").await.unwrap_err();
        match &err {
            Error::Storage { path: at, source } => {
                assert_eq!(at, &temp.path().join("netcore/net6.0/en-us"));
                assert_ne!(source.kind(), io::ErrorKind::NotFound);
            },
            other => panic!("expected storage error, got {other:?}"),
        }
        assert_eq!(err.category(), "storage");
        assert!(!err.is_recoverable());
    }

    proptest! {
        #[test]
        fn test_entry_path_is_deterministic(
            key in "[A-Za-z][A-Za-z0-9.]{0,20}",
            pack in "[a-z]{1,10}",
            tfm in "net[0-9]\\.[0-9]",
            locale in "[a-z]{2}-[a-z]{2}",
        ) {
            let store = PageStore::new("/root");
            let item = ItemDescriptor::new(key.clone(), pack.clone(), tfm.clone()).unwrap();
            let locale = Locale::new(&locale).unwrap();

            let first = store.entry_path(&item, &locale);
            let second = store.entry_path(&item.clone(), &locale.clone());
            prop_assert_eq!(&first, &second);

            let other_key = ItemDescriptor::new(format!("{key}X"), pack.clone(), tfm.clone()).unwrap();
            prop_assert_ne!(&first, &store.entry_path(&other_key, &locale));

            let other_pack = ItemDescriptor::new(key.clone(), format!("{pack}x"), tfm.clone()).unwrap();
            prop_assert_ne!(&first, &store.entry_path(&other_pack, &locale));

            let other_tfm = ItemDescriptor::new(key, pack, format!("{tfm}0")).unwrap();
            prop_assert_ne!(&first, &store.entry_path(&other_tfm, &locale));

            let other_locale = Locale::new("xx-yy").unwrap();
            if other_locale != locale {
                prop_assert_ne!(&first, &store.entry_path(&item, &other_locale));
            }
        }
    }
}
