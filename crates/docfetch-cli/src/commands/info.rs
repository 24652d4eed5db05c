//! `docfetch info`

use anyhow::Result;
use docfetch_core::{CachedPage, PageStore};

use crate::cli::{Cli, ItemArgs};

/// Print the URL, cache path and cache state of one page without fetching it.
pub async fn execute(cli: &Cli, item: &ItemArgs) -> Result<()> {
    let fetcher = super::build_fetcher(cli)?;
    let descriptor = super::descriptor(item)?;
    let path = fetcher.cache_path(&descriptor);

    let state = match PageStore::new(fetcher.cache_root()).read(&path).await? {
        Some(CachedPage::Page(body)) => format!("cached ({} bytes)", body.len()),
        Some(CachedPage::NotFound) => "cached as not found".to_string(),
        None => "not cached".to_string(),
    };

    println!("item:   {descriptor}");
    println!("locale: {}", fetcher.locale());
    println!("url:    {}", fetcher.page_url(&descriptor));
    println!("cache:  {}", path.display());
    println!("state:  {state}");
    Ok(())
}
