//! Command implementations for the docfetch CLI

mod config;
mod fetch;
mod info;

pub use config::execute as show_config;
pub use fetch::execute as fetch_page;
pub use info::execute as show_info;

use anyhow::Result;
use docfetch_core::{Config, ItemDescriptor, Locale, PageFetcher};

use crate::cli::{Cli, ItemArgs};
use crate::error::CliError;

/// Load the config file and environment, then apply global CLI flags.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load().map_err(CliError::usage)?;
    if let Some(locale) = &cli.locale {
        config.locale = Locale::new(locale).map_err(CliError::usage)?;
    }
    if let Some(dir) = &cli.cache_dir {
        config.cache_root.clone_from(dir);
    }
    Ok(config)
}

fn build_fetcher(cli: &Cli) -> Result<PageFetcher> {
    let config = resolve_config(cli)?;
    Ok(PageFetcher::new(config.fetcher_config())?)
}

fn descriptor(item: &ItemArgs) -> Result<ItemDescriptor> {
    ItemDescriptor::new(&*item.query_key, &*item.pack, &*item.framework)
        .map_err(|e| CliError::usage(e).into())
}
