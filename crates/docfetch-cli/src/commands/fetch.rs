//! `docfetch fetch`

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cli::{Cli, ItemArgs};

/// Fetch one page and print it (or write it to `output`).
///
/// Ctrl-C cancels a request that is still waiting on the network.
pub async fn execute(
    cli: &Cli,
    item: &ItemArgs,
    ignore_cache: bool,
    output: Option<&Path>,
) -> Result<()> {
    let fetcher = super::build_fetcher(cli)?;
    let descriptor = super::descriptor(item)?;

    let cancel = CancellationToken::new();
    let fetch = fetcher.fetch(&descriptor, ignore_cache, &cancel);
    tokio::pin!(fetch);

    // The signal branch is polled first so the handler is installed before
    // the request goes out.
    let result = tokio::select! {
        biased;
        signal = tokio::signal::ctrl_c() => {
            if signal.is_ok() {
                debug!("Interrupt received, cancelling request");
                cancel.cancel();
            }
            fetch.await
        },
        result = &mut fetch => result,
    };
    let page = result.with_context(|| format!("Failed to fetch {descriptor}"))?;

    if let Some(path) = output {
        tokio::fs::write(path, &page)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {} bytes to {}", page.len(), path.display());
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(page.as_bytes())?;
        stdout.flush()?;
    }
    Ok(())
}
