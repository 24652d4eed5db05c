//! `docfetch config`

use anyhow::Result;

use crate::cli::Cli;

/// Print the effective configuration as TOML.
pub fn execute(cli: &Cli) -> Result<()> {
    let config = super::resolve_config(cli)?;
    print!("{}", config.to_toml()?);
    Ok(())
}
