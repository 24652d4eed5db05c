#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Write an empty config file next to the cache so the user's own config is
/// never read.
#[allow(dead_code)]
pub fn empty_config(cache_dir: &Path) -> PathBuf {
    let path = cache_dir.join("docfetch.toml");
    std::fs::write(&path, "").expect("write empty config");
    path
}

/// Create a `docfetch` command isolated from the user's config and cache.
///
/// Only the environment and flags set here apply.
#[allow(dead_code)]
pub fn docfetch_cmd(cache_dir: &Path, base_url: &str) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("docfetch"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("DOCFETCH_CONFIG", empty_config(cache_dir));
    cmd.env("DOCFETCH_CACHE_DIR", cache_dir);
    cmd.env("DOCFETCH_BASE_URL", base_url);
    cmd.env_remove("DOCFETCH_LOCALE");
    cmd.env("NO_COLOR", "1");
    cmd
}
