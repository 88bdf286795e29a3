use std::path::PathBuf;
use std::time::Duration;

use crate::cli::{Cli, Command};

const CACHE_DIR_ENV: &str = "GEMCHECK_CACHE_DIR";
const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    /// Where cache files live; `None` keeps the cache in memory only.
    pub cache_dir: Option<PathBuf>,
    pub top_n: usize,
    pub http_timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: None,
            top_n: DEFAULT_TOP_N,
            http_timeout: Duration::from_secs(15),
            user_agent: format!("gemcheck/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            cache_dir: resolve_cache_dir(std::env::var(CACHE_DIR_ENV).ok(), dirs::home_dir()),
            ..Self::default()
        }
    }

    pub fn with_cli(mut self, cli: &Cli) -> Self {
        self.top_n = cli.top;
        // clear-cache always reaches the disk directory
        if cli.no_disk_cache && !matches!(cli.command, Command::ClearCache) {
            self.cache_dir = None;
        }
        self
    }
}

fn resolve_cache_dir(from_env: Option<String>, home: Option<PathBuf>) -> Option<PathBuf> {
    match from_env {
        Some(dir) if !dir.trim().is_empty() => Some(PathBuf::from(dir)),
        _ => home.map(|h| h.join(".cache").join("gemcheck")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cache_dir_resolution() {
        assert_eq!(
            resolve_cache_dir(Some("/tmp/gems".to_string()), Some(PathBuf::from("/home/exile"))),
            Some(PathBuf::from("/tmp/gems"))
        );
        assert_eq!(
            resolve_cache_dir(Some("  ".to_string()), Some(PathBuf::from("/home/exile"))),
            Some(PathBuf::from("/home/exile/.cache/gemcheck"))
        );
        assert_eq!(resolve_cache_dir(None, None), None);
    }

    #[test]
    fn test_cli_overrides() {
        let base = Config {
            cache_dir: Some(PathBuf::from("/tmp/gems")),
            ..Config::default()
        };

        let cli = Cli::try_parse_from(["gemcheck", "--top", "3", "pool"]).unwrap();
        let config = base.clone().with_cli(&cli);
        assert_eq!(config.top_n, 3);
        assert!(config.cache_dir.is_some());

        let cli = Cli::try_parse_from(["gemcheck", "leagues", "--no-disk-cache"]).unwrap();
        let config = base.with_cli(&cli);
        assert_eq!(config.top_n, DEFAULT_TOP_N);
        assert!(config.cache_dir.is_none());
    }

    #[test]
    fn test_clear_cache_keeps_disk_dir() {
        let base = Config {
            cache_dir: Some(PathBuf::from("/tmp/gems")),
            ..Config::default()
        };
        let cli = Cli::try_parse_from(["gemcheck", "clear-cache", "--no-disk-cache"]).unwrap();
        let config = base.with_cli(&cli);
        assert_eq!(config.cache_dir, Some(PathBuf::from("/tmp/gems")));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.http_timeout, Duration::from_secs(15));
        assert!(config.user_agent.starts_with("gemcheck/"));
    }
}
