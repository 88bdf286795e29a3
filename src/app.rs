use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::analyzer::process_gems;
use crate::config::Config;
use crate::errors::{GemcheckError, Result};
use crate::fetcher::{HttpClient, NinjaApi, WikiScraper};
use crate::models::{GemCatalog, GemPrice, League, ProcessedResult};
use crate::storage::{Cache, CacheKey, Cacheable};

/// One computed view of a league's gem market.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub league: League,
    pub result: ProcessedResult,
    pub price_age: Option<Duration>,
}

/// Fetches leagues, catalog and prices through the cache and runs the EV engine.
pub struct GemCheck {
    cache: Arc<Cache>,
    ninja: NinjaApi,
    wiki: WikiScraper,
    top_n: usize,
}

impl GemCheck {
    pub fn new(config: &Config) -> Result<Self> {
        let cache = match Cache::new(config.cache_dir.clone()) {
            Ok(cache) => {
                if let Some(dir) = cache.disk_dir() {
                    debug!(dir = %dir.display(), "using disk cache");
                }
                cache
            }
            Err(e) => {
                warn!(error = %e, "disk cache unavailable, caching in memory only");
                Cache::in_memory()
            }
        };
        Self::with_cache(config, Arc::new(cache))
    }

    pub fn with_cache(config: &Config, cache: Arc<Cache>) -> Result<Self> {
        let http = HttpClient::new(&config.user_agent, config.http_timeout)?;
        Ok(Self {
            cache,
            ninja: NinjaApi::new(http.clone()),
            wiki: WikiScraper::new(http),
            top_n: config.top_n,
        })
    }

    async fn cached<T, F, Fut>(&self, key: CacheKey<T>, fetch: F) -> Result<T>
    where
        T: Cacheable,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(value) = self.cache.fetch(&key) {
            return Ok(value);
        }
        let value = fetch().await?;
        self.cache.store(&key, value.clone());
        Ok(value)
    }

    pub async fn leagues(&self) -> Result<Vec<League>> {
        self.cached(CacheKey::leagues(), || self.ninja.fetch_leagues())
            .await
    }

    pub async fn catalog(&self) -> Result<GemCatalog> {
        self.cached(CacheKey::catalog(), || self.wiki.fetch_catalog())
            .await
    }

    pub async fn prices(&self, league: &str) -> Result<Vec<GemPrice>> {
        self.cached(CacheKey::prices(league), || self.ninja.fetch_gem_prices(league))
            .await
    }

    /// Drops cached prices for a league so the next load fetches them live.
    pub fn invalidate_prices(&self, league: &str) -> Result<()> {
        let key = CacheKey::prices(league);
        self.cache.clear(&key);
        self.cache.remove_from_disk(&key)
    }

    /// Forgets everything cached, in memory and on disk.
    pub fn clear_cache(&self) -> Result<usize> {
        self.cache.clear_all();
        self.cache.purge_disk()
    }

    pub async fn resolve_league(&self, requested: Option<&str>) -> Result<League> {
        let leagues = self.leagues().await?;
        pick_league(&leagues, requested)
    }

    /// Fetches catalog and prices concurrently, then computes the result.
    pub async fn load(&self, league: &League, refresh: bool) -> Result<Snapshot> {
        if refresh {
            self.invalidate_prices(&league.id)?;
        }

        let (catalog, prices) = tokio::try_join!(self.catalog(), self.prices(&league.id))?;
        let result = process_gems(&catalog, &prices, self.top_n);
        info!(
            league = %league.id,
            base_gems = result.gem_picks.len(),
            price_lines = result.total_lines,
            "computed gem EV"
        );

        Ok(Snapshot {
            league: league.clone(),
            result,
            price_age: self.cache.age(&CacheKey::prices(&league.id)),
        })
    }
}

/// Matches a requested league case-insensitively, or takes the first listed one.
pub fn pick_league(leagues: &[League], requested: Option<&str>) -> Result<League> {
    match requested {
        Some(wanted) => leagues
            .iter()
            .find(|l| l.id.eq_ignore_ascii_case(wanted.trim()))
            .cloned()
            .ok_or_else(|| {
                let known: Vec<&str> = leagues.iter().map(|l| l.id.as_str()).collect();
                GemcheckError::ValidationError(format!(
                    "unknown league '{}' (active: {})",
                    wanted,
                    known.join(", ")
                ))
            }),
        None => leagues
            .first()
            .cloned()
            .ok_or_else(|| GemcheckError::ValidationError("no active leagues".to_string())),
    }
}
