use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::models::{GemCatalog, GemPrice, League};

pub const LEAGUES_TTL: Duration = Duration::from_secs(60 * 60);
pub const CATALOG_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub const PRICES_TTL: Duration = Duration::from_secs(5 * 60);

/// The payload kinds the cache holds.
#[derive(Debug, Clone)]
pub enum CachedValue {
    Leagues(Vec<League>),
    Catalog(GemCatalog),
    Prices(Vec<GemPrice>),
}

/// A value type with its own `CachedValue` slot.
pub trait Cacheable: Serialize + DeserializeOwned + Clone {
    fn into_cached(self) -> CachedValue;
    fn from_cached(value: &CachedValue) -> Option<&Self>;
}

impl Cacheable for Vec<League> {
    fn into_cached(self) -> CachedValue {
        CachedValue::Leagues(self)
    }

    fn from_cached(value: &CachedValue) -> Option<&Self> {
        match value {
            CachedValue::Leagues(leagues) => Some(leagues),
            _ => None,
        }
    }
}

impl Cacheable for GemCatalog {
    fn into_cached(self) -> CachedValue {
        CachedValue::Catalog(self)
    }

    fn from_cached(value: &CachedValue) -> Option<&Self> {
        match value {
            CachedValue::Catalog(catalog) => Some(catalog),
            _ => None,
        }
    }
}

impl Cacheable for Vec<GemPrice> {
    fn into_cached(self) -> CachedValue {
        CachedValue::Prices(self)
    }

    fn from_cached(value: &CachedValue) -> Option<&Self> {
        match value {
            CachedValue::Prices(prices) => Some(prices),
            _ => None,
        }
    }
}

/// A cache key bound to the type stored under it and that type's lifetime.
#[derive(Debug, Clone)]
pub struct CacheKey<T> {
    name: String,
    ttl: Duration,
    _kind: PhantomData<fn() -> T>,
}

impl<T: Cacheable> CacheKey<T> {
    pub fn new(name: &str, ttl: Duration) -> Self {
        Self {
            name: name.to_string(),
            ttl,
            _kind: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// File name for the disk copy. Names that need sanitizing get a digest
    /// suffix so distinct keys never share a file.
    pub fn file_name(&self) -> String {
        let safe = file_safe(&self.name);
        if safe == self.name {
            return format!("{}.json", safe);
        }
        let digest = Sha256::digest(self.name.as_bytes());
        let suffix: String = digest[..4].iter().map(|b| format!("{:02x}", b)).collect();
        format!("{}-{}.json", safe, suffix)
    }
}

impl CacheKey<Vec<League>> {
    pub fn leagues() -> Self {
        Self::new("leagues", LEAGUES_TTL)
    }
}

impl CacheKey<GemCatalog> {
    pub fn catalog() -> Self {
        Self::new("wiki", CATALOG_TTL)
    }
}

impl CacheKey<Vec<GemPrice>> {
    pub fn prices(league: &str) -> Self {
        Self::new(&format!("prices-{}", league), PRICES_TTL)
    }
}

fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
struct Entry {
    value: CachedValue,
    stored_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// On-disk wrapper: the serialized payload plus its absolute expiry.
#[derive(Debug, Serialize, Deserialize)]
struct DiskEntry {
    data: serde_json::Value,
    expires_at: DateTime<Utc>,
}

/// In-memory TTL cache with optional JSON persistence under a directory.
pub struct Cache {
    items: RwLock<HashMap<String, Entry>>,
    disk_dir: Option<PathBuf>,
}

impl Cache {
    pub fn new(disk_dir: Option<PathBuf>) -> Result<Self> {
        if let Some(dir) = &disk_dir {
            std::fs::create_dir_all(dir)?;
        }
        Ok(Self {
            items: RwLock::new(HashMap::new()),
            disk_dir,
        })
    }

    pub fn in_memory() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            disk_dir: None,
        }
    }

    pub fn disk_dir(&self) -> Option<&Path> {
        self.disk_dir.as_deref()
    }

    /// Memory lookup. An entry at or past its expiry is a miss.
    pub fn get<T: Cacheable>(&self, key: &CacheKey<T>) -> Option<T> {
        let items = self.items.read();
        let entry = items.get(key.name())?;
        if Utc::now() >= entry.expires_at {
            debug!(key = key.name(), "memory cache entry expired");
            return None;
        }
        T::from_cached(&entry.value).cloned()
    }

    pub fn set<T: Cacheable>(&self, key: &CacheKey<T>, value: T) {
        let now = Utc::now();
        self.insert(key, value, now, expiry_after(now, key.ttl()));
    }

    fn insert<T: Cacheable>(
        &self,
        key: &CacheKey<T>,
        value: T,
        stored_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) {
        let entry = Entry {
            value: value.into_cached(),
            stored_at,
            expires_at,
        };
        self.items.write().insert(key.name().to_string(), entry);
    }

    pub fn clear<T: Cacheable>(&self, key: &CacheKey<T>) {
        self.items.write().remove(key.name());
    }

    pub fn clear_all(&self) {
        self.items.write().clear();
    }

    /// How long ago the live entry for `key` was stored.
    pub fn age<T: Cacheable>(&self, key: &CacheKey<T>) -> Option<Duration> {
        let items = self.items.read();
        let entry = items.get(key.name())?;
        let now = Utc::now();
        if now >= entry.expires_at {
            return None;
        }
        (now - entry.stored_at).to_std().ok()
    }

    /// Memory first, then disk. A disk hit is kept in memory for its remaining lifetime.
    pub fn fetch<T: Cacheable>(&self, key: &CacheKey<T>) -> Option<T> {
        if let Some(value) = self.get(key) {
            debug!(key = key.name(), "memory cache hit");
            return Some(value);
        }

        let (value, expires_at) = self.read_disk_entry(key)?;
        debug!(key = key.name(), %expires_at, "disk cache hit");
        let stored_at = chrono::Duration::from_std(key.ttl())
            .ok()
            .and_then(|ttl| expires_at.checked_sub_signed(ttl))
            .unwrap_or_else(Utc::now);
        self.insert(key, value.clone(), stored_at, expires_at);
        Some(value)
    }

    /// Sets the memory entry and persists it. A failed disk write only loses persistence.
    pub fn store<T: Cacheable>(&self, key: &CacheKey<T>, value: T) {
        if let Err(e) = self.save_to_disk(key, &value) {
            warn!(key = key.name(), error = %e, "failed to persist cache entry");
        }
        self.set(key, value);
    }

    pub fn save_to_disk<T: Cacheable>(&self, key: &CacheKey<T>, value: &T) -> Result<()> {
        let Some(path) = self.disk_path(key) else {
            return Ok(());
        };

        let entry = DiskEntry {
            data: serde_json::to_value(value)?,
            expires_at: expiry_after(Utc::now(), key.ttl()),
        };
        std::fs::write(&path, serde_json::to_vec(&entry)?)?;
        debug!(path = %path.display(), "saved cache entry to disk");
        Ok(())
    }

    /// Missing, unreadable or undecodable files are misses; expired files are
    /// misses and get removed.
    pub fn load_from_disk<T: Cacheable>(&self, key: &CacheKey<T>) -> Option<T> {
        self.read_disk_entry(key).map(|(value, _)| value)
    }

    fn read_disk_entry<T: Cacheable>(&self, key: &CacheKey<T>) -> Option<(T, DateTime<Utc>)> {
        let path = self.disk_path(key)?;
        let bytes = std::fs::read(&path).ok()?;

        let entry: DiskEntry = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "unreadable cache file");
                return None;
            }
        };

        if Utc::now() >= entry.expires_at {
            debug!(path = %path.display(), "disk cache entry expired");
            if let Err(e) = std::fs::remove_file(&path) {
                warn!(path = %path.display(), error = %e, "failed to remove stale cache file");
            }
            return None;
        }

        let value = serde_json::from_value(entry.data).ok()?;
        Some((value, entry.expires_at))
    }

    pub fn remove_from_disk<T: Cacheable>(&self, key: &CacheKey<T>) -> Result<()> {
        let Some(path) = self.disk_path(key) else {
            return Ok(());
        };
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes every cache file in the disk directory. Returns how many were removed.
    pub fn purge_disk(&self) -> Result<usize> {
        let Some(dir) = &self.disk_dir else {
            return Ok(0);
        };

        let mut removed = 0;
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                std::fs::remove_file(&path)?;
                removed += 1;
            }
        }
        debug!(dir = %dir.display(), removed, "purged disk cache");
        Ok(removed)
    }

    fn disk_path<T: Cacheable>(&self, key: &CacheKey<T>) -> Option<PathBuf> {
        self.disk_dir.as_ref().map(|dir| dir.join(key.file_name()))
    }
}

fn expiry_after(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
