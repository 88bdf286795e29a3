mod cache;

pub use cache::{Cache, CacheKey, Cacheable, CachedValue};
