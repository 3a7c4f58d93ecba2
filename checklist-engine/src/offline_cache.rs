//! Offline Asset Cache
//!
//! The contract the service worker follows: a versioned manifest installed
//! all-or-nothing, cache-first lookup with network fallthrough, and
//! eviction of every cache from an older version on activation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{DomainError, DomainResult};

/// Bump whenever an asset changes
pub const CACHE_VERSION: &str = "rov-checklist-cache-v10";

pub const PRECACHE_ASSETS: &[&str] = &[
    ".",
    "index.html",
    "home.html",
    "styles.css",
    "manifest.json",
    "sw.js",
    "abort-mission.html",
    "cs-battery-failure.html",
    "during-flight.html",
    "pop-out.html",
    "post-flight.html",
    "pre-flight.html",
    "veh-arming.html",
    "veh-connect-issues.html",
    "veh-function.html",
    "video-fail.html",
    "icon-128.png",
    "icon-192.png",
    "icon-512.png",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheManifest {
    pub name: String,
    pub assets: Vec<String>,
}

impl CacheManifest {
    pub fn new(name: &str, assets: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            assets: assets.iter().map(|a| normalize(a)).collect(),
        }
    }

    /// The manifest this build ships with
    pub fn current() -> Self {
        Self::new(CACHE_VERSION, PRECACHE_ASSETS)
    }

    pub fn contains(&self, request: &str) -> bool {
        let path = normalize(request);
        self.assets.iter().any(|asset| *asset == path)
    }
}

/// Scope-relative request path; the scope root is `.`
pub fn normalize(request: &str) -> String {
    let path = request.trim_start_matches("./").trim_start_matches('/');
    if path.is_empty() {
        ".".to_string()
    } else {
        path.to_string()
    }
}

/// Named caches of request → body
pub trait AssetCache {
    fn cache_names(&self) -> Vec<String>;
    fn lookup(&self, cache: &str, path: &str) -> Option<Vec<u8>>;
    fn store(&mut self, cache: &str, path: &str, body: Vec<u8>);
    /// Returns true when the cache existed
    fn delete(&mut self, cache: &str) -> bool;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    caches: BTreeMap<String, BTreeMap<String, Vec<u8>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AssetCache for MemoryCache {
    fn cache_names(&self) -> Vec<String> {
        self.caches.keys().cloned().collect()
    }

    fn lookup(&self, cache: &str, path: &str) -> Option<Vec<u8>> {
        self.caches.get(cache)?.get(path).cloned()
    }

    fn store(&mut self, cache: &str, path: &str, body: Vec<u8>) {
        self.caches
            .entry(cache.to_string())
            .or_default()
            .insert(path.to_string(), body);
    }

    fn delete(&mut self, cache: &str) -> bool {
        self.caches.remove(cache).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchDecision {
    /// Serve this body without touching the network
    Cached(Vec<u8>),
    /// Not cached anywhere; go to the network
    Network,
}

/// Fetch every manifest asset and store them under the manifest's name.
///
/// Nothing is stored unless every fetch succeeds.
pub fn install<C, F>(cache: &mut C, manifest: &CacheManifest, mut fetch: F) -> DomainResult<usize>
where
    C: AssetCache,
    F: FnMut(&str) -> DomainResult<Vec<u8>>,
{
    let mut fetched = Vec::with_capacity(manifest.assets.len());
    for asset in &manifest.assets {
        let body = fetch(asset)
            .map_err(|e| DomainError::Internal(format!("precache '{}' failed: {}", asset, e)))?;
        fetched.push((asset.as_str(), body));
    }
    let count = fetched.len();
    for (asset, body) in fetched {
        cache.store(&manifest.name, asset, body);
    }
    info!(cache = %manifest.name, count, "opened cache");
    Ok(count)
}

/// Cache-first lookup across every cache, the current one first
pub fn resolve<C: AssetCache>(cache: &C, manifest: &CacheManifest, request: &str) -> FetchDecision {
    let path = normalize(request);
    let mut names = cache.cache_names();
    names.sort_by_key(|name| *name != manifest.name);
    for name in names {
        if let Some(body) = cache.lookup(&name, &path) {
            return FetchDecision::Cached(body);
        }
    }
    debug!(request = %path, "cache miss");
    FetchDecision::Network
}

/// Every cache name that is not the manifest's
pub fn stale_caches(names: &[String], manifest: &CacheManifest) -> Vec<String> {
    names
        .iter()
        .filter(|name| **name != manifest.name)
        .cloned()
        .collect()
}

/// Evict stale caches, returning the names removed
pub fn activate<C: AssetCache>(cache: &mut C, manifest: &CacheManifest) -> Vec<String> {
    let stale = stale_caches(&cache.cache_names(), manifest);
    let mut evicted = Vec::new();
    for name in stale {
        if cache.delete(&name) {
            info!(cache = %name, "evicted stale cache");
            evicted.push(name);
        }
    }
    evicted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(path: &str) -> DomainResult<Vec<u8>> {
        Ok(path.as_bytes().to_vec())
    }

    #[test]
    fn test_current_manifest() {
        let manifest = CacheManifest::current();
        assert_eq!(manifest.name, "rov-checklist-cache-v10");
        assert_eq!(manifest.assets.len(), 19);
        assert!(manifest.contains("/pre-flight.html"));
        assert!(manifest.contains("./"));
        assert!(!manifest.contains("missing.html"));
    }

    #[test]
    fn test_install_then_resolve() {
        let manifest = CacheManifest::current();
        let mut cache = MemoryCache::new();
        assert_eq!(install(&mut cache, &manifest, body).unwrap(), 19);

        assert_eq!(
            resolve(&cache, &manifest, "/styles.css"),
            FetchDecision::Cached(b"styles.css".to_vec())
        );
        assert_eq!(resolve(&cache, &manifest, "video.mp4"), FetchDecision::Network);
    }

    #[test]
    fn test_install_is_all_or_nothing() {
        let manifest = CacheManifest::current();
        let mut cache = MemoryCache::new();
        let result = install(&mut cache, &manifest, |path| {
            if path == "icon-512.png" {
                Err(DomainError::NotFound(path.to_string()))
            } else {
                body(path)
            }
        });
        assert!(result.is_err());
        assert!(cache.cache_names().is_empty());
    }

    #[test]
    fn test_activate_evicts_old_versions() {
        let old = CacheManifest::new("rov-checklist-cache-v1", &["index.html"]);
        let current = CacheManifest::current();
        let mut cache = MemoryCache::new();
        install(&mut cache, &old, body).unwrap();
        install(&mut cache, &current, body).unwrap();

        let names = cache.cache_names();
        assert_eq!(stale_caches(&names, &current), vec!["rov-checklist-cache-v1".to_string()]);

        let evicted = activate(&mut cache, &current);
        assert_eq!(evicted, vec!["rov-checklist-cache-v1".to_string()]);
        assert_eq!(cache.cache_names(), vec![CACHE_VERSION.to_string()]);
        assert!(activate(&mut cache, &current).is_empty());
    }

    #[test]
    fn test_old_cache_still_serves_until_activation() {
        let old = CacheManifest::new("rov-checklist-cache-v1", &["legacy.html"]);
        let mut cache = MemoryCache::new();
        install(&mut cache, &old, body).unwrap();
        let current = CacheManifest::current();
        assert!(matches!(resolve(&cache, &current, "legacy.html"), FetchDecision::Cached(_)));
        activate(&mut cache, &current);
        assert_eq!(resolve(&cache, &current, "legacy.html"), FetchDecision::Network);
    }
}
