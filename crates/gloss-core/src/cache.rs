//! Response cache with natural expiry
//!
//! API responses are cached under the search term or page id with a TTL
//! (one month by default). The store is a narrow trait so tests can swap
//! in an in-memory fake; the production implementation writes one JSON
//! envelope per key into a cache directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Key-value cache with per-entry time-to-live.
pub trait Cache {
    /// Get a live cached value, or `None` when missing or expired.
    fn get(&self, key: &str) -> Option<String>;

    /// Store a value under `key` for `ttl_seconds`. Storage failures are
    /// logged and swallowed; the cache is advisory.
    fn put(&self, key: &str, value: &str, ttl_seconds: u64);
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    stored_at: i64,
    ttl_seconds: u64,
    body: String,
}

impl CacheEntry {
    fn is_live(&self, now: i64) -> bool {
        now < self.stored_at.saturating_add(self.ttl_seconds as i64)
    }
}

/// File-backed cache: one JSON envelope per key under a cache directory.
#[derive(Debug)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Open a cache rooted at `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> std::io::Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        // Keys are normalized terms or page ids; anything outside
        // [A-Za-z0-9_-] is mapped to '-' to keep filenames portable.
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }
}

impl Cache for FileCache {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.entry_path(key);
        let content = fs::read_to_string(&path).ok()?;
        let entry: CacheEntry = serde_json::from_str(&content).ok()?;
        if entry.is_live(Utc::now().timestamp()) {
            tracing::debug!(key, "cache_hit");
            Some(entry.body)
        } else {
            tracing::debug!(key, "cache_expired");
            let _ = fs::remove_file(&path);
            None
        }
    }

    fn put(&self, key: &str, value: &str, ttl_seconds: u64) {
        let entry = CacheEntry {
            stored_at: Utc::now().timestamp(),
            ttl_seconds,
            body: value.to_string(),
        };
        let path = self.entry_path(key);
        match serde_json::to_string(&entry) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    tracing::warn!(key, error = %e, "cache_write_failed");
                }
            }
            Err(e) => tracing::warn!(key, error = %e, "cache_encode_failed"),
        }
    }
}

/// In-memory cache for tests and `--no-cache`-adjacent plumbing.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, live or not.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().expect("cache lock poisoned");
        entries
            .get(key)
            .filter(|e| e.is_live(Utc::now().timestamp()))
            .map(|e| e.body.clone())
    }

    fn put(&self, key: &str, value: &str, ttl_seconds: u64) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(
            key.to_string(),
            CacheEntry {
                stored_at: Utc::now().timestamp(),
                ttl_seconds,
                body: value.to_string(),
            },
        );
    }
}
