//! Configuration for gloss
//!
//! Loaded from an optional `gloss.toml` next to the document (or given via
//! `--config`); every field has a default so the tool works with no config
//! file at all.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::duration::to_seconds;
use crate::error::{GlossError, Result};
use crate::mutate::WARNING_COUNT;
use crate::resolver::DEFAULT_API_ENDPOINT;

/// Default cache entry lifetime, parsed by the duration parser.
pub const DEFAULT_CACHE_TTL: &str = "1 month";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlossConfig {
    /// MediaWiki API entry point
    pub api_endpoint: String,
    /// Cache entry lifetime as a human duration ("1 month", "2 days")
    pub cache_ttl: String,
    /// Word-count threshold below which definitions are italicized
    pub warning_count: usize,
    /// Cache directory override; defaults to the platform cache dir
    pub cache_dir: Option<PathBuf>,
}

impl Default for GlossConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL.to_string(),
            warning_count: WARNING_COUNT,
            cache_dir: None,
        }
    }
}

impl GlossConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: GlossConfig = toml::from_str(&content)?;

        if config.api_endpoint.is_empty() {
            return Err(GlossError::InvalidConfig(
                "api_endpoint must not be empty".to_string(),
            ));
        }

        Ok(config)
    }

    /// Load `gloss.toml` from `root` when present, defaults otherwise
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let path = root.join("gloss.toml");
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Cache TTL in seconds
    pub fn ttl_seconds(&self) -> u64 {
        to_seconds(&self.cache_ttl)
    }

    /// Effective cache directory
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("gloss")
        })
    }
}
