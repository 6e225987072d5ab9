//! HTTP fetch with an optional caching layer
//!
//! The transport is a trait so the resolver can be exercised offline.
//! `HttpFetch` is the production implementation: a blocking `ureq` agent
//! with a minimal user agent (name, version, platform) and a fixed
//! timeout. No retries are performed; transport failures abort the run.

use std::time::Duration;

use crate::cache::Cache;
use crate::error::{GlossError, Result};

/// Timeout for API requests
const REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Blocking HTTP GET returning the response body.
pub trait Fetch {
    fn get(&self, url: &str) -> Result<String>;
}

/// `ureq`-backed transport.
pub struct HttpFetch {
    agent: ureq::Agent,
    user_agent: String,
}

impl HttpFetch {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build();
        let user_agent = format!(
            "gloss/{} ({})",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS
        );

        Self { agent, user_agent }
    }
}

impl Default for HttpFetch {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetch for HttpFetch {
    fn get(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "http_get");
        let response = self
            .agent
            .get(url)
            .set("User-Agent", &self.user_agent)
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => GlossError::Http(format!("HTTP {}", code)),
                ureq::Error::Transport(t) => {
                    GlossError::Http(format!("transport error: {}", t))
                }
            })?;

        response
            .into_string()
            .map_err(|e| GlossError::Http(format!("failed to read body: {}", e)))
    }
}

/// Cache-through fetch: a live cached value short-circuits the network
/// call; a fresh body is stored under `cache_key` with the configured TTL.
pub struct CachingFetch<'a> {
    transport: &'a dyn Fetch,
    cache: &'a dyn Cache,
    enabled: bool,
    ttl_seconds: u64,
}

impl<'a> CachingFetch<'a> {
    pub fn new(
        transport: &'a dyn Fetch,
        cache: &'a dyn Cache,
        enabled: bool,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            transport,
            cache,
            enabled,
            ttl_seconds,
        }
    }

    pub fn fetch(&self, url: &str, cache_key: &str) -> Result<String> {
        if self.enabled {
            if let Some(cached) = self.cache.get(cache_key) {
                return Ok(cached);
            }
        }

        let body = self.transport.get(url)?;

        if self.enabled {
            self.cache.put(cache_key, &body, self.ttl_seconds);
        }

        Ok(body)
    }
}
