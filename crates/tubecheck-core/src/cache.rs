//! Per-run accessibility cache shared across probe workers.
//!
//! The cache maps exact URL strings to accessibility verdicts. It is created
//! per pipeline run, cloned into every probe task, and discarded when the run
//! finishes. Keys are write-once: the first verdict recorded for a URL is
//! authoritative for the whole run.
//!
//! Two tasks probing the same URL at the same moment may both reach the
//! extractor (each saw a miss); the first verdict recorded then wins, so the
//! run still reports one consistent answer per URL.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

/// Shared, write-once map of accessibility verdicts keyed by URL.
#[derive(Debug, Clone, Default)]
pub struct ProbeCache {
    verdicts: Arc<RwLock<HashMap<String, bool>>>,
}

impl ProbeCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the cached verdict for a URL.
    pub async fn get(&self, url: &str) -> Option<bool> {
        self.verdicts.read().await.get(url).copied()
    }

    /// Record a verdict for a URL. The first verdict for a key wins;
    /// later records for the same key are ignored.
    pub async fn record(&self, url: &str, accessible: bool) {
        let mut verdicts = self.verdicts.write().await;
        verdicts.entry(url.to_string()).or_insert(accessible);
    }

    /// Number of URLs with a recorded verdict.
    pub async fn len(&self) -> usize {
        self.verdicts.read().await.len()
    }

    /// Whether no verdict has been recorded yet.
    pub async fn is_empty(&self) -> bool {
        self.verdicts.read().await.is_empty()
    }
}
