//! End-to-end accessibility check pipeline.
//!
//! Wires the redirect resolver, the playlist enumerator and the concurrent
//! probe dispatcher into one operation: give it a URL, get back which of the
//! videos behind it are accessible. Every stage degrades to an empty result
//! on failure, so a check run never returns an error.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cache::ProbeCache;
use crate::config::CheckerConfig;
use crate::dispatch::{Partition, dispatch_probes, worker_pool_size};
use crate::extractor::MetadataExtractor;
use crate::playlist::enumerate_videos;
use crate::resolver::RedirectResolver;

/// Outcome of one accessibility check run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckReport {
    /// Videos confirmed accessible, completion order, branded host.
    pub accessible: Vec<String>,

    /// Videos confirmed inaccessible, completion order, branded host.
    pub inaccessible: Vec<String>,

    /// Probes that failed to execute and were dropped without a verdict.
    pub execution_failures: usize,

    /// Wall-clock duration of the whole run.
    pub elapsed_secs: f64,
}

impl CheckReport {
    fn from_partition(partition: Partition, elapsed_secs: f64) -> Self {
        Self {
            accessible: partition.accessible,
            inaccessible: partition.inaccessible,
            execution_failures: partition.execution_failures,
            elapsed_secs,
        }
    }

    /// Number of videos that received a verdict.
    #[must_use]
    pub fn total(&self) -> usize {
        self.accessible.len() + self.inaccessible.len()
    }

    /// One-line summary for logs and headers.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} accessible, {} inaccessible, {} dropped in {:.2}s",
            self.accessible.len(),
            self.inaccessible.len(),
            self.execution_failures,
            self.elapsed_secs
        )
    }
}

/// Checks the accessibility of every video behind a URL.
///
/// The URL may point at a playlist or a single video; redirects (share
/// links, shortened URLs) are resolved first. Probes run concurrently on a
/// bounded worker pool sized by [`CheckerConfig`].
///
/// # Example
///
/// ```rust,ignore
/// use tubecheck_core::config::CheckerConfig;
/// use tubecheck_core::extractor::YtDlpExtractor;
/// use tubecheck_core::pipeline::AccessChecker;
/// use tubecheck_core::resolver::HttpRedirectResolver;
///
/// let config = CheckerConfig::from_env();
/// let resolver = HttpRedirectResolver::new(config.no_check_certificate)?;
/// let extractor = YtDlpExtractor::new(config.extraction_options());
/// let checker = AccessChecker::new(resolver, extractor, config);
///
/// let report = checker.check_videos("https://music.youtube.com/playlist?list=...").await;
/// println!("{}", report.summary());
/// ```
#[derive(Debug)]
pub struct AccessChecker<R, M> {
    resolver: R,
    extractor: Arc<M>,
    config: CheckerConfig,
}

impl<R, M> AccessChecker<R, M>
where
    R: RedirectResolver,
    M: MetadataExtractor + 'static,
{
    /// Build a checker from its collaborators.
    pub fn new(resolver: R, extractor: M, config: CheckerConfig) -> Self {
        Self {
            resolver,
            extractor: Arc::new(extractor),
            config,
        }
    }

    /// Check every video reachable from `url`.
    ///
    /// Stages run in order: resolve redirects, enumerate videos, probe each
    /// one concurrently. A resolution failure or an empty enumeration
    /// short-circuits to an empty report.
    pub async fn check_videos(&self, url: &str) -> CheckReport {
        let start_time = Instant::now();
        let partition = self.run(url).await;
        let elapsed_secs = start_time.elapsed().as_secs_f64();
        info!("Total Time Taken: {elapsed_secs:.2} seconds");
        CheckReport::from_partition(partition, elapsed_secs)
    }

    async fn run(&self, url: &str) -> Partition {
        let Some(resolved_url) = self.resolver.resolve(url).await else {
            return Partition::default();
        };
        info!("Resolved URL: {resolved_url}");

        let video_urls = enumerate_videos(self.extractor.as_ref(), &resolved_url).await;
        if video_urls.is_empty() {
            info!("No videos found for URL: {resolved_url}");
            return Partition::default();
        }

        let workers = worker_pool_size(&self.config);
        info!("Using {workers} workers for checking video accessibility.");

        let cache = ProbeCache::new();
        dispatch_probes(&self.extractor, &cache, video_urls, workers).await
    }
}
