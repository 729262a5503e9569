//! Concurrent fan-out of accessibility probes.
//!
//! Keeps up to the configured number of probes in flight at once; when one
//! finishes, the next enumerated URL is started until none remain. Results
//! are collected in completion order, so the output lists carry no input
//! ordering.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::error;

use crate::cache::ProbeCache;
use crate::config::CheckerConfig;
use crate::extractor::MetadataExtractor;
use crate::playlist::rewrite_to_branded_host;
use crate::probe::{ProbeOutcome, probe_video};

/// Hard cap on the probe worker pool.
pub const MAX_PROBE_WORKERS: usize = 61;

/// Probe workers per logical CPU. Probing is network-latency bound, so the
/// pool oversubscribes the CPUs by a wide margin.
pub const WORKERS_PER_CPU: usize = 8;

/// Minimum probe worker count, used when the CPU count is unknown or a
/// tunable bottoms out.
pub const MIN_PROBE_WORKERS: usize = 1;

/// Resolve the probe worker-pool size for a configuration.
///
/// An explicit worker hint wins, clamped to `[MIN_PROBE_WORKERS, cap]`;
/// otherwise the pool is `min(cap, cpus × workers_per_cpu)`, floor
/// [`MIN_PROBE_WORKERS`].
#[must_use]
pub fn worker_pool_size(config: &CheckerConfig) -> usize {
    worker_pool_size_for(num_cpus::get(), config)
}

fn worker_pool_size_for(cpu_count: usize, config: &CheckerConfig) -> usize {
    let cap = config.worker_cap.max(MIN_PROBE_WORKERS);
    if let Some(hint) = config.worker_hint {
        return hint.clamp(MIN_PROBE_WORKERS, cap);
    }
    (cpu_count * config.workers_per_cpu).clamp(MIN_PROBE_WORKERS, cap)
}

/// Partitioned probe results for one run.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// URLs confirmed accessible, completion order, branded host.
    pub accessible: Vec<String>,
    /// URLs confirmed inaccessible, completion order, branded host.
    pub inaccessible: Vec<String>,
    /// Probes dropped without a verdict.
    pub execution_failures: usize,
}

impl Partition {
    /// Number of URLs that received a verdict.
    #[must_use]
    pub fn total_verdicts(&self) -> usize {
        self.accessible.len() + self.inaccessible.len()
    }

    /// Record one completed probe, rewriting the host for output.
    fn push(&mut self, url: &str, outcome: ProbeOutcome) {
        match outcome {
            ProbeOutcome::Accessible => self.accessible.push(rewrite_to_branded_host(url)),
            ProbeOutcome::Inaccessible => self.inaccessible.push(rewrite_to_branded_host(url)),
            ProbeOutcome::ExecutionError => self.execution_failures += 1,
        }
    }
}

/// Probe every URL with bounded parallelism, partitioning the results.
///
/// All submitted URLs are eventually awaited; the pool only throttles how
/// many probes run at once. A probe that fails to run (or a task that fails
/// to join) is logged and counted, never retried.
pub async fn dispatch_probes<M>(
    extractor: &Arc<M>,
    cache: &ProbeCache,
    urls: Vec<String>,
    workers: usize,
) -> Partition
where
    M: MetadataExtractor + 'static,
{
    let workers = workers.max(MIN_PROBE_WORKERS);
    let mut partition = Partition::default();
    let mut pending = urls.into_iter();
    let mut join_set = JoinSet::new();

    loop {
        while join_set.len() < workers {
            let Some(url) = pending.next() else {
                break;
            };
            let extractor = Arc::clone(extractor);
            let cache = cache.clone();
            join_set.spawn(async move {
                let outcome = probe_video(extractor.as_ref(), &cache, &url).await;
                (url, outcome)
            });
        }

        if join_set.is_empty() {
            break;
        }

        let Some(joined) = join_set.join_next().await else {
            break;
        };
        match joined {
            Ok((url, outcome)) => partition.push(&url, outcome),
            Err(e) => {
                error!("Error checking video: {e}");
                partition.execution_failures += 1;
            }
        }
    }

    partition
}
