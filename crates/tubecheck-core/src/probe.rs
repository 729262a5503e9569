//! Single-video accessibility probing.
//!
//! A probe asks the extractor for metadata without downloading. The outcome
//! distinguishes a confirmed verdict from a probe that never ran, so callers
//! can tell "video confirmed blocked" apart from "probe itself broke".

use tracing::{debug, error};

use crate::cache::ProbeCache;
use crate::error::Error;
use crate::extractor::MetadataExtractor;

/// Outcome of probing one video URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Metadata was extracted; the video is accessible.
    Accessible,
    /// The extractor ran and reported the video cannot be accessed.
    Inaccessible,
    /// The probe could not run; no verdict was reached.
    ExecutionError,
}

impl ProbeOutcome {
    /// Whether this outcome is a definite verdict.
    #[must_use]
    pub const fn is_verdict(self) -> bool {
        !matches!(self, Self::ExecutionError)
    }

    /// Whether the video was confirmed accessible.
    #[must_use]
    pub const fn is_accessible(self) -> bool {
        matches!(self, Self::Accessible)
    }

    const fn from_cached(accessible: bool) -> Self {
        if accessible {
            Self::Accessible
        } else {
            Self::Inaccessible
        }
    }
}

/// Probe one URL, consulting the shared cache first.
///
/// A cache hit skips extraction entirely. Extraction failures are verdicts
/// and are cached like successes; a failure to launch the extractor is an
/// [`ProbeOutcome::ExecutionError`] and leaves the cache untouched, so a
/// later duplicate may still obtain a verdict.
pub async fn probe_video<M: MetadataExtractor>(
    extractor: &M,
    cache: &ProbeCache,
    url: &str,
) -> ProbeOutcome {
    if let Some(cached) = cache.get(url).await {
        debug!(url, cached, "cache hit");
        return ProbeOutcome::from_cached(cached);
    }

    match extractor.probe(url).await {
        Ok(()) => {
            cache.record(url, true).await;
            ProbeOutcome::Accessible
        }
        Err(Error::Io(e)) => {
            error!("Error checking video {url}: {e}");
            ProbeOutcome::ExecutionError
        }
        Err(e) => {
            debug!(url, error = %e, "video not accessible");
            cache.record(url, false).await;
            ProbeOutcome::Inaccessible
        }
    }
}
