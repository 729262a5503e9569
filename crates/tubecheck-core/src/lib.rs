//! `Tubecheck` Core Library
//!
//! This crate provides the core functionality for the `Tubecheck` application:
//! - Redirect resolution for share links and shortened `YouTube` URLs
//! - Flat playlist enumeration without downloading any media
//! - Concurrent accessibility probing with a bounded worker pool
//! - Per-run caching of probe verdicts
//! - Checker configuration from the environment
//!
//! # Error Handling
//!
//! Fallible collaborators return typed errors; the pipeline itself absorbs
//! them and always yields a report. See the [`error`] module for details.
//!
//! ```rust,ignore
//! use tubecheck_core::{Error, Result};
//!
//! fn do_something() -> Result<()> {
//!     // Your code here
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod extractor;
pub mod pipeline;
pub mod playlist;
pub mod probe;
pub mod resolver;

pub use cache::ProbeCache;
pub use config::{CheckerConfig, DEFAULT_YTDLP_BIN, ExtractionOptions};
pub use dispatch::{
    MAX_PROBE_WORKERS, MIN_PROBE_WORKERS, Partition, WORKERS_PER_CPU, dispatch_probes,
    worker_pool_size,
};
pub use error::{Error, Result};
pub use extractor::{FlatEntry, FlatInfo, MetadataExtractor, YtDlpExtractor};
pub use pipeline::{AccessChecker, CheckReport};
pub use playlist::{
    BRANDED_WATCH_HOST, CANONICAL_WATCH_HOST, WATCH_URL_PREFIX, enumerate_videos, is_youtube_url,
    rewrite_to_branded_host, watch_url_for,
};
pub use probe::{ProbeOutcome, probe_video};
pub use resolver::{
    HttpRedirectResolver, MAX_REDIRECT_HOPS, RESOLVER_USER_AGENT, RESOLVE_TIMEOUT_SECS,
    RedirectResolver,
};
