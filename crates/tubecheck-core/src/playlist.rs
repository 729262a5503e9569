//! Playlist enumeration and watch-URL handling.
//!
//! Enumeration works on the canonical watch host; the branded host only
//! appears in output URLs, rewritten at partition time by the dispatcher.

use tracing::error;

use crate::extractor::{FlatInfo, MetadataExtractor};

/// Canonical watch-host fragment used during enumeration and probing.
pub const CANONICAL_WATCH_HOST: &str = "www.youtube";

/// Output-branded host fragment substituted into result URLs.
pub const BRANDED_WATCH_HOST: &str = "music.youtube";

/// Prefix for watch URLs constructed from entry identifiers.
pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Build the canonical watch URL for a video identifier.
#[must_use]
pub fn watch_url_for(video_id: &str) -> String {
    format!("{WATCH_URL_PREFIX}{video_id}")
}

/// Rewrite the canonical watch-host to the output-branded host.
///
/// Only the first occurrence is substituted so the path and query survive
/// byte-for-byte. URLs already on the branded host pass through unchanged.
#[must_use]
pub fn rewrite_to_branded_host(url: &str) -> String {
    url.replacen(CANONICAL_WATCH_HOST, BRANDED_WATCH_HOST, 1)
}

/// Whether a URL looks like a YouTube video or playlist URL.
#[must_use]
pub fn is_youtube_url(url: &str) -> bool {
    let url_lower = url.trim().to_lowercase();
    (url_lower.starts_with("http://") || url_lower.starts_with("https://"))
        && (url_lower.contains("youtube.com") || url_lower.contains("youtu.be"))
}

/// Enumerate the video URLs reachable from a resolved URL.
///
/// A collection yields one constructed watch URL per entry with a non-empty
/// identifier; entries without one are silently skipped. A single item
/// yields the resolved URL itself. Extraction failures are logged and yield
/// an empty list.
pub async fn enumerate_videos<M: MetadataExtractor>(
    extractor: &M,
    resolved_url: &str,
) -> Vec<String> {
    match extractor.flat_entries(resolved_url).await {
        Ok(info) => member_urls(&info, resolved_url),
        Err(e) => {
            error!("Error fetching URLs for {resolved_url}: {e}");
            Vec::new()
        }
    }
}

/// Turn a flat extraction result into the member watch-URL list.
fn member_urls(info: &FlatInfo, resolved_url: &str) -> Vec<String> {
    if info.is_collection() {
        info.entry_ids().into_iter().map(watch_url_for).collect()
    } else if info.id.as_deref().is_some_and(|id| !id.is_empty()) {
        vec![resolved_url.to_string()]
    } else {
        Vec::new()
    }
}
