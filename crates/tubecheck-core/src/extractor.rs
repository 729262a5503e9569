//! Metadata extraction backed by the `yt-dlp` command-line tool.
//!
//! Both playlist enumeration and per-video probing go through the
//! [`MetadataExtractor`] seam. The production implementation shells out to
//! `yt-dlp` in dump-JSON mode: nothing is downloaded, flat playlist mode
//! skips per-member metadata fetches, and the configured certificate and
//! cookie options are forwarded as command-line flags.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::config::ExtractionOptions;
use crate::error::{Error, Result};

/// One playlist entry as reported by flat extraction.
#[derive(Debug, Clone, Deserialize)]
pub struct FlatEntry {
    /// Video identifier; absent or null for delisted entries.
    #[serde(default)]
    pub id: Option<String>,
    /// Entry title, when the extractor reports one.
    #[serde(default)]
    pub title: Option<String>,
}

/// Flat extraction result for a resolved URL.
///
/// A collection carries `entries` (possibly containing nulls); a single item
/// carries only its own `id`. Unknown extractor fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlatInfo {
    /// Identifier of the extracted entity itself.
    #[serde(default)]
    pub id: Option<String>,
    /// Collection entries; `None` when the entity is a single item.
    #[serde(default)]
    pub entries: Option<Vec<Option<FlatEntry>>>,
}

impl FlatInfo {
    /// Whether the extracted entity is a collection.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        self.entries.is_some()
    }

    /// Non-empty identifiers of the collection entries, in playlist order.
    /// Null entries and entries without an identifier are skipped.
    #[must_use]
    pub fn entry_ids(&self) -> Vec<&str> {
        self.entries
            .as_deref()
            .unwrap_or_default()
            .iter()
            .flatten()
            .filter_map(|entry| entry.id.as_deref())
            .filter(|id| !id.is_empty())
            .collect()
    }
}

/// Extraction collaborator used by the enumerator and the probe.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    /// Extract flat info for a resolved URL without fetching per-member
    /// metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the extractor cannot run, exits with a failure,
    /// or produces undecodable output.
    async fn flat_entries(&self, url: &str) -> Result<FlatInfo>;

    /// Extract metadata for a single video without downloading it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VideoInaccessible`] if the extractor ran and failed,
    /// or [`Error::Io`] if it could not be launched at all.
    async fn probe(&self, url: &str) -> Result<()>;
}

/// `MetadataExtractor` implementation driving the `yt-dlp` binary.
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    options: ExtractionOptions,
}

impl YtDlpExtractor {
    /// Create an extractor with the given options.
    #[must_use]
    pub const fn new(options: ExtractionOptions) -> Self {
        Self { options }
    }

    /// Flags shared by every invocation: dump JSON, never download, stay
    /// quiet, and forward the configured certificate and cookie options.
    fn base_args(&self) -> Vec<String> {
        let mut args = vec![
            "--dump-single-json".to_string(),
            "--flat-playlist".to_string(),
            "--skip-download".to_string(),
            "--no-warnings".to_string(),
            "--quiet".to_string(),
        ];
        if self.options.no_check_certificate {
            args.push("--no-check-certificates".to_string());
        }
        if let Some(cookie_file) = &self.options.cookie_file {
            args.push("--cookies".to_string());
            args.push(cookie_file.display().to_string());
        }
        if let Some(browser) = &self.options.cookies_from_browser {
            args.push("--cookies-from-browser".to_string());
            args.push(browser.clone());
        }
        args
    }

    fn flat_args(&self, url: &str) -> Vec<String> {
        let mut args = self.base_args();
        args.push("--yes-playlist".to_string());
        args.push(url.to_string());
        args
    }

    fn probe_args(&self, url: &str) -> Vec<String> {
        let mut args = self.base_args();
        args.push(url.to_string());
        args
    }

    async fn run(&self, args: Vec<String>) -> Result<std::process::Output> {
        let output = Command::new(&self.options.ytdlp_path)
            .args(args)
            .output()
            .await?;
        Ok(output)
    }
}

#[async_trait]
impl MetadataExtractor for YtDlpExtractor {
    async fn flat_entries(&self, url: &str) -> Result<FlatInfo> {
        let output = self.run(self.flat_args(url)).await?;
        if !output.status.success() {
            return Err(Error::Enumeration {
                url: url.to_string(),
                message: stderr_excerpt(&output.stderr),
            });
        }
        let info: FlatInfo = serde_json::from_slice(&output.stdout)?;
        debug!(
            url,
            collection = info.is_collection(),
            entries = info.entry_ids().len(),
            "flat extraction finished"
        );
        Ok(info)
    }

    async fn probe(&self, url: &str) -> Result<()> {
        let output = self.run(self.probe_args(url)).await?;
        if output.status.success() {
            debug!(url, "metadata extracted");
            Ok(())
        } else {
            Err(Error::VideoInaccessible {
                url: url.to_string(),
                message: stderr_excerpt(&output.stderr),
            })
        }
    }
}

/// First non-empty stderr line, for compact error messages.
fn stderr_excerpt(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("extractor produced no error output")
        .to_string()
}
