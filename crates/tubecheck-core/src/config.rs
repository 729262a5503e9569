//! Runtime configuration for accessibility checks.
//!
//! Configuration is read from the environment (a `.env` file loaded by the
//! caller is honored, since values are read through [`std::env`]). Every field
//! has a deployment-friendly default; empty-string values count as unset.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::dispatch::{MAX_PROBE_WORKERS, MIN_PROBE_WORKERS, WORKERS_PER_CPU};

/// Default extractor binary, resolved through `PATH`.
pub const DEFAULT_YTDLP_BIN: &str = "yt-dlp";

/// Configuration for the accessibility-check pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Skip TLS certificate verification during extraction.
    /// Read from `NO_CHECK_CERTIFICATE`.
    #[serde(default = "default_true")]
    pub no_check_certificate: bool,
    /// Cookie file handed to the extractor.
    /// Read from `YOUTUBE_COOKIE_FILE`.
    #[serde(default)]
    pub cookie_file: Option<PathBuf>,
    /// Browser to read cookies from (e.g. "firefox").
    /// Read from `YOUTUBE_COOKIES_FROM_BROWSER`.
    #[serde(default)]
    pub cookies_from_browser: Option<String>,
    /// Fixed probe worker count, overriding the CPU heuristic.
    /// Read from `YOUTUBE_THREAD_COUNT`.
    #[serde(default)]
    pub worker_hint: Option<usize>,
    /// Upper bound on the probe worker pool.
    /// Read from `YOUTUBE_MAX_PROBE_WORKERS`.
    #[serde(default = "default_worker_cap")]
    pub worker_cap: usize,
    /// Probe workers per logical CPU when no hint is given.
    /// Read from `YOUTUBE_WORKERS_PER_CPU`.
    #[serde(default = "default_workers_per_cpu")]
    pub workers_per_cpu: usize,
    /// Path to the extractor binary.
    /// Read from `YOUTUBE_YTDLP_PATH`.
    #[serde(default = "default_ytdlp_path")]
    pub ytdlp_path: PathBuf,
}

const fn default_true() -> bool {
    true
}

const fn default_worker_cap() -> usize {
    MAX_PROBE_WORKERS
}

const fn default_workers_per_cpu() -> usize {
    WORKERS_PER_CPU
}

fn default_ytdlp_path() -> PathBuf {
    PathBuf::from(DEFAULT_YTDLP_BIN)
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            no_check_certificate: true,
            cookie_file: None,
            cookies_from_browser: None,
            worker_hint: None,
            worker_cap: MAX_PROBE_WORKERS,
            workers_per_cpu: WORKERS_PER_CPU,
            ytdlp_path: default_ytdlp_path(),
        }
    }
}

impl CheckerConfig {
    /// Load configuration from the environment, applying defaults for
    /// anything unset. The result is already validated.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self {
            no_check_certificate: env_bool("NO_CHECK_CERTIFICATE", true),
            cookie_file: env_string("YOUTUBE_COOKIE_FILE").map(PathBuf::from),
            cookies_from_browser: env_string("YOUTUBE_COOKIES_FROM_BROWSER"),
            worker_hint: env_usize("YOUTUBE_THREAD_COUNT"),
            worker_cap: env_usize("YOUTUBE_MAX_PROBE_WORKERS").unwrap_or(MAX_PROBE_WORKERS),
            workers_per_cpu: env_usize("YOUTUBE_WORKERS_PER_CPU").unwrap_or(WORKERS_PER_CPU),
            ytdlp_path: env_string("YOUTUBE_YTDLP_PATH")
                .map_or_else(default_ytdlp_path, PathBuf::from),
        };
        config.validate();
        config
    }

    /// Validate and clamp the worker-pool tunables.
    pub fn validate(&mut self) {
        self.worker_cap = self.worker_cap.max(MIN_PROBE_WORKERS);
        self.workers_per_cpu = self.workers_per_cpu.max(1);
        if let Some(hint) = self.worker_hint {
            self.worker_hint = Some(hint.clamp(MIN_PROBE_WORKERS, self.worker_cap));
        }
    }

    /// Project the extraction-facing subset of this configuration.
    #[must_use]
    pub fn extraction_options(&self) -> ExtractionOptions {
        ExtractionOptions {
            no_check_certificate: self.no_check_certificate,
            cookie_file: self.cookie_file.clone(),
            cookies_from_browser: self.cookies_from_browser.clone(),
            ytdlp_path: self.ytdlp_path.clone(),
        }
    }
}

/// Options passed through unchanged to the metadata extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionOptions {
    /// Skip TLS certificate verification.
    pub no_check_certificate: bool,
    /// Cookie file handed to the extractor.
    pub cookie_file: Option<PathBuf>,
    /// Browser to read cookies from.
    pub cookies_from_browser: Option<String>,
    /// Path to the extractor binary.
    pub ytdlp_path: PathBuf,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            no_check_certificate: true,
            cookie_file: None,
            cookies_from_browser: None,
            ytdlp_path: default_ytdlp_path(),
        }
    }
}

impl ExtractionOptions {
    /// Set the cookie file.
    #[must_use]
    pub fn with_cookie_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cookie_file = Some(path.into());
        self
    }

    /// Set the browser to read cookies from.
    #[must_use]
    pub fn with_cookies_from_browser(mut self, browser: impl Into<String>) -> Self {
        self.cookies_from_browser = Some(browser.into());
        self
    }

    /// Set whether certificate verification is skipped.
    #[must_use]
    pub const fn with_no_check_certificate(mut self, skip: bool) -> Self {
        self.no_check_certificate = skip;
        self
    }

    /// Set the extractor binary path.
    #[must_use]
    pub fn with_ytdlp_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ytdlp_path = path.into();
        self
    }
}

fn env_string(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_bool(name: &str, default: bool) -> bool {
    env_string(name).map_or(default, |value| parse_bool(&value))
}

fn env_usize(name: &str) -> Option<usize> {
    env_string(name).and_then(|value| value.parse().ok())
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CheckerConfig::default();
        assert!(config.no_check_certificate);
        assert_eq!(config.cookie_file, None);
        assert_eq!(config.cookies_from_browser, None);
        assert_eq!(config.worker_hint, None);
        assert_eq!(config.worker_cap, MAX_PROBE_WORKERS);
        assert_eq!(config.workers_per_cpu, WORKERS_PER_CPU);
        assert_eq!(config.ytdlp_path, PathBuf::from(DEFAULT_YTDLP_BIN));
    }

    #[test]
    fn test_parse_bool_truthy_values() {
        assert!(parse_bool("1"));
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("Yes"));
        assert!(parse_bool("on"));
    }

    #[test]
    fn test_parse_bool_falsy_values() {
        assert!(!parse_bool("0"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("no"));
        assert!(!parse_bool("off"));
        assert!(!parse_bool("banana"));
    }

    #[test]
    fn test_validate_clamps_worker_cap() {
        let mut config = CheckerConfig {
            worker_cap: 0,
            ..CheckerConfig::default()
        };
        config.validate();
        assert_eq!(config.worker_cap, MIN_PROBE_WORKERS);
    }

    #[test]
    fn test_validate_clamps_hint_to_cap() {
        let mut config = CheckerConfig {
            worker_hint: Some(1000),
            ..CheckerConfig::default()
        };
        config.validate();
        assert_eq!(config.worker_hint, Some(config.worker_cap));
    }

    #[test]
    fn test_validate_floors_zero_hint() {
        let mut config = CheckerConfig {
            worker_hint: Some(0),
            ..CheckerConfig::default()
        };
        config.validate();
        assert_eq!(config.worker_hint, Some(MIN_PROBE_WORKERS));
    }

    #[test]
    fn test_extraction_options_projection() {
        let config = CheckerConfig {
            no_check_certificate: false,
            cookie_file: Some(PathBuf::from("/tmp/cookies.txt")),
            cookies_from_browser: Some("firefox".to_string()),
            ..CheckerConfig::default()
        };
        let options = config.extraction_options();
        assert!(!options.no_check_certificate);
        assert_eq!(options.cookie_file, Some(PathBuf::from("/tmp/cookies.txt")));
        assert_eq!(options.cookies_from_browser, Some("firefox".to_string()));
        assert_eq!(options.ytdlp_path, config.ytdlp_path);
    }

    #[test]
    fn test_extraction_options_builders() {
        let options = ExtractionOptions::default()
            .with_cookie_file("/tmp/cookies.txt")
            .with_cookies_from_browser("chromium")
            .with_no_check_certificate(false)
            .with_ytdlp_path("/usr/local/bin/yt-dlp");
        assert_eq!(options.cookie_file, Some(PathBuf::from("/tmp/cookies.txt")));
        assert_eq!(options.cookies_from_browser, Some("chromium".to_string()));
        assert!(!options.no_check_certificate);
        assert_eq!(options.ytdlp_path, PathBuf::from("/usr/local/bin/yt-dlp"));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: CheckerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CheckerConfig::default());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = CheckerConfig {
            worker_hint: Some(4),
            cookies_from_browser: Some("firefox".to_string()),
            ..CheckerConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let decoded: CheckerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, config);
    }
}
