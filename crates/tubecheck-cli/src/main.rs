//! Command-line entry point for the accessibility checker.
//!
//! Resolves the given URL, enumerates the videos behind it and probes each
//! one concurrently, then prints the accessible and inaccessible lists on
//! stdout. Logs go to stderr so the lists stay pipeable.

use std::path::PathBuf;

use clap::Parser;
use dotenv::dotenv;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use tubecheck_core::{
    AccessChecker, CheckerConfig, HttpRedirectResolver, YtDlpExtractor, is_youtube_url,
};

/// Check which videos in a `YouTube` playlist are accessible, without
/// downloading anything.
#[derive(Debug, Parser)]
#[command(name = "tubecheck")]
#[command(about = "Check which videos in a YouTube playlist are accessible", long_about = None)]
struct Cli {
    /// Playlist or video URL. Share links and shortened URLs are resolved
    /// before checking.
    url: String,

    /// Cookie file handed to the extractor.
    #[arg(long, value_name = "FILE")]
    cookie_file: Option<PathBuf>,

    /// Browser to read cookies from (e.g. "firefox").
    #[arg(long, value_name = "BROWSER")]
    cookies_from_browser: Option<String>,

    /// Fixed probe worker count, overriding the CPU heuristic.
    #[arg(long, value_name = "N")]
    max_workers: Option<usize>,

    /// Verify TLS certificates (skipped by default for speed).
    #[arg(long)]
    check_certificate: bool,

    /// Path to the yt-dlp binary.
    #[arg(long, value_name = "PATH")]
    ytdlp_path: Option<PathBuf>,
}

impl Cli {
    /// Fold the command-line overrides into `config`, returning the URL.
    fn apply_to(self, config: &mut CheckerConfig) -> String {
        if let Some(path) = self.cookie_file {
            config.cookie_file = Some(path);
        }
        if let Some(browser) = self.cookies_from_browser {
            config.cookies_from_browser = Some(browser);
        }
        if let Some(workers) = self.max_workers {
            config.worker_hint = Some(workers);
        }
        if self.check_certificate {
            config.no_check_certificate = false;
        }
        if let Some(path) = self.ytdlp_path {
            config.ytdlp_path = path;
        }
        config.validate();
        self.url
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = CheckerConfig::from_env();
    let url = cli.apply_to(&mut config);

    if !is_youtube_url(&url) {
        warn!("URL does not look like a YouTube link: {url}");
    }

    let resolver = match HttpRedirectResolver::new(config.no_check_certificate) {
        Ok(resolver) => resolver,
        Err(e) => {
            eprintln!("tubecheck error: {e}");
            std::process::exit(1);
        }
    };
    let extractor = YtDlpExtractor::new(config.extraction_options());
    let checker = AccessChecker::new(resolver, extractor, config);

    let report = checker.check_videos(&url).await;

    println!("Accessible Videos:");
    for video in &report.accessible {
        println!("{video}");
    }

    println!("\nInaccessible Videos:");
    for video in &report.inaccessible {
        println!("{video}");
    }
}
