use crate::types::{FetchConfig, NewsError, Result};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

/// Single-shot feed downloader. No retries: a failed fetch is reported to
/// the caller as is.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    /// Downloads the raw document body. The body is read chunk by chunk and
    /// abandoned as soon as it grows past the size limit.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let parsed_url = Url::parse(url)?;
        if !matches!(parsed_url.scheme(), "http" | "https") {
            return Err(NewsError::UnsupportedScheme {
                url: url.to_string(),
            });
        }

        let start_time = Instant::now();
        let limit = self.config.max_feed_bytes();
        debug!("Fetching feed: {}", url);

        let mut response = self.client.get(parsed_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Feed {} answered with HTTP {}", url, status);
            return Err(NewsError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(content_length) = response.content_length() {
            if content_length as usize > limit {
                return Err(NewsError::FeedTooLarge {
                    size: content_length as usize,
                    limit,
                });
            }
        }

        let mut content = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let size = content.len() + chunk.len();
            if size > limit {
                warn!("Feed {} passed the {} byte limit while downloading", url, limit);
                return Err(NewsError::FeedTooLarge { size, limit });
            }
            content.extend_from_slice(&chunk);
        }

        info!(
            "Fetched feed: {} ({} bytes in {} ms)",
            url,
            content.len(),
            start_time.elapsed().as_millis()
        );
        Ok(content)
    }
}
