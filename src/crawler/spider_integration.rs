//! Integration with spider library for single-page fetches

use futures::future::BoxFuture;
use spider::website::Website;
use spider_utils::spider_transformations::transformation::content::{
    transform_content, ReturnFormat, TransformConfig,
};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::crawler::error::CrawlError;
use crate::crawler::{CrawlerConfig, FetchedPage, PageFetcher};

/// Check that `url` is an absolute http or https URL
pub fn validate_url(url: &str) -> Result<Url, CrawlError> {
    let parsed = Url::parse(url.trim())?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(CrawlError::UnsupportedScheme(other.to_string())),
    }
}

/// Page fetcher backed by a depth-0 `spider` crawl
#[derive(Debug, Clone, Default)]
pub struct SpiderFetcher {
    config: CrawlerConfig,
}

impl SpiderFetcher {
    pub fn new(config: CrawlerConfig) -> Self {
        Self { config }
    }

    /// Fetch a page and render it to markdown
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to fetch
    ///
    /// # Returns
    ///
    /// The fetched page, or an error if the URL is invalid, the fetch timed
    /// out, or the server answered with a non-success status
    #[instrument(skip(self))]
    pub async fn fetch_page(&self, url: &str) -> Result<FetchedPage, CrawlError> {
        let parsed = validate_url(url)?;
        debug!("Crawler config: {:?}", self.config);

        match tokio::time::timeout(self.config.timeout(), self.crawl_single(parsed)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Fetch timed out");
                Err(CrawlError::Timeout {
                    url: url.to_string(),
                    secs: self.config.timeout_secs,
                })
            }
        }
    }

    async fn crawl_single(&self, url: Url) -> Result<FetchedPage, CrawlError> {
        info!("Fetching {}", url);

        let mut website = Website::new(url.as_str());
        website
            .configuration
            .with_respect_robots_txt(self.config.respect_robots_txt)
            .with_user_agent(Some(&self.config.user_agent))
            .with_request_timeout(Some(self.config.timeout()))
            .with_depth(0)
            .with_limit(1);

        let mut rx = website
            .subscribe(16)
            .ok_or_else(|| CrawlError::Other("Failed to subscribe to website".to_string()))?;

        let transform_config = TransformConfig {
            return_format: ReturnFormat::Markdown,
            readability: self.config.readability,
            main_content: self.config.readability,
            ..Default::default()
        };

        let handle = tokio::spawn(async move {
            let page = rx.recv().await.ok()?;
            let page_url = page.get_url().to_string();
            debug!("Received page: {}", page_url);

            if !page.status_code.is_success() {
                return Some(Err(CrawlError::Status {
                    url: page_url,
                    status: page.status_code.as_u16(),
                }));
            }

            let markdown = transform_content(&page, &transform_config, &None, &None, &None);
            Some(Ok(FetchedPage::new(page_url, markdown)))
        });

        website.crawl().await;
        website.unsubscribe();

        let page = handle
            .await
            .map_err(|e| CrawlError::Other(format!("Task join error: {}", e)))?
            .ok_or_else(|| CrawlError::NoResponse(url.to_string()))??;

        info!(bytes = page.markdown.len(), "Fetched page");
        Ok(page)
    }
}

impl PageFetcher for SpiderFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<FetchedPage, CrawlError>> {
        Box::pin(self.fetch_page(url))
    }
}
