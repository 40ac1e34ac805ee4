use crate::config::RunConfig;
use crate::parser::{parse_harvest_page, parse_summary_page};
use crate::types::{HarvestRecord, SummaryRecord};

use reqwest::{Client, Url};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

fn parse_page_url(url: &str) -> Result<Url, ScraperError> {
    let parsed = Url::parse(url).map_err(|e| ScraperError::InvalidUrl(format!("{url} ({e})")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(ScraperError::InvalidUrl(format!(
            "{url} (unsupported scheme '{scheme}')"
        ))),
    }
}

#[derive(Debug, Clone)]
pub struct WebScraper {
    client: Client,
}

impl WebScraper {
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self { client })
    }

    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        let url = parse_page_url(url)?;
        log::info!("Fetching {url}...");

        let html = self
            .client
            .get(url)
            .send()
            .await
            .inspect_err(|e| log::error!("HTTP error: {e:?}"))?
            .error_for_status()?
            .text()
            .await
            .inspect_err(|e| log::error!("Decode error: {e:?}"))?;

        Ok(html)
    }

    pub async fn fetch_year(
        &self,
        config: &RunConfig,
        year: u16,
    ) -> Result<Vec<HarvestRecord>, ScraperError> {
        let html = self.fetch_page(&config.url_for(year)).await?;
        Ok(parse_harvest_page(&html, year))
    }

    /// Fetches every year of the configured range in order, waiting
    /// `config.delay` between requests. A year that fails to download is
    /// logged and contributes no records.
    pub async fn fetch_years(&self, config: &RunConfig) -> Vec<HarvestRecord> {
        let mut records = Vec::new();

        for (i, year) in config.years().enumerate() {
            if i > 0 && !config.delay.is_zero() {
                tokio::time::sleep(config.delay).await;
            }

            match self.fetch_year(config, year).await {
                Ok(year_records) => {
                    log::info!("{}: {} records", year, year_records.len());
                    records.extend(year_records);
                }
                Err(e) => log::warn!("{}: Failed to fetch ({})", year, e),
            }
        }

        records
    }

    pub async fn fetch_summary(&self, url: &str) -> Result<Vec<SummaryRecord>, ScraperError> {
        let html = self.fetch_page(url).await?;
        Ok(parse_summary_page(&html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves `pages[year]` for any path starting with `/{year}/` and 404 for
    /// everything else.
    async fn serve_years(pages: HashMap<u16, String>) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("listener has an address");

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut buffer = vec![0u8; 4096];
                let n = stream.read(&mut buffer).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buffer[..n]);
                let path = request.split_whitespace().nth(1).unwrap_or("/");

                let page = pages
                    .iter()
                    .find(|(year, _)| path.starts_with(&format!("/{year}/")))
                    .map(|(_, html)| html.as_str());

                let response = match page {
                    Some(html) => format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        html.len(),
                        html
                    ),
                    None => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                        .to_string(),
                };
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        addr
    }

    fn unreachable_config() -> RunConfig {
        RunConfig {
            start_year: 2013,
            end_year: 2015,
            base_url_template: "http://127.0.0.1:9/{year}/deer-general".to_string(),
            delay: Duration::ZERO,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_years_skips_failed_years() {
        let scraper = WebScraper::new().expect("Failed to build scraper");

        let records = scraper.fetch_years(&unreachable_config()).await;

        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_year_reports_transport_error() {
        let scraper = WebScraper::new().expect("Failed to build scraper");

        let result = scraper.fetch_year(&unreachable_config(), 2013).await;

        assert!(matches!(result, Err(ScraperError::HttpError(_))));
    }

    #[tokio::test]
    async fn test_fetch_years_keeps_good_years_around_a_missing_one() {
        let mut pages = HashMap::new();
        pages.insert(
            2013,
            fs::read_to_string("samples/deer_general_2013.html")
                .expect("Failed to read sample HTML file"),
        );
        pages.insert(
            2015,
            fs::read_to_string("samples/deer_general_2024.html")
                .expect("Failed to read sample HTML file"),
        );
        let addr = serve_years(pages).await;

        let config = RunConfig {
            start_year: 2013,
            end_year: 2015,
            base_url_template: format!("http://{addr}/{{year}}/deer-general"),
            delay: Duration::ZERO,
            ..Default::default()
        };
        let scraper = WebScraper::new().expect("Failed to build scraper");

        let records = scraper.fetch_years(&config).await;

        assert_eq!(records.len(), 10);
        assert_eq!(records.iter().filter(|r| r.year == 2013).count(), 5);
        assert_eq!(records.iter().filter(|r| r.year == 2015).count(), 5);
        assert!(records.iter().all(|r| r.year != 2014));
        assert!(records.iter().take(5).all(|r| r.year == 2013));
    }

    #[tokio::test]
    async fn test_fetch_year_reports_not_found_status() {
        let addr = serve_years(HashMap::new()).await;
        let config = RunConfig {
            base_url_template: format!("http://{addr}/{{year}}/deer-general"),
            ..Default::default()
        };
        let scraper = WebScraper::new().expect("Failed to build scraper");

        let result = scraper.fetch_year(&config, 2014).await;

        assert!(matches!(result, Err(ScraperError::HttpError(_))));
    }

    #[tokio::test]
    async fn test_fetch_summary_rejects_malformed_url() {
        let scraper = WebScraper::new().expect("Failed to build scraper");

        let result = scraper.fetch_summary("not a url").await;
        assert!(matches!(result, Err(ScraperError::InvalidUrl(_))));

        let result = scraper.fetch_summary("ftp://example.com/deer-general").await;
        assert!(matches!(result, Err(ScraperError::InvalidUrl(_))));
    }
}
