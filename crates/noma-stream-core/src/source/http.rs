use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use url::Url;

use super::ContentSource;
use crate::config::AppConfig;
use crate::moment::Moment;
use crate::{Error, Result};

/// Network-backed content source.
///
/// `GET {base}/moments?offset=N&limit=M` returning a JSON array of
/// moments. No retries here: a failed page surfaces as an error and the
/// engine recovers by itself.
pub struct HttpSource {
    client: Client,
    base_url: Url,
    page_size: usize,
}

impl HttpSource {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let base = config
            .source
            .base_url
            .as_deref()
            .ok_or_else(|| Error::Config("source.base_url is not set".to_string()))?;

        // A trailing slash makes Url::join append instead of replacing
        // the last path segment.
        let mut base = base.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.source.request_timeout_secs))
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            base_url,
            page_size: config.stream.page_size,
        })
    }

    fn moments_url(&self, offset: usize) -> Result<Url> {
        let mut url = self.base_url.join("moments")?;
        url.query_pairs_mut()
            .append_pair("offset", &offset.to_string())
            .append_pair("limit", &self.page_size.to_string());
        Ok(url)
    }

    async fn fetch_page(&self, offset: usize) -> Result<Vec<Moment>> {
        let url = self.moments_url(offset)?;
        tracing::debug!("Fetching moments from {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Source(format!("HTTP {} for {}", status, url)));
        }

        let moments: Vec<Moment> = response.json().await?;
        tracing::debug!("Received {} moments at offset {}", moments.len(), offset);
        Ok(moments)
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn fetch_initial(&self) -> Result<Vec<Moment>> {
        self.fetch_page(0).await
    }

    async fn fetch_more(&self, offset: usize) -> Result<Vec<Moment>> {
        self.fetch_page(offset).await
    }

    async fn refresh(&self) -> Result<Vec<Moment>> {
        self.fetch_page(0).await
    }
}
