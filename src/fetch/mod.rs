//! Turning a URL into the raw text handed to the AI provider.

mod html;

pub use html::html_to_text;

use log::debug;
use reqwest::Client;
use std::error::Error;
use std::time::Duration;

pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; CocktailImportBot/1.0)")
            .build()?;

        Ok(Self { client })
    }

    /// Fetch the page body as-is.
    pub async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
        let response = self.client.get(url).send().await?;

        // Check status code before reading the body
        if !response.status().is_success() {
            return Err(format!(
                "Request to {} failed with status: {}",
                url,
                response.status()
            )
            .into());
        }

        Ok(response.text().await?)
    }

    /// Fetch a page and reduce it to visible text.
    pub async fn fetch_text(&self, url: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
        let body = self.fetch(url).await?;
        let text = html_to_text(&body);
        debug!("Extracted {} characters of text from {}", text.len(), url);
        Ok(text)
    }
}
