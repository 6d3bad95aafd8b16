use crate::config::ProviderConfig;
use crate::providers::{LlmProvider, ProviderError};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com";

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .ok_or("ANTHROPIC_API_KEY not found in config or environment")?;

        Ok(AnthropicProvider {
            client: Client::new(),
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| ANTHROPIC_API_URL.to_string()),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn provider_name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, system_prompt: &str, content: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "temperature": self.temperature,
                "system": system_prompt,
                "messages": [
                    {
                        "role": "user",
                        "content": content
                    }
                ]
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(format!(
                "Anthropic request failed with status: {}",
                response.status()
            )
            .into());
        }

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);

        let completion = response_body["content"][0]["text"]
            .as_str()
            .ok_or("Failed to extract content from Anthropic response")?
            .to_string();

        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn test_config(base_url: Option<String>) -> ProviderConfig {
        ProviderConfig {
            api_key: Some("test-key".to_string()),
            base_url,
            ..ProviderConfig::for_model("claude-3-5-sonnet-20241022")
        }
    }

    #[tokio::test]
    async fn test_complete() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "test-key")
            .match_header("anthropic-version", "2023-06-01")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r####"{"content": [{"type": "text", "text": "### Negroni"}]}"####)
            .create_async()
            .await;

        let provider = AnthropicProvider::new(&test_config(Some(server.url()))).unwrap();
        let result = provider.complete("system", "text").await.unwrap();
        assert_eq!(result, "### Negroni");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_missing_content() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/messages")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content": []}"#)
            .create_async()
            .await;

        let provider = AnthropicProvider::new(&test_config(Some(server.url()))).unwrap();
        let err = provider.complete("system", "text").await.unwrap_err();
        assert!(err.to_string().contains("Failed to extract content"));
    }

    #[test]
    fn test_provider_name() {
        let provider = AnthropicProvider::new(&test_config(None)).unwrap();
        assert_eq!(provider.provider_name(), "anthropic");
    }
}
