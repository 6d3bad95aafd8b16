use crate::config::{ImportConfig, ProviderConfig};
use crate::providers::{AnthropicProvider, LlmProvider, OpenAIProvider, ProviderError};

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
    ) -> Result<Box<dyn LlmProvider>, ProviderError> {
        // Validate that provider is enabled
        if !config.enabled {
            return Err(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )
            .into());
        }

        match provider_name {
            "openai" => Ok(Box::new(OpenAIProvider::new(config)?)),
            "anthropic" => Ok(Box::new(AnthropicProvider::new(config)?)),
            _ => Err(format!("Unknown provider: {}", provider_name).into()),
        }
    }

    /// Get the default provider from configuration
    pub fn get_default_provider(
        config: &ImportConfig,
    ) -> Result<Box<dyn LlmProvider>, ProviderError> {
        Self::create_named(config, &config.default_provider)
    }

    /// Create the named provider from configuration
    pub fn create_named(
        config: &ImportConfig,
        provider_name: &str,
    ) -> Result<Box<dyn LlmProvider>, ProviderError> {
        let provider_config = config.provider(provider_name).ok_or_else(|| {
            format!("Provider '{}' not found in configuration", provider_name)
        })?;

        Self::create(provider_name, provider_config)
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["openai", "anthropic"]
    }
}
