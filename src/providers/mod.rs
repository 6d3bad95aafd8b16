mod anthropic;
mod factory;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_extraction_prompt, COCKTAIL_EXTRACTION_PROMPT};

use async_trait::async_trait;
use std::error::Error;

/// Error type returned by provider calls
pub type ProviderError = Box<dyn Error + Send + Sync>;

/// Unified trait for all LLM providers
///
/// A provider is an opaque text completion service: it receives a system
/// prompt and the raw content and returns whatever text the model produced.
/// The recipe parser treats that text as untrusted input.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Complete `content` under `system_prompt`
    async fn complete(&self, system_prompt: &str, content: &str) -> Result<String, ProviderError>;
}
