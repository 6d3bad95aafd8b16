use std::time::Duration;

use log::{debug, info};

use crate::config::{ImportConfig, ProviderConfig};
use crate::fetch::RequestFetcher;
use crate::providers::{self, build_extraction_prompt, ProviderFactory};
use crate::{ImportError, ParseReport, RecipeParser};

/// Represents the input source for a recipe
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Fetch the page and use its visible text
    Url(String),
    /// Use plain text content
    Text(String),
}

/// Optional LLM provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAI,
    Anthropic,
}

impl LlmProvider {
    /// Convert to provider name string used by the factory
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "openai",
            LlmProvider::Anthropic => "anthropic",
        }
    }
}

fn default_model(provider_name: &str) -> &'static str {
    match provider_name {
        "anthropic" => "claude-3-5-sonnet-20241022",
        _ => "gpt-4o-mini",
    }
}

/// Builder for configuring and executing recipe imports
#[derive(Default)]
pub struct RecipeImporterBuilder {
    source: Option<InputSource>,
    provider: Option<LlmProvider>,
    timeout: Option<Duration>,
    api_key: Option<String>,
    model: Option<String>,
    language: Option<String>,
    skip_ai: bool,
    config: Option<ImportConfig>,
    completion: Option<Box<dyn providers::LlmProvider>>,
    parser: Option<RecipeParser>,
}

impl RecipeImporterBuilder {
    /// Set the input source to a URL
    ///
    /// # Example
    /// ```
    /// use cocktail_import::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .url("https://example.com/negroni");
    /// ```
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.source = Some(InputSource::Url(url.into()));
        self
    }

    /// Set the input source to plain text
    ///
    /// # Example
    /// ```
    /// use cocktail_import::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .text("Stir 1 oz gin, 1 oz Campari and 1 oz sweet vermouth over ice.");
    /// ```
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.source = Some(InputSource::Text(text.into()));
        self
    }

    /// Choose which configured provider turns the text into recipe JSON
    pub fn provider(mut self, provider: LlmProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set a timeout for fetching URLs
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the API key for the LLM provider, overriding config and environment
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the LLM provider
    ///
    /// # Example
    /// ```
    /// use cocktail_import::{LlmProvider, RecipeImporter};
    ///
    /// let builder = RecipeImporter::builder()
    ///     .text("...")
    ///     .provider(LlmProvider::Anthropic)
    ///     .model("claude-3-5-sonnet-20241022");
    /// ```
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Tell the model which language the source text is in
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Treat the input as AI output already and parse it directly
    pub fn skip_ai(mut self) -> Self {
        self.skip_ai = true;
        self
    }

    /// Use this configuration instead of loading `config.toml` and the environment
    pub fn config(mut self, config: ImportConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use an existing provider instance instead of creating one from config
    pub fn completion_provider(mut self, provider: Box<dyn providers::LlmProvider>) -> Self {
        self.completion = Some(provider);
        self
    }

    /// Use a preconfigured parser (custom logger or options)
    pub fn parser(mut self, parser: RecipeParser) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Build and execute the import
    ///
    /// # Errors
    /// Returns `ImportError` if:
    /// - No input source was specified
    /// - The input (or the fetched page) has no text
    /// - URL fetch fails
    /// - The provider cannot be created or its request fails
    ///
    /// A response the parser cannot make sense of is not an error; it yields
    /// an empty report.
    ///
    /// # Example
    /// ```no_run
    /// # use cocktail_import::RecipeImporter;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let report = RecipeImporter::builder()
    ///     .url("https://example.com/negroni")
    ///     .build()
    ///     .await?;
    /// println!("{}", report.summary());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<ParseReport, ImportError> {
        let source = self.source.ok_or_else(|| {
            ImportError::BuilderError(
                "No input source specified. Use .url() or .text()".to_string(),
            )
        })?;

        let config = match &self.config {
            Some(config) => config.clone(),
            None => ImportConfig::load()?,
        };

        let text = match source {
            InputSource::Url(url) => {
                let timeout = self
                    .timeout
                    .unwrap_or_else(|| Duration::from_secs(config.timeout));
                let fetcher = RequestFetcher::new(Some(timeout))?;
                fetcher
                    .fetch_text(&url)
                    .await
                    .map_err(|e| ImportError::FetchError(e.to_string()))?
            }
            InputSource::Text(text) => text,
        };

        if text.trim().is_empty() {
            return Err(ImportError::EmptyInput);
        }

        let raw = if self.skip_ai {
            text
        } else {
            let provider = match self.completion {
                Some(provider) => provider,
                None => create_provider(
                    &config,
                    self.provider,
                    self.api_key.as_deref(),
                    self.model.as_deref(),
                )?,
            };
            info!("Extracting recipes with {}", provider.provider_name());
            let prompt = build_extraction_prompt(self.language.as_deref());
            provider
                .complete(&prompt, &text)
                .await
                .map_err(|e| ImportError::ProviderError(e.to_string()))?
        };
        debug!("Parsing {} characters of AI output", raw.len());

        let parser = self
            .parser
            .unwrap_or_else(|| RecipeParser::new().with_options(config.parser));
        Ok(parser.parse(&raw))
    }
}

fn create_provider(
    config: &ImportConfig,
    provider: Option<LlmProvider>,
    api_key: Option<&str>,
    model: Option<&str>,
) -> Result<Box<dyn providers::LlmProvider>, ImportError> {
    let name = provider
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| config.default_provider.clone());

    let mut provider_config = config
        .provider(&name)
        .cloned()
        .unwrap_or_else(|| ProviderConfig::for_model(default_model(&name)));
    if let Some(key) = api_key {
        provider_config.api_key = Some(key.to_string());
    }
    if let Some(model) = model {
        provider_config.model = model.to_string();
    }

    ProviderFactory::create(&name, &provider_config)
        .map_err(|e| ImportError::ProviderError(e.to_string()))
}

/// Main entry point for the builder API
pub struct RecipeImporter;

impl RecipeImporter {
    /// Creates a new builder for importing recipes
    pub fn builder() -> RecipeImporterBuilder {
        RecipeImporterBuilder::default()
    }
}
