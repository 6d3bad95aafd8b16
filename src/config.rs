use crate::parser::ParserOptions;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Main importer configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Default provider to use when not specified
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Recipe parser tunables
    #[serde(default)]
    pub parser: ParserOptions,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            parser: ParserOptions::default(),
            timeout: default_timeout(),
        }
    }
}

/// Configuration for a specific AI provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gpt-4o-mini", "claude-3-5-sonnet-20241022")
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// An enabled provider config for `model` with default sampling settings
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            enabled: true,
            model: model.into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "openai".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_timeout() -> u64 {
    30
}

impl ImportConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with COCKTAIL__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: COCKTAIL__PROVIDERS__OPENAI__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Provider config by name, if configured
    pub fn provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.get(name)
    }
}

/// Load configuration from file and environment variables
///
/// See [`ImportConfig::load`] for the precedence rules.
pub fn load_config() -> Result<ImportConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: COCKTAIL__PROVIDERS__OPENAI__API_KEY
        .add_source(
            Environment::with_prefix("COCKTAIL")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
