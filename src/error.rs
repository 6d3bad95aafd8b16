use thiserror::Error;

/// Errors that can occur during recipe import operations
///
/// Parsing itself never fails; these cover everything around it.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Failed to fetch the page behind a URL
    #[error("Failed to fetch URL: {0}")]
    FetchError(String),

    /// Failed to build the HTTP client
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The AI provider could not be created or its request failed
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// There was nothing to parse
    #[error("Recipe text cannot be empty")]
    EmptyInput,

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Reading input failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
