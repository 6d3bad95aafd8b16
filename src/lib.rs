//! Turn AI-generated or pasted cocktail recipe text into validated, structured
//! recipes.
//!
//! The heart of the crate is [`RecipeParser`], which accepts untrusted text
//! (JSON with syntax errors, markdown recipe cards, prose-wrapped JSON, several
//! blobs concatenated) and always returns a well-formed result. Around it sit
//! thin collaborators for fetching a page, asking an AI provider to extract the
//! recipe, and the [`RecipeImporter`] builder that chains them.
//!
//! ```
//! let parsed = cocktail_import::parse_recipes_from_ai(
//!     r#"Sure! {"name": "Gimlet", "ingredients": [{"quantity": "0.75", "unit": "ounces", "item": "lime juice"}], "instructions": ["Shake with ice"]}"#,
//! );
//! assert_eq!(parsed.recipes[0].ingredients[0].quantity, "3/4");
//! assert_eq!(parsed.recipes[0].ingredients[0].unit, "oz");
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod providers;
pub mod schema;

use std::time::Duration;

pub use builder::{InputSource, LlmProvider, RecipeImporter, RecipeImporterBuilder};
pub use config::ImportConfig;
pub use error::ImportError;
pub use model::{
    Ingredient, ParseReport, ParseSource, ParsedRecipes, Recipe, Rejection, RejectionStage,
};
pub use parser::{
    parse_recipes_from_ai, parse_recipes_from_ai_timed, LogParseLogger, ParseError, ParseLogger,
    ParserOptions, RecipeParser,
};
pub use schema::{IngredientSchema, ParsedRecipesSchema, RecipeSchema, SchemaError};

/// Fetch a page and extract its recipes with the configured AI provider.
///
/// # Arguments
/// * `url` - The page to import
/// * `timeout` - Optional HTTP timeout, defaulting to the configured one
pub async fn url_to_recipes(
    url: &str,
    timeout: Option<Duration>,
) -> Result<ParseReport, ImportError> {
    let mut builder = RecipeImporter::builder().url(url);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().await
}

/// Extract recipes from free text with the configured AI provider.
pub async fn text_to_recipes(text: &str) -> Result<ParseReport, ImportError> {
    RecipeImporter::builder().text(text).build().await
}
