//! Turning raw AI output into validated recipes.
//!
//! The pipeline is linear: extract `{...}` spans, parse each (with one soft
//! repair retry), normalize keys, merge into a single envelope, validate, then
//! normalize units and quantities. Text without any parseable JSON object goes
//! through the markdown fallback instead and joins at validation. Any stage failure
//! ends in an empty result; [`RecipeParser::parse`] never fails.

mod error;
pub mod extract;
pub mod keys;
pub mod markdown;
pub mod merge;
pub mod repair;

pub use error::ParseError;
pub use extract::{extract_json_objects, json_objects};
pub use keys::normalize_keys;
pub use markdown::parse_markdown;
pub use merge::merge_recipes;
pub use repair::{parse_with_repair, soft_repair};

use crate::model::{ParseReport, ParseSource, ParsedRecipes, Rejection, RejectionStage};
use crate::normalize::{normalize_recipe, DEFAULT_FRACTION_TOLERANCE};
use crate::schema::ParsedRecipesSchema;
use log::{debug, error, warn};
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Tunables for [`RecipeParser`]
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ParserOptions {
    /// Maximum distance between a decimal quantity and a common fraction for
    /// the quantity to be rewritten as that fraction
    #[serde(default = "default_fraction_tolerance")]
    pub fraction_tolerance: f64,
}

fn default_fraction_tolerance() -> f64 {
    DEFAULT_FRACTION_TOLERANCE
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            fraction_tolerance: default_fraction_tolerance(),
        }
    }
}

/// Receives the parser's diagnostics.
///
/// The default, [`LogParseLogger`], forwards to the `log` facade; tests and
/// embedding applications can supply their own.
pub trait ParseLogger: Send + Sync {
    /// A `{...}` span was not valid JSON even after soft repair
    fn object_dropped(&self, index: usize, error: &str);

    /// A recipe inside a valid envelope failed validation
    fn recipe_dropped(&self, index: usize, reason: &str);

    /// The whole parse failed over to the empty result
    fn parse_failed(&self, raw: &str, error: &ParseError);
}

/// [`ParseLogger`] that writes through the `log` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogParseLogger;

impl ParseLogger for LogParseLogger {
    fn object_dropped(&self, index: usize, error: &str) {
        warn!("Dropping JSON object {}: {}", index + 1, error);
    }

    fn recipe_dropped(&self, index: usize, reason: &str) {
        warn!("Dropping recipe {}: {}", index + 1, reason);
    }

    fn parse_failed(&self, raw: &str, error: &ParseError) {
        error!("Failed to parse recipes from AI output: {}", error);
        error!("Original input:\n{}", raw);
    }
}

/// The AI recipe parser.
///
/// Holds no per-call state, so one instance can serve concurrent callers.
///
/// # Example
/// ```
/// use cocktail_import::RecipeParser;
///
/// let text = r#"{"recipes":[{"name":"X","ingredients":[{"quantity":"1","unit":"oz","item":"Y"}],"instructions":["Z"]}]}"#;
/// let report = RecipeParser::new().parse(text);
/// assert_eq!(report.recipes.len(), 1);
/// assert_eq!(report.recipes[0].description, "");
/// ```
#[derive(Clone)]
pub struct RecipeParser {
    options: ParserOptions,
    logger: Arc<dyn ParseLogger>,
}

impl Default for RecipeParser {
    fn default() -> Self {
        Self {
            options: ParserOptions::default(),
            logger: Arc::new(LogParseLogger),
        }
    }
}

impl std::fmt::Debug for RecipeParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeParser")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl RecipeParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ParseLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse raw text into recipes, reporting everything that was dropped.
    ///
    /// Never fails: an unrecoverable problem yields an empty report carrying a
    /// single envelope rejection, after the error and the raw input have been
    /// passed to the logger.
    pub fn parse(&self, raw: &str) -> ParseReport {
        match self.try_parse(raw) {
            Ok(report) => report,
            Err(e) => {
                self.logger.parse_failed(raw, &e);
                ParseReport {
                    rejections: vec![Rejection::new(RejectionStage::Envelope, 0, e.to_string())],
                    ..ParseReport::empty()
                }
            }
        }
    }

    /// [`parse`](Self::parse), also returning the wall-clock time it took.
    pub fn parse_timed(&self, raw: &str) -> (ParseReport, Duration) {
        let start = Instant::now();
        let report = self.parse(raw);
        (report, start.elapsed())
    }

    fn try_parse(&self, raw: &str) -> Result<ParseReport, ParseError> {
        let spans = extract_json_objects(raw);

        let (envelope, source, mut rejections) = if spans.is_empty() {
            debug!("No JSON object found, trying markdown");
            (parse_markdown(raw), ParseSource::Markdown, Vec::new())
        } else {
            debug!("Found {} JSON object(s)", spans.len());
            let mut objects = Vec::with_capacity(spans.len());
            let mut rejections = Vec::new();
            for (index, span) in spans.iter().enumerate() {
                match parse_with_repair(span) {
                    Ok((value, repaired)) => {
                        if repaired {
                            debug!("JSON object {} needed soft repair", index + 1);
                        }
                        objects.push(normalize_keys(&value));
                    }
                    Err(e) => {
                        self.logger.object_dropped(index, &e.to_string());
                        rejections.push(Rejection::new(
                            RejectionStage::Object,
                            index,
                            format!("invalid JSON ({})", e),
                        ));
                    }
                }
            }
            if objects.is_empty() {
                debug!("No JSON object survived parsing, trying markdown");
                (parse_markdown(raw), ParseSource::Markdown, rejections)
            } else {
                (merge_recipes(&objects)?, ParseSource::Json, rejections)
            }
        };

        let batch = ParsedRecipesSchema::validate(&envelope)?;
        for rejection in &batch.rejections {
            self.logger.recipe_dropped(rejection.index, &rejection.reason);
        }
        rejections.extend(batch.rejections);

        let tolerance = self.options.fraction_tolerance;
        let recipes = batch
            .recipes
            .into_iter()
            .map(|recipe| normalize_recipe(recipe, tolerance))
            .collect();

        Ok(ParseReport {
            recipes,
            rejections,
            source,
        })
    }
}

/// Parse AI output into recipes with the default parser.
///
/// Always returns a well-formed envelope; an empty list means no recipe
/// could be extracted.
pub fn parse_recipes_from_ai(raw: &str) -> ParsedRecipes {
    RecipeParser::new().parse(raw).into_parsed()
}

/// [`parse_recipes_from_ai`] plus the wall-clock time the parse took.
pub fn parse_recipes_from_ai_timed(raw: &str) -> (ParsedRecipes, Duration) {
    let (report, elapsed) = RecipeParser::new().parse_timed(raw);
    (report.into_parsed(), elapsed)
}
