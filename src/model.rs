use serde::{Deserialize, Serialize};
use std::fmt;

/// A single measured ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Amount as written, fractional notation preserved (e.g. "1 1/2")
    pub quantity: String,
    /// Canonical unit abbreviation, empty when the ingredient has no unit
    #[serde(default)]
    pub unit: String,
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A validated cocktail recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glassware: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garnish: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// The top-level envelope handed back to callers.
///
/// An empty `recipes` list means nothing could be extracted. It is a valid
/// terminal state, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRecipes {
    pub recipes: Vec<Recipe>,
}

impl ParsedRecipes {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// Which extraction path produced a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseSource {
    Json,
    Markdown,
    #[default]
    None,
}

/// Where in the pipeline an item was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionStage {
    /// A `{...}` span that was not valid JSON even after soft repair
    Object,
    /// A recipe that failed validation inside an otherwise valid envelope
    Recipe,
    /// The whole batch, when the envelope itself was unusable
    Envelope,
}

/// One dropped item and the reason it was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub stage: RejectionStage,
    /// Zero-based position among the items of its stage
    pub index: usize,
    pub reason: String,
}

impl Rejection {
    pub fn new(stage: RejectionStage, index: usize, reason: impl Into<String>) -> Self {
        Self {
            stage,
            index,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.stage {
            RejectionStage::Object => "object",
            RejectionStage::Recipe => "recipe",
            RejectionStage::Envelope => "batch",
        };
        write!(f, "{} {} skipped: {}", what, self.index + 1, self.reason)
    }
}

/// Accepted recipes together with everything that was dropped on the way.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseReport {
    pub recipes: Vec<Recipe>,
    pub rejections: Vec<Rejection>,
    pub source: ParseSource,
}

impl ParseReport {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Number of recipe candidates seen, accepted or not.
    ///
    /// A JSON object that could not be parsed counts as a single candidate,
    /// though it may have held several recipes.
    pub fn attempted(&self) -> usize {
        self.recipes.len()
            + self
                .rejections
                .iter()
                .filter(|r| r.stage != RejectionStage::Envelope)
                .count()
    }

    /// Human readable line such as `3 of 5 recipes imported; 2 skipped: ...`.
    pub fn summary(&self) -> String {
        if self.rejections.is_empty() {
            let noun = if self.recipes.len() == 1 { "recipe" } else { "recipes" };
            return format!("{} {} imported", self.recipes.len(), noun);
        }
        let reasons: Vec<&str> = self.rejections.iter().map(|r| r.reason.as_str()).collect();
        format!(
            "{} of {} recipes imported; {} skipped: {}",
            self.recipes.len(),
            self.attempted(),
            self.rejections.len(),
            reasons.join(", ")
        )
    }

    pub fn into_parsed(self) -> ParsedRecipes {
        ParsedRecipes {
            recipes: self.recipes,
        }
    }
}
