//! Declarative validation of recipe-shaped JSON.
//!
//! The schemas work on `serde_json::Value` so they can check data of unknown
//! provenance, not only what the AI parser produced. Each schema either
//! returns the typed model value with defaults applied or a [`SchemaError`]
//! naming the first violation.

use crate::model::{Ingredient, ParsedRecipes, Recipe, Rejection, RejectionStage};
use serde_json::{Map, Value};
use thiserror::Error;

/// A violation found while validating recipe-shaped data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("{field} must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("{0} is empty")]
    Empty(&'static str),

    #[error("no valid {0}")]
    NoValidItems(&'static str),
}

impl SchemaError {
    fn wrong_type(field: &'static str, expected: &'static str) -> Self {
        SchemaError::WrongType { field, expected }
    }
}

/// Schema for a single ingredient object.
pub struct IngredientSchema;

impl IngredientSchema {
    pub fn validate(value: &Value) -> Result<Ingredient, SchemaError> {
        let obj = value
            .as_object()
            .ok_or_else(|| SchemaError::wrong_type("ingredient", "an object"))?;

        let quantity = match obj.get("quantity") {
            None | Some(Value::Null) => return Err(SchemaError::MissingField("quantity")),
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(_) => return Err(SchemaError::wrong_type("quantity", "a string")),
        };
        if quantity.is_empty() {
            return Err(SchemaError::Empty("quantity"));
        }

        let item = required_string(obj, "item")?;
        let unit = optional_string(obj, "unit")?.unwrap_or_default();
        let notes = optional_string(obj, "notes")?.filter(|n| !n.is_empty());

        Ok(Ingredient {
            quantity,
            unit,
            item,
            notes,
        })
    }
}

/// Schema for a single recipe object.
pub struct RecipeSchema;

impl RecipeSchema {
    pub fn validate(value: &Value) -> Result<Recipe, SchemaError> {
        let obj = value
            .as_object()
            .ok_or_else(|| SchemaError::wrong_type("recipe", "an object"))?;

        let name = required_string(obj, "name")?;
        let description = optional_string(obj, "description")?.unwrap_or_default();

        let ingredients = match obj.get("ingredients") {
            None | Some(Value::Null) => return Err(SchemaError::MissingField("ingredients")),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| IngredientSchema::validate(item).ok())
                .collect::<Vec<_>>(),
            Some(_) => return Err(SchemaError::wrong_type("ingredients", "a list")),
        };
        if ingredients.is_empty() {
            return Err(SchemaError::NoValidItems("ingredients"));
        }

        let instructions = match obj.get("instructions") {
            None | Some(Value::Null) => return Err(SchemaError::MissingField("instructions")),
            Some(Value::Array(steps)) => steps
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect::<Vec<_>>(),
            Some(_) => return Err(SchemaError::wrong_type("instructions", "a list")),
        };
        if instructions.is_empty() {
            return Err(SchemaError::NoValidItems("instructions"));
        }

        let glassware = optional_string(obj, "glassware")?.filter(|s| !s.is_empty());
        let garnish = optional_string(obj, "garnish")?.filter(|s| !s.is_empty());

        let tags = match obj.get("tags") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(tags)) => tags
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            Some(_) => return Err(SchemaError::wrong_type("tags", "a list")),
        };

        Ok(Recipe {
            name,
            description,
            ingredients,
            instructions,
            glassware,
            garnish,
            tags,
        })
    }
}

/// Result of validating an envelope: accepted recipes plus per-recipe drops.
#[derive(Debug, Clone, Default)]
pub struct ValidatedBatch {
    pub recipes: Vec<Recipe>,
    pub rejections: Vec<Rejection>,
}

/// Schema for the `{ "recipes": [...] }` envelope.
pub struct ParsedRecipesSchema;

impl ParsedRecipesSchema {
    /// Validate an envelope, filtering out individual malformed recipes.
    ///
    /// Fails only when the envelope itself is unusable: not an object, or
    /// `recipes` absent or not a list.
    pub fn validate(value: &Value) -> Result<ValidatedBatch, SchemaError> {
        let obj = value
            .as_object()
            .ok_or_else(|| SchemaError::wrong_type("envelope", "an object"))?;

        let recipes = match obj.get("recipes") {
            None => return Err(SchemaError::MissingField("recipes")),
            Some(Value::Array(recipes)) => recipes,
            Some(_) => return Err(SchemaError::wrong_type("recipes", "a list")),
        };

        let mut batch = ValidatedBatch::default();
        for (index, candidate) in recipes.iter().enumerate() {
            match RecipeSchema::validate(candidate) {
                Ok(recipe) => batch.recipes.push(recipe),
                Err(e) => batch
                    .rejections
                    .push(Rejection::new(RejectionStage::Recipe, index, e.to_string())),
            }
        }
        Ok(batch)
    }

    /// Validate and keep only the accepted recipes.
    pub fn parse(value: &Value) -> Result<ParsedRecipes, SchemaError> {
        Self::validate(value).map(|batch| ParsedRecipes {
            recipes: batch.recipes,
        })
    }
}

fn required_string(obj: &Map<String, Value>, field: &'static str) -> Result<String, SchemaError> {
    match optional_string(obj, field)? {
        None => Err(SchemaError::MissingField(field)),
        Some(s) if s.is_empty() => Err(SchemaError::Empty(field)),
        Some(s) => Ok(s),
    }
}

fn optional_string(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, SchemaError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(_) => Err(SchemaError::wrong_type(field, "a string")),
    }
}
