//! Post-extraction clean-up of ingredient measurements.

pub mod quantity;
pub mod units;

pub use quantity::{normalize_quantity, DEFAULT_FRACTION_TOLERANCE};
pub use units::{canonical_unit, is_measure_word, normalize_unit};

use crate::model::{Ingredient, Recipe};

/// Return a copy of `recipe` with every ingredient's unit and quantity normalized.
pub fn normalize_recipe(recipe: Recipe, tolerance: f64) -> Recipe {
    let ingredients = recipe
        .ingredients
        .into_iter()
        .map(|ingredient| Ingredient {
            quantity: normalize_quantity(&ingredient.quantity, tolerance),
            unit: normalize_unit(&ingredient.unit),
            ..ingredient
        })
        .collect();

    Recipe {
        ingredients,
        ..recipe
    }
}
