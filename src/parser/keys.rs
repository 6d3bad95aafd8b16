//! Rewriting variant keys to the canonical recipe vocabulary.
//!
//! Keys are matched on their compact form (lowercase letters and digits only),
//! so `"**Ingredients:**"`, `"recipe_name"` and `"recipeName"` all resolve.
//! Unrecognized keys are kept, and an alias is left alone when its canonical
//! key is already present. Both rules keep [`normalize_keys`] idempotent.

use super::markdown::{compact, ingredient_from_line, split_tags, strip_step_marker};
use serde_json::{Map, Value};

/// Which level of the recipe document an object sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    /// The envelope, which may also be a bare recipe
    Top,
    Recipe,
    Ingredient,
}

fn canonical_key(level: Level, key: &str) -> Option<&'static str> {
    let key = compact(key);
    let recipe_key = || match key.as_str() {
        "name" | "title" | "recipename" | "cocktail" | "cocktailname" | "drinkname" => {
            Some("name")
        }
        "description" | "summary" | "desc" => Some("description"),
        "ingredients" | "ingredientlist" | "ingredientslist" => Some("ingredients"),
        "instructions" | "instruction" | "steps" | "method" | "directions" | "preparation" => {
            Some("instructions")
        }
        "glassware" | "glass" | "glasstype" => Some("glassware"),
        "garnish" | "garnishes" => Some("garnish"),
        "tags" | "tag" | "keywords" | "categories" => Some("tags"),
        _ => None,
    };

    match level {
        Level::Top => match key.as_str() {
            "recipes" | "cocktails" | "drinks" => Some("recipes"),
            _ => recipe_key(),
        },
        Level::Recipe => recipe_key(),
        Level::Ingredient => match key.as_str() {
            "quantity" | "amount" | "qty" | "measure" => Some("quantity"),
            "unit" | "units" | "measurement" => Some("unit"),
            "item" | "ingredient" | "name" | "ingredientname" => Some("item"),
            "notes" | "note" | "comment" => Some("notes"),
            _ => None,
        },
    }
}

/// Rewrite recognized variant keys of an object to their canonical names.
///
/// Applies at the envelope, recipe and ingredient levels, and also coerces the
/// common value shapes AI output uses in place of the canonical ones: string
/// ingredients, a single `instructions` string, a comma-separated `tags`
/// string. Non-object input is returned as is.
pub fn normalize_keys(value: &Value) -> Value {
    normalize_object(value, Level::Top)
}

fn normalize_object(value: &Value, level: Level) -> Value {
    let Value::Object(obj) = value else {
        return value.clone();
    };

    let mut out = Map::new();
    let mut renamed: Vec<(&String, &'static str, &Value)> = Vec::new();

    for (key, val) in obj {
        match canonical_key(level, key) {
            Some(canonical) if canonical != key.as_str() => renamed.push((key, canonical, val)),
            _ => {
                out.insert(key.clone(), val.clone());
            }
        }
    }
    for (alias, canonical, val) in renamed {
        let target = if out.contains_key(canonical) {
            alias.clone()
        } else {
            canonical.to_string()
        };
        out.insert(target, val.clone());
    }

    if level != Level::Ingredient {
        coerce_recipe_fields(&mut out);
    }
    if level == Level::Top {
        if let Some(Value::Array(recipes)) = out.get_mut("recipes") {
            for recipe in recipes.iter_mut() {
                let normalized = normalize_object(recipe, Level::Recipe);
                *recipe = normalized;
            }
        }
    }

    Value::Object(out)
}

fn coerce_recipe_fields(recipe: &mut Map<String, Value>) {
    if let Some(Value::Array(ingredients)) = recipe.get_mut("ingredients") {
        for ingredient in ingredients.iter_mut() {
            let normalized = match &*ingredient {
                Value::String(line) => ingredient_from_line(line),
                other => normalize_object(other, Level::Ingredient),
            };
            *ingredient = normalized;
        }
    }

    if let Some(Value::String(text)) = recipe.get("instructions") {
        let steps: Vec<Value> = text
            .lines()
            .map(strip_step_marker)
            .filter(|s| !s.is_empty())
            .map(|s| Value::String(s.to_string()))
            .collect();
        recipe.insert("instructions".to_string(), Value::Array(steps));
    }

    if let Some(Value::String(text)) = recipe.get("tags") {
        let tags = split_tags(text).into_iter().map(Value::String).collect();
        recipe.insert("tags".to_string(), Value::Array(tags));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recipe_aliases() {
        let value = json!({
            "Title": "Paper Plane",
            "**Ingredients:**": [{"amount": "3/4", "units": "oz", "ingredient": "bourbon"}],
            "Method": ["Shake"],
            "glass_type": "coupe",
            "Keywords": ["modern"]
        });
        assert_eq!(
            normalize_keys(&value),
            json!({
                "name": "Paper Plane",
                "ingredients": [{"quantity": "3/4", "unit": "oz", "item": "bourbon"}],
                "instructions": ["Shake"],
                "glassware": "coupe",
                "tags": ["modern"]
            })
        );
    }

    #[test]
    fn test_envelope_alias_and_nested_recipes() {
        let value = json!({
            "cocktails": [{"recipeName": "Last Word", "steps": ["Shake"], "ingredients": []}]
        });
        let normalized = normalize_keys(&value);
        assert_eq!(normalized["recipes"][0]["name"], "Last Word");
        assert_eq!(normalized["recipes"][0]["instructions"], json!(["Shake"]));
    }

    #[test]
    fn test_unknown_keys_untouched() {
        let value = json!({"name": "X", "abv": 22, "Source URL": "http://x"});
        assert_eq!(normalize_keys(&value), value);
    }

    #[test]
    fn test_alias_kept_when_canonical_present() {
        let value = json!({"name": "Real", "title": "Other"});
        assert_eq!(normalize_keys(&value), value);
    }

    #[test]
    fn test_string_shapes_coerced() {
        let value = json!({
            "name": "Mojito",
            "ingredients": ["2 oz white rum", "6 leaves mint, muddled"],
            "instructions": "1. Muddle mint.\n2. Add rum and ice.\n\n3. Top with soda.",
            "tags": "refreshing, highball"
        });
        let normalized = normalize_keys(&value);
        assert_eq!(
            normalized["ingredients"][1],
            json!({"quantity": "6", "unit": "leaves", "item": "mint", "notes": "muddled"})
        );
        assert_eq!(
            normalized["instructions"],
            json!(["Muddle mint.", "Add rum and ice.", "Top with soda."])
        );
        assert_eq!(normalized["tags"], json!(["refreshing", "highball"]));
    }

    #[test]
    fn test_idempotent() {
        let inputs = vec![
            json!({"Title": "A", "title": "B", "Steps": "1. x", "ingredients": ["1 oz gin"]}),
            json!({"drinks": [{"cocktail": "C", "qty": 1, "ingredients": [{"qty": 2, "name": "rum"}]}]}),
            json!({"recipes": "not a list", "Name": "D"}),
            json!({"drinks": [{
                "Title": "E",
                "name": "F",
                "Ingredient List": ["2 dashes bitters"],
                "ingredients": [
                    "1 1/2 oz gin, chilled",
                    {"Amount": 1, "item": "x", "ingredient": "y"}
                ],
                "Method": "1) Shake.\n2) Strain.",
                "steps": ["ignored"],
                "Tags": "sour, classic",
                "keywords": "extra"
            }]}),
            json!({"drinks": [{"title": "G"}], "cocktails": [{"Glass": "coupe"}]}),
            json!({"**Recipes:**": [{"recipe_name": "H", "Instructions": "- Stir", "Tags": ""}]}),
            json!({"recipes": [null, 1, "x", [{"name": "nested"}]]}),
            json!([1, 2, 3]),
            json!("plain"),
        ];
        for input in inputs {
            let once = normalize_keys(&input);
            let twice = normalize_keys(&once);
            assert_eq!(once, twice, "not idempotent for {}", input);
        }
    }

    #[test]
    fn test_non_object_passthrough() {
        assert_eq!(normalize_keys(&json!(null)), json!(null));
    }
}
