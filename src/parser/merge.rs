//! Folding several extracted objects into one `{ "recipes": [...] }` envelope.

use super::ParseError;
use log::debug;
use serde_json::{json, Value};

/// Whether an object without a `recipes` key looks like a single recipe.
fn looks_like_recipe(value: &Value) -> bool {
    ["name", "ingredients", "instructions"]
        .iter()
        .any(|key| value.get(key).is_some())
}

/// Concatenate the recipes of every object, in input order.
///
/// An object with a `recipes` list contributes its entries in their own order;
/// a bare recipe-shaped object contributes itself. Objects that are neither
/// are skipped. Duplicates are kept. A `recipes` value that is not a list
/// breaks the envelope and fails the whole merge.
pub fn merge_recipes(objects: &[Value]) -> Result<Value, ParseError> {
    let mut recipes = Vec::new();

    for (index, object) in objects.iter().enumerate() {
        match object.get("recipes") {
            Some(Value::Array(items)) => recipes.extend(items.iter().cloned()),
            Some(other) => {
                return Err(ParseError::InvalidEnvelope(format!(
                    "object {} has a non-list recipes field: {}",
                    index + 1,
                    type_name(other)
                )))
            }
            None if looks_like_recipe(object) => recipes.push(object.clone()),
            None => debug!("Skipping object {} with no recipe fields", index + 1),
        }
    }

    Ok(json!({ "recipes": recipes }))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelopes_and_bare_recipes_in_order() {
        let objects = vec![
            json!({"recipes": [{"name": "A"}, {"name": "B"}]}),
            json!({"name": "C", "ingredients": []}),
            json!({"recipes": [{"name": "D"}]}),
        ];
        let merged = merge_recipes(&objects).unwrap();
        let names: Vec<&str> = merged["recipes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_duplicates_survive() {
        let recipe = json!({"name": "Same"});
        let merged = merge_recipes(&[recipe.clone(), recipe]).unwrap();
        assert_eq!(merged["recipes"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_unrelated_objects_skipped() {
        let merged = merge_recipes(&[json!({"error": ""}), json!({"status": "ok"})]).unwrap();
        assert_eq!(merged, json!({"recipes": []}));
    }

    #[test]
    fn test_non_list_recipes_breaks_envelope() {
        let err = merge_recipes(&[json!({"recipes": [{"name": "A"}]}), json!({"recipes": "oops"})])
            .unwrap_err();
        assert!(err.to_string().contains("object 2"));
        assert!(err.to_string().contains("string"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(merge_recipes(&[]).unwrap(), json!({"recipes": []}));
    }
}
