use cocktail_import::{
    parse_recipes_from_ai, Ingredient, ParseSource, ParsedRecipes, Recipe, RecipeParser,
    RejectionStage,
};

fn recipe_json(name: &str) -> String {
    format!(
        r#"{{"name": "{}", "ingredients": [{{"quantity": "1", "unit": "oz", "item": "gin"}}], "instructions": ["Stir"]}}"#,
        name
    )
}

fn names(parsed: &ParsedRecipes) -> Vec<&str> {
    parsed.recipes.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn test_never_fails_on_hostile_input() {
    let deep = format!("{{\"x\": {}{}}}", "[".repeat(500), "]".repeat(500));
    let inputs = vec![
        String::new(),
        "   \n\t ".to_string(),
        "random unrelated text".to_string(),
        "{".to_string(),
        "}}}} {{{{".to_string(),
        r#"{"recipes": [{"name": "Truncated", "ingredients": ["#.to_string(),
        r#"{"recipes": 42}"#.to_string(),
        r#"{"recipes": null}"#.to_string(),
        "[1, 2, 3]".to_string(),
        "\u{feff}### \n---\n---\n**Ingredients**\n- \n".to_string(),
        "```json\n{\"recipes\": [\"not a recipe\"]}\n```".to_string(),
        r#"{"a": "unterminated \" string }"#.to_string(),
        deep,
    ];

    for input in inputs {
        let parsed = parse_recipes_from_ai(&input);
        let value = serde_json::to_value(&parsed).unwrap();
        assert!(value["recipes"].is_array(), "bad envelope for {:?}", input);
    }
}

#[test]
fn test_round_trip_single_recipe() {
    let raw = r#"{
        "name": "Last Word",
        "description": "Equal parts, served up.",
        "ingredients": [
            {"quantity": "3/4", "unit": "oz", "item": "gin"},
            {"quantity": "3/4", "unit": "oz", "item": "green Chartreuse"},
            {"quantity": "3/4", "unit": "oz", "item": "maraschino liqueur"},
            {"quantity": "3/4", "unit": "oz", "item": "lime juice", "notes": "fresh"}
        ],
        "instructions": ["Shake with ice", "Strain into a chilled coupe"],
        "glassware": "coupe",
        "garnish": "brandied cherry",
        "tags": ["classic", "shaken"]
    }"#;

    let parsed = parse_recipes_from_ai(raw);
    let ingredient = |item: &str, notes: Option<&str>| Ingredient {
        quantity: "3/4".to_string(),
        unit: "oz".to_string(),
        item: item.to_string(),
        notes: notes.map(str::to_string),
    };
    assert_eq!(
        parsed.recipes,
        vec![Recipe {
            name: "Last Word".to_string(),
            description: "Equal parts, served up.".to_string(),
            ingredients: vec![
                ingredient("gin", None),
                ingredient("green Chartreuse", None),
                ingredient("maraschino liqueur", None),
                ingredient("lime juice", Some("fresh")),
            ],
            instructions: vec![
                "Shake with ice".to_string(),
                "Strain into a chilled coupe".to_string()
            ],
            glassware: Some("coupe".to_string()),
            garnish: Some("brandied cherry".to_string()),
            tags: vec!["classic".to_string(), "shaken".to_string()],
        }]
    );
}

#[test]
fn test_concatenated_recipes_keep_order() {
    let raw = format!(
        "Here are your drinks:\n{}\nand\n{}\n{{\"recipes\": [{}, {}]}}",
        recipe_json("Martini"),
        recipe_json("Gibson"),
        recipe_json("Vesper"),
        recipe_json("Martinez"),
    );
    let parsed = parse_recipes_from_ai(&raw);
    assert_eq!(names(&parsed), vec!["Martini", "Gibson", "Vesper", "Martinez"]);
}

#[test]
fn test_duplicates_are_kept() {
    let raw = format!("{} {}", recipe_json("Negroni"), recipe_json("Negroni"));
    let parsed = parse_recipes_from_ai(&raw);
    assert_eq!(names(&parsed), vec!["Negroni", "Negroni"]);
}

#[test]
fn test_unparseable_object_is_isolated() {
    let raw = format!(
        "{}\n{{name: \"Broken\", ingredients: [{{quantity: \"1\", item: \"x\"}}], instructions: [\"y\"]}}\n{}",
        recipe_json("First"),
        recipe_json("Third"),
    );

    let report = RecipeParser::new().parse(&raw);
    assert_eq!(report.source, ParseSource::Json);
    let found: Vec<&str> = report.recipes.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(found, vec!["First", "Third"]);
    assert_eq!(report.rejections.len(), 1);
    assert_eq!(report.rejections[0].stage, RejectionStage::Object);
    assert_eq!(report.rejections[0].index, 1);
}

#[test]
fn test_trailing_comma_repaired() {
    let clean = format!(r#"{{"recipes":[{}]}}"#, recipe_json("Gimlet"));
    let trailing = format!(r#"{{"recipes":[{},]}}"#, recipe_json("Gimlet"));
    let parsed = parse_recipes_from_ai(&trailing);
    assert_eq!(parsed.recipes.len(), 1);
    assert_eq!(parsed, parse_recipes_from_ai(&clean));
}

#[test]
fn test_smart_quotes_repaired() {
    let raw = "{\u{201c}name\u{201d}: \u{201c}Gimlet\u{201d}, \"ingredients\": [{\"quantity\": \"2\", \"item\": \"gin\"}], \"instructions\": [\"Shake\"]}";
    let parsed = parse_recipes_from_ai(raw);
    assert_eq!(names(&parsed), vec!["Gimlet"]);
}

#[test]
fn test_fraction_conversion() {
    let raw = r#"{"name": "Fractions", "ingredients": [
        {"quantity": "0.75", "unit": "oz", "item": "a"},
        {"quantity": "2.5", "unit": "oz", "item": "b"},
        {"quantity": "1 1/2", "unit": "oz", "item": "c"},
        {"quantity": 0.75, "unit": "oz", "item": "d"},
        {"quantity": "0.1", "unit": "oz", "item": "e"}
    ], "instructions": ["Mix"]}"#;

    let parsed = parse_recipes_from_ai(raw);
    let quantities: Vec<&str> = parsed.recipes[0]
        .ingredients
        .iter()
        .map(|i| i.quantity.as_str())
        .collect();
    assert_eq!(quantities, vec!["3/4", "2 1/2", "1 1/2", "3/4", "0.1"]);
}

#[test]
fn test_unit_canonicalization() {
    let raw = r#"{"name": "Units", "ingredients": [
        {"quantity": "2", "unit": "ounces", "item": "a"},
        {"quantity": "1", "unit": "teaspoon", "item": "b"},
        {"quantity": "30", "unit": "milliliters", "item": "c"},
        {"quantity": "2", "unit": "splashes", "item": "d"},
        {"quantity": "1", "item": "e"}
    ], "instructions": ["Mix"]}"#;

    let parsed = parse_recipes_from_ai(raw);
    let units: Vec<&str> = parsed.recipes[0]
        .ingredients
        .iter()
        .map(|i| i.unit.as_str())
        .collect();
    assert_eq!(units, vec!["oz", "tsp", "ml", "splashes", ""]);
}

#[test]
fn test_markdown_fallback_activates() {
    let raw = "### Daiquiri\n\
        **Ingredients**\n\
        - 2 oz white rum\n\
        - 0.75 oz lime juice\n\
        **Instructions**\n\
        1. Shake with ice.\n\
        2. Strain into a coupe.\n";

    let report = RecipeParser::new().parse(raw);
    assert_eq!(report.source, ParseSource::Markdown);
    assert_eq!(report.recipes.len(), 1);
    assert_eq!(report.recipes[0].ingredients[1].quantity, "3/4");
}

#[test]
fn test_unrelated_text_yields_empty_result() {
    let parsed = parse_recipes_from_ai("random unrelated text");
    assert_eq!(parsed, ParsedRecipes { recipes: vec![] });
    assert_eq!(
        serde_json::to_string(&parsed).unwrap(),
        r#"{"recipes":[]}"#
    );
}

#[test]
fn test_minimal_recipe_gets_defaults() {
    let raw = r#"{"recipes":[{"name":"X","ingredients":[{"quantity":"1","unit":"oz","item":"Y"}],"instructions":["Z"]}]}"#;
    let parsed = parse_recipes_from_ai(raw);
    assert_eq!(parsed.recipes.len(), 1);

    let recipe = &parsed.recipes[0];
    assert_eq!(recipe.description, "");
    assert!(recipe.tags.is_empty());
    assert!(recipe.glassware.is_none());
    assert!(recipe.garnish.is_none());
}

#[test]
fn test_invalid_recipe_filtered_from_valid_batch() {
    let raw = format!(
        r#"{{"recipes": [{}, {{"name": "No Steps", "ingredients": [{{"quantity": "1", "item": "x"}}], "instructions": []}}, {}]}}"#,
        recipe_json("Kept"),
        recipe_json("Also Kept"),
    );
    let report = RecipeParser::new().parse(&raw);
    assert_eq!(report.recipes.len(), 2);
    assert_eq!(report.rejections.len(), 1);
    assert_eq!(report.rejections[0].stage, RejectionStage::Recipe);
    assert_eq!(report.rejections[0].index, 1);
    assert_eq!(
        report.summary(),
        "2 of 3 recipes imported; 1 skipped: no valid instructions"
    );
}

#[test]
fn test_broken_envelope_fails_whole_batch() {
    let raw = format!(r#"{} {{"recipes": "none"}}"#, recipe_json("Lost"));
    let report = RecipeParser::new().parse(&raw);
    assert!(report.recipes.is_empty());
    assert_eq!(report.source, ParseSource::None);
    assert_eq!(report.rejections[0].stage, RejectionStage::Envelope);
}
