/// Map a unit spelling to its canonical abbreviation.
///
/// Returns `None` for anything not in the table; garnish-style measures such
/// as "sprig" or "dash" are already canonical and are not listed.
pub fn canonical_unit(unit: &str) -> Option<&'static str> {
    let lowered = unit.trim().trim_end_matches('.').to_lowercase();
    match lowered.as_str() {
        "oz" | "ounce" | "ounces" | "fl oz" | "fl. oz" | "fluid ounce" | "fluid ounces" => {
            Some("oz")
        }
        "tsp" | "tsps" | "teaspoon" | "teaspoons" => Some("tsp"),
        "tbsp" | "tbsps" | "tbs" | "tablespoon" | "tablespoons" => Some("tbsp"),
        "ml" | "mls" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => Some("ml"),
        "cl" | "centiliter" | "centiliters" | "centilitre" | "centilitres" => Some("cl"),
        _ => None,
    }
}

/// Normalize a unit, passing unrecognized units through unchanged.
pub fn normalize_unit(unit: &str) -> String {
    match canonical_unit(unit) {
        Some(canonical) => canonical.to_string(),
        None => unit.trim().to_string(),
    }
}

/// Words accepted as the unit token of a free-text ingredient line.
///
/// Wider than [`canonical_unit`]: it also knows the bar measures that are kept
/// as written.
pub fn is_measure_word(word: &str) -> bool {
    if canonical_unit(word).is_some() {
        return true;
    }
    let lowered = word.trim().trim_end_matches('.').to_lowercase();
    matches!(
        lowered.as_str(),
        "dash"
            | "dashes"
            | "drop"
            | "drops"
            | "sprig"
            | "sprigs"
            | "twist"
            | "twists"
            | "leaf"
            | "leaves"
            | "splash"
            | "splashes"
            | "barspoon"
            | "barspoons"
            | "part"
            | "parts"
            | "cup"
            | "cups"
            | "pinch"
            | "pinches"
            | "slice"
            | "slices"
            | "wedge"
            | "wedges"
            | "l"
            | "g"
    )
}
