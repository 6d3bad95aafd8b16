//! Soft repair of almost-JSON.
//!
//! Only two fixes are attempted: typographic quotes are straightened and
//! trailing commas before `}` / `]` are dropped. Anything needing structural
//! surgery (missing braces, unquoted keys) is left to fail.

use serde_json::Value;

/// Straighten typographic quotes and drop trailing commas.
pub fn soft_repair(broken: &str) -> String {
    remove_trailing_commas(&straighten_quotes(broken))
}

/// Parse `text` strictly, retrying exactly once after [`soft_repair`].
///
/// Returns the parsed value and whether the repair was needed, or the error
/// from the repaired attempt.
pub fn parse_with_repair(text: &str) -> Result<(Value, bool), serde_json::Error> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => Ok((value, false)),
        Err(_) => serde_json::from_str::<Value>(&soft_repair(text)).map(|value| (value, true)),
    }
}

/// Replace typographic quotes used as JSON delimiters with straight ones.
///
/// Curly double quotes inside a straight-quoted string are content and are
/// left as they are; a string opened by a curly quote is closed by the next
/// curly or straight double quote.
fn straighten_quotes(s: &str) -> String {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Quote {
        Outside,
        Straight,
        Curly,
    }

    let mut result = String::with_capacity(s.len());
    let mut state = Quote::Outside;
    let mut escape_next = false;

    for c in s.chars() {
        if escape_next {
            escape_next = false;
            result.push(c);
            continue;
        }

        let curly_double = matches!(
            c,
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}'
        );
        let curly_single = matches!(
            c,
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}'
        );

        match state {
            Quote::Outside if c == '"' => state = Quote::Straight,
            Quote::Outside if curly_double => {
                state = Quote::Curly;
                result.push('"');
                continue;
            }
            Quote::Straight | Quote::Curly if c == '\\' => escape_next = true,
            Quote::Straight if c == '"' => state = Quote::Outside,
            Quote::Curly if c == '"' || curly_double => {
                state = Quote::Outside;
                result.push('"');
                continue;
            }
            _ => {}
        }

        result.push(if curly_single { '\'' } else { c });
    }
    result
}

/// Remove commas that are followed only by whitespace and a closing bracket,
/// leaving string contents alone.
fn remove_trailing_commas(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len());
    let mut in_string = false;
    let mut escape_next = false;

    for (i, &c) in chars.iter().enumerate() {
        if escape_next {
            escape_next = false;
            result.push(c);
            continue;
        }

        if in_string {
            match c {
                '\\' => escape_next = true,
                '"' => in_string = false,
                _ => {}
            }
            result.push(c);
            continue;
        }

        match c {
            '"' => in_string = true,
            ',' => {
                let next = chars[i + 1..].iter().copied().find(|ch| !ch.is_whitespace());
                if matches!(next, Some('}') | Some(']')) {
                    continue;
                }
            }
            _ => {}
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trailing_comma_in_array_and_object() {
        let broken = r#"{"recipes": [{"name": "A", "tags": ["x", "y",],},]}"#;
        let (value, repaired) = parse_with_repair(broken).unwrap();
        assert!(repaired);
        assert_eq!(value, json!({"recipes": [{"name": "A", "tags": ["x", "y"]}]}));
    }

    #[test]
    fn test_trailing_comma_before_newline() {
        let broken = "{\"a\": 1,\n  \n}";
        assert_eq!(soft_repair(broken), "{\"a\": 1\n  \n}");
    }

    #[test]
    fn test_commas_inside_strings_kept() {
        let text = r#"{"note": "shake, ]strain"}"#;
        assert_eq!(soft_repair(text), text);
    }

    #[test]
    fn test_smart_quotes_straightened() {
        let broken = "{\u{201C}name\u{201D}: \u{201C}Bee\u{2019}s Knees\u{201D}}";
        let (value, repaired) = parse_with_repair(broken).unwrap();
        assert!(repaired);
        assert_eq!(value["name"], "Bee's Knees");
    }

    #[test]
    fn test_curly_quotes_inside_strings_kept() {
        let broken = "{\"name\": \"Sour\", \"description\": \"The \u{201C}best\u{201D} sour\", \"tags\": [\"x\",]}";
        let (value, repaired) = parse_with_repair(broken).unwrap();
        assert!(repaired);
        assert_eq!(value["description"], "The \u{201C}best\u{201D} sour");
        assert_eq!(value["tags"], json!(["x"]));
    }

    #[test]
    fn test_valid_json_not_marked_repaired() {
        let (value, repaired) = parse_with_repair(r#"{"a": [1, 2]}"#).unwrap();
        assert!(!repaired);
        assert_eq!(value, json!({"a": [1, 2]}));
    }

    #[test]
    fn test_structural_damage_not_repaired() {
        assert!(parse_with_repair(r#"{name: "unquoted key"}"#).is_err());
        assert!(parse_with_repair(r#"{"a": [1, 2}"#).is_err());
    }
}
