//! Locating JSON objects inside free text.
//!
//! A small scanner walks the text once, tracking brace depth and whether it is
//! inside a string literal, and yields every balanced top-level `{...}` span.
//! It does not check that a span is valid JSON, only that its braces match.

/// Scanner state while walking the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Outside any object; prose, fences and stray `}` are skipped
    Outside,
    /// Inside an object at the given depth
    Object { start: usize, depth: usize },
    /// Inside a string literal of an object
    InString { start: usize, depth: usize },
    /// Just after a backslash inside a string literal
    Escape { start: usize, depth: usize },
}

/// Iterator over balanced top-level `{...}` spans of a text.
pub struct JsonObjects<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for JsonObjects<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let text = self.text;
        let mut state = ScanState::Outside;

        for (offset, ch) in text[self.pos..].char_indices() {
            let i = self.pos + offset;
            state = match (state, ch) {
                (ScanState::Outside, '{') => ScanState::Object { start: i, depth: 1 },
                (ScanState::Outside, _) => ScanState::Outside,

                (ScanState::Object { start, depth }, '{') => ScanState::Object {
                    start,
                    depth: depth + 1,
                },
                (ScanState::Object { start, depth }, '}') => {
                    if depth == 1 {
                        self.pos = i + 1;
                        return Some(&text[start..=i]);
                    }
                    ScanState::Object {
                        start,
                        depth: depth - 1,
                    }
                }
                (ScanState::Object { start, depth }, '"') => ScanState::InString { start, depth },
                (s @ ScanState::Object { .. }, _) => s,

                (ScanState::InString { start, depth }, '\\') => ScanState::Escape { start, depth },
                (ScanState::InString { start, depth }, '"') => ScanState::Object { start, depth },
                (s @ ScanState::InString { .. }, _) => s,

                (ScanState::Escape { start, depth }, _) => ScanState::InString { start, depth },
            };
        }

        // Either no further `{` or an object truncated before its closing brace.
        self.pos = text.len();
        None
    }
}

/// Iterate over every balanced top-level `{...}` span in `text`, in order.
///
/// Braces inside string literals (including escaped quotes) are ignored, and
/// an object left unclosed at the end of the text is not yielded.
///
/// # Examples
///
/// ```
/// use cocktail_import::parser::extract::json_objects;
///
/// let text = r#"Here you go: {"a": "}"} and {"b": {"c": 1}}"#;
/// let spans: Vec<&str> = json_objects(text).collect();
/// assert_eq!(spans, vec![r#"{"a": "}"}"#, r#"{"b": {"c": 1}}"#]);
/// ```
pub fn json_objects(text: &str) -> JsonObjects<'_> {
    JsonObjects { text, pos: 0 }
}

/// Eager form of [`json_objects`].
pub fn extract_json_objects(text: &str) -> Vec<&str> {
    json_objects(text).collect()
}
