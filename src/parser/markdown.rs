//! Markdown recipe cards, used when the text holds no JSON at all.
//!
//! Every line is first classified on its own ([`Line`]). The text is split into
//! cards on `---` separator lines and on top-level headings, then each card is
//! folded through a small section state machine into a recipe object with the
//! canonical keys. Cards without a name, a usable ingredient and an instruction
//! are dropped silently.

use crate::normalize::is_measure_word;
use crate::schema::IngredientSchema;
use log::debug;
use serde_json::{json, Map, Value};

/// Section labels recognised inside a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Description,
    Ingredients,
    Instructions,
    Glassware,
    Garnish,
    Tags,
}

impl Label {
    fn from_name(name: &str) -> Option<Self> {
        match compact(name).as_str() {
            "description" | "about" => Some(Label::Description),
            "ingredients" | "ingredient" => Some(Label::Ingredients),
            "instructions" | "instruction" | "method" | "directions" | "steps"
            | "preparation" => Some(Label::Instructions),
            "glassware" | "glass" => Some(Label::Glassware),
            "garnish" | "garnishes" => Some(Label::Garnish),
            "tags" | "tag" => Some(Label::Tags),
            _ => None,
        }
    }
}

/// One classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    /// A `---` rule
    Separator,
    Heading { level: usize, text: String },
    /// `**Label**`, `**Label**: value` or `Label: value`
    Label { label: Label, value: &'a str },
    /// `- item`, `* item` or `• item`
    Bullet(&'a str),
    /// `1. step` or `1) step`
    Numbered(&'a str),
    /// `_text_` or `*text*`
    Emphasis(&'a str),
    Prose(&'a str),
}

impl<'a> Line<'a> {
    pub fn classify(raw: &'a str) -> Line<'a> {
        let line = raw.trim();
        if line.is_empty() {
            return Line::Blank;
        }
        if line.len() >= 3 && line.chars().all(|c| c == '-') {
            return Line::Separator;
        }
        if line.starts_with('#') {
            let level = line.chars().take_while(|&c| c == '#').count();
            let text = line[level..].trim().trim_end_matches('#').trim();
            if let Some(label) = Label::from_name(text) {
                return Line::Label { label, value: "" };
            }
            if let Some((label, value)) = parse_label(text) {
                return Line::Label { label, value };
            }
            return Line::Heading {
                level,
                text: strip_markup(text).to_string(),
            };
        }
        if let Some(rest) = ["- ", "* ", "• ", "+ "]
            .iter()
            .find_map(|marker| line.strip_prefix(marker))
        {
            return Line::Bullet(rest.trim());
        }
        if let Some(rest) = strip_step_number(line) {
            return Line::Numbered(rest);
        }
        if let Some((label, value)) = parse_label(line) {
            return Line::Label { label, value };
        }
        if let Some(label) = Label::from_name(line) {
            return Line::Label { label, value: "" };
        }
        if line.len() > 2
            && ((line.starts_with('_') && line.ends_with('_'))
                || (line.starts_with('*') && line.ends_with('*') && !line.starts_with("**")))
        {
            return Line::Emphasis(line[1..line.len() - 1].trim());
        }
        Line::Prose(line)
    }

    /// Headings at this level or above begin a new card.
    fn starts_card(&self) -> bool {
        matches!(self, Line::Heading { level, .. } if *level <= 3)
    }
}

/// Parse a markdown document into a `{ "recipes": [...] }` envelope.
pub fn parse_markdown(text: &str) -> Value {
    let mut recipes = Vec::new();
    let mut card: Vec<Line<'_>> = Vec::new();

    for raw in text.lines() {
        let line = Line::classify(raw);
        if line == Line::Separator || line.starts_card() {
            recipes.extend(fold_card(&card));
            card.clear();
        }
        if line != Line::Separator {
            card.push(line);
        }
    }
    recipes.extend(fold_card(&card));

    json!({ "recipes": recipes })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Ingredients,
    Instructions,
    Other,
}

#[derive(Debug, Default)]
struct CardDraft {
    name: Option<String>,
    description: Vec<String>,
    ingredients: Vec<Value>,
    instructions: Vec<String>,
    glassware: Option<String>,
    garnish: Option<String>,
    tags: Vec<String>,
}

fn fold_card(lines: &[Line<'_>]) -> Option<Value> {
    if lines.is_empty() {
        return None;
    }

    let mut draft = CardDraft::default();
    let mut section = Section::Preamble;

    for line in lines {
        section = match (section, line) {
            (_, Line::Blank) | (_, Line::Separator) => section,

            (_, Line::Heading { text, .. }) if draft.name.is_none() => {
                draft.name = Some(text.clone()).filter(|t| !t.is_empty());
                Section::Preamble
            }
            (_, Line::Heading { .. }) => Section::Other,

            (_, Line::Label { label, value }) => apply_label(&mut draft, *label, value),

            (Section::Ingredients, Line::Bullet(text) | Line::Numbered(text)) => {
                draft.ingredients.push(ingredient_from_line(text));
                section
            }
            (Section::Instructions, Line::Bullet(text) | Line::Numbered(text)) => {
                push_step(&mut draft.instructions, text);
                section
            }
            (Section::Instructions, Line::Prose(text)) => {
                match draft.instructions.last_mut() {
                    Some(last) => {
                        last.push(' ');
                        last.push_str(text);
                    }
                    None => push_step(&mut draft.instructions, text),
                }
                section
            }
            (Section::Preamble, Line::Prose(text) | Line::Emphasis(text))
                if draft.name.is_some() =>
            {
                draft.description.push(text.to_string());
                section
            }
            _ => section,
        };
    }

    draft.into_value()
}

fn apply_label(draft: &mut CardDraft, label: Label, value: &str) -> Section {
    let value = value.trim();
    match label {
        Label::Ingredients => Section::Ingredients,
        Label::Instructions => {
            push_step(&mut draft.instructions, value);
            Section::Instructions
        }
        Label::Description => {
            if !value.is_empty() {
                draft.description.push(strip_markup(value).to_string());
            }
            Section::Preamble
        }
        Label::Glassware => {
            draft.glassware = Some(strip_markup(value).to_string()).filter(|v| !v.is_empty());
            Section::Other
        }
        Label::Garnish => {
            draft.garnish = Some(strip_markup(value).to_string()).filter(|v| !v.is_empty());
            Section::Other
        }
        Label::Tags => {
            draft.tags.extend(split_tags(value));
            Section::Other
        }
    }
}

impl CardDraft {
    fn into_value(self) -> Option<Value> {
        let Some(name) = self.name else {
            debug!("Dropping markdown card without a heading");
            return None;
        };
        let has_ingredient = self
            .ingredients
            .iter()
            .any(|i| IngredientSchema::validate(i).is_ok());
        if !has_ingredient || self.instructions.is_empty() {
            debug!("Dropping markdown card '{}': incomplete recipe", name);
            return None;
        }

        let mut recipe = Map::new();
        recipe.insert("name".to_string(), Value::String(name));
        recipe.insert(
            "description".to_string(),
            Value::String(self.description.join(" ")),
        );
        recipe.insert("ingredients".to_string(), Value::Array(self.ingredients));
        recipe.insert("instructions".to_string(), json!(self.instructions));
        if let Some(glassware) = self.glassware {
            recipe.insert("glassware".to_string(), Value::String(glassware));
        }
        if let Some(garnish) = self.garnish {
            recipe.insert("garnish".to_string(), Value::String(garnish));
        }
        recipe.insert("tags".to_string(), json!(self.tags));
        Some(Value::Object(recipe))
    }
}

/// Split a free-text ingredient line into an ingredient object.
///
/// The line is read as `<quantity> [<unit>] <item>[, <notes>]`. A whole number
/// followed by a fraction forms one quantity (`1 1/2`), and the unit is only
/// taken when it is a known measure word so that `2 lime wedges` keeps
/// `lime wedges` as the item.
pub fn ingredient_from_line(line: &str) -> Value {
    let line = strip_markup(line.trim());
    let (body, notes) = match line.split_once(',') {
        Some((body, notes)) => (body.trim(), Some(notes.trim())),
        None => (line, None),
    };

    let tokens: Vec<&str> = body.split_whitespace().collect();
    let mut idx = 0;
    let mut quantity = String::new();

    if tokens.first().is_some_and(|t| is_quantity_token(t)) {
        quantity.push_str(tokens[0]);
        idx = 1;
        if tokens.get(1).is_some_and(|t| is_fraction_token(t)) {
            quantity.push(' ');
            quantity.push_str(tokens[1]);
            idx = 2;
        }
    }

    let mut unit = String::new();
    let remaining = tokens.len().saturating_sub(idx);
    if remaining >= 3
        && tokens[idx].trim_end_matches('.').eq_ignore_ascii_case("fl")
        && tokens[idx + 1].eq_ignore_ascii_case("oz")
    {
        unit = "fl oz".to_string();
        idx += 2;
    } else if remaining >= 2 && is_measure_word(tokens[idx]) {
        unit = tokens[idx].to_string();
        idx += 1;
    }

    let item = tokens[idx..].join(" ");

    let mut ingredient = Map::new();
    ingredient.insert("quantity".to_string(), Value::String(quantity));
    ingredient.insert("unit".to_string(), Value::String(unit));
    ingredient.insert("item".to_string(), Value::String(item));
    if let Some(notes) = notes.filter(|n| !n.is_empty()) {
        ingredient.insert("notes".to_string(), Value::String(notes.to_string()));
    }
    Value::Object(ingredient)
}

/// Strip a leading `1.` / `1)` / `-` step marker from an instruction line.
pub fn strip_step_marker(line: &str) -> &str {
    let line = line.trim();
    if let Some(rest) = strip_step_number(line) {
        return rest;
    }
    ["- ", "* ", "• "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .map(str::trim)
        .unwrap_or(line)
}

/// Comma-separated tag list, trimmed, empty entries dropped.
pub fn split_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|t| strip_markup(t.trim()).trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn push_step(steps: &mut Vec<String>, text: &str) {
    let text = strip_markup(text.trim()).trim();
    if !text.is_empty() {
        steps.push(text.to_string());
    }
}

fn strip_step_number(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix(|c| c == '.' || c == ')')?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

fn parse_label(line: &str) -> Option<(Label, &str)> {
    let (head, rest) = match line.strip_prefix("**") {
        Some(inner) => {
            let end = inner.find("**")?;
            (&inner[..end], &inner[end + 2..])
        }
        None => {
            let colon = line.find(':')?;
            (&line[..colon], &line[colon + 1..])
        }
    };
    let label = Label::from_name(head.trim().trim_end_matches(':'))?;
    Some((label, rest.trim_start().trim_start_matches(':').trim()))
}

fn is_quantity_token(token: &str) -> bool {
    let mut has_digit = false;
    for c in token.chars() {
        if c.is_ascii_digit() || is_vulgar_fraction(c) {
            has_digit = true;
        } else if !matches!(c, '/' | '.' | '-' | '\u{2013}') {
            return false;
        }
    }
    has_digit
}

fn is_fraction_token(token: &str) -> bool {
    is_quantity_token(token)
        && (token.contains('/') || token.chars().all(is_vulgar_fraction))
}

fn is_vulgar_fraction(c: char) -> bool {
    matches!(
        c,
        '\u{00BC}'..='\u{00BE}' | '\u{2150}'..='\u{215E}'
    )
}

fn strip_markup(text: &str) -> &str {
    text.trim().trim_matches(|c| c == '*' || c == '_').trim()
}

/// Lowercase and drop everything but letters and digits.
pub(crate) fn compact(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
