/// The system prompt used for extracting cocktail recipes as JSON.
///
/// Loaded from `prompt.txt` at compile time so it can be edited without
/// dealing with Rust string syntax.
pub const COCKTAIL_EXTRACTION_PROMPT: &str = include_str!("prompt.txt");

/// Build the system prompt, optionally naming the language of the source text.
pub fn build_extraction_prompt(language: Option<&str>) -> String {
    match language.map(str::trim).filter(|lang| !lang.is_empty()) {
        Some(lang) => format!(
            "{}\n\nThe source text is written in {lang}. Keep ingredient names and instructions in {lang}.",
            COCKTAIL_EXTRACTION_PROMPT
        ),
        None => COCKTAIL_EXTRACTION_PROMPT.to_string(),
    }
}
