use scraper::{ElementRef, Html, Node};

/// Reduce an HTML document to its visible text, one block per line.
///
/// Hidden elements and script/style content are skipped; block-level elements
/// and `<br>` end the current line.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut lines = Vec::new();
    let mut current = Vec::new();
    collect_text(&document.root_element(), &mut current, &mut lines);
    flush_line(&mut current, &mut lines);
    lines.join("\n")
}

fn collect_text(element: &ElementRef, current: &mut Vec<String>, lines: &mut Vec<String>) {
    if is_hidden(element) || should_skip_element(element) {
        return;
    }

    let tag_name = element.value().name().to_lowercase();
    if tag_name == "br" {
        flush_line(current, lines);
        return;
    }

    let block = is_block_element(&tag_name);
    if block {
        flush_line(current, lines);
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let normalized = normalize_whitespace(text);
                if !normalized.is_empty() {
                    current.push(normalized);
                }
            }
            Node::Element(_) => {
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(&child_ref, current, lines);
                }
            }
            _ => {}
        }
    }

    if block {
        flush_line(current, lines);
    }
}

fn flush_line(current: &mut Vec<String>, lines: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }
    let merged = current.join(" ").trim().to_string();
    if !merged.is_empty() {
        lines.push(merged);
    }
    current.clear();
}

fn is_hidden(element: &ElementRef) -> bool {
    element.value().attr("hidden").is_some()
        || element
            .value()
            .attr("style")
            .map(|s| s.contains("display: none") || s.contains("visibility: hidden"))
            .unwrap_or(false)
}

fn is_block_element(tag: &str) -> bool {
    matches!(
        tag,
        "article"
            | "aside"
            | "blockquote"
            | "dd"
            | "div"
            | "dl"
            | "dt"
            | "figcaption"
            | "figure"
            | "footer"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "header"
            | "hr"
            | "li"
            | "main"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "table"
            | "tr"
            | "ul"
    )
}

fn should_skip_element(element: &ElementRef) -> bool {
    matches!(
        element.value().name().to_lowercase().as_str(),
        "script" | "style" | "noscript" | "iframe" | "canvas" | "svg" | "head"
    )
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
