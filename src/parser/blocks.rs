use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1#firstHeading").unwrap());
static ANY_H1_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static CONTENT_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("#mw-content-text").unwrap());
static BLOCK_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2, h3, p").unwrap());
static EDIT_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[edit\]$").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(String),
    Paragraph(String),
}

/// Page title from `h1#firstHeading`, falling back to the first `h1`.
pub fn page_title(doc: &Html) -> String {
    doc.select(&TITLE_SEL)
        .next()
        .or_else(|| doc.select(&ANY_H1_SEL).next())
        .map(|h| element_text(&h).trim().to_string())
        .unwrap_or_default()
}

/// Classify the content container's headings and paragraphs in document order.
/// Empty paragraphs and headings are dropped.
pub fn classify_elements(doc: &Html) -> Vec<Block> {
    let Some(content) = doc.select(&CONTENT_SEL).next() else {
        return Vec::new();
    };

    content
        .select(&BLOCK_SEL)
        .filter_map(|el| match el.value().name() {
            "h2" | "h3" => {
                let text = strip_edit_marker(&element_text(&el));
                (!text.is_empty()).then_some(Block::Heading(text))
            }
            _ => {
                let text = element_text(&el).trim().to_string();
                (!text.is_empty()).then_some(Block::Paragraph(text))
            }
        })
        .collect()
}

fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>()
}

/// Trim and drop a trailing `[edit]` link label.
fn strip_edit_marker(heading: &str) -> String {
    EDIT_MARKER_RE.replace(heading.trim(), "").trim().to_string()
}

// ── Tests ──
