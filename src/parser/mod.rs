pub mod blocks;

use scraper::Html;

use blocks::Block;

/// Structured extraction of one article page.
#[derive(Debug, Clone, Default)]
pub struct Article {
    pub title: String,
    pub paragraphs: Vec<String>,
    pub sections: Vec<String>,
    pub raw_markup: String,
}

impl Article {
    /// First two paragraphs joined by a space.
    pub fn summary(&self) -> String {
        self.paragraphs
            .iter()
            .take(2)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// All paragraphs separated by blank lines, the synthesizer's input.
    pub fn full_text(&self) -> String {
        self.paragraphs.join("\n\n")
    }
}

/// Two-pass pipeline: html → blocks → article.
pub fn parse_article(html: &str) -> Article {
    let doc = Html::parse_document(html);
    let title = blocks::page_title(&doc);
    let classified = blocks::classify_elements(&doc);

    let mut paragraphs = Vec::new();
    let mut sections = Vec::new();
    for block in classified {
        match block {
            Block::Heading(text) => sections.push(text),
            Block::Paragraph(text) => paragraphs.push(text),
        }
    }

    Article {
        title,
        paragraphs,
        sections,
        raw_markup: html.to_string(),
    }
}

// ── Tests ──
