//! Plain-text extraction from Markdown bodies

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Longest excerpt derived from a body, in characters
pub const EXCERPT_LENGTH: usize = 200;

/// Plain text of the first paragraph in `markdown`.
///
/// Falls back to the first block with any text (a heading, a list item)
/// when the body has no paragraph.
pub fn first_paragraph(markdown: &str) -> Option<String> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);

    let mut in_paragraph = false;
    let mut paragraph = String::new();
    let mut fallback = String::new();

    for event in parser {
        match event {
            Event::Start(Tag::Paragraph) => in_paragraph = true,
            Event::End(TagEnd::Paragraph) => {
                in_paragraph = false;
                if !paragraph.trim().is_empty() {
                    break;
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if in_paragraph {
                    paragraph.push_str(&text);
                } else if fallback.is_empty() {
                    fallback.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak if in_paragraph => paragraph.push(' '),
            _ => {}
        }
    }

    [paragraph, fallback]
        .into_iter()
        .map(|s| collapse_whitespace(&s))
        .find(|s| !s.is_empty())
}

/// Excerpt for a body without an authored one
pub fn excerpt(markdown: &str) -> Option<String> {
    first_paragraph(markdown).map(|text| truncate(&text, EXCERPT_LENGTH))
}

/// Cut `text` to at most `max_chars` characters, marking the cut with `…`
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.truncate(cut.trim_end().len());
    cut.push('…');
    cut
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
