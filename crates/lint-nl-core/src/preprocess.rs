//! Text preparation ahead of annotation.
//!
//! The annotator expects plain running prose. Input often arrives as
//! Markdown, so this module extracts the prose (paragraphs, block quotes,
//! list items), drops everything that is not sentence material (headings,
//! code, tables, frontmatter), normalizes quotemark variants to `"`, and
//! collapses whitespace runs.
//!
//! Uses pulldown-cmark for proper CommonMark parsing rather than
//! regex-based stripping; that handles nested code blocks, HTML entities,
//! and reference links correctly.

use std::sync::LazyLock;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use regex::Regex;

/// Quotemark variants normalized to a straight double quote.
const QUOTEMARKS: &[char] = &['«', '»', '‘', '’', '‛', '“', '”', '„', '‟', '‹', '›'];

/// Regex for whitespace runs.
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Full preparation pipeline: strip Markdown to prose, collapse
/// whitespace, normalize quotemarks.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn preprocess(text: &str) -> String {
    normalize_quotemarks(&collapse_whitespace(&strip_to_prose(text)))
}

/// Strip markdown formatting, returning plain prose text.
///
/// Removes code blocks, inline code, headings, tables, and YAML
/// frontmatter; keeps paragraph, blockquote, list, and link text.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_to_prose(text: &str) -> String {
    // Handle YAML frontmatter before parsing (pulldown-cmark doesn't know
    // about it).
    let text = strip_frontmatter(text);

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(&text, options);

    let mut result = String::with_capacity(text.len() / 2);
    let mut skip_depth: usize = 0;

    for event in parser {
        match event {
            // Skip content inside code blocks, headings, and tables
            Event::Start(Tag::CodeBlock(_) | Tag::Heading { .. } | Tag::Table(_)) => {
                skip_depth += 1;
            }
            Event::End(TagEnd::CodeBlock | TagEnd::Heading(_) | TagEnd::Table) => {
                skip_depth = skip_depth.saturating_sub(1);
            }

            // Collect text when not skipping
            Event::Text(t) if skip_depth == 0 => {
                result.push_str(&t);
            }
            Event::SoftBreak | Event::HardBreak if skip_depth == 0 => {
                result.push(' ');
            }

            // Paragraph and list-item boundaries become spaces
            Event::End(TagEnd::Paragraph | TagEnd::Item) if skip_depth == 0 => {
                result.push(' ');
            }

            // Skip inline code text
            Event::Code(_) => {}

            _ => {}
        }
    }

    result
}

/// Normalize curly quotes, low quotes, and guillemets to `"`.
pub fn normalize_quotemarks(text: &str) -> String {
    text.chars()
        .map(|c| if QUOTEMARKS.contains(&c) { '"' } else { c })
        .collect()
}

/// Collapse whitespace runs to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Strip YAML frontmatter delimited by `---` lines.
fn strip_frontmatter(text: &str) -> String {
    let trimmed = text.trim_start();
    if !trimmed.starts_with("---") {
        return text.to_string();
    }

    let after_opening = &trimmed[3..];
    let Some(close_pos) = after_opening.find("\n---") else {
        return text.to_string();
    };

    let remainder = &after_opening[close_pos + 4..];
    remainder
        .strip_prefix('\n')
        .unwrap_or(remainder)
        .to_string()
}
