// src/format.rs

//! Light formatting for assistant replies: `- ` list items, `**bold**`
//! spans, paragraphs and line breaks.
//!
//! The result is a small block tree that the terminal renderer walks
//! directly; [`FormattedText::to_markup`] produces the equivalent HTML
//! fragment.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Bold(String),
}

/// One source line after bold detection.
pub type Spans = Vec<Inline>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Lines separated by line breaks, wrapped in a paragraph.
    Paragraph(Vec<Spans>),
    /// Contiguous `- ` items.
    List(Vec<Spans>),
    /// Plain lines between lists; only produced when the text has a list.
    Lines(Vec<Spans>),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattedText {
    pub blocks: Vec<Block>,
}

impl FormattedText {
    pub fn has_list(&self) -> bool {
        self.blocks.iter().any(|b| matches!(b, Block::List(_)))
    }

    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        let last = self.blocks.len().saturating_sub(1);

        for (idx, block) in self.blocks.iter().enumerate() {
            match block {
                Block::Paragraph(lines) => {
                    out.push_str("<p>");
                    push_lines(&mut out, lines);
                    out.push_str("</p>");
                }
                Block::List(items) => {
                    out.push_str("<ul>");
                    for item in items {
                        out.push_str("<li>");
                        push_spans(&mut out, item);
                        out.push_str("</li>");
                    }
                    out.push_str("</ul>");
                }
                Block::Lines(lines) => {
                    push_lines(&mut out, lines);
                    if idx < last {
                        out.push_str("<br>");
                    }
                }
            }
        }

        out
    }
}

/// Formats a reply. Deterministic and side-effect free.
///
/// When any line starts with `- `, list mode is used and no paragraphs are
/// produced; otherwise the text is split into paragraphs on blank lines.
/// Bold spans are applied in both modes.
pub fn format_message_text(text: &str) -> FormattedText {
    let text = text.replace("\r\n", "\n");
    let lines: Vec<&str> = text.split('\n').collect();

    let blocks = if lines.iter().any(|l| list_item(l).is_some()) {
        list_blocks(&lines)
    } else {
        paragraph_blocks(&text)
    };

    FormattedText { blocks }
}

fn list_item(line: &str) -> Option<&str> {
    line.strip_prefix("- ").filter(|rest| !rest.is_empty())
}

fn list_blocks(lines: &[&str]) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut items: Vec<Spans> = Vec::new();
    let mut plain: Vec<Spans> = Vec::new();

    for line in lines {
        match list_item(line) {
            Some(item) => {
                if !plain.is_empty() {
                    blocks.push(Block::Lines(std::mem::take(&mut plain)));
                }
                items.push(parse_spans(item));
            }
            None => {
                if !items.is_empty() {
                    blocks.push(Block::List(std::mem::take(&mut items)));
                }
                plain.push(parse_spans(line));
            }
        }
    }

    if !items.is_empty() {
        blocks.push(Block::List(items));
    }
    if !plain.is_empty() {
        blocks.push(Block::Lines(plain));
    }

    blocks
}

fn paragraph_blocks(text: &str) -> Vec<Block> {
    // Splitting is left to right and non-overlapping, so a run of three
    // newlines leaves a leading break in the following paragraph.
    text.split("\n\n")
        .map(|chunk| Block::Paragraph(chunk.split('\n').map(parse_spans).collect()))
        .collect()
}

fn parse_spans(line: &str) -> Spans {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for caps in BOLD.captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > cursor {
            spans.push(Inline::Text(line[cursor..whole.start()].to_string()));
        }
        spans.push(Inline::Bold(inner.as_str().to_string()));
        cursor = whole.end();
    }

    if cursor < line.len() || spans.is_empty() {
        spans.push(Inline::Text(line[cursor..].to_string()));
    }

    spans
}

fn push_lines(out: &mut String, lines: &[Spans]) {
    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 {
            out.push_str("<br>");
        }
        push_spans(out, line);
    }
}

fn push_spans(out: &mut String, spans: &[Inline]) {
    for span in spans {
        match span {
            Inline::Text(t) => out.push_str(&escape(t)),
            Inline::Bold(t) => {
                out.push_str("<strong>");
                out.push_str(&escape(t));
                out.push_str("</strong>");
            }
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
