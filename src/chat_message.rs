use crate::constants::CONTEXT_USED_TAG;
use crate::format::{format_message_text, Block, FormattedText, Inline, Spans};
use crate::models::{Message, Sender};
use chrono::{DateTime, Local};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::core::{break_words, Fragment, Word};
use textwrap::wrap_algorithms::wrap_first_fit;
use textwrap::WordSeparator;
use unicode_width::UnicodeWidthStr;

const CONTENT_PREFIX: &str = "│ ";
const BULLET: &str = "• ";

/// One entry of the visual log: the message plus its formatted body.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    message: Message,
    formatted: FormattedText,
    timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(message: Message) -> Self {
        let formatted = format_message_text(&message.text);
        Self {
            message,
            formatted,
            timestamp: Local::now(),
        }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn formatted(&self) -> &FormattedText {
        &self.formatted
    }

    pub fn render(&self, width: u16) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let base_style = self.get_base_style();

        self.render_header(&mut lines, base_style);
        self.render_content(&mut lines, width, base_style);
        self.render_context_tag(&mut lines, base_style);
        self.render_footer(&mut lines, base_style);

        lines
    }

    fn indent(&self) -> &'static str {
        if self.message.sender == Sender::User {
            "  "
        } else {
            ""
        }
    }

    fn get_base_style(&self) -> Style {
        if self.message.is_error {
            return Style::default()
                .fg(Color::Rgb(153, 27, 27))
                .bg(Color::Rgb(254, 226, 226));
        }

        Style::default().fg(match self.message.sender {
            Sender::User => Color::Rgb(255, 223, 128), // Warmer yellow
            Sender::Bot => Color::Rgb(144, 238, 144),  // Softer green
        })
    }

    fn render_header(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        let timestamp = self.timestamp.format("%H:%M").to_string();
        let who = match self.message.sender {
            Sender::User => "Tú",
            Sender::Bot => "Asistente",
        };

        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("┌─".to_string(), style),
            Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
            Span::styled(" ", style),
            Span::styled(who.to_string(), style.add_modifier(Modifier::BOLD)),
        ]));
    }

    fn render_content(&self, lines: &mut Vec<Line<'static>>, width: u16, style: Style) {
        let indent = self.indent();
        let wrap_width = (width as usize)
            .saturating_sub(indent.width() + CONTENT_PREFIX.width())
            .max(1);

        for (idx, block) in self.formatted.blocks.iter().enumerate() {
            match block {
                Block::Paragraph(paragraph) => {
                    if idx > 0 {
                        lines.push(self.content_line(Vec::new(), style));
                    }
                    for source in paragraph {
                        for row in wrap_spans(source, wrap_width, style) {
                            lines.push(self.content_line(row, style));
                        }
                    }
                }
                Block::Lines(plain) => {
                    for source in plain {
                        for row in wrap_spans(source, wrap_width, style) {
                            lines.push(self.content_line(row, style));
                        }
                    }
                }
                Block::List(items) => {
                    let item_width = wrap_width.saturating_sub(BULLET.width()).max(1);
                    for item in items {
                        for (row_idx, mut row) in
                            wrap_spans(item, item_width, style).into_iter().enumerate()
                        {
                            let marker = if row_idx == 0 { BULLET } else { "  " };
                            row.insert(0, Span::styled(marker.to_string(), style));
                            lines.push(self.content_line(row, style));
                        }
                    }
                }
            }
        }
    }

    fn content_line(&self, mut spans: Vec<Span<'static>>, style: Style) -> Line<'static> {
        spans.insert(0, Span::styled(CONTENT_PREFIX.to_string(), style));
        spans.insert(0, Span::styled(self.indent().to_string(), style));
        Line::from(spans)
    }

    fn render_context_tag(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        if !self.message.context_used {
            return;
        }

        lines.push(self.content_line(
            vec![Span::styled(
                format!("⛁ {}", CONTEXT_USED_TAG),
                style.add_modifier(Modifier::DIM | Modifier::ITALIC),
            )],
            style,
        ));
    }

    fn render_footer(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("╰─".to_string(), style),
        ]));
    }
}

/// A wrappable word carrying the style of the span it came from.
#[derive(Debug)]
struct StyledWord<'a> {
    word: Word<'a>,
    style: Style,
}

impl Fragment for StyledWord<'_> {
    fn width(&self) -> f64 {
        self.word.width()
    }

    fn whitespace_width(&self) -> f64 {
        self.word.whitespace_width()
    }

    fn penalty_width(&self) -> f64 {
        self.word.penalty_width()
    }
}

/// First-fit wrap over the spans of one source line. Words wider than
/// `width` are broken, and bold stays on every piece of a bold span.
fn wrap_spans(source: &Spans, width: usize, style: Style) -> Vec<Vec<Span<'static>>> {
    let mut words = Vec::new();
    for inline in source {
        let (text, span_style) = match inline {
            Inline::Text(t) => (t.as_str(), style),
            Inline::Bold(t) => (t.as_str(), style.add_modifier(Modifier::BOLD)),
        };
        let found = WordSeparator::AsciiSpace.find_words(text);
        words.extend(
            break_words(found, width)
                .into_iter()
                .map(|word| StyledWord { word, style: span_style }),
        );
    }

    wrap_first_fit(&words, &[width as f64])
        .into_iter()
        .map(|row| {
            let last = row.len().saturating_sub(1);
            row.iter()
                .enumerate()
                .map(|(idx, styled)| {
                    let text = if idx == last {
                        styled.word.word.to_string()
                    } else {
                        format!("{}{}", styled.word.word, styled.word.whitespace)
                    };
                    Span::styled(text, styled.style)
                })
                .collect::<Vec<_>>()
        })
        .collect()
}
