use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::widget::ChatWidget;

const MAX_INPUT_ROWS: usize = 5;

pub fn draw_chat(f: &mut Frame<'_>, area: Rect, widget: &mut ChatWidget) {
    let input_width = area.width.saturating_sub(2).max(1) as usize;
    let input_rows = wrap_input(widget.input().value(), input_width);
    let input_height = input_rows.len().clamp(1, MAX_INPUT_ROWS) as u16 + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),            // Messages
            Constraint::Length(1),         // Send control
            Constraint::Length(input_height), // Input
        ])
        .split(area);

    draw_messages(f, chunks[0], widget);
    widget.status().render(f, chunks[1]);
    draw_input(f, chunks[2], widget, &input_rows);
}

fn draw_messages(f: &mut Frame<'_>, area: Rect, widget: &mut ChatWidget) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Conversación ")
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line<'static>> = Vec::new();
    for message in widget.messages() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(message.render(inner.width));
    }

    let total_lines = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_scroll = total_lines.saturating_sub(inner.height);
    let scroll = widget.sync_scroll(max_scroll);

    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

fn draw_input(f: &mut Frame<'_>, area: Rect, widget: &ChatWidget, rows: &[String]) {
    let disabled = widget.input().is_disabled();
    let (title, style) = if disabled {
        (
            " Esperando respuesta... ",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        )
    } else {
        (" Mensaje ", Style::default().fg(Color::White))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let visible = inner.height.max(1) as usize;
    let first = rows.len().saturating_sub(visible);
    let shown: Vec<Line> = rows[first..]
        .iter()
        .map(|row| Line::styled(row.clone(), style))
        .collect();
    f.render_widget(Paragraph::new(shown), inner);

    if !disabled {
        let last = rows.last().map(String::as_str).unwrap_or("");
        let cursor_x = inner.x + (last.width() as u16).min(inner.width.saturating_sub(1));
        let cursor_y = inner.y + (rows.len() - first).saturating_sub(1) as u16;
        f.set_cursor_position((cursor_x, cursor_y));
    }
}

/// Wraps the input value, honouring embedded newlines.
fn wrap_input(value: &str, width: usize) -> Vec<String> {
    let rows: Vec<String> = textwrap::wrap(value, width)
        .into_iter()
        .map(|row| row.into_owned())
        .collect();
    if rows.is_empty() {
        vec![String::new()]
    } else {
        rows
    }
}
