use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::widget::{ChatWidget, StatsPanel};

/// Stats panel on top, quick questions below.
pub fn draw_side_panel(f: &mut Frame<'_>, area: Rect, widget: &ChatWidget) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(area);

    draw_stats(f, chunks[0], widget.stats());
    draw_quick_questions(f, chunks[1], widget);
}

fn draw_stats(f: &mut Frame<'_>, area: Rect, panel: &StatsPanel) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Estadísticas ")
        .border_style(Style::default().fg(Color::DarkGray));

    let lines: Vec<Line> = match panel {
        StatsPanel::Loaded(stats) => stats
            .entries()
            .iter()
            .map(|(icon, value, label)| {
                Line::from(vec![
                    Span::raw(format!("{} ", icon)),
                    Span::styled(
                        value.to_string(),
                        Style::default()
                            .fg(Color::LightCyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!(" {}", label)),
                ])
            })
            .collect(),
        StatsPanel::Failed => panel
            .text_lines()
            .into_iter()
            .map(|l| Line::styled(l, Style::default().fg(Color::LightRed)))
            .collect(),
        StatsPanel::Loading => panel
            .text_lines()
            .into_iter()
            .map(|l| Line::styled(l, Style::default().fg(Color::DarkGray)))
            .collect(),
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_quick_questions(f: &mut Frame<'_>, area: Rect, widget: &ChatWidget) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Preguntas rápidas ")
        .border_style(Style::default().fg(Color::DarkGray));

    if widget.quick_questions().is_empty() {
        f.render_widget(
            Paragraph::new("Sin preguntas configuradas")
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
                .wrap(Wrap { trim: true }),
            area,
        );
        return;
    }

    let enabled = widget.is_send_enabled();
    let text_style = if enabled {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let width = area.width.saturating_sub(7).max(1) as usize;
    let items: Vec<ListItem> = widget
        .quick_questions()
        .iter()
        .enumerate()
        .map(|(idx, question)| {
            let lines: Vec<Line> = textwrap::wrap(question, width)
                .into_iter()
                .enumerate()
                .map(|(row, text)| {
                    let key = if row == 0 {
                        format!("F{:<2} ", idx + 1)
                    } else {
                        "    ".to_string()
                    };
                    Line::from(vec![
                        Span::styled(key, Style::default().fg(Color::Yellow)),
                        Span::styled(text.into_owned(), text_style),
                    ])
                })
                .collect();
            ListItem::new(lines)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
