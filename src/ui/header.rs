use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::widget::ChatWidget;

pub fn draw_header(f: &mut Frame<'_>, area: Rect, widget: &ChatWidget) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner);

    let title = Paragraph::new(format!("🩺 {}", widget.agent_name()))
        .style(
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left);
    f.render_widget(title, chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(chunks[1]);

    let subtitle = Paragraph::new("Predicción de demanda hospitalaria")
        .style(
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::ITALIC),
        )
        .alignment(Alignment::Right);
    f.render_widget(subtitle, right[0]);

    let backend = widget.status().status();
    if !backend.is_empty() {
        f.render_widget(
            Paragraph::new(backend)
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Right),
            right[1],
        );
    }
}
