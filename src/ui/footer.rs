use crate::widget::ChatWidget;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Draws the footer with dynamic instructions
pub fn draw_footer(f: &mut Frame<'_>, area: Rect, widget: &ChatWidget) {
    let instructions = if widget.is_send_enabled() {
        "Enter enviar · Shift+Enter nueva línea · F1-F9 preguntas rápidas · Ctrl+R stats · PgUp/PgDn desplazar · Esc salir"
    } else {
        "Esperando respuesta del asistente... · PgUp/PgDn desplazar · Esc salir"
    };

    let footer = Paragraph::new(instructions)
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(footer, area);
}
