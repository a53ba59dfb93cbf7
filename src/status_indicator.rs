use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Send control: shows the send icon while idle and a spinner while a chat
/// request is in flight. Also holds the backend status text, which the
/// header draws.
#[derive(Debug, Default)]
pub struct StatusIndicator {
    loading: bool,
    status_text: String,
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        if loading {
            self.spinner_idx = 0;
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The send control is disabled exactly while loading.
    pub fn is_send_enabled(&self) -> bool {
        !self.loading
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status_text = status.into();
    }

    pub fn status(&self) -> &str {
        &self.status_text
    }

    pub fn update_spinner(&mut self) {
        if self.loading {
            self.spinner_idx = self.spinner_idx.wrapping_add(1);
        }
    }

    pub fn icon(&self) -> &'static str {
        if self.loading {
            SPINNER_FRAMES[self.spinner_idx % SPINNER_FRAMES.len()]
        } else {
            "➤"
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let (label, color) = if self.loading {
            ("Consultando...", Color::DarkGray)
        } else {
            ("Enviar", Color::LightGreen)
        };

        let spans = vec![
            Span::styled(
                self.icon(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(label, Style::default().fg(color)),
        ];

        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Left),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_disabled_while_loading() {
        let mut indicator = StatusIndicator::new();
        assert!(indicator.is_send_enabled());
        assert_eq!(indicator.icon(), "➤");

        indicator.set_loading(true);
        assert!(!indicator.is_send_enabled());
        assert_eq!(indicator.icon(), "◐");

        indicator.update_spinner();
        assert_eq!(indicator.icon(), "◓");

        indicator.set_loading(false);
        assert!(indicator.is_send_enabled());
    }

    #[test]
    fn test_spinner_does_not_advance_when_idle() {
        let mut indicator = StatusIndicator::new();
        indicator.update_spinner();
        indicator.set_loading(true);
        assert_eq!(indicator.icon(), SPINNER_FRAMES[0]);
    }
}
