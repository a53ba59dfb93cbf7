// src/ui.rs

pub mod chat;
pub mod footer;
pub mod header;
pub mod stats;

use crate::{
    api::ApiClient,
    config::Config,
    errors::CopilotoResult,
    key_handlers::{handle_key, handle_paste, KeyOutcome},
    widget::{ChatWidget, WidgetEvent},
};
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event as CEvent,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

const TICK_RATE: Duration = Duration::from_millis(120);

/// Enum for different types of events.
enum Event {
    Input(CEvent),
    Tick,
}

/// Runs the terminal UI until the user quits.
pub async fn run_ui(config: Config) -> CopilotoResult<()> {
    let api = ApiClient::from_config(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let enhanced_keys = matches!(supports_keyboard_enhancement(), Ok(true));
    if enhanced_keys {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (mut widget, widget_events) = ChatWidget::new(&config, api);
    widget.start();

    let res = run_app(&mut terminal, &mut widget, widget_events).await;
    widget.stop();

    // Restore terminal
    if enhanced_keys {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    res
}

/// Main loop of the application.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    widget: &mut ChatWidget,
    mut widget_events: mpsc::UnboundedReceiver<WidgetEvent>,
) -> CopilotoResult<()> {
    let (tx, mut rx) = mpsc::channel::<Event>(100);

    // crossterm's poll/read block, so the reader lives on the blocking pool
    // and exits once the receiver is gone.
    tokio::task::spawn_blocking(move || {
        let mut last_tick = Instant::now();
        loop {
            match event::poll(TICK_RATE) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if tx.blocking_send(Event::Input(event)).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        log::error!("Failed to read terminal event: {}", e);
                        return;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    log::error!("Failed to poll terminal events: {}", e);
                    return;
                }
            }

            if last_tick.elapsed() >= TICK_RATE {
                if tx.blocking_send(Event::Tick).is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });

    loop {
        terminal.draw(|f| draw(f, widget))?;

        tokio::select! {
            Some(event) = rx.recv() => match event {
                Event::Input(CEvent::Key(key)) => {
                    if handle_key(key, widget) == KeyOutcome::Quit {
                        break;
                    }
                }
                Event::Input(CEvent::Paste(text)) => handle_paste(&text, widget),
                Event::Input(_) => {}
                Event::Tick => widget.tick(),
            },
            Some(event) = widget_events.recv() => widget.handle_event(event),
            else => break,
        }
    }

    Ok(())
}

/// Lays out the chat screen: header, chat column, side panel and footer.
pub fn draw(f: &mut Frame, widget: &mut ChatWidget) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    header::draw_header(f, rows[0], widget);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(rows[1]);

    chat::draw_chat(f, columns[0], widget);
    stats::draw_side_panel(f, columns[1], widget);

    footer::draw_footer(f, rows[2], widget);
}
