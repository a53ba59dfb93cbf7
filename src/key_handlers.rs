use crate::widget::ChatWidget;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// Routes a key press to the chat widget.
///
/// Plain Enter submits through the same path as quick questions; Shift+Enter
/// (or Alt+Enter on terminals that cannot report Shift) inserts a newline.
pub fn handle_key(key: KeyEvent, widget: &mut ChatWidget) -> KeyOutcome {
    if key.kind == KeyEventKind::Release {
        return KeyOutcome::Continue;
    }

    match key.code {
        KeyCode::Esc => return KeyOutcome::Quit,
        KeyCode::Enter => {
            if key.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) {
                widget.input_mut().push('\n');
            } else {
                widget.send_message();
            }
        }
        KeyCode::F(n) if n >= 1 => {
            if let Some(question) = widget.quick_question(usize::from(n - 1)) {
                widget.send_quick_question(&question);
            }
        }
        KeyCode::PageUp => widget.scroll_up(),
        KeyCode::PageDown => widget.scroll_down(),
        KeyCode::Backspace => widget.input_mut().pop(),
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => return KeyOutcome::Quit,
                    'r' => widget.load_stats(),
                    'u' => widget.scroll_up(),
                    'd' => widget.scroll_down(),
                    _ => {}
                }
            } else {
                widget.input_mut().push(c);
            }
        }
        _ => {}
    }

    KeyOutcome::Continue
}

/// Appends a bracketed paste to the input. Line breaks stay in the value, so a
/// multi-line paste never submits part of itself.
pub fn handle_paste(text: &str, widget: &mut ChatWidget) {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    widget.input_mut().push_str(&normalized);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::ApiClient, config::Config, models::Message, widget::WidgetEvent};
    use serde_json::json;
    use std::time::Duration;
    use tokio::{sync::mpsc::UnboundedReceiver, time::timeout};
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn widget_for(uri: &str) -> (ChatWidget, UnboundedReceiver<WidgetEvent>) {
        let config = Config {
            base_url: uri.to_string(),
            ..Config::default()
        };
        let api = ApiClient::new(uri, Some(Duration::from_secs(5))).unwrap();
        ChatWidget::new(&config, api)
    }

    async fn resolve(widget: &mut ChatWidget, events: &mut UnboundedReceiver<WidgetEvent>) {
        let event = timeout(Duration::from_secs(5), events.recv())
            .await
            .expect("event in time")
            .expect("channel open");
        widget.handle_event(event);
    }

    fn type_text(widget: &mut ChatWidget, text: &str) {
        for c in text.chars() {
            handle_key(press(KeyCode::Char(c), KeyModifiers::NONE), widget);
        }
    }

    #[tokio::test]
    async fn test_enter_submits() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(json!({ "message": "hola" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "ok" })))
            .expect(1)
            .mount(&server)
            .await;

        let (mut widget, mut events) = widget_for(&server.uri());
        type_text(&mut widget, "hola");
        let outcome = handle_key(press(KeyCode::Enter, KeyModifiers::NONE), &mut widget);

        assert_eq!(outcome, KeyOutcome::Continue);
        assert_eq!(
            widget.messages().last().unwrap().message(),
            &Message::user("hola")
        );
        assert!(!widget.is_send_enabled());

        resolve(&mut widget, &mut events).await;
        assert_eq!(widget.messages().last().unwrap().message(), &Message::bot("ok"));
        assert!(widget.is_send_enabled());
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let (mut widget, _events) = widget_for("http://localhost:8080");
        let before = widget.messages().len();

        type_text(&mut widget, "uno");
        handle_key(press(KeyCode::Enter, KeyModifiers::SHIFT), &mut widget);
        type_text(&mut widget, "dos");

        assert_eq!(widget.input().value(), "uno\ndos");
        assert_eq!(widget.messages().len(), before);
        assert!(widget.is_send_enabled());
    }

    #[tokio::test]
    async fn test_function_key_sends_quick_question() {
        let server = MockServer::start().await;
        let (mut widget, mut events) = widget_for(&server.uri());
        let question = widget.quick_question(2).unwrap();

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(json!({ "message": question })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "ok" })))
            .expect(1)
            .mount(&server)
            .await;

        handle_key(press(KeyCode::F(3), KeyModifiers::NONE), &mut widget);
        assert_eq!(
            widget.messages().last().unwrap().message(),
            &Message::user(question)
        );
        resolve(&mut widget, &mut events).await;
    }

    #[test]
    fn test_unbound_function_key_is_ignored() {
        let (mut widget, _events) = widget_for("http://localhost:8080");
        let before = widget.messages().len();
        handle_key(press(KeyCode::F(9), KeyModifiers::NONE), &mut widget);
        assert_eq!(widget.messages().len(), before);
    }

    #[test]
    fn test_backspace_and_quit_keys() {
        let (mut widget, _events) = widget_for("http://localhost:8080");
        type_text(&mut widget, "abc");
        handle_key(press(KeyCode::Backspace, KeyModifiers::NONE), &mut widget);
        assert_eq!(widget.input().value(), "ab");

        assert_eq!(
            handle_key(press(KeyCode::Esc, KeyModifiers::NONE), &mut widget),
            KeyOutcome::Quit
        );
        assert_eq!(
            handle_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL), &mut widget),
            KeyOutcome::Quit
        );
    }

    #[test]
    fn test_multiline_paste_stays_in_input() {
        let (mut widget, _events) = widget_for("http://localhost:8080");
        let before = widget.messages().len();

        type_text(&mut widget, "resumen: ");
        handle_paste("hospital A\r\nhospital B\rhospital C", &mut widget);

        assert_eq!(
            widget.input().value(),
            "resumen: hospital A\nhospital B\nhospital C"
        );
        assert_eq!(widget.messages().len(), before);
        assert!(widget.is_send_enabled());
    }

    #[tokio::test]
    async fn test_paste_ignored_while_waiting_for_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "ok" })))
            .mount(&server)
            .await;

        let (mut widget, mut events) = widget_for(&server.uri());
        type_text(&mut widget, "hola");
        handle_key(press(KeyCode::Enter, KeyModifiers::NONE), &mut widget);
        handle_paste("uno\ndos", &mut widget);
        assert_eq!(widget.input().value(), "");

        resolve(&mut widget, &mut events).await;
        handle_paste("uno\ndos", &mut widget);
        assert_eq!(widget.input().value(), "uno\ndos");
    }

    #[test]
    fn test_release_events_are_ignored() {
        let (mut widget, _events) = widget_for("http://localhost:8080");
        let mut key = press(KeyCode::Char('x'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        handle_key(key, &mut widget);
        assert_eq!(widget.input().value(), "");
    }
}
