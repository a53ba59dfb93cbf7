// src/widget.rs

//! The chat widget controller.
//!
//! `ChatWidget` owns every element the chat screen binds to: the visual log,
//! the input field, the send control and the stats panel. Network calls run
//! in spawned tasks and report back through [`WidgetEvent`]s, which the UI
//! loop feeds into [`ChatWidget::handle_event`].

use crate::{
    api::ApiClient,
    chat_message::ChatMessage,
    config::Config,
    constants::{CHAT_ERROR_MESSAGE, STATS_ERROR_MESSAGE, STATS_LOADING_MESSAGE},
    errors::CopilotoResult,
    models::{ChatReply, HealthStatus, Message, Stats},
    status_indicator::StatusIndicator,
};
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};

/// Completion of a background request.
#[derive(Debug)]
pub enum WidgetEvent {
    ChatResolved(CopilotoResult<ChatReply>),
    /// `seq` orders stats requests by issue time, across the timer and
    /// manual refreshes.
    StatsLoaded {
        seq: u64,
        result: CopilotoResult<Stats>,
    },
    HealthChecked(CopilotoResult<HealthStatus>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsPanel {
    Loading,
    Loaded(Stats),
    Failed,
}

impl StatsPanel {
    pub fn text_lines(&self) -> Vec<String> {
        match self {
            StatsPanel::Loading => vec![STATS_LOADING_MESSAGE.to_string()],
            StatsPanel::Loaded(stats) => stats
                .entries()
                .iter()
                .map(|(icon, value, label)| format!("{} {} {}", icon, value, label))
                .collect(),
            StatsPanel::Failed => vec![STATS_ERROR_MESSAGE.to_string()],
        }
    }
}

#[derive(Debug, Default)]
pub struct InputField {
    value: String,
    disabled: bool,
}

impl InputField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Typing is ignored while disabled.
    pub fn push(&mut self, c: char) {
        if !self.disabled {
            self.value.push(c);
        }
    }

    /// Appends pasted text in one piece; ignored while disabled.
    pub fn push_str(&mut self, text: &str) {
        if !self.disabled {
            self.value.push_str(text);
        }
    }

    pub fn pop(&mut self) {
        if !self.disabled {
            self.value.pop();
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

pub struct ChatWidget {
    api: ApiClient,
    agent_name: String,
    messages: Vec<ChatMessage>,
    input: InputField,
    status: StatusIndicator,
    stats: StatsPanel,
    stats_seq: Arc<AtomicU64>,
    applied_stats_seq: u64,
    quick_questions: Vec<String>,
    stats_interval: Duration,
    events_tx: UnboundedSender<WidgetEvent>,
    stats_timer: Option<JoinHandle<()>>,
    in_flight: Option<JoinHandle<()>>,
    scroll: u16,
    follow_tail: bool,
}

impl ChatWidget {
    pub fn new(config: &Config, api: ApiClient) -> (Self, UnboundedReceiver<WidgetEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let mut widget = Self {
            api,
            agent_name: config.agent_name.clone(),
            messages: Vec::new(),
            input: InputField::default(),
            status: StatusIndicator::new(),
            stats: StatsPanel::Loading,
            stats_seq: Arc::new(AtomicU64::new(0)),
            applied_stats_seq: 0,
            quick_questions: config.quick_questions.clone(),
            stats_interval: config.stats_interval(),
            events_tx,
            stats_timer: None,
            in_flight: None,
            scroll: 0,
            follow_tail: true,
        };
        let welcome = widget.welcome_text();
        widget.push_message(Message::bot(welcome));

        (widget, events_rx)
    }

    fn welcome_text(&self) -> String {
        let mut text = format!(
            "¡Hola! Soy el **{}**. Pregúntame por predicciones de demanda, hospitales o productos.",
            self.agent_name
        );
        if !self.quick_questions.is_empty() {
            text.push_str("\n\nPreguntas rápidas:");
            for (idx, question) in self.quick_questions.iter().enumerate() {
                text.push_str(&format!("\n- **F{}** {}", idx + 1, question));
            }
        }
        text
    }

    /// Starts the recurring stats refresh (first load immediately) and a
    /// one-off health check. Must be called inside a tokio runtime.
    pub fn start(&mut self) {
        if self.stats_timer.is_some() {
            return;
        }

        let api = self.api.clone();
        let tx = self.events_tx.clone();
        let counter = Arc::clone(&self.stats_seq);
        let period = self.stats_interval;
        self.stats_timer = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let seq = next_seq(&counter);
                let result = api.fetch_stats().await;
                if tx.send(WidgetEvent::StatsLoaded { seq, result }).is_err() {
                    break;
                }
            }
        }));

        let api = self.api.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(WidgetEvent::HealthChecked(api.check_health().await));
        });

        log::info!(
            "Chat widget started against {} (stats every {:?})",
            self.api.base_url(),
            self.stats_interval
        );
    }

    /// Cancels the stats timer and any in-flight chat request.
    pub fn stop(&mut self) {
        if let Some(timer) = self.stats_timer.take() {
            timer.abort();
        }
        if let Some(request) = self.in_flight.take() {
            request.abort();
            self.set_loading(false);
        }
    }

    pub fn is_running(&self) -> bool {
        self.stats_timer.is_some()
    }

    /// Submits the current input. Returns whether a request was issued.
    ///
    /// Blank input and submissions while a request is in flight are ignored.
    pub fn send_message(&mut self) -> bool {
        if self.input.is_disabled() {
            return false;
        }

        let message = self.input.value().trim().to_string();
        if message.is_empty() {
            return false;
        }

        self.push_message(Message::user(message.clone()));
        self.input.clear();
        self.set_loading(true);

        let api = self.api.clone();
        let tx = self.events_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = api.send_chat(&message).await;
            let _ = tx.send(WidgetEvent::ChatResolved(result));
        }));

        true
    }

    /// Fills the input with a canned question and submits it.
    pub fn send_quick_question(&mut self, question: &str) -> bool {
        if self.input.is_disabled() {
            return false;
        }
        self.input.set_value(question);
        self.send_message()
    }

    pub fn quick_question(&self, idx: usize) -> Option<String> {
        self.quick_questions.get(idx).cloned()
    }

    pub fn quick_questions(&self) -> &[String] {
        &self.quick_questions
    }

    /// One-off stats refresh outside the timer.
    pub fn load_stats(&self) {
        let api = self.api.clone();
        let tx = self.events_tx.clone();
        let seq = next_seq(&self.stats_seq);
        tokio::spawn(async move {
            let result = api.fetch_stats().await;
            let _ = tx.send(WidgetEvent::StatsLoaded { seq, result });
        });
    }

    pub fn handle_event(&mut self, event: WidgetEvent) {
        match event {
            WidgetEvent::ChatResolved(result) => self.resolve_chat(result),
            WidgetEvent::StatsLoaded { seq, result } => self.apply_stats(seq, result),
            WidgetEvent::HealthChecked(result) => self.apply_health(result),
        }
    }

    fn resolve_chat(&mut self, result: CopilotoResult<ChatReply>) {
        self.in_flight = None;

        match result {
            Ok(reply) => self.push_message(Message {
                context_used: reply.context_used,
                ..Message::bot(reply.response)
            }),
            Err(e) => {
                log::error!("Chat request failed: {}", e);
                self.push_message(Message::bot_error(CHAT_ERROR_MESSAGE));
            }
        }

        self.set_loading(false);
    }

    fn apply_stats(&mut self, seq: u64, result: CopilotoResult<Stats>) {
        if seq <= self.applied_stats_seq {
            log::debug!(
                "Dropping stale stats reply #{} (showing #{})",
                seq,
                self.applied_stats_seq
            );
            return;
        }
        self.applied_stats_seq = seq;

        self.stats = match result {
            Ok(stats) => StatsPanel::Loaded(stats),
            Err(e) => {
                log::warn!("Stats load failed: {}", e);
                StatsPanel::Failed
            }
        };
    }

    fn apply_health(&mut self, result: CopilotoResult<HealthStatus>) {
        let status = match result {
            Ok(health) if health.is_healthy() => {
                log::info!("Backend healthy: {:?}", health.service);
                "Backend conectado".to_string()
            }
            Ok(health) => {
                log::warn!("Backend unhealthy: {:?}", health.error);
                format!(
                    "Backend con problemas: {}",
                    health.error.as_deref().unwrap_or("desconocido")
                )
            }
            Err(e) => {
                log::warn!("Health check failed: {}", e);
                "Backend sin respuesta".to_string()
            }
        };
        self.status.set_status(status);
    }

    fn set_loading(&mut self, loading: bool) {
        self.input.disabled = loading;
        self.status.set_loading(loading);
    }

    fn push_message(&mut self, message: Message) {
        self.messages.push(ChatMessage::new(message));
        self.follow_tail = true;
    }

    pub fn tick(&mut self) {
        self.status.update_spinner();
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn input(&self) -> &InputField {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputField {
        &mut self.input
    }

    pub fn status(&self) -> &StatusIndicator {
        &self.status
    }

    pub fn stats(&self) -> &StatsPanel {
        &self.stats
    }

    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }

    pub fn is_send_enabled(&self) -> bool {
        self.status.is_send_enabled()
    }

    pub fn scroll_up(&mut self) {
        self.follow_tail = false;
        self.scroll = self.scroll.saturating_sub(3);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(3);
    }

    /// Clamps the scroll offset to the rendered log height and returns the
    /// offset to draw with. Following the tail pins it to the bottom.
    pub fn sync_scroll(&mut self, max_scroll: u16) -> u16 {
        if self.follow_tail || self.scroll >= max_scroll {
            self.scroll = max_scroll;
            self.follow_tail = true;
        }
        self.scroll
    }
}

fn next_seq(counter: &AtomicU64) -> u64 {
    counter.fetch_add(1, Ordering::Relaxed) + 1
}

impl Drop for ChatWidget {
    fn drop(&mut self) {
        self.stop();
    }
}
