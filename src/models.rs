// src/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Who produced a message in the visual log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One entry of the conversation. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    pub is_error: bool,
    pub context_used: bool,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            is_error: false,
            context_used: false,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            is_error: false,
            context_used: false,
        }
    }

    pub fn bot_error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::bot(text)
        }
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Successful reply of `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub context_used: bool,
}

/// Error body the backend sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Aggregate counters from `GET /api/stats`. Missing or null fields read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Stats {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_predicciones: u64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_hospitales: u64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_productos: u64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_consultas: u64,
}

impl Stats {
    /// Icon, value and label for each counter, in display order.
    pub fn entries(&self) -> [(&'static str, u64, &'static str); 4] {
        [
            ("📊", self.total_predicciones, "predicciones"),
            ("🏥", self.total_hospitales, "hospitales"),
            ("💊", self.total_productos, "productos"),
            ("💬", self.total_consultas, "consultas"),
        ]
    }
}

fn zero_if_null<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}

/// Reply of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Logs details of each API call.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stats_missing_and_null_fields_default_to_zero() {
        let stats: Stats = serde_json::from_value(json!({
            "total_predicciones": 120,
            "total_hospitales": null
        }))
        .unwrap();
        assert_eq!(stats.total_predicciones, 120);
        assert_eq!(stats.total_hospitales, 0);
        assert_eq!(stats.total_productos, 0);
        assert_eq!(stats.total_consultas, 0);
    }

    #[test]
    fn test_chat_reply_context_used_is_optional() {
        let reply: ChatReply = serde_json::from_value(json!({ "response": "hola" })).unwrap();
        assert_eq!(reply.response, "hola");
        assert!(!reply.context_used);
    }

    #[test]
    fn test_chat_request_body_shape() {
        let body = serde_json::to_value(ChatRequest { message: "hola" }).unwrap();
        assert_eq!(body, json!({ "message": "hola" }));
    }

    #[test]
    fn test_bot_error_flags_message() {
        let msg = Message::bot_error("falló");
        assert_eq!(msg.sender, Sender::Bot);
        assert!(msg.is_error);
    }
}
