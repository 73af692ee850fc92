// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat conversation types and the triage wire format.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The greeting shown at the top of every fresh conversation.
pub const GREETING: &str = "Hello, how can I help you?";

/// Triage tag that makes the chat pane offer the booking flow.
pub const TRIAGE_SCHEDULE_APPOINTMENT: &str = "schedule_appointment";

/// Shown in place of the bot reply when the server sends no analysis text.
pub const NO_RESPONSE_FALLBACK: &str = "No response from the bot.";

/// Who authored a conversation bubble.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One rendered message in the conversation. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }

    /// The single message every new room starts with.
    pub fn greeting() -> Self {
        Self::bot(GREETING)
    }
}

/// Wire: body of `POST /api/chatbot/symptom`.
#[derive(Debug, Clone, Serialize)]
pub struct SymptomRequest {
    pub symptom_text: String,
    pub room_number: u32,
}

/// Wire: reply from `POST /api/chatbot/symptom`.
#[derive(Debug, Clone, Deserialize)]
pub struct SymptomResponse {
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub triage_advice: Option<String>,
}

impl SymptomResponse {
    /// The bot reply text, falling back when the server sends nothing.
    pub fn analysis_text(&self) -> &str {
        match self.analysis.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => NO_RESPONSE_FALLBACK,
        }
    }
}

/// Wire: one stored exchange inside a chat room, as returned by
/// `GET /api/chatbot/chats`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatEntry {
    /// Stable per-exchange id; rooms render sorted by this ascending.
    pub id: i64,
    pub input_text: String,
    pub model_response: String,
    #[serde(default)]
    pub triage_advice: Option<String>,
    pub created_at: String,
    pub room_number: u32,
}

/// Wire: one room with its full message history.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRoomHistory {
    pub room_number: u32,
    pub chats: Vec<ChatEntry>,
}
