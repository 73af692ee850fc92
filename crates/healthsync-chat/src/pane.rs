// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The triage chat pane: one active conversation plus the cached history.
//!
//! The pane owns everything the chat screen renders: the message list of
//! the conversation in progress, the room number messages are filed
//! under, the latest triage advice, and the read-only history of earlier
//! rooms. All analysis happens server-side; the pane just carries text
//! back and forth and keeps its local state consistent.

use std::sync::Arc;

use healthsync_api::PortalClient;
use healthsync_core::{
    ChatMessage, ChatRoomHistory, HealthSyncError, TRIAGE_SCHEDULE_APPOINTMENT,
};
use healthsync_session::SessionGate;
use tracing::{debug, warn};

/// States of the chat pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneState {
    /// Waiting for input.
    Idle,
    /// A symptom message is in flight.
    Sending,
}

impl std::fmt::Display for PaneState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaneState::Idle => write!(f, "idle"),
            PaneState::Sending => write!(f, "sending"),
        }
    }
}

/// State and message flow for the symptom triage conversation.
pub struct ChatPane {
    client: PortalClient,
    gate: Arc<SessionGate>,
    state: PaneState,
    /// Room the active conversation files its messages under.
    room_number: u32,
    messages: Vec<ChatMessage>,
    triage_advice: Option<String>,
    /// True while the booking flow is open; suppresses the booking offer.
    scheduling: bool,
    /// Earlier rooms, most recent first. Fetched once when the pane
    /// opens and refreshed only when a send creates a new room.
    history: Vec<ChatRoomHistory>,
}

impl ChatPane {
    /// Creates a pane showing a fresh conversation in room 1.
    ///
    /// Call [`load_history`](Self::load_history) next; it moves the
    /// conversation to the first unused room once history is known.
    pub fn new(client: PortalClient, gate: Arc<SessionGate>) -> Self {
        Self {
            client,
            gate,
            state: PaneState::Idle,
            room_number: 1,
            messages: vec![ChatMessage::greeting()],
            triage_advice: None,
            scheduling: false,
            history: Vec::new(),
        }
    }

    /// Returns the current pane state.
    pub fn state(&self) -> PaneState {
        self.state
    }

    /// The conversation as rendered, greeting first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Room number the active conversation writes to.
    pub fn room_number(&self) -> u32 {
        self.room_number
    }

    /// The latest triage advice from the server, if any.
    pub fn triage_advice(&self) -> Option<&str> {
        self.triage_advice.as_deref()
    }

    /// True when the server recommended booking and the booking flow is
    /// not already open.
    pub fn should_offer_booking(&self) -> bool {
        self.triage_advice.as_deref() == Some(TRIAGE_SCHEDULE_APPOINTMENT) && !self.scheduling
    }

    /// Marks the booking flow open or closed. While open, the booking
    /// offer is not repeated.
    pub fn set_scheduling(&mut self, scheduling: bool) {
        self.scheduling = scheduling;
    }

    /// Clears the advice once an appointment has been booked.
    pub fn clear_triage_advice(&mut self) {
        self.triage_advice = None;
    }

    /// Earlier rooms, most recent first.
    pub fn rooms(&self) -> &[ChatRoomHistory] {
        &self.history
    }

    /// Fetches chat history and moves the active conversation to the
    /// first unused room number.
    ///
    /// A rejected token propagates so the caller can end the session.
    /// Any other failure is non-fatal: the pane logs it and keeps going
    /// with an empty history, since chatting still works without it.
    pub async fn load_history(&mut self) -> Result<(), HealthSyncError> {
        let session = self.gate.require()?;
        match self.client.chat_history(&session.token).await {
            Ok(mut rooms) => {
                rooms.reverse();
                self.history = rooms;
                self.room_number = self.next_room_number();
                debug!(room = self.room_number, "chat history loaded");
                Ok(())
            }
            Err(e) if e.is_unauthorized() => Err(e),
            Err(e) => {
                warn!(error = %e, "failed to fetch chat history");
                Ok(())
            }
        }
    }

    /// Starts a fresh conversation in the next unused room.
    pub fn new_chat(&mut self) {
        self.room_number = self.next_room_number();
        self.messages = vec![ChatMessage::greeting()];
        self.triage_advice = None;
        self.scheduling = false;
        self.state = PaneState::Idle;
    }

    /// Sends one symptom message and appends the bot's reply.
    ///
    /// Blank input is ignored. The user's message is appended before the
    /// call so it stays visible even when the call fails; failures other
    /// than a rejected token become a bot message in the conversation
    /// rather than an error, matching how a chat reads.
    pub async fn send(&mut self, input: &str) -> Result<(), HealthSyncError> {
        if input.trim().is_empty() {
            return Ok(());
        }
        let session = self.gate.require()?;

        self.state = PaneState::Sending;
        self.messages.push(ChatMessage::user(input));

        let result = self
            .client
            .symptom(&session.token, input, self.room_number)
            .await;
        self.state = PaneState::Idle;

        match result {
            Ok(reply) => {
                self.messages.push(ChatMessage::bot(reply.analysis_text()));
                self.triage_advice = reply.triage_advice.filter(|advice| !advice.is_empty());
                self.refresh_history_if_room_is_new(&session.token).await;
                Ok(())
            }
            Err(e) if e.is_unauthorized() => Err(e),
            Err(e) => {
                self.messages
                    .push(ChatMessage::bot(format!("Something went wrong. {}", failure_text(&e))));
                Ok(())
            }
        }
    }

    /// The messages of one earlier room in chronological order, or
    /// `None` when the room is not in the cached history.
    pub fn room_messages(&self, room: u32) -> Option<Vec<ChatMessage>> {
        let entry = self.history.iter().find(|r| r.room_number == room)?;
        let mut chats = entry.chats.clone();
        chats.sort_by_key(|chat| chat.id);
        Some(
            chats
                .into_iter()
                .flat_map(|chat| {
                    [
                        ChatMessage::user(chat.input_text),
                        ChatMessage::bot(chat.model_response),
                    ]
                })
                .collect(),
        )
    }

    /// After a send creates a room the cache has never seen, re-fetch so
    /// the room listing includes it. The active room number is left
    /// alone: the conversation in progress stays in its room.
    async fn refresh_history_if_room_is_new(&mut self, token: &str) {
        if self.history.iter().any(|r| r.room_number == self.room_number) {
            return;
        }
        match self.client.chat_history(token).await {
            Ok(mut rooms) => {
                rooms.reverse();
                self.history = rooms;
            }
            Err(e) => warn!(error = %e, "failed to refresh chat history"),
        }
    }

    /// One past the highest room number seen, or 1 with no history.
    fn next_room_number(&self) -> u32 {
        self.history
            .iter()
            .map(|room| room.room_number)
            .max()
            .map_or(1, |highest| highest + 1)
    }
}

/// The wording shown inside the synthetic bot message on failure.
fn failure_text(error: &HealthSyncError) -> String {
    match error {
        HealthSyncError::Api { status, .. } => {
            format!("Failed to fetch response from the server ({status})")
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use healthsync_core::{GREETING, NO_RESPONSE_FALLBACK, Role, Sender, Session};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn signed_in_gate() -> Arc<SessionGate> {
        let gate = Arc::new(SessionGate::new());
        gate.set(Session {
            token: "test-token".into(),
            token_type: "bearer".into(),
            username: "amina".into(),
            role: Role::Patient,
            user_id: Some(7),
        });
        gate
    }

    fn pane_for(server: &MockServer) -> ChatPane {
        let client = PortalClient::new(&server.uri(), 30).unwrap();
        ChatPane::new(client, signed_in_gate())
    }

    fn room_json(room: u32, chats: serde_json::Value) -> serde_json::Value {
        serde_json::json!({"room_number": room, "chats": chats})
    }

    fn chat_json(id: i64, room: u32, input: &str, reply: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id, "input_text": input, "model_response": reply,
            "created_at": "2026-02-01T09:30:00", "room_number": room
        })
    }

    #[tokio::test]
    async fn fresh_pane_shows_greeting_in_room_one() {
        let server = MockServer::start().await;
        let pane = pane_for(&server);

        assert_eq!(pane.room_number(), 1);
        assert_eq!(pane.messages().len(), 1);
        assert_eq!(pane.messages()[0].sender, Sender::Bot);
        assert_eq!(pane.messages()[0].text, GREETING);
        assert_eq!(pane.state(), PaneState::Idle);
    }

    #[tokio::test]
    async fn load_history_allocates_first_unused_room() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chatbot/chats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                room_json(1, serde_json::json!([chat_json(1, 1, "hi", "hello")])),
                room_json(3, serde_json::json!([chat_json(5, 3, "ow", "where?")])),
            ])))
            .mount(&server)
            .await;

        let mut pane = pane_for(&server);
        pane.load_history().await.unwrap();

        assert_eq!(pane.room_number(), 4);
        // Most recent room listed first.
        assert_eq!(pane.rooms()[0].room_number, 3);
        assert_eq!(pane.rooms()[1].room_number, 1);
    }

    #[tokio::test]
    async fn empty_history_starts_at_room_one() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chatbot/chats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let mut pane = pane_for(&server);
        pane.load_history().await.unwrap();
        assert_eq!(pane.room_number(), 1);
        assert!(pane.rooms().is_empty());
    }

    #[tokio::test]
    async fn history_fetch_failure_is_non_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chatbot/chats"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut pane = pane_for(&server);
        pane.load_history().await.unwrap();
        assert_eq!(pane.room_number(), 1);
    }

    #[tokio::test]
    async fn rejected_token_during_history_load_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chatbot/chats"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let mut pane = pane_for(&server);
        let err = pane.load_history().await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn blank_input_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chatbot/symptom"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut pane = pane_for(&server);
        pane.send("   ").await.unwrap();
        assert_eq!(pane.messages().len(), 1);
    }

    #[tokio::test]
    async fn send_appends_user_and_bot_messages() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chatbot/symptom"))
            .and(body_partial_json(serde_json::json!({
                "symptom_text": "my head hurts", "room_number": 1
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "analysis": "How long has it hurt?"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/chatbot/chats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let mut pane = pane_for(&server);
        pane.send("my head hurts").await.unwrap();

        assert_eq!(pane.messages().len(), 3);
        assert_eq!(pane.messages()[1].sender, Sender::User);
        assert_eq!(pane.messages()[1].text, "my head hurts");
        assert_eq!(pane.messages()[2].sender, Sender::Bot);
        assert_eq!(pane.messages()[2].text, "How long has it hurt?");
        assert!(pane.triage_advice().is_none());
    }

    #[tokio::test]
    async fn missing_analysis_uses_fallback_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chatbot/symptom"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/chatbot/chats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let mut pane = pane_for(&server);
        pane.send("hello").await.unwrap();
        assert_eq!(pane.messages()[2].text, NO_RESPONSE_FALLBACK);
    }

    #[tokio::test]
    async fn server_failure_becomes_a_bot_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chatbot/symptom"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let mut pane = pane_for(&server);
        pane.send("my head hurts").await.unwrap();

        let last = pane.messages().last().unwrap();
        assert_eq!(last.sender, Sender::Bot);
        assert_eq!(
            last.text,
            "Something went wrong. Failed to fetch response from the server (503)"
        );
    }

    #[tokio::test]
    async fn rejected_token_bubbles_up_and_keeps_user_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chatbot/symptom"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let mut pane = pane_for(&server);
        let err = pane.send("my head hurts").await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(pane.messages().len(), 2);
        assert_eq!(pane.state(), PaneState::Idle);
    }

    #[tokio::test]
    async fn triage_advice_offers_booking_until_flow_opens() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chatbot/symptom"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "analysis": "You should see a doctor.",
                "triage_advice": "schedule_appointment"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/chatbot/chats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let mut pane = pane_for(&server);
        pane.send("chest pain").await.unwrap();

        assert!(pane.should_offer_booking());
        pane.set_scheduling(true);
        assert!(!pane.should_offer_booking());
        pane.set_scheduling(false);
        pane.clear_triage_advice();
        assert!(!pane.should_offer_booking());
    }

    #[tokio::test]
    async fn empty_triage_advice_counts_as_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chatbot/symptom"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "analysis": "Noted.", "triage_advice": ""
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/chatbot/chats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let mut pane = pane_for(&server);
        pane.send("hello").await.unwrap();
        assert!(pane.triage_advice().is_none());
    }

    #[tokio::test]
    async fn first_send_in_new_room_refreshes_listing_but_keeps_room() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chatbot/symptom"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "analysis": "Hello!"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/chatbot/chats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                room_json(1, serde_json::json!([chat_json(1, 1, "hi", "Hello!")]))
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let mut pane = pane_for(&server);
        pane.send("hi").await.unwrap();

        assert_eq!(pane.rooms().len(), 1);
        // The active conversation stays in its room; only the listing
        // learns about the new room.
        assert_eq!(pane.room_number(), 1);

        // A second send in the now-known room does not re-fetch.
        pane.send("still me").await.unwrap();
        assert_eq!(pane.room_number(), 1);
    }

    #[tokio::test]
    async fn room_messages_are_chronological_pairs() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chatbot/chats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                room_json(2, serde_json::json!([
                    chat_json(8, 2, "second", "reply two"),
                    chat_json(3, 2, "first", "reply one"),
                ]))
            ])))
            .mount(&server)
            .await;

        let mut pane = pane_for(&server);
        pane.load_history().await.unwrap();

        let messages = pane.room_messages(2).unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].text, "first");
        assert_eq!(messages[1].text, "reply one");
        assert_eq!(messages[2].text, "second");
        assert_eq!(messages[3].sender, Sender::Bot);

        assert!(pane.room_messages(9).is_none());
    }

    #[tokio::test]
    async fn new_chat_resets_conversation_and_advice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chatbot/symptom"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "analysis": "See a doctor.", "triage_advice": "schedule_appointment"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/chatbot/chats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                room_json(1, serde_json::json!([chat_json(1, 1, "hi", "See a doctor.")]))
            ])))
            .mount(&server)
            .await;

        let mut pane = pane_for(&server);
        pane.send("hi").await.unwrap();
        assert!(pane.should_offer_booking());

        pane.new_chat();
        assert_eq!(pane.messages().len(), 1);
        assert_eq!(pane.messages()[0].text, GREETING);
        assert!(pane.triage_advice().is_none());
        assert_eq!(pane.room_number(), 2);
    }

    #[test]
    fn pane_state_display() {
        assert_eq!(PaneState::Idle.to_string(), "idle");
        assert_eq!(PaneState::Sending.to_string(), "sending");
    }
}
