use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::info;

use crate::{
    AppState,
    models::{
        poll::Poll,
        webhook::{CallbackEvent, MessagePayload},
    },
    services::event_log,
    utils,
};

const POLL_QUESTION: &str = "Gostaria de iniciar o cadastro na Comunidade ZDG?";
const POLL_OPTIONS: [&str; 3] = [
    "Sim, por favor!",
    "Dúvidas antes de me cadastrar",
    "Não, obrigado",
];

#[derive(Debug, Error)]
pub enum HandleError {
    #[error("invalid callback payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("waha call failed: {0}")]
    Send(String),
}

/// What the callback decided to do; maps onto the response message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackOutcome {
    SentMessageIgnored,
    Processed,
}

impl CallbackOutcome {
    pub fn message(self) -> &'static str {
        match self {
            Self::SentMessageIgnored => "Sent message ignored.",
            Self::Processed => "Callback processed.",
        }
    }
}

pub async fn process_callback(
    state: &AppState,
    payload: &JsonValue,
) -> Result<CallbackOutcome, HandleError> {
    let event: CallbackEvent = serde_json::from_value(payload.clone())?;

    if event.data_type.as_deref() == Some("qr") {
        if let Some(qr) = event.data.as_ref().and_then(|d| d.qr.as_deref()) {
            utils::render_qr_terminal(qr);
        }
    }

    // Every inbound event lands in the message log, whatever its type.
    event_log::append_event(&state.cfg, payload).await;

    if matches!(
        event.data_type.as_deref(),
        Some("message") | Some("message_create")
    ) {
        let Some(message) = event.data.and_then(|d| d.message) else {
            return Ok(CallbackOutcome::Processed);
        };
        if message.from_me {
            return Ok(CallbackOutcome::SentMessageIgnored);
        }
        if message.r#type.as_deref() == Some("chat") {
            send_registration_poll(state, event.session_id.as_deref(), &message).await?;
        }
    }

    Ok(CallbackOutcome::Processed)
}

async fn send_registration_poll(
    state: &AppState,
    session_id: Option<&str>,
    message: &MessagePayload,
) -> Result<(), HandleError> {
    let (Some(session_id), Some(recipient)) = (session_id, message.from.as_deref()) else {
        return Ok(());
    };

    // Single choice: the recipient picks exactly one option.
    let poll = Poll::new(
        POLL_QUESTION,
        POLL_OPTIONS.iter().map(|s| s.to_string()).collect(),
        false,
    );

    // An unregistered session is nothing to do, not an error.
    let Some(client) = state.sessions.get(session_id).await else {
        return Ok(());
    };

    client
        .send_poll(recipient, &poll)
        .await
        .map_err(HandleError::Send)?;
    info!("[{session_id}] Sent a poll to {recipient}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::json;
    use tokio::sync::Mutex;
    use url::Url;

    use super::*;
    use crate::config::Config;
    use crate::services::sessions::{SessionClient, SessionRegistry};

    #[derive(Default)]
    struct RecordingClient {
        sent: Mutex<Vec<(String, Poll)>>,
    }

    #[async_trait]
    impl SessionClient for RecordingClient {
        async fn send_poll(&self, chat_id: &str, poll: &Poll) -> Result<(), String> {
            self.sent
                .lock()
                .await
                .push((chat_id.to_string(), poll.clone()));
            Ok(())
        }
    }

    struct FailingClient;

    #[async_trait]
    impl SessionClient for FailingClient {
        async fn send_poll(&self, _chat_id: &str, _poll: &Poll) -> Result<(), String> {
            Err("waha status 500 Internal Server Error".to_string())
        }
    }

    fn test_config(dir: &Path) -> Config {
        Config {
            app_host: "127.0.0.1".to_string(),
            app_port: 0,
            session_folder_path: dir.to_path_buf(),
            waha_base_url: Url::parse("http://localhost:3000").unwrap(),
            waha_api_key: None,
            sessions: vec!["default".to_string()],
        }
    }

    async fn state_with(dir: &Path, session_id: &str, client: Arc<dyn SessionClient>) -> AppState {
        let sessions = Arc::new(SessionRegistry::new());
        sessions.insert(session_id, client).await;
        AppState {
            cfg: test_config(dir),
            sessions,
        }
    }

    fn chat_message(from_me: bool, message_type: &str) -> serde_json::Value {
        json!({
            "dataType": "message",
            "sessionId": "default",
            "data": {
                "message": {
                    "fromMe": from_me,
                    "type": message_type,
                    "from": "5511999999999@c.us"
                }
            }
        })
    }

    #[tokio::test]
    async fn own_messages_are_ignored_without_sending() {
        let dir = tempfile::tempdir().unwrap();
        let client = Arc::new(RecordingClient::default());
        let state = state_with(dir.path(), "default", client.clone()).await;

        let outcome = process_callback(&state, &chat_message(true, "chat"))
            .await
            .unwrap();

        assert_eq!(outcome, CallbackOutcome::SentMessageIgnored);
        assert!(client.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn chat_message_sends_exactly_one_single_choice_poll() {
        let dir = tempfile::tempdir().unwrap();
        let client = Arc::new(RecordingClient::default());
        let state = state_with(dir.path(), "default", client.clone()).await;

        let outcome = process_callback(&state, &chat_message(false, "chat"))
            .await
            .unwrap();

        assert_eq!(outcome, CallbackOutcome::Processed);
        let sent = client.sent.lock().await;
        assert_eq!(sent.len(), 1);
        let (recipient, poll) = &sent[0];
        assert_eq!(recipient, "5511999999999@c.us");
        assert_eq!(poll.name, POLL_QUESTION);
        assert_eq!(poll.options.len(), 3);
        assert_eq!(poll.options[0], "Sim, por favor!");
        assert!(!poll.multiple_answers);
    }

    #[tokio::test]
    async fn non_chat_messages_send_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let client = Arc::new(RecordingClient::default());
        let state = state_with(dir.path(), "default", client.clone()).await;

        let outcome = process_callback(&state, &chat_message(false, "image"))
            .await
            .unwrap();

        assert_eq!(outcome, CallbackOutcome::Processed);
        assert!(client.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn unregistered_session_is_skipped_silently() {
        let dir = tempfile::tempdir().unwrap();
        let client = Arc::new(RecordingClient::default());
        let state = state_with(dir.path(), "another-session", client.clone()).await;

        let outcome = process_callback(&state, &chat_message(false, "chat"))
            .await
            .unwrap();

        assert_eq!(outcome, CallbackOutcome::Processed);
        assert!(client.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn missing_message_field_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let client = Arc::new(RecordingClient::default());
        let state = state_with(dir.path(), "default", client.clone()).await;

        let payload = json!({ "dataType": "message", "sessionId": "default", "data": {} });
        let outcome = process_callback(&state, &payload).await.unwrap();

        assert_eq!(outcome, CallbackOutcome::Processed);
        assert!(client.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn send_failure_surfaces_as_handle_error() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(dir.path(), "default", Arc::new(FailingClient)).await;

        let err = process_callback(&state, &chat_message(false, "chat"))
            .await
            .unwrap_err();

        assert!(matches!(err, HandleError::Send(_)));
    }

    #[tokio::test]
    async fn every_event_is_appended_to_the_log() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(dir.path(), "default", Arc::new(RecordingClient::default())).await;

        let payload = json!({ "dataType": "call", "sessionId": "default" });
        process_callback(&state, &payload).await.unwrap();

        let contents =
            std::fs::read_to_string(dir.path().join("message_log.txt")).unwrap();
        assert!(contents.contains(&payload.to_string()));
    }

    #[tokio::test]
    async fn type_mismatched_payload_is_a_payload_error() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(dir.path(), "default", Arc::new(RecordingClient::default())).await;

        let payload = json!({ "dataType": 42 });
        let err = process_callback(&state, &payload).await.unwrap_err();

        assert!(matches!(err, HandleError::Payload(_)));
    }
}
