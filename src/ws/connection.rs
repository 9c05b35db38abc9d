//! WebSocket connection loop.
//!
//! Handles the read/write loop for a single live-feed connection,
//! dispatching incoming commands and forwarding filtered events.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::domain::RegistryEvent;
use crate::service::RegistrationService;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - New connections receive every registration until they narrow the
///   filter with `subscribe` / `unsubscribe`.
/// - Reads commands from the client and answers them.
/// - Forwards matching events from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<RegistryEvent>,
    service: Arc<RegistrationService>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::all();

    tracing::debug!("ws connection opened");

    loop {
        tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &mut subs, &service).await;
                        if ws_tx.send(Message::text(response.to_json())).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(error = %e, "ws receive failed");
                        break;
                    }
                    _ => {}
                }
            }
            // Event from EventBus
            event = event_rx.recv() => {
                match event {
                    Ok(registry_event) => {
                        if subs.matches(registry_event.grade()) {
                            let msg = WsMessage::new(
                                uuid::Uuid::new_v4().to_string(),
                                WsMessageType::Event,
                                serde_json::to_value(&registry_event).unwrap_or_default(),
                            );
                            if ws_tx.send(Message::text(msg.to_json())).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Handles a text message from the client and builds the reply.
async fn handle_text_message(
    text: &str,
    subs: &mut SubscriptionManager,
    service: &RegistrationService,
) -> WsMessage {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return WsMessage::error("", 400, "malformed JSON");
    };

    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
        return WsMessage::error(msg.id, 404, "unknown command");
    };

    match command {
        WsCommand::Subscribe { grades } => {
            let (grades, wildcard) = parse_grades(&grades);
            subs.subscribe(&grades, wildcard);
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "subscribed": grades,
                    "count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        WsCommand::Unsubscribe { grades } => {
            let (grades, wildcard) = parse_grades(&grades);
            subs.unsubscribe(&grades, wildcard);
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "unsubscribed": grades,
                    "remaining_count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        WsCommand::Snapshot => {
            let students = service.list_students().await;
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({ "students": students }),
            )
        }
    }
}

/// Splits a grade list into explicit grades and the `"*"` wildcard flag.
/// Entries that are neither an integer, an integer string, nor `"*"` are
/// ignored.
fn parse_grades(values: &[Value]) -> (Vec<i64>, bool) {
    let mut grades = Vec::with_capacity(values.len());
    let mut wildcard = false;
    for value in values {
        match value {
            Value::String(s) if s == "*" => wildcard = true,
            Value::String(s) => {
                if let Ok(grade) = s.trim().parse::<i64>() {
                    grades.push(grade);
                }
            }
            Value::Number(n) => {
                if let Some(grade) = n.as_i64() {
                    grades.push(grade);
                }
            }
            _ => {}
        }
    }
    (grades, wildcard)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{EventBus, StudentStore};

    fn make_service() -> RegistrationService {
        RegistrationService::new(Arc::new(StudentStore::new()), EventBus::new(16))
    }

    #[test]
    fn parse_grades_mixes_numbers_strings_and_wildcard() {
        let (grades, wildcard) = parse_grades(&[json!(9), json!("10"), json!("*"), json!(null)]);
        assert_eq!(grades, vec![9, 10]);
        assert!(wildcard);
    }

    #[tokio::test]
    async fn malformed_json_yields_400_error() {
        let service = make_service();
        let mut subs = SubscriptionManager::all();
        let reply = handle_text_message("{not json", &mut subs, &service).await;
        assert_eq!(reply.msg_type, WsMessageType::Error);
        assert_eq!(reply.payload["code"], 400);
    }

    #[tokio::test]
    async fn unknown_command_yields_404_error() {
        let service = make_service();
        let mut subs = SubscriptionManager::all();
        let text = r#"{"id":"c1","type":"command","payload":{"command":"dance"}}"#;
        let reply = handle_text_message(text, &mut subs, &service).await;
        assert_eq!(reply.msg_type, WsMessageType::Error);
        assert_eq!(reply.id, "c1");
        assert_eq!(reply.payload["code"], 404);
    }

    #[tokio::test]
    async fn unsubscribe_then_subscribe_narrows_filter() {
        let service = make_service();
        let mut subs = SubscriptionManager::all();

        let text = r#"{"type":"command","payload":{"command":"unsubscribe","grades":["*"]}}"#;
        let _ = handle_text_message(text, &mut subs, &service).await;
        assert!(!subs.matches(9));

        let text = r#"{"type":"command","payload":{"command":"subscribe","grades":[10]}}"#;
        let reply = handle_text_message(text, &mut subs, &service).await;
        assert_eq!(reply.msg_type, WsMessageType::Response);
        assert_eq!(reply.payload["count"], 1);
        assert!(subs.matches(10));
        assert!(!subs.matches(9));
    }

    #[tokio::test]
    async fn snapshot_returns_registered_students() {
        let service = make_service();
        let _ = service
            .register(crate::api::dto::RegistrationRequest {
                name: Some(json!("A")),
                email: Some(json!("a@x.com")),
                grade: Some(json!(9)),
            })
            .await;
        let mut subs = SubscriptionManager::all();

        let text = r#"{"id":"s","type":"command","payload":{"command":"snapshot"}}"#;
        let reply = handle_text_message(text, &mut subs, &service).await;
        assert_eq!(reply.msg_type, WsMessageType::Response);
        assert_eq!(reply.payload["students"][0]["email"], "a@x.com");
    }
}
