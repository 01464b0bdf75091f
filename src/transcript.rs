//! The conversation shown to the user, newest message first, and the two-phase
//! send that feeds it.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::api::client::ApiClient;
use crate::format::format;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub author: Author,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(author: Author, text: impl Into<String>) -> Self {
        Self { author, text: text.into(), timestamp: Utc::now() }
    }
}

#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn prepend(&mut self, message: Message) {
        self.messages.insert(0, message);
    }
}

/// Shared handle passed explicitly into the reply task.
pub type TranscriptHandle = Arc<Mutex<Transcript>>;

pub fn new_handle() -> TranscriptHandle {
    Arc::new(Mutex::new(Transcript::new()))
}

// Prepend is a single insert, so a poisoned lock still guards a consistent list.
fn lock(handle: &TranscriptHandle) -> MutexGuard<'_, Transcript> {
    handle.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// First phase: record what the user typed.
pub fn append_user_message(handle: &TranscriptHandle, text: &str) -> Message {
    let message = Message::new(Author::User, text);
    lock(handle).prepend(message.clone());
    message
}

/// Second phase: ask the server and record exactly one assistant message,
/// either the formatted reply or the apology.
pub async fn resolve_reply(client: &ApiClient, handle: TranscriptHandle, text: &str) -> Message {
    let reply = match client.send(text).await {
        Ok(raw) => format(&raw),
        Err(e) => e.to_string(),
    };
    let message = Message::new(Author::Assistant, reply);
    lock(&handle).prepend(message.clone());
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::{closed_endpoint, spawn_server, Behavior, Hits};
    use crate::api::error::APOLOGY;
    use std::time::Duration;

    #[test]
    fn user_messages_are_prepended() {
        let handle = new_handle();
        append_user_message(&handle, "primero");
        append_user_message(&handle, "segundo");

        let transcript = handle.lock().unwrap();
        let texts: Vec<&str> = transcript.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["segundo", "primero"]);
        assert!(transcript.messages().iter().all(|m| m.author == Author::User));
    }

    #[test]
    fn newest_message_has_latest_timestamp() {
        let handle = new_handle();
        append_user_message(&handle, "a");
        append_user_message(&handle, "b");
        let transcript = handle.lock().unwrap();
        assert!(transcript.messages()[0].timestamp >= transcript.messages()[1].timestamp);
    }

    #[tokio::test]
    async fn reply_is_formatted_and_prepended() {
        let hits = Hits::default();
        let a = spawn_server("A", Behavior::Reply(200, r#"{"message": "**listo**"}"#), hits).await;
        let client = ApiClient::new(vec![a], Duration::from_millis(300)).unwrap();
        let handle = new_handle();

        append_user_message(&handle, "hola");
        let reply = resolve_reply(&client, handle.clone(), "hola").await;

        assert_eq!(reply.author, Author::Assistant);
        assert_eq!(reply.text, "LISTO");
        let transcript = handle.lock().unwrap();
        assert_eq!(transcript.messages().len(), 2);
        assert_eq!(transcript.messages()[0].text, "LISTO");
        assert_eq!(transcript.messages()[1].author, Author::User);
    }

    #[tokio::test]
    async fn exhausted_endpoints_add_one_apology() {
        let client = ApiClient::new(
            vec![closed_endpoint().await, closed_endpoint().await],
            Duration::from_millis(300),
        )
        .unwrap();
        let handle = new_handle();

        append_user_message(&handle, "hola");
        resolve_reply(&client, handle.clone(), "hola").await;

        let transcript = handle.lock().unwrap();
        let assistant: Vec<&Message> = transcript
            .messages()
            .iter()
            .filter(|m| m.author == Author::Assistant)
            .collect();
        assert_eq!(assistant.len(), 1);
        assert_eq!(assistant[0].text, APOLOGY);
        assert_eq!(transcript.messages()[0].text, APOLOGY);
    }
}
