use async_trait::async_trait;
use thiserror::Error;

use crate::core::models::ChatMessage;
use crate::global_constants::FREEFORM_SYSTEM_PROMPT;

/// Why a model call produced no answer. The `Display` text of each variant
/// is the user-facing diagnostic; callers that want the original
/// "always a string, never an error" contract render it with `to_string()`.
#[derive(Debug, Error)]
pub enum ChatFailure {
    #[error("model request failed with HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("model service not reachable on {endpoint} - is the local inference service running? ({detail})")]
    Unreachable { endpoint: String, detail: String },

    #[error("model reply was malformed: {detail}")]
    MalformedReply { detail: String },
}

/// Chat-style text generation against the local inference endpoint.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send a caller-supplied conversation as-is; no system message is
    /// injected.
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, ChatFailure>;

    /// Wrap a single user prompt with the fixed assistant system message.
    async fn ask(&self, user_prompt: &str) -> Result<String, ChatFailure> {
        let messages = vec![
            ChatMessage::system(FREEFORM_SYSTEM_PROMPT),
            ChatMessage::user(user_prompt),
        ];
        self.chat(&messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingChatModel {
        seen_messages: Mutex<Vec<ChatMessage>>,
    }

    #[async_trait]
    impl ChatModel for RecordingChatModel {
        async fn chat(&self, messages: &[ChatMessage]) -> Result<String, ChatFailure> {
            *self.seen_messages.lock().unwrap() = messages.to_vec();
            Ok("ok".to_string())
        }
    }

    #[tokio::test]
    async fn test_ask_prepends_fixed_system_message() {
        let model = RecordingChatModel {
            seen_messages: Mutex::new(Vec::new()),
        };

        let answer = model.ask("What is 2+2?").await.unwrap();

        assert_eq!(answer, "ok");
        let seen = model.seen_messages.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], ChatMessage::system(FREEFORM_SYSTEM_PROMPT));
        assert_eq!(seen[1], ChatMessage::user("What is 2+2?"));
    }

    #[test]
    fn test_unreachable_failure_names_the_endpoint() {
        let failure = ChatFailure::Unreachable {
            endpoint: "http://localhost:11434/api/chat".to_string(),
            detail: "connection refused".to_string(),
        };

        let message = failure.to_string();

        assert!(message.contains("not reachable on http://localhost:11434/api/chat"));
        assert!(message.contains("connection refused"));
    }

    #[test]
    fn test_http_failure_embeds_status_and_body() {
        let failure = ChatFailure::Http {
            status: 404,
            body: "model 'llama3.1:8b' not found".to_string(),
        };

        let message = failure.to_string();

        assert!(message.contains("404"));
        assert!(message.contains("not found"));
    }
}
