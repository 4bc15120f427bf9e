use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::interfaces::adapters::{ChatFailure, ChatModel};
use crate::core::models::ChatMessage;
use crate::global_constants::{LOG_TAG_OLLAMA, OLLAMA_CHAT_ENDPOINT, OLLAMA_MODEL_NAME};

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaChatReply {
    message: Option<OllamaReplyMessage>,
}

#[derive(Deserialize)]
struct OllamaReplyMessage {
    content: String,
}

/// Chat client for a locally running Ollama service.
///
/// One non-streaming request per call; transport and protocol problems come
/// back as [`ChatFailure`] values whose display text is already fit to show
/// the user.
pub struct OllamaChatClient {
    http_client: reqwest::Client,
    chat_endpoint: String,
    model_name: String,
}

impl OllamaChatClient {
    pub fn new() -> Self {
        Self::with_endpoint(
            OLLAMA_CHAT_ENDPOINT.to_string(),
            OLLAMA_MODEL_NAME.to_string(),
        )
    }

    pub fn with_endpoint(chat_endpoint: String, model_name: String) -> Self {
        log::debug!(
            "{} chat client targeting {} with model '{}'",
            LOG_TAG_OLLAMA,
            chat_endpoint,
            model_name
        );

        Self {
            http_client: reqwest::Client::new(),
            chat_endpoint,
            model_name,
        }
    }
}

impl Default for OllamaChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatModel for OllamaChatClient {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, ChatFailure> {
        log::info!(
            "{} sending {} message(s) to model '{}'",
            LOG_TAG_OLLAMA,
            messages.len(),
            self.model_name
        );

        let body = OllamaChatRequest {
            model: &self.model_name,
            messages,
            stream: false,
        };

        let response = self
            .http_client
            .post(&self.chat_endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|error| ChatFailure::Unreachable {
                endpoint: self.chat_endpoint.clone(),
                detail: error.to_string(),
            })?;

        let status = response.status();
        let reply_text = response
            .text()
            .await
            .map_err(|error| ChatFailure::Unreachable {
                endpoint: self.chat_endpoint.clone(),
                detail: error.to_string(),
            })?;

        if !status.is_success() {
            log::error!(
                "{} request rejected with HTTP {}: {}",
                LOG_TAG_OLLAMA,
                status,
                reply_text
            );
            return Err(ChatFailure::Http {
                status: status.as_u16(),
                body: reply_text,
            });
        }

        let reply: OllamaChatReply =
            serde_json::from_str(&reply_text).map_err(|error| ChatFailure::MalformedReply {
                detail: error.to_string(),
            })?;

        let content = reply
            .message
            .map(|message| message.content)
            .ok_or_else(|| ChatFailure::MalformedReply {
                detail: "reply carried no message".to_string(),
            })?;

        log::info!(
            "{} received {} characters from model",
            LOG_TAG_OLLAMA,
            content.len()
        );
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::global_constants::FREEFORM_SYSTEM_PROMPT;

    async fn client_for(server: &MockServer) -> OllamaChatClient {
        OllamaChatClient::with_endpoint(
            format!("{}/api/chat", server.uri()),
            "llama3.1:8b".to_string(),
        )
    }

    #[tokio::test]
    async fn test_ask_extracts_the_generated_message_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama3.1:8b",
                "stream": false,
                "messages": [
                    { "role": "system", "content": FREEFORM_SYSTEM_PROMPT },
                    { "role": "user", "content": "What is 2+2?" },
                ],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": { "role": "assistant", "content": "4" },
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;

        let answer = client.ask("What is 2+2?").await.unwrap();

        assert_eq!(answer, "4");
    }

    #[tokio::test]
    async fn test_chat_sends_caller_messages_without_a_system_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(serde_json::json!({
                "messages": [{ "role": "user", "content": "hi" }],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": { "role": "assistant", "content": "hello" },
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;

        let answer = client.chat(&[ChatMessage::user("hi")]).await.unwrap();

        assert_eq!(answer, "hello");
    }

    #[tokio::test]
    async fn test_http_error_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string("model 'llama3.1:8b' not found"),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;

        let failure = client.ask("hello").await.unwrap_err();

        match failure {
            ChatFailure::Http { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("not found"));
            }
            other => panic!("expected Http failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_reported_as_unreachable() {
        // nothing listens on this port
        let client = OllamaChatClient::with_endpoint(
            "http://127.0.0.1:9/api/chat".to_string(),
            "llama3.1:8b".to_string(),
        );

        let failure = client.ask("hello").await.unwrap_err();

        let message = failure.to_string();
        assert!(message.contains("not reachable"));
        assert!(message.contains("127.0.0.1:9"));
    }

    #[tokio::test]
    async fn test_reply_without_message_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "done": true,
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;

        let failure = client.ask("hello").await.unwrap_err();

        assert!(matches!(failure, ChatFailure::MalformedReply { .. }));
    }
}
