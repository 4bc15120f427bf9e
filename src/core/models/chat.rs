use serde::{Deserialize, Serialize};

/// One role-tagged message in a chat exchange with the model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Result of the explain-selection pipeline. `answer` is always readable
/// text; failures are encoded into it rather than surfaced as errors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainOutcome {
    pub ocr_text: String,
    pub answer: String,
}

impl ExplainOutcome {
    pub fn failed(message: impl std::fmt::Display) -> Self {
        Self {
            ocr_text: String::new(),
            answer: format!("Failed: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors_assign_roles() {
        assert_eq!(ChatMessage::system("s").role, "system");
        assert_eq!(ChatMessage::user("u").role, "user");
        assert_eq!(ChatMessage::assistant("a").role, "assistant");
    }

    #[test]
    fn test_explain_outcome_serializes_with_camel_case_keys() {
        let outcome = ExplainOutcome {
            ocr_text: "hello".to_string(),
            answer: "world".to_string(),
        };

        let json = serde_json::to_string(&outcome).unwrap();

        assert!(json.contains("\"ocrText\":\"hello\""));
        assert!(json.contains("\"answer\":\"world\""));
    }

    #[test]
    fn test_failed_outcome_prefixes_answer_and_clears_text() {
        let outcome = ExplainOutcome::failed("no capture source available");

        assert_eq!(outcome.ocr_text, "");
        assert_eq!(outcome.answer, "Failed: no capture source available");
    }
}
