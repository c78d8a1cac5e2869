//! OpenAI chat-completions payloads for image analysis.

use serde::{Deserialize, Serialize};

/// Request body for OpenAI chat completions.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub response_format: ResponseFormat,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// Structured response-format directive for chat completions.
#[derive(Debug, Serialize, Clone)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

/// Message content as the API sends it: either a plain string or a list of
/// typed parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatMessageContent {
    Text(String),
    Parts(Vec<MessagePart>),
}

/// One content segment in a multipart message.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessagePart {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub part_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<ImageUrl>,
}

impl MessagePart {
    pub fn text(text: &str) -> Self {
        Self {
            part_type: Some("text".to_string()),
            text: Some(text.to_string()),
            image_url: None,
        }
    }

    pub fn image_url(url: String) -> Self {
        Self {
            part_type: Some("image_url".to_string()),
            text: None,
            image_url: Some(ImageUrl { url }),
        }
    }
}

/// Image URL wrapper for OpenAI message payloads.
#[derive(Debug, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// Chat message object.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ChatMessageContent>,
}

/// Top-level chat completion response.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

/// Single choice item returned by chat completions.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
    pub finish_reason: Option<String>,
}

/// The JSON document the model is instructed to emit.
#[derive(Debug, Deserialize)]
pub struct FoodPayload {
    pub food_name: String,
    pub calories: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_decodes_plain_string() {
        let message: ChatMessage =
            serde_json::from_str(r#"{"role":"assistant","content":"hello"}"#).unwrap();
        assert!(matches!(message.content, Some(ChatMessageContent::Text(ref s)) if s == "hello"));
    }

    #[test]
    fn test_content_decodes_parts_without_type_or_text() {
        let body = serde_json::json!({
            "content": [
                {"type": "refusal"},
                {"text": "x"},
                {"type": "text", "text": "y", "annotations": []}
            ]
        });
        let message: ChatMessage = serde_json::from_value(body).unwrap();

        let Some(ChatMessageContent::Parts(parts)) = message.content else {
            panic!("expected parts");
        };
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].part_type.as_deref(), Some("refusal"));
        assert!(parts[0].text.is_none());
        assert!(parts[1].part_type.is_none());
        assert_eq!(parts[2].text.as_deref(), Some("y"));
    }

    #[test]
    fn test_content_rejects_other_shapes() {
        let result = serde_json::from_str::<ChatMessage>(r#"{"content":42}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_null_content_is_none() {
        let message: ChatMessage = serde_json::from_str(r#"{"content":null}"#).unwrap();
        assert!(message.content.is_none());
    }

    #[test]
    fn test_food_payload_rejects_negative_calories() {
        let result = serde_json::from_str::<FoodPayload>(r#"{"food_name":"Kale","calories":-5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_request_parts_serialize_with_type_tags() {
        let json = serde_json::to_value(MessagePart::image_url("data:x".to_string())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "image_url", "image_url": {"url": "data:x"}})
        );
    }
}
