//! Request and response bodies for the chat-completion and image-edit
//! endpoints.
//!
//! Only the fields the pipeline reads are modelled; everything else in
//! the responses is ignored during deserialization.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::api::OpenAiApiError;

/// Body of `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f64,
}

/// A single chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> ChatRequest<'a> {
    /// A request carrying one user message.
    pub fn single_user_message(model: &'a str, content: &'a str, temperature: f64) -> Self {
        Self {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content,
            }],
            temperature,
        }
    }
}

/// Response of `POST /chat/completions`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice with surrounding whitespace removed.
    pub fn first_content(&self) -> Result<&str, OpenAiApiError> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(str::trim)
            .ok_or_else(|| {
                OpenAiApiError::MalformedResponse("completion has no message content".to_string())
            })
    }
}

/// Response of `POST /images/edits`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagesResponse {
    #[serde(default)]
    pub data: Vec<ImageData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageData {
    /// Base64-encoded image, present for `gpt-image-1` responses.
    #[serde(default)]
    pub b64_json: Option<String>,
}

impl ImagesResponse {
    /// Decode the first returned image.
    pub fn first_image_bytes(&self) -> Result<Vec<u8>, OpenAiApiError> {
        let encoded = self
            .data
            .first()
            .and_then(|image| image.b64_json.as_deref())
            .ok_or_else(|| {
                OpenAiApiError::MalformedResponse("image response has no b64_json".to_string())
            })?;

        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| OpenAiApiError::MalformedResponse(format!("invalid base64 image: {e}")))
    }
}
