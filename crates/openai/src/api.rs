//! HTTP client for the OpenAI REST endpoints used by the pipeline.
//!
//! Wraps chat completion and image editing using [`reqwest`].

use reqwest::multipart::{Form, Part};

use crate::messages::{ChatRequest, ChatResponse, ImagesResponse};

/// Default base URL of the OpenAI REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// MIME type sent for uploaded source images.
const IMAGE_MIME: &str = "image/png";

/// HTTP client for one OpenAI-compatible API endpoint.
pub struct OpenAiApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Errors from the OpenAI REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum OpenAiApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code (rate limits included).
    #[error("OpenAI API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response that lacks the expected payload.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl OpenAiApi {
    /// Create a new API client.
    ///
    /// * `base_url` - API root, e.g. `https://api.openai.com/v1`. A
    ///   trailing slash is ignored.
    pub fn new(api_key: String, base_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_key, base_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run a chat completion.
    ///
    /// Sends `POST /chat/completions` with the given request body.
    pub async fn chat_completion(
        &self,
        request: &ChatRequest<'_>,
    ) -> Result<ChatResponse, OpenAiApiError> {
        tracing::debug!(model = request.model, "Requesting chat completion");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Edit an image according to a text prompt.
    ///
    /// Sends `POST /images/edits` as multipart form data with the
    /// source image uploaded as PNG.
    pub async fn edit_image(
        &self,
        model: &str,
        prompt: &str,
        image: Vec<u8>,
        file_name: &str,
    ) -> Result<ImagesResponse, OpenAiApiError> {
        tracing::debug!(model, file_name, bytes = image.len(), "Requesting image edit");

        let image_part = Part::bytes(image)
            .file_name(file_name.to_string())
            .mime_str(IMAGE_MIME)?;

        let form = Form::new()
            .text("model", model.to_string())
            .text("prompt", prompt.to_string())
            .part("image", image_part);

        let response = self
            .client
            .post(format!("{}/images/edits", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, or turn it into
    /// an [`OpenAiApiError::ApiError`] carrying the status and body.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, OpenAiApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(OpenAiApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, OpenAiApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
