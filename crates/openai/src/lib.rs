//! REST client for the OpenAI text-completion and image-edit endpoints.
//!
//! [`api::OpenAiApi`] wraps the HTTP calls; [`messages`] holds the typed
//! request and response bodies.

pub mod api;
pub mod messages;

pub use api::{OpenAiApi, OpenAiApiError};
