//! Production [`Transform`] backed by the OpenAI API.
//!
//! For each item: regenerate the source image with the translated text,
//! translate the file name, force a `.png` extension, and write the new
//! image into the run's output directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use relocale_core::naming::ensure_png_extension;
use relocale_core::types::{TransformOutput, WorkItem};
use relocale_openai::messages::ChatRequest;
use relocale_openai::OpenAiApi;

use crate::error::ServiceError;
use crate::prompts::{file_name_prompt, load_image_prompt, render_image_prompt, LanguagePair};
use crate::transform::Transform;

/// Default model for file-name translation.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4.5-preview";

/// Default model for image editing.
pub const DEFAULT_IMAGE_MODEL: &str = "gpt-image-1";

/// Sampling temperature for file-name translation.
const TRANSLATION_TEMPERATURE: f64 = 0.7;

/// Everything the transform needs besides the API client.
#[derive(Debug, Clone)]
pub struct TransformSettings {
    pub chat_model: String,
    pub image_model: String,
    pub languages: LanguagePair,
    /// Directory holding the prompt templates.
    pub prompts_dir: PathBuf,
    /// Directory receiving this run's regenerated images.
    pub converted_dir: PathBuf,
}

/// Regenerates images and translates their names through the OpenAI API.
pub struct OpenAiTransform {
    api: OpenAiApi,
    settings: TransformSettings,
}

impl OpenAiTransform {
    pub fn new(api: OpenAiApi, settings: TransformSettings) -> Self {
        Self { api, settings }
    }

    /// Edit the source image so it carries the translated text.
    async fn generate_image(&self, item: &WorkItem) -> Result<Vec<u8>, ServiceError> {
        let image = tokio::fs::read(&item.image_path)
            .await
            .map_err(|source| ServiceError::Io {
                path: item.image_path.clone(),
                source,
            })?;

        let template = load_image_prompt(&self.settings.prompts_dir).await?;
        let prompt = render_image_prompt(&template, &item.translated_text);

        let response = self
            .api
            .edit_image(
                &self.settings.image_model,
                &prompt,
                image,
                upload_file_name(&item.image_path),
            )
            .await?;

        Ok(response.first_image_bytes()?)
    }

    /// Translate a file name, keeping its structure.
    async fn translate_name(&self, item_name: &str) -> Result<String, ServiceError> {
        let prompt = file_name_prompt(&self.settings.languages, item_name);
        let request = ChatRequest::single_user_message(
            &self.settings.chat_model,
            &prompt,
            TRANSLATION_TEMPERATURE,
        );
        let response = self.api.chat_completion(&request).await?;
        Ok(response.first_content()?.to_string())
    }
}

#[async_trait]
impl Transform for OpenAiTransform {
    async fn execute(&self, item: WorkItem) -> Result<TransformOutput, ServiceError> {
        let image = self.generate_image(&item).await?;

        let translated = self.translate_name(&item.item_name).await?;
        let converted_name = ensure_png_extension(&translated);

        let converted_dir = &self.settings.converted_dir;
        tokio::fs::create_dir_all(converted_dir)
            .await
            .map_err(|source| ServiceError::Io {
                path: converted_dir.clone(),
                source,
            })?;

        let output_path = output_path(converted_dir, &converted_name);
        tokio::fs::write(&output_path, &image)
            .await
            .map_err(|source| ServiceError::Io {
                path: output_path.clone(),
                source,
            })?;

        tracing::debug!(
            row = item.row,
            output = %output_path.display(),
            bytes = image.len(),
            "Regenerated image written",
        );

        Ok(TransformOutput {
            converted_name,
            output_path,
        })
    }
}

/// Name sent with the uploaded image.
fn upload_file_name(image_path: &Path) -> &str {
    image_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("image.png")
}

/// Where a converted image is stored. Only the final path component of
/// the name is used.
fn output_path(converted_dir: &Path, converted_name: &str) -> PathBuf {
    match Path::new(converted_name).file_name() {
        Some(file_name) => converted_dir.join(file_name),
        None => converted_dir.join("image.png"),
    }
}
