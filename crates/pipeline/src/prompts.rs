//! Prompt construction for the two remote calls.
//!
//! The image prompt comes from a template file on disk so it can be
//! tuned without a rebuild; the file-name translation prompt is built
//! in code.

use std::path::{Path, PathBuf};

use crate::error::ServiceError;

/// File name of the image-generation prompt template.
pub const IMAGE_PROMPT_FILE: &str = "generate_image_prompt.txt";

/// Placeholder replaced with the translated text.
pub const TEXT_PLACEHOLDER: &str = "[TEXT]";

/// Location of the image prompt template inside `prompts_dir`.
pub fn image_prompt_path(prompts_dir: &Path) -> PathBuf {
    prompts_dir.join(IMAGE_PROMPT_FILE)
}

/// Read the image prompt template.
pub async fn load_image_prompt(prompts_dir: &Path) -> Result<String, ServiceError> {
    let path = image_prompt_path(prompts_dir);
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| ServiceError::Prompt { path, source })
}

/// Fill the first [`TEXT_PLACEHOLDER`] of a template.
pub fn render_image_prompt(template: &str, translated_text: &str) -> String {
    template.replacen(TEXT_PLACEHOLDER, translated_text, 1)
}

/// Languages of a file-name translation.
#[derive(Debug, Clone)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self {
            source: "Slovenian".to_string(),
            target: "Slovak".to_string(),
        }
    }
}

/// Build the prompt asking for a structure-preserving translation of a
/// file name.
pub fn file_name_prompt(languages: &LanguagePair, file_name: &str) -> String {
    let LanguagePair { source, target } = languages;
    format!(
        "You are an expert translator tasked with translating file names \
         from {source} to {target}.\n\
         \n\
         Instructions:\n\
         - Translate only the words from {source} to {target}.\n\
         - Preserve the original file name structure, including underscores (_), \
         hyphens (-), numbers (e.g. 01, 02, 123) and the file extension \
         (.png, .jpg, .jpeg, etc.).\n\
         - Do not add spaces where they do not exist.\n\
         - Do not alter casing; uppercase and lowercase must stay as in the original.\n\
         - If the file name has no separators (no spaces, underscores or hyphens), \
         translate it without inserting any separators.\n\
         - Translate accurately, naturally and appropriately for the context.\n\
         - Reply with the translated file name only.\n\
         \n\
         Translate this: {file_name}"
    )
}
