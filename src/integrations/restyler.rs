//! Virtual hair styler: photo editing through the image model.
//!
//! Sends a customer photo plus a natural-language instruction and returns
//! the model's repainted image as a PNG data URL.

use crate::integrations::gemini::{
    Content, GeminiClient, GenerateContentRequest, InlineData, Part,
};
use crate::Result;

/// Ask the image model to re-style a photo.
///
/// `image_base64` may carry a `data:` URL prefix; only the payload after
/// the first comma is transmitted. Returns `None` when no credential is
/// configured or when the model's response carries no image part — callers
/// treat that as "unsupported", not as an error. Transport and model
/// failures propagate unmodified.
pub async fn generate_edited_image(
    client: &GeminiClient,
    image_base64: &str,
    mime_type: &str,
    prompt: &str,
) -> Result<Option<String>> {
    if !client.is_live() {
        tracing::warn!("No API key provided for image generation.");
        return Ok(None);
    }

    // Clean base64 string if it contains the data URL prefix
    let clean_base64 = image_base64
        .split_once(',')
        .map(|(_, payload)| payload)
        .unwrap_or(image_base64);

    let request = GenerateContentRequest::from_contents(vec![Content {
        role: "user".to_string(),
        parts: vec![
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: mime_type.to_string(),
                    data: clean_base64.to_string(),
                },
            },
            Part::Text {
                text: prompt.to_string(),
            },
        ],
    }]);

    let response = client.generate_content(&request).await?;

    Ok(response
        .inline_data()
        .map(|part| format!("data:image/png;base64,{}", part.data)))
}
