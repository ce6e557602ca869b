//! Virtual restyling of a customer photo

use std::path::Path;

use base64::Engine;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::integrations::gemini::GeminiClient;
use crate::integrations::restyler::generate_edited_image;

fn mime_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

pub async fn run(photo: &Path, prompt: &str, output: &Path) -> Result<()> {
    let bytes = tokio::fs::read(photo).await?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);

    let config = Config::new();
    let client = GeminiClient::from_env(&config.image_model)?;

    println!("Sculpting your new look...");

    let Some(data_url) =
        generate_edited_image(&client, &encoded, mime_type_for(photo), prompt).await?
    else {
        println!("The styler could not produce an image for this photo.");
        return Ok(());
    };

    let payload = data_url
        .split_once(',')
        .map(|(_, payload)| payload)
        .unwrap_or(data_url.as_str());
    let image = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| Error::InvalidArgument(format!("Invalid image payload: {}", e)))?;

    tokio::fs::write(output, &image).await?;
    println!("✓ Saved restyled photo to {}", output.display());

    Ok(())
}
