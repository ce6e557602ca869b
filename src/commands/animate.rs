//! Animate a restyled photo into a short cinematic video

use std::path::Path;

use base64::Engine;

use crate::config::Config;
use crate::error::Result;
use crate::integrations::gemini::api_key_from_env;
use crate::integrations::veo::{KeySelection, VideoStudio};

/// Console stand-in for the hosted key picker: "selected" means a
/// credential is present in the environment, and prompting prints the
/// instructions a desktop host would render as a dialog.
struct ConsoleKeySelection;

impl KeySelection for ConsoleKeySelection {
    fn has_selected_key(&self) -> bool {
        api_key_from_env().is_some()
    }

    fn open_select_key(&self) {
        println!("Video synthesis needs a key from a paid project.");
        println!("Set GEMINI_API_KEY to such a key and run the command again.");
    }
}

pub async fn run(image: &Path, prompt: &str, output: &Path) -> Result<()> {
    let bytes = tokio::fs::read(image).await?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);

    let config = Config::new();
    // Rebuild the client here so a freshly selected key is used
    let studio = VideoStudio::from_env(&config)?.with_key_selection(Box::new(ConsoleKeySelection));

    println!("Generating cinematic video (this may take a moment)...");

    let artifact = studio.generate_video(&encoded, prompt).await?;
    artifact.save(output).await?;

    println!(
        "✓ Saved {} video ({} bytes) to {}",
        artifact.mime_type,
        artifact.bytes.len(),
        output.display()
    );

    Ok(())
}
