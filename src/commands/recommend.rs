//! Hairstyle recommendations from the AI style consultant

use crate::config::Config;
use crate::error::Result;
use crate::integrations::gemini::GeminiClient;
use crate::integrations::stylist::{recommend_styles, FaceShape, HairType};
use crate::language::Language;

pub async fn run(
    face_shape: &str,
    hair_type: &str,
    preferences: &str,
    language: &str,
) -> Result<()> {
    let face_shape = FaceShape::parse(face_shape)?;
    let hair_type = HairType::parse(hair_type)?;
    let language = Language::parse(language)?;

    let config = Config::new();
    let client = GeminiClient::from_env(&config.text_model)?;

    if !client.is_live() {
        println!("(offline mode: showing the house recommendation)");
    }

    let recommendations =
        recommend_styles(&client, face_shape, hair_type, preferences, language).await?;

    if recommendations.is_empty() {
        println!("No recommendations this time. Try adjusting your preferences.");
        return Ok(());
    }

    for (index, rec) in recommendations.iter().enumerate() {
        println!("{}. {}", index + 1, rec.name);
        println!("   {}", rec.description);
        println!("   Styling: {}", rec.styling_tips);
        println!("   Suits:   {}", rec.suitability);
        println!();
    }

    Ok(())
}
