//! Live smoke test for the style consultant.

use dotenvy::dotenv;
use gentry_concierge::integrations::stylist::{recommend_styles, FaceShape, HairType};
use gentry_concierge::{Config, GeminiClient, Language};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env from the project root
    dotenv().ok();

    println!("🔄 Style consultant smoke test...\n");

    let config = Config::new();
    let client = GeminiClient::from_env(&config.text_model)?;
    if !client.is_live() {
        println!("⚠️  No API key configured — expecting the house recommendation.");
    }

    let recommendations = recommend_styles(
        &client,
        FaceShape::Oval,
        HairType::Wavy,
        "low maintenance, office friendly",
        Language::En,
    )
    .await?;

    println!("✅ Received {} recommendation(s):\n", recommendations.len());
    for rec in &recommendations {
        println!("— {}: {}", rec.name, rec.description);
    }

    println!("\n✅ Smoke test passed!");
    Ok(())
}
