//! Live smoke test for the concierge chat.

use std::io::Write;

use dotenvy::dotenv;
use gentry_concierge::integrations::concierge::ConciergeSession;
use gentry_concierge::{Config, GeminiClient, Language};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env from the project root
    dotenv().ok();

    println!("🔄 Concierge chat smoke test...\n");

    let config = Config::new();
    let client = GeminiClient::from_env(&config.text_model)?;

    let Some(mut session) = ConciergeSession::new(client, Language::En) else {
        println!("⚠️  No API key configured — offline mode:");
        println!("{}", Language::En.offline_notice());
        return Ok(());
    };

    println!("✅ Session created, model: {}\n", config.text_model);
    println!("📤 Sending: \"What are your opening hours on Saturday?\"");
    print!("📥 Reply: ");

    let reply = session
        .send_message("What are your opening hours on Saturday?", |delta| {
            print!("{}", delta.text);
            std::io::stdout().flush().ok();
        })
        .await?;

    println!("\n");
    if reply.grounding.is_some() {
        println!("📍 Reply carried grounding metadata");
    }

    println!("✅ Smoke test passed!");
    Ok(())
}
