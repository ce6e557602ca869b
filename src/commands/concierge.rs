//! Interactive concierge chat in the terminal

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::Config;
use crate::error::Result;
use crate::integrations::concierge::ConciergeSession;
use crate::integrations::gemini::GeminiClient;
use crate::language::Language;

pub async fn run(language: &str) -> Result<()> {
    let language = Language::parse(language)?;

    let config = Config::new();
    let client = GeminiClient::from_env(&config.text_model)?;

    let Some(mut session) = ConciergeSession::new(client, language) else {
        println!("{}", language.offline_notice());
        return Ok(());
    };

    println!("{}", language.greeting());
    println!("(type 'exit' to leave)\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        let result = session
            .send_message(line, |delta| {
                print!("{}", delta.text);
                std::io::stdout().flush().ok();
            })
            .await;

        match result {
            Ok(reply) => {
                println!();
                if let Some(grounding) = &reply.grounding {
                    for chunk in &grounding.grounding_chunks {
                        if let Some(maps) = &chunk.maps {
                            if let Some(title) = &maps.title {
                                println!("  [map] {}", title);
                            }
                        }
                        if let Some(web) = &chunk.web {
                            if let Some(uri) = &web.uri {
                                println!("  [source] {}", uri);
                            }
                        }
                    }
                }
                println!();
            }
            Err(err) => {
                tracing::error!("Chat error: {}", err);
                println!("{}\n", language.apology());
            }
        }
    }

    Ok(())
}
