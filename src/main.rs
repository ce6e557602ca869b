//! Gentry & Co. CLI - main entry point
//!
//! Unified CLI for the barbershop's AI concierge and booking tools.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gentry_concierge::commands;

#[derive(Parser)]
#[command(name = "gentry")]
#[command(about = "Gentry & Co. AI concierge, virtual styler & booking tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend hairstyles for a face shape and hair type
    Recommend {
        /// Face shape: oval, round, square, diamond, triangle, oblong
        #[arg(long)]
        face_shape: String,

        /// Hair type: straight, wavy, curly, coily, thinning
        #[arg(long)]
        hair_type: String,

        /// Free-text preferences or lifestyle notes
        #[arg(long, default_value = "")]
        preferences: String,

        /// Response language: en, es, ru
        #[arg(short, long, default_value = "en")]
        language: String,
    },

    /// Restyle a photo with a natural-language instruction
    Restyle {
        /// Path to the source photo (jpeg/png/webp)
        photo: PathBuf,

        /// Desired look, e.g. "Give me a buzz cut"
        #[arg(short, long)]
        prompt: String,

        /// Output file for the restyled photo
        #[arg(short, long, default_value = "restyled.png")]
        output: PathBuf,
    },

    /// Animate a restyled photo into a short cinematic video
    Animate {
        /// Path to the restyled photo (png)
        image: PathBuf,

        /// Styling prompt used to produce the photo
        #[arg(short, long)]
        prompt: String,

        /// Output file for the video
        #[arg(short, long, default_value = "look.mp4")]
        output: PathBuf,
    },

    /// Chat with the virtual concierge
    Concierge {
        /// Display language: en, es, ru
        #[arg(short, long, default_value = "en")]
        language: String,
    },

    /// Book an appointment and send the confirmation email
    Book {
        /// Customer name
        #[arg(long)]
        name: String,

        /// Customer email
        #[arg(long)]
        email: String,

        /// Customer phone
        #[arg(long, default_value = "")]
        phone: String,

        /// Service, e.g. "Executive Cut"
        #[arg(long)]
        service: String,

        /// Appointment date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Appointment time (HH:MM)
        #[arg(long)]
        time: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for local development
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("gentry_concierge=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    execute_command(cli.command).await
}

async fn execute_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Recommend {
            face_shape,
            hair_type,
            preferences,
            language,
        } => {
            commands::recommend::run(&face_shape, &hair_type, &preferences, &language).await?;
        }
        Commands::Restyle {
            photo,
            prompt,
            output,
        } => {
            commands::restyle::run(&photo, &prompt, &output).await?;
        }
        Commands::Animate {
            image,
            prompt,
            output,
        } => {
            commands::animate::run(&image, &prompt, &output).await?;
        }
        Commands::Concierge { language } => {
            commands::concierge::run(&language).await?;
        }
        Commands::Book {
            name,
            email,
            phone,
            service,
            date,
            time,
        } => {
            commands::book::run(&name, &email, &phone, &service, &date, &time).await?;
        }
    }

    Ok(())
}
