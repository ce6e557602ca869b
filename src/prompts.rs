//! Loader for model system prompts.
//!
//! Prompts live as Markdown files in the `prompts/` directory at the project
//! root. Each prompt also carries a compiled-in default so the library works
//! without the asset directory. Templates may contain a `{language}` token,
//! replaced with the active display language before use.

use std::path::PathBuf;

use crate::{Error, Result};

/// Available prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Virtual concierge persona with business facts.
    Concierge,
    /// Master-barber style consultant.
    Stylist,
}

impl Prompt {
    /// Prompt file name (Markdown).
    pub fn filename(&self) -> &'static str {
        match self {
            Prompt::Concierge => "concierge.md",
            Prompt::Stylist => "stylist.md",
        }
    }

    /// Load the prompt from its file.
    pub fn load(&self) -> Result<String> {
        load_prompt(self.filename())
    }

    /// Compiled-in template used when the prompt file is missing.
    pub fn default_text(&self) -> &'static str {
        match self {
            Prompt::Concierge => CONCIERGE_DEFAULT,
            Prompt::Stylist => STYLIST_DEFAULT,
        }
    }

    /// Prompt template: file contents if present, compiled default otherwise.
    pub fn text(&self) -> String {
        self.load()
            .unwrap_or_else(|_| self.default_text().to_string())
    }
}

/// Load a prompt by file name.
pub fn load_prompt(filename: &str) -> Result<String> {
    let path = prompts_dir().join(filename);
    std::fs::read_to_string(&path)
        .map_err(|e| Error::InvalidArgument(format!("Failed to load prompt {}: {}", filename, e)))
}

/// Path to the prompts directory.
pub fn prompts_dir() -> PathBuf {
    // Look for prompts/ relative to the current or parent directory
    let candidates = [
        PathBuf::from("prompts"),
        PathBuf::from("../prompts"),
        PathBuf::from("../../prompts"),
    ];

    for path in candidates {
        if path.exists() {
            return path;
        }
    }

    // Fallback
    PathBuf::from("prompts")
}

/// List of all available prompts.
pub fn list_prompts() -> Vec<Prompt> {
    vec![Prompt::Concierge, Prompt::Stylist]
}

const CONCIERGE_DEFAULT: &str = r#"You are the Virtual Concierge for "Gentry & Co.", a premium barbershop located in Gaithersburg, MD (at Rio Lakefront).

**Your Persona:**
- Sophisticated, polite, and professional (like a high-end hotel concierge).
- Knowledgeable about men's grooming, hair trends, and beard care.
- Helpful and concise.
- **IMPORTANT: Always respond in {language}.**

**Business Details:**
- **Location:** 9811 Washingtonian Blvd, Gaithersburg, MD 20878 (Rio Lakefront).
- **Phone:** (301) 555-0123.
- **Hours:** Mon-Fri 10am-8pm, Sat 9am-6pm, Sun 10am-4pm.

**Services & Pricing:**
- Executive Cut: $45 (Precision cut + hot towel)
- Signature Shave: $50 (Hot lather + straight razor)
- Beard Sculpting: $35
- The Gentry Experience: $85 (Cut + Shave combo)
- Scalp Treatment: $25
- Father & Son: $75

**Rules:**
- If a user asks to book an appointment, kindly guide them to click the "Book Appointment" button on the website. You cannot book it for them directly.
- Provide short styling tips if asked.
- You have access to Google Maps. If a user asks about the location or what's nearby, use the Google Maps tool to provide accurate information.
- Keep responses under 100 words unless asked for a detailed explanation.
"#;

const STYLIST_DEFAULT: &str = r#"You are an expert hair stylist and barber. Your tone is professional, sophisticated, and helpful. Focus on modern, stylish cuts suitable for a gentleman. Reply in {language}.
"#;
