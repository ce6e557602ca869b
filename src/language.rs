//! Display languages supported by the concierge surfaces.

use std::fmt;

use crate::{Error, Result};

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Es,
    Ru,
}

impl Language {
    /// Two-letter code used in configuration and CLI flags.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Ru => "ru",
        }
    }

    /// Language name as interpolated into model instructions.
    pub fn instruction_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Ru => "Russian",
        }
    }

    /// Parse a language code ("en", "es", "ru").
    pub fn parse(code: &str) -> Result<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            "ru" => Ok(Language::Ru),
            other => Err(Error::InvalidArgument(format!(
                "Unsupported language: {} (expected en, es or ru)",
                other
            ))),
        }
    }

    pub fn all() -> [Language; 3] {
        [Language::En, Language::Es, Language::Ru]
    }

    /// Concierge greeting seeded into a fresh chat session.
    pub fn greeting(&self) -> &'static str {
        match self {
            Language::En => {
                "Good day. I am the Gentry & Co. concierge. How may I assist you with your grooming needs today?"
            }
            Language::Es => {
                "Buen día. Soy el conserje de Gentry & Co. ¿Cómo puedo ayudarle con sus necesidades de aseo hoy?"
            }
            Language::Ru => {
                "Добрый день. Я консьерж Gentry & Co. Чем могу помочь вам с вашими потребностями в уходе сегодня?"
            }
        }
    }

    /// Shown instead of a model reply when no credential is configured.
    pub fn offline_notice(&self) -> &'static str {
        match self {
            Language::En => "I apologize, but I am currently operating in offline mode.",
            Language::Es => "Me disculpo, pero actualmente estoy operando en modo fuera de línea.",
            Language::Ru => "Прошу прощения, но в данный момент я работаю в автономном режиме.",
        }
    }

    /// Substituted for a reply when a chat turn fails mid-stream.
    pub fn apology(&self) -> &'static str {
        match self {
            Language::En => {
                "I apologize, but I seem to be having trouble connecting at the moment. Please try again shortly."
            }
            Language::Es => "Me disculpo, parece que tengo problemas para conectarme en este momento.",
            Language::Ru => "Прошу прощения, но, похоже, у меня проблемы с подключением в данный момент.",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
