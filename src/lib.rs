//! Gentry & Co. Concierge Library
//!
//! This library provides the AI-service integrations behind the Gentry &
//! Co. barbershop experience:
//! - Hairstyle recommendations from face shape, hair type and preferences
//! - Virtual restyling of customer photos
//! - Short cinematic videos synthesized from a restyled photo
//! - A streaming concierge chat with business knowledge and map lookups
//! - Booking confirmation delivery with an offline simulation fallback
//!
//! Every integration degrades gracefully when no API credential is
//! configured, so the experience stays demonstrable offline.

pub mod config;
pub mod error;
pub mod integrations;
pub mod language;
pub mod prompts;

// Re-export common types
pub use config::Config;
pub use error::{Error, Result};
pub use integrations::{
    BookingClient, BookingFormData, ConciergeSession, FaceShape, GeminiClient, HairType,
    StyleRecommendation, VideoStudio,
};
pub use language::Language;
pub use prompts::{load_prompt, Prompt};

// Commands module uses re-exported types, so it must be declared after the re-exports
pub mod commands;
