//! External integrations module.
//!
//! Provides clients for:
//! - Google Gemini (content generation, streaming, video operations)
//! - Style recommendations (schema-constrained JSON)
//! - Photo restyling (inline image editing)
//! - Veo video synthesis (long-running operations)
//! - Concierge chat sessions (streaming, grounding metadata)
//! - Booking confirmation backend (with simulated fallback)

pub mod booking;
pub mod concierge;
pub mod gemini;
pub mod restyler;
pub mod stylist;
pub mod veo;

pub use booking::{BookingClient, BookingFormData};
pub use concierge::{ChatDelta, ChatMessage, ConciergeSession, Role};
pub use gemini::GeminiClient;
pub use restyler::generate_edited_image;
pub use stylist::{recommend_styles, FaceShape, HairType, StyleRecommendation};
pub use veo::{KeySelection, VideoArtifact, VideoStudio};
