//! Configuration for the Gemini integrations and the booking backend
//!
//! Loads configuration from config.yml file

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default constants (fallback if config.yml not found)
pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_VIDEO_MODEL: &str = "veo-3.1-fast-generate-preview";

/// Interval between polls of an in-flight video operation.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Artificial delay before a simulated booking delivery reports success.
pub const SIMULATED_DELIVERY_DELAY_MS: u64 = 1500;

pub const DEFAULT_BOOKING_ENDPOINT: &str = "http://localhost:3000/api/send-email";
pub const DEFAULT_BOOKING_FROM: &str = "Gentry & Co. <appointments@gentryandco.com>";

/// YAML config structures
#[derive(Debug, Deserialize)]
struct YamlConfig {
    gemini: Option<GeminiConfig>,
    booking: Option<BookingConfig>,
}

#[derive(Debug, Deserialize)]
struct GeminiConfig {
    text_model: Option<String>,
    image_model: Option<String>,
    video_model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BookingConfig {
    endpoint: Option<String>,
    from: Option<String>,
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    pub text_model: String,
    pub image_model: String,
    pub video_model: String,
    pub booking_endpoint: String,
    pub booking_from: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Load configuration from config.yml, falling back to compiled defaults.
    pub fn new() -> Self {
        Self::from_file("config.yml")
    }

    /// Load configuration from an explicit path, falling back to defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        let mut config = Self::defaults();

        let Ok(contents) = fs::read_to_string(path) else {
            return config;
        };

        let Ok(yaml) = serde_yaml::from_str::<YamlConfig>(&contents) else {
            tracing::warn!("config.yml is not valid YAML, using defaults");
            return config;
        };

        if let Some(gemini) = yaml.gemini {
            if let Some(model) = gemini.text_model {
                config.text_model = model;
            }
            if let Some(model) = gemini.image_model {
                config.image_model = model;
            }
            if let Some(model) = gemini.video_model {
                config.video_model = model;
            }
        }

        if let Some(booking) = yaml.booking {
            if let Some(endpoint) = booking.endpoint {
                config.booking_endpoint = endpoint;
            }
            if let Some(from) = booking.from {
                config.booking_from = from;
            }
        }

        config
    }

    fn defaults() -> Self {
        Self {
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            video_model: DEFAULT_VIDEO_MODEL.to_string(),
            booking_endpoint: DEFAULT_BOOKING_ENDPOINT.to_string(),
            booking_from: DEFAULT_BOOKING_FROM.to_string(),
        }
    }
}
