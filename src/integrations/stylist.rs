//! AI style consultant.
//!
//! Builds a structured prompt from the client's attributes and asks the
//! model for a schema-constrained JSON list of recommendations. With no
//! credential configured the call returns a single fixed suggestion so the
//! experience keeps working in demo mode.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::integrations::gemini::{
    Content, GeminiClient, GenerateContentRequest, GenerationConfig, SystemInstruction,
};
use crate::language::Language;
use crate::prompts::Prompt;
use crate::{Error, Result};

/// Face shapes accepted by the consultant. Only these values are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceShape {
    Oval,
    Round,
    Square,
    Diamond,
    Triangle,
    Oblong,
}

impl FaceShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaceShape::Oval => "Oval",
            FaceShape::Round => "Round",
            FaceShape::Square => "Square",
            FaceShape::Diamond => "Diamond",
            FaceShape::Triangle => "Triangle",
            FaceShape::Oblong => "Oblong",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "oval" => Ok(FaceShape::Oval),
            "round" => Ok(FaceShape::Round),
            "square" => Ok(FaceShape::Square),
            "diamond" => Ok(FaceShape::Diamond),
            "triangle" => Ok(FaceShape::Triangle),
            "oblong" => Ok(FaceShape::Oblong),
            other => Err(Error::InvalidArgument(format!(
                "Unknown face shape: {}",
                other
            ))),
        }
    }

    pub fn all() -> [FaceShape; 6] {
        [
            FaceShape::Oval,
            FaceShape::Round,
            FaceShape::Square,
            FaceShape::Diamond,
            FaceShape::Triangle,
            FaceShape::Oblong,
        ]
    }
}

/// Hair types accepted by the consultant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HairType {
    Straight,
    Wavy,
    Curly,
    Coily,
    Thinning,
}

impl HairType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HairType::Straight => "Straight",
            HairType::Wavy => "Wavy",
            HairType::Curly => "Curly",
            HairType::Coily => "Coily",
            HairType::Thinning => "Thinning",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "straight" => Ok(HairType::Straight),
            "wavy" => Ok(HairType::Wavy),
            "curly" => Ok(HairType::Curly),
            "coily" => Ok(HairType::Coily),
            "thinning" => Ok(HairType::Thinning),
            other => Err(Error::InvalidArgument(format!(
                "Unknown hair type: {}",
                other
            ))),
        }
    }

    pub fn all() -> [HairType; 5] {
        [
            HairType::Straight,
            HairType::Wavy,
            HairType::Curly,
            HairType::Coily,
            HairType::Thinning,
        ]
    }
}

/// A single hairstyle suggestion, as emitted by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StyleRecommendation {
    pub name: String,
    pub description: String,
    pub styling_tips: String,
    pub suitability: String,
}

/// Request hairstyle recommendations for the given attributes.
///
/// Returns the model's recommendations in order. Offline mode yields one
/// fixed placeholder; any transport or parse failure collapses to
/// [`Error::RecommendationFailed`] and is never retried here.
pub async fn recommend_styles(
    client: &GeminiClient,
    face_shape: FaceShape,
    hair_type: HairType,
    preferences: &str,
    language: Language,
) -> Result<Vec<StyleRecommendation>> {
    if !client.is_live() {
        tracing::warn!("No API key provided. Returning mock data.");
        return Ok(vec![placeholder_recommendation()]);
    }

    let prompt = format!(
        "You are a master barber at a premium barbershop.\n\
         Suggest 3 specific hairstyles for a client with the following attributes:\n\
         - Face Shape: {}\n\
         - Hair Type: {}\n\
         - Personal Preferences: {}\n\
         \n\
         IMPORTANT: Provide the response in {}.\n\
         \n\
         Provide the response in a strict JSON format.",
        face_shape.as_str(),
        hair_type.as_str(),
        preferences,
        language.instruction_name()
    );

    let system_instruction = Prompt::Stylist
        .text()
        .replace("{language}", language.instruction_name());

    let request = GenerateContentRequest {
        contents: vec![Content::user_text(prompt)],
        generation_config: Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(response_schema()),
        }),
        system_instruction: Some(SystemInstruction::from_text(system_instruction)),
        tools: None,
    };

    let response = client.generate_content(&request).await.map_err(|e| {
        tracing::error!("Error fetching style recommendations: {}", e);
        Error::RecommendationFailed
    })?;

    let Some(text) = response.text() else {
        return Ok(Vec::new());
    };

    serde_json::from_str(&text).map_err(|e| {
        tracing::error!("Unparseable recommendation payload: {}", e);
        Error::RecommendationFailed
    })
}

/// Schema the platform enforces on the response: an array of objects with
/// exactly the four recommendation fields.
fn response_schema() -> serde_json::Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "description": { "type": "STRING" },
                "stylingTips": { "type": "STRING" },
                "suitability": { "type": "STRING" },
            },
            "required": ["name", "description", "stylingTips", "suitability"],
        }
    })
}

fn placeholder_recommendation() -> StyleRecommendation {
    StyleRecommendation {
        name: "The Classic Taper".to_string(),
        description: "A timeless cut that stays clean and professional.".to_string(),
        styling_tips: "Use a matte pomade for a natural finish.".to_string(),
        suitability: "Great for all face shapes, especially oval.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn live_client(server: &MockServer) -> GeminiClient {
        GeminiClient::new(Some("test_key".to_string()), "gemini-2.5-flash")
            .expect("client")
            .with_base_url(&server.base_url())
    }

    fn offline_client() -> GeminiClient {
        GeminiClient::new(None, "gemini-2.5-flash").expect("client")
    }

    #[tokio::test]
    async fn offline_mode_returns_single_placeholder() {
        let results = recommend_styles(
            &offline_client(),
            FaceShape::Round,
            HairType::Curly,
            "low maintenance",
            Language::En,
        )
        .await
        .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "The Classic Taper");
        assert!(results[0].suitability.contains("oval"));
    }

    #[tokio::test]
    async fn parses_schema_conforming_response() {
        let server = MockServer::start_async().await;

        let recommendations = json!([
            {
                "name": "Textured Crop",
                "description": "Short on the sides with a textured top.",
                "stylingTips": "Work in a light clay.",
                "suitability": "Square and oval faces."
            },
            {
                "name": "Side Part",
                "description": "A sharp, classic profile.",
                "stylingTips": "Comb through a light pomade.",
                "suitability": "Most face shapes."
            }
        ]);

        let mock = server.mock(|when, then| {
            when.method(POST).path("/models/gemini-2.5-flash:generateContent");
            then.status(200).json_body(json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [ { "text": recommendations.to_string() } ]
                    }
                }]
            }));
        });

        let results = recommend_styles(
            &live_client(&server),
            FaceShape::Square,
            HairType::Straight,
            "professional office look",
            Language::En,
        )
        .await
        .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Textured Crop");
        assert_eq!(results[0].styling_tips, "Work in a light clay.");
        assert_eq!(results[1].suitability, "Most face shapes.");
        mock.assert_calls(1);
    }

    #[tokio::test]
    async fn request_carries_schema_and_language_directive() {
        let server = MockServer::start_async().await;

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/models/gemini-2.5-flash:generateContent")
                .is_true(|req| {
                    let body = String::from_utf8_lossy(req.body().as_ref());
                    body.contains("responseSchema")
                        && body.contains("application/json")
                        && body.contains("stylingTips")
                        && body.contains("Face Shape: Oval")
                        && body.contains("Provide the response in Spanish")
                });
            then.status(200).json_body(json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [ { "text": "[]" } ] }
                }]
            }));
        });

        let results = recommend_styles(
            &live_client(&server),
            FaceShape::Oval,
            HairType::Wavy,
            "algo moderno",
            Language::Es,
        )
        .await
        .unwrap();

        assert!(results.is_empty());
        mock.assert_calls(1);
    }

    #[tokio::test]
    async fn transport_failure_collapses_to_generic_error() {
        let server = MockServer::start_async().await;

        server.mock(|when, then| {
            when.method(POST).path("/models/gemini-2.5-flash:generateContent");
            then.status(500).body("internal error");
        });

        let err = recommend_styles(
            &live_client(&server),
            FaceShape::Oval,
            HairType::Wavy,
            "",
            Language::En,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::RecommendationFailed));
    }

    #[tokio::test]
    async fn unparseable_payload_collapses_to_generic_error() {
        let server = MockServer::start_async().await;

        server.mock(|when, then| {
            when.method(POST).path("/models/gemini-2.5-flash:generateContent");
            then.status(200).json_body(json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [ { "text": "not json" } ] }
                }]
            }));
        });

        let err = recommend_styles(
            &live_client(&server),
            FaceShape::Oval,
            HairType::Wavy,
            "",
            Language::En,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::RecommendationFailed));
    }

    #[tokio::test]
    async fn empty_model_text_yields_empty_list() {
        let server = MockServer::start_async().await;

        server.mock(|when, then| {
            when.method(POST).path("/models/gemini-2.5-flash:generateContent");
            then.status(200).json_body(json!({ "candidates": [] }));
        });

        let results = recommend_styles(
            &live_client(&server),
            FaceShape::Oval,
            HairType::Wavy,
            "",
            Language::En,
        )
        .await
        .unwrap();

        assert!(results.is_empty());
    }

    #[test]
    fn test_face_shape_parse_roundtrip() {
        for shape in FaceShape::all() {
            assert_eq!(FaceShape::parse(shape.as_str()).unwrap(), shape);
        }
        assert!(FaceShape::parse("heptagon").is_err());
    }

    #[test]
    fn test_hair_type_parse_roundtrip() {
        for hair in HairType::all() {
            assert_eq!(HairType::parse(hair.as_str()).unwrap(), hair);
        }
        assert!(HairType::parse("spiky").is_err());
    }

    #[test]
    fn test_recommendation_field_names_match_wire_schema() {
        let rec = StyleRecommendation {
            name: "n".into(),
            description: "d".into(),
            styling_tips: "t".into(),
            suitability: "s".into(),
        };
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["stylingTips"], "t");
    }
}
