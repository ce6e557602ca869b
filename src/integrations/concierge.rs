//! Virtual concierge chat sessions.
//!
//! A session is pinned to one display language and seeded with that
//! language's greeting; switching languages means discarding the session
//! and creating a new one. Replies stream back as ordered text deltas the
//! caller folds into a "typing" effect; the hosted API is stateless, so
//! the session replays its in-memory transcript as context on every turn.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::integrations::gemini::{
    Content, GeminiClient, GenerateContentRequest, GroundingMetadata, SystemInstruction,
};
use crate::language::Language;
use crate::prompts::Prompt;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One entry of the session transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grounding: Option<GroundingMetadata>,
}

/// One streamed increment of an in-progress reply.
#[derive(Debug, Clone)]
pub struct ChatDelta {
    pub text: String,
    pub grounding: Option<GroundingMetadata>,
}

/// A language-pinned concierge conversation.
pub struct ConciergeSession {
    gemini: GeminiClient,
    language: Language,
    history: Vec<ChatMessage>,
}

impl ConciergeSession {
    /// Open a session, or `None` when no credential is configured — the
    /// caller shows [`Language::offline_notice`] instead.
    pub fn new(gemini: GeminiClient, language: Language) -> Option<Self> {
        if !gemini.is_live() {
            return None;
        }

        Some(Self {
            gemini,
            language,
            history: vec![ChatMessage {
                role: Role::Model,
                text: language.greeting().to_string(),
                grounding: None,
            }],
        })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Full transcript, greeting included.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Send the next user utterance and stream the reply.
    ///
    /// `on_delta` receives each fragment in arrival order (the fold for the
    /// typing effect); the accumulated reply is returned and appended to
    /// the transcript together with the user message. If the stream fails
    /// mid-turn the transcript is left untouched — the turn is abandoned,
    /// the session stays usable, and the caller substitutes
    /// [`Language::apology`].
    pub async fn send_message<F>(&mut self, text: &str, mut on_delta: F) -> Result<ChatMessage>
    where
        F: FnMut(ChatDelta),
    {
        let system_instruction = Prompt::Concierge
            .text()
            .replace("{language}", self.language.instruction_name());

        let mut contents: Vec<Content> = self
            .history
            .iter()
            .map(|message| match message.role {
                Role::User => Content::user_text(message.text.clone()),
                Role::Model => Content::model_text(message.text.clone()),
            })
            .collect();
        contents.push(Content::user_text(text));

        let request = GenerateContentRequest {
            contents,
            generation_config: None,
            system_instruction: Some(SystemInstruction::from_text(system_instruction)),
            tools: Some(vec![json!({ "googleMaps": {} })]),
        };

        let mut full_text = String::new();
        let mut grounding: Option<GroundingMetadata> = None;

        self.gemini
            .stream_generate_content(&request, |chunk| {
                let delta_text = chunk.text().unwrap_or_default();
                let delta_grounding = chunk.grounding_metadata().cloned();

                if delta_text.is_empty() && delta_grounding.is_none() {
                    return;
                }

                full_text.push_str(&delta_text);
                if delta_grounding.is_some() {
                    grounding = delta_grounding.clone();
                }

                on_delta(ChatDelta {
                    text: delta_text,
                    grounding: delta_grounding,
                });
            })
            .await?;

        let reply = ChatMessage {
            role: Role::Model,
            text: full_text,
            grounding,
        };

        self.history.push(ChatMessage {
            role: Role::User,
            text: text.to_string(),
            grounding: None,
        });
        self.history.push(reply.clone());

        Ok(reply)
    }
}
