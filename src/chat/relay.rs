//! Chat relay
//!
//! Forwards a conversation plus one new message to the conversational model
//! and hands back its reply. The server keeps no history; callers send the
//! full conversation every time.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    chat::persona,
    error::{AppError, AppResult},
    gemini::{
        types::{Content, GenerateContentRequest, Part, Role},
        GenerativeModel,
    },
    routes::metrics::record_usage,
};

/// Text part of a conversation turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextPart {
    pub text: String,
}

/// One turn of caller-held history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationTurn {
    pub role: Role,
    pub parts: Vec<TextPart>,
}

impl From<ConversationTurn> for Content {
    fn from(turn: ConversationTurn) -> Self {
        Content {
            role: Some(turn.role),
            parts: turn.parts.into_iter().map(|p| Part::text(p.text)).collect(),
        }
    }
}

/// Body of `POST /gemini`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
    pub message: String,
}

/// Reply returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationReply {
    pub text: String,
}

/// Relays chat turns to the conversational model
pub struct ChatRelay {
    model: Arc<dyn GenerativeModel>,
    model_name: String,
}

impl ChatRelay {
    pub fn new(model: Arc<dyn GenerativeModel>, model_name: impl Into<String>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
        }
    }

    /// Build the request: persona, fixed parameters, history, then the new turn
    pub fn build_request(history: Vec<ConversationTurn>, message: String) -> GenerateContentRequest {
        let mut contents: Vec<Content> = history.into_iter().map(Content::from).collect();
        contents.push(Content::user(vec![Part::text(message)]));

        GenerateContentRequest {
            system_instruction: Some(Content::instruction(persona::SYSTEM_INSTRUCTION)),
            contents,
            generation_config: Some(persona::generation_config()),
            safety_settings: persona::safety_settings(),
        }
    }

    /// Send `message` after `history` and return the model's reply
    ///
    /// Rejects a blank message before any outbound call. Provider failures
    /// are returned as-is, without retry.
    #[instrument(skip_all, fields(model = %self.model_name, history = history.len()))]
    pub async fn relay(
        &self,
        history: Vec<ConversationTurn>,
        message: String,
    ) -> AppResult<GenerationReply> {
        if message.trim().is_empty() {
            return Err(AppError::Validation(
                "Please ask a question: message must not be empty".to_string(),
            ));
        }

        debug!(message = %message, "Relaying chat message");

        let request = Self::build_request(history, message);
        let response = self
            .model
            .generate_content(&self.model_name, &request)
            .await?;

        if let Some(ref usage) = response.usage_metadata {
            record_usage(usage, &self.model_name);
        }

        Ok(GenerationReply {
            text: response.text()?,
        })
    }
}
