//! services/portal/src/adapters/chat_llm.rs
//!
//! This module contains the adapter for the student-facing veterinary
//! assistant. It implements the `AssistantService` port from the core crate
//! against an OpenAI-compatible chat endpoint.

const SYSTEM_INSTRUCTION: &str = r#"You are the resident AI study assistant of a veterinary education platform.

Your strict rules:
1. Answer only questions related to veterinary medicine: animal health, veterinary pharmacology, anatomy, physiology, and clinical practice.
2. If the user asks about anything outside veterinary science (politics, sports, human medicine, programming, and so on), apologize politely and explain that you only cover veterinary topics for the platform's students.
3. Give scientifically accurate advice and keep a friendly, encouraging tone.
4. Keep answers concise enough to read comfortably in a small chat window."#;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use vetportal_core::domain::{ChatRole, ChatTurn};
use vetportal_core::ports::{AssistantError, AssistantResult, AssistantService};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `AssistantService` using an OpenAI-compatible
/// LLM. The full conversation history is resent on every call.
#[derive(Clone)]
pub struct OpenAiChatAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiChatAdapter {
    /// Creates a new `OpenAiChatAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

//=========================================================================================
// `AssistantService` Trait Implementation
//=========================================================================================

#[async_trait]
impl AssistantService for OpenAiChatAdapter {
    async fn reply(&self, history: &[ChatTurn], message: &str) -> AssistantResult<String> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatCompletionRequestMessage::System(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_INSTRUCTION)
                .build()
                .map_err(build_error)?,
        ));
        for turn in history {
            let built = match turn.role {
                ChatRole::User => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessageArgs::default()
                        .content(turn.text.clone())
                        .build()
                        .map_err(build_error)?,
                ),
                ChatRole::Assistant => ChatCompletionRequestMessage::Assistant(
                    ChatCompletionRequestAssistantMessageArgs::default()
                        .content(turn.text.clone())
                        .build()
                        .map_err(build_error)?,
                ),
            };
            messages.push(built);
        }
        messages.push(ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessageArgs::default()
                .content(message.to_string())
                .build()
                .map_err(build_error)?,
        ));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(0.8)
            .max_tokens(1000u32)
            .build()
            .map_err(build_error)?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(classify_openai_error)?;

        let reply = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| AssistantError::Failed("empty completion".to_string()))?;

        Ok(reply.trim().to_string())
    }
}

fn build_error(err: OpenAIError) -> AssistantError {
    AssistantError::Failed(err.to_string())
}

/// Authorization problems get their own variant so the shell can prompt for
/// a new key instead of a blind retry. The service reports them in the error
/// message, not in a structured field, so the check is textual.
pub(crate) fn classify_openai_error(err: OpenAIError) -> AssistantError {
    match err {
        OpenAIError::ApiError(api) => {
            let message = api.message.to_lowercase();
            if message.contains("api key")
                || message.contains("unauthorized")
                || message.contains("permission")
                || message.contains("quota")
                || message.contains("401")
                || message.contains("403")
            {
                AssistantError::Unauthorized
            } else {
                AssistantError::Failed(api.message)
            }
        }
        other => AssistantError::Failed(other.to_string()),
    }
}
