//! services/portal/src/adapters/description_llm.rs
//!
//! Adapter for the one-shot lesson-description generator used by the
//! administrative content form. Implements the `DescriptionService` port.

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use vetportal_core::ports::{AssistantError, AssistantResult, DescriptionService};

use crate::adapters::chat_llm::classify_openai_error;

pub struct OpenAiDescriptionAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiDescriptionAdapter {
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl DescriptionService for OpenAiDescriptionAdapter {
    async fn describe(&self, title: &str) -> AssistantResult<String> {
        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content("You write catalog descriptions for a veterinary education platform. Given a lesson title, respond with ONLY an engaging, scientifically accurate description of at most 100 words. No headings, no quotes, no explanation.")
                    .build()
                    .map_err(|e| AssistantError::Failed(e.to_string()))?
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(format!("Write the description for a lesson titled: \"{}\"", title))
                    .build()
                    .map_err(|e| AssistantError::Failed(e.to_string()))?
            ),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_tokens(220u32)
            .temperature(0.7)
            .build()
            .map_err(|e| AssistantError::Failed(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(classify_openai_error)?;

        let description = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| AssistantError::Failed("no description generated".to_string()))?;

        Ok(description.trim().to_string())
    }
}
