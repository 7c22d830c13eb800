//! services/api/src/adapters/content_llm.rs
//!
//! This module contains the adapter for the content-generating LLM.
//! It implements the `TextCompletion` port from the `core` crate: one prompt
//! in, one completion out, bounded by a deadline, no retry.

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;
use draftsmith_core::ports::{PortError, PortResult, TextCompletion};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `TextCompletion` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiCompletionAdapter {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl OpenAiCompletionAdapter {
    /// Creates a new `OpenAiCompletionAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String, timeout: Duration) -> Self {
        Self {
            client,
            model,
            timeout,
        }
    }
}

//=========================================================================================
// `TextCompletion` Trait Implementation
//=========================================================================================

#[async_trait]
impl TextCompletion for OpenAiCompletionAdapter {
    async fn complete(&self, prompt: &str) -> PortResult<String> {
        let messages = vec![ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let chat = self.client.chat();
        let call = chat.create(request);
        let response = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| {
                PortError::Unexpected(format!(
                    "Completion timed out after {} seconds",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        // Extract the text content from the first choice in the response.
        if let Some(choice) = response.choices.into_iter().next() {
            if let Some(content) = choice.message.content {
                Ok(content)
            } else {
                Err(PortError::Unexpected(
                    "Completion response contained no text content.".to_string(),
                ))
            }
        } else {
            Err(PortError::Unexpected(
                "Completion returned no choices in its response.".to_string(),
            ))
        }
    }
}
