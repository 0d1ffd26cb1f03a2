use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Decoded `/chat/completions` response. Only `choices` is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl ChatCompletion {
    /// Single-choice completion carrying `text`.
    pub fn from_text(model: &str, text: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            model: model.to_string(),
            choices: vec![Choice {
                index: 0,
                message: ResponseMessage {
                    role: Some(Role::Assistant),
                    content: Some(text.into()),
                },
                finish_reason: Some("stop".to_string()),
            }],
            usage: None,
        }
    }
}

/// Interface for a stateless language model
/// Stateless means the LLM doesn't store memory, system prompts, or user messages
#[async_trait]
pub trait StatelessLLMInterface: Send + Sync {
    /// Model identifier sent to the provider
    fn model_name(&self) -> &str;

    /// Send the full message list and wait for one completion.
    async fn chat_completion(&self, messages: &[ChatMessage]) -> Result<ChatCompletion, LlmError>;
}
