use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, info};

use super::stateless_llm_interface::{ChatCompletion, ChatMessage, StatelessLLMInterface};
use crate::config::LlmConfig;
use crate::error::LlmError;

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

/// OpenAI compatible LLM implementation (Groq, OpenAI, local servers)
///
/// The HTTP client is built without a request timeout: a hung provider holds
/// the caller until the connection drops.
pub struct OpenAICompatibleLLM {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
    temperature: Option<f32>,
}

impl OpenAICompatibleLLM {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder().build()?;
        let base_url = config.resolved_base_url().to_string();

        info!(
            "Initialized OpenAICompatibleLLM: model={}, base_url={}, api_key_set={}",
            config.model,
            base_url,
            config.api_key.is_some()
        );

        Ok(Self {
            client,
            base_url,
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            api_key_env: config.api_key_env.clone(),
            temperature: config.temperature,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl StatelessLLMInterface for OpenAICompatibleLLM {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn chat_completion(&self, messages: &[ChatMessage]) -> Result<ChatCompletion, LlmError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| LlmError::MissingApiKey {
            env_var: self.api_key_env.clone(),
        })?;

        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            stream: false,
        };

        debug!("Sending chat completion: model={}, messages={}", self.model, messages.len());

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(LlmError::Authentication {
                    status: status.as_u16(),
                    body,
                })
            }
            s if !s.is_success() => {
                return Err(LlmError::Provider {
                    status: s.as_u16(),
                    body,
                })
            }
            _ => {}
        }

        let completion: ChatCompletion = serde_json::from_str(&body)?;
        debug!("Chat completion received: id={}, choices={}", completion.id, completion.choices.len());
        Ok(completion)
    }
}
