use std::sync::Arc;
use tracing::info;

use super::openai_compatible_llm::OpenAICompatibleLLM;
use super::stateless_llm_interface::StatelessLLMInterface;
use crate::config::LlmConfig;
use crate::error::LlmError;

/// Factory for creating stateless LLM instances
pub struct StatelessLLMFactory;

impl StatelessLLMFactory {
    /// Create an LLM based on the configuration.
    ///
    /// Never fails on a missing API key; that surfaces on the first call.
    pub fn create_llm(config: &LlmConfig) -> Result<Arc<dyn StatelessLLMInterface>, LlmError> {
        info!("Initializing LLM: {}", config.provider);

        match config.provider.as_str() {
            "groq_llm" | "openai_llm" | "openai_compatible_llm" => {
                Ok(Arc::new(OpenAICompatibleLLM::new(config)?))
            }
            other => Err(LlmError::UnsupportedProvider(other.to_string())),
        }
    }
}
