use std::sync::Arc;

use crate::chain::TranslationChain;
use crate::config::Config;
use crate::error::LlmError;
use crate::llm::StatelessLLMFactory;

/// Shared, read-only handler state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub chain: Arc<TranslationChain>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, LlmError> {
        let model = StatelessLLMFactory::create_llm(&config.llm)?;
        let chain = TranslationChain::translation(model);
        Ok(Self::with_chain(config, chain))
    }

    pub fn with_chain(config: Config, chain: TranslationChain) -> Self {
        Self {
            config: Arc::new(config),
            chain: Arc::new(chain),
        }
    }
}
