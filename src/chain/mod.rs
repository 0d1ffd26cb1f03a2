pub mod output_parser;

pub use output_parser::StrOutputParser;

use std::sync::Arc;
use tracing::debug;

use crate::error::ChainError;
use crate::llm::StatelessLLMInterface;
use crate::prompt::{ChatPromptTemplate, PromptValues};

/// Prompt template -> remote model -> plain text, as one callable.
pub struct TranslationChain {
    prompt: ChatPromptTemplate,
    model: Arc<dyn StatelessLLMInterface>,
    parser: StrOutputParser,
}

impl TranslationChain {
    pub fn new(prompt: ChatPromptTemplate, model: Arc<dyn StatelessLLMInterface>) -> Self {
        Self {
            prompt,
            model,
            parser: StrOutputParser,
        }
    }

    /// Chain over the fixed translation prompt.
    pub fn translation(model: Arc<dyn StatelessLLMInterface>) -> Self {
        Self::new(ChatPromptTemplate::translation(), model)
    }

    pub fn prompt(&self) -> &ChatPromptTemplate {
        &self.prompt
    }

    pub async fn invoke(&self, values: &PromptValues) -> Result<String, ChainError> {
        let messages = self.prompt.format_messages(values)?;
        debug!("Prompt rendered: {} messages", messages.len());

        let completion = self.model.chat_completion(&messages).await?;

        let text = self.parser.parse(completion)?;
        debug!("Chain produced {} bytes of text", text.len());
        Ok(text)
    }

    pub async fn translate(&self, text: &str, language: &str) -> Result<String, ChainError> {
        self.invoke(&translation_values(text, language)).await
    }

    /// Synchronous invocation on a private current-thread runtime.
    ///
    /// Panics if called from within an async runtime (tokio forbids nesting).
    pub fn invoke_blocking(&self, values: &PromptValues) -> Result<String, ChainError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.invoke(values))
    }
}

pub fn translation_values(text: &str, language: &str) -> PromptValues {
    PromptValues::from([
        ("text".to_string(), text.to_string()),
        ("language".to_string(), language.to_string()),
    ])
}
