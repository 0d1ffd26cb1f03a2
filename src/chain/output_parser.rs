use crate::error::ParseError;
use crate::llm::ChatCompletion;

/// Reduces a chat completion to its plain text.
///
/// Keeps the first choice's message content verbatim and drops everything
/// else the provider sent (ids, usage, finish reasons).
#[derive(Debug, Clone, Copy, Default)]
pub struct StrOutputParser;

impl StrOutputParser {
    pub fn parse(&self, completion: ChatCompletion) -> Result<String, ParseError> {
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(ParseError::EmptyCompletion)?;
        Ok(choice.message.content.unwrap_or_default())
    }
}
