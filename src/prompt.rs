use std::collections::HashMap;

use crate::error::PromptError;
use crate::llm::{ChatMessage, Role};

/// Placeholder name -> value, filled into a prompt template.
pub type PromptValues = HashMap<String, String>;

/// System instruction of the translation prompt
pub const TRANSLATION_SYSTEM_TEMPLATE: &str = "Translate Message into the {language}:";
/// User message of the translation prompt
pub const TRANSLATION_USER_TEMPLATE: &str = "{text}";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// One message skeleton of a chat prompt.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    pub role: Role,
    pub template: String,
}

/// Ordered message skeletons with `{name}` placeholders.
///
/// `{{` and `}}` render as literal braces. Values are inserted verbatim and
/// never re-scanned for placeholders.
#[derive(Debug, Clone)]
pub struct ChatPromptTemplate {
    messages: Vec<MessageTemplate>,
}

impl ChatPromptTemplate {
    pub fn new<S: Into<String>>(messages: Vec<(Role, S)>) -> Self {
        Self {
            messages: messages
                .into_iter()
                .map(|(role, template)| MessageTemplate {
                    role,
                    template: template.into(),
                })
                .collect(),
        }
    }

    /// The fixed two-message translation prompt.
    pub fn translation() -> Self {
        Self::new(vec![
            (Role::System, TRANSLATION_SYSTEM_TEMPLATE),
            (Role::User, TRANSLATION_USER_TEMPLATE),
        ])
    }

    pub fn messages(&self) -> &[MessageTemplate] {
        &self.messages
    }

    /// Placeholder names in order of first appearance.
    pub fn input_variables(&self) -> Result<Vec<String>, PromptError> {
        let mut names: Vec<String> = Vec::new();
        for message in &self.messages {
            for segment in parse_template(&message.template)? {
                if let Segment::Variable(name) = segment {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
            }
        }
        Ok(names)
    }

    /// Fill every placeholder and return the rendered messages in order.
    pub fn format_messages(&self, values: &PromptValues) -> Result<Vec<ChatMessage>, PromptError> {
        self.messages
            .iter()
            .map(|message| {
                Ok(ChatMessage {
                    role: message.role,
                    content: render(&message.template, values)?,
                })
            })
            .collect()
    }
}

fn render(template: &str, values: &PromptValues) -> Result<String, PromptError> {
    let mut out = String::with_capacity(template.len());
    for segment in parse_template(template)? {
        match segment {
            Segment::Literal(text) => out.push_str(&text),
            Segment::Variable(name) => {
                let value = values
                    .get(&name)
                    .ok_or_else(|| PromptError::MissingVariable(name.clone()))?;
                out.push_str(value);
            }
        }
    }
    Ok(out)
}

fn parse_template(template: &str) -> Result<Vec<Segment>, PromptError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                literal.push('{');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => {
                            return Err(PromptError::InvalidTemplate(format!(
                                "unclosed '{{' in {:?}",
                                template
                            )))
                        }
                        Some(ch) => name.push(ch),
                    }
                }
                if name.is_empty() {
                    return Err(PromptError::InvalidTemplate(format!(
                        "empty placeholder in {:?}",
                        template
                    )));
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Variable(name));
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                literal.push('}');
            }
            '}' => {
                return Err(PromptError::InvalidTemplate(format!(
                    "single '}}' in {:?}",
                    template
                )))
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}
