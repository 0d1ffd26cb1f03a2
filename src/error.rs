// Error types for each stage of the translation pipeline.
//
// Nothing here recovers locally: every failure becomes either a
// structured validation response or an opaque 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, warn};

/// Prompt template errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("missing variable '{0}' for prompt template")]
    MissingVariable(String),

    #[error("invalid prompt template: {0}")]
    InvalidTemplate(String),
}

/// Remote model errors
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("no API key configured (set {env_var})")]
    MissingApiKey { env_var: String },

    #[error("provider rejected credentials ({status}): {body}")]
    Authentication { status: u16, body: String },

    #[error("provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("request to model provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unsupported LLM provider: {0}")]
    UnsupportedProvider(String),
}

impl LlmError {
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            LlmError::MissingApiKey { .. } | LlmError::Authentication { .. }
        )
    }
}

/// Output parsing errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("model returned no choices")]
    EmptyCompletion,
}

/// Errors raised while invoking a chain
#[derive(Debug, Error)]
pub enum ChainError {
    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Model(#[from] LlmError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to start blocking runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Error returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("request validation failed: {0}")]
    Validation(#[source] serde_json::Error),

    #[error(transparent)]
    Chain(#[from] ChainError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(err) => {
                warn!("Rejected request body: {}", err);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({"detail": validation_detail(&err)})),
                )
                    .into_response()
            }
            AppError::Chain(err) => {
                error!("Chain invocation failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "Internal Server Error"})),
                )
                    .into_response()
            }
        }
    }
}

/// Structured `[{type, loc, msg}]` list describing a rejected body.
fn validation_detail(err: &serde_json::Error) -> Value {
    let msg = err.to_string();
    let (kind, loc) = if err.is_data() {
        match missing_field(&msg) {
            Some(field) => ("missing", json!(["body", field])),
            None => ("value_error", json!(["body"])),
        }
    } else {
        ("json_invalid", json!(["body"]))
    };
    json!([{"type": kind, "loc": loc, "msg": msg}])
}

fn missing_field(msg: &str) -> Option<&str> {
    msg.split("missing field `").nth(1)?.split('`').next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_an_authentication_error() {
        let err = LlmError::MissingApiKey {
            env_var: "GROQ_API_KEY".to_string(),
        };
        assert!(err.is_authentication());
        assert_eq!(err.to_string(), "no API key configured (set GROQ_API_KEY)");

        let err = LlmError::Provider {
            status: 503,
            body: "busy".to_string(),
        };
        assert!(!err.is_authentication());
    }

    #[test]
    fn app_error_is_opaque_500() {
        let err = AppError::from(ChainError::Parse(ParseError::EmptyCompletion));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn every_body_error_is_422() {
        for body in [&b"{\"text\":"[..], &b"not json"[..], &b"{\"text\":1}"[..]] {
            let err = serde_json::from_slice::<crate::translate::TranslationRequest>(body)
                .unwrap_err();
            let response = AppError::Validation(err).into_response();
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    #[test]
    fn syntax_errors_are_json_invalid() {
        let err = serde_json::from_str::<Value>("{\"text\":").unwrap_err();
        let detail = validation_detail(&err);
        assert_eq!(detail[0]["type"], "json_invalid");
        assert_eq!(detail[0]["loc"], json!(["body"]));
    }

    #[test]
    fn missing_field_is_extracted_from_serde_message() {
        let msg = "Failed to deserialize the JSON body into the target type: \
                   missing field `language` at line 1 column 17";
        assert_eq!(missing_field(msg), Some("language"));
        assert_eq!(missing_field("invalid type: integer `1`, expected a string"), None);
    }
}
