use axum::{body::Bytes, extract::State, Json};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use crate::chain::translation_values;
use crate::error::{AppError, ChainError};
use crate::prompt::PromptValues;
use crate::state::AppState;
use crate::translate::{
    InvokeRequest, InvokeResponse, RunMetadata, TranslationRequest, TranslationResult,
};

pub async fn health_check() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Bodies are decoded as JSON whatever the declared content type.
fn decode_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(AppError::Validation)
}

/// `POST /translate/`: translate `text` into `language`.
pub async fn translate_text(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TranslationResult>, AppError> {
    let request: TranslationRequest = decode_body(&body)?;
    info!(
        "Translate request: language={}, text_len={}",
        request.language,
        request.text.len()
    );

    let translated_text = state
        .chain
        .invoke(&translation_values(&request.text, &request.language))
        .await?;

    Ok(Json(TranslationResult { translated_text }))
}

/// `POST /langchain-chain/invoke`: run the chain on an untyped input map.
pub async fn invoke_chain(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<InvokeResponse>, AppError> {
    let request: InvokeRequest = decode_body(&body)?;
    let run_id = Uuid::new_v4();
    debug!("Runnable invoke {}: keys={:?}", run_id, request.input.keys().collect::<Vec<_>>());

    let values: PromptValues = request
        .input
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect();

    let output = state.chain.invoke(&values).await?;

    Ok(Json(InvokeResponse {
        output,
        metadata: RunMetadata { run_id },
    }))
}

pub async fn input_schema(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let names = state
        .chain
        .prompt()
        .input_variables()
        .map_err(ChainError::from)?;

    let properties: serde_json::Map<String, Value> = names
        .iter()
        .map(|name| (name.clone(), json!({"title": title_case(name), "type": "string"})))
        .collect();

    Ok(Json(json!({
        "title": "PromptInput",
        "type": "object",
        "properties": properties,
        "required": names,
    })))
}

pub async fn output_schema() -> Json<Value> {
    Json(json!({
        "title": "StrOutputParserOutput",
        "type": "string",
    }))
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_capitalizes_first_letter() {
        assert_eq!(title_case("language"), "Language");
        assert_eq!(title_case(""), "");
    }
}
