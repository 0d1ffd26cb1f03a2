//! Wire types of the translation endpoints

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Body of `POST /translate/`. Both fields are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translated_text: String,
}

/// Body of the runnable `invoke` route.
///
/// `input` is handed to the chain untyped, so missing template keys are
/// reported by the prompt, not by deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeRequest {
    pub input: Map<String, Value>,
    #[serde(default)]
    pub config: Option<Value>,
    #[serde(default)]
    pub kwargs: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeResponse {
    pub output: String,
    pub metadata: RunMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub run_id: Uuid,
}
