#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

use langchain_translate_server::chain::TranslationChain;
use langchain_translate_server::config::Config;
use langchain_translate_server::error::LlmError;
use langchain_translate_server::llm::{ChatCompletion, ChatMessage, StatelessLLMInterface};
use langchain_translate_server::routes::create_app;
use langchain_translate_server::state::AppState;

/// Records every prompt it receives. Replies with a fixed string, or echoes
/// the last (user) message when no reply is set.
#[derive(Default)]
pub struct MockLLM {
    reply: Option<String>,
    delay: Option<Duration>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockLLM {
    pub fn echo() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(text.to_string()),
            ..Self::default()
        })
    }

    pub fn echo_with_delay(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            ..Self::default()
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatelessLLMInterface for MockLLM {
    fn model_name(&self) -> &str {
        "mock"
    }

    async fn chat_completion(&self, messages: &[ChatMessage]) -> Result<ChatCompletion, LlmError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let text = match &self.reply {
            Some(reply) => reply.clone(),
            None => messages.last().map(|m| m.content.clone()).unwrap_or_default(),
        };
        Ok(ChatCompletion::from_text("mock", text))
    }
}

pub fn app_with(model: Arc<MockLLM>) -> Router {
    let state = AppState::with_chain(Config::default(), TranslationChain::translation(model));
    create_app(state)
}

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
