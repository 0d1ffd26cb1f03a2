pub mod chain;
pub mod config;
pub mod error;
pub mod handlers;
pub mod llm;
pub mod prompt;
pub mod routes;
pub mod state;
pub mod translate;
