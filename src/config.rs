use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::llm::DEFAULT_GROQ_BASE_URL;

const ENV_PREFIX: &str = "APP";
const DEFAULT_CONFIG_FILE: &str = "conf.yaml";

/// Process-wide configuration, loaded once at startup and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Remote model settings
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Empty means "use the provider's default endpoint".
    #[serde(default)]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// `null` leaves sampling to the provider.
    #[serde(default = "default_temperature")]
    pub temperature: Option<f32>,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_provider() -> String {
    "groq_llm".to_string()
}

fn default_model() -> String {
    "gemma2-9b-it".to_string()
}

fn default_temperature() -> Option<f32> {
    Some(0.7)
}

fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("api_key_env", &self.api_key_env)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: String::new(),
            model: default_model(),
            temperature: default_temperature(),
            api_key_env: default_api_key_env(),
            api_key: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration: defaults, then the optional file at `path`
    /// (or `conf.yaml`), then `APP__*` environment overrides.
    ///
    /// The API key is read from the variable named by `llm.api_key_env`.
    /// A missing key is not an error here; the first remote call reports it.
    pub fn load(path: Option<&str>) -> Result<Self, ::config::ConfigError> {
        let path = path.unwrap_or(DEFAULT_CONFIG_FILE);

        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name(path).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Config = settings.try_deserialize()?;
        config.llm.api_key = read_api_key(&config.llm.api_key_env);
        Ok(config)
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port).parse()?;
        Ok(addr)
    }
}

impl LlmConfig {
    pub fn resolved_base_url(&self) -> &str {
        if self.base_url.is_empty() {
            match self.provider.as_str() {
                "openai_llm" => crate::llm::DEFAULT_OPENAI_BASE_URL,
                _ => DEFAULT_GROQ_BASE_URL,
            }
        } else {
            self.base_url.trim_end_matches('/')
        }
    }
}

fn read_api_key(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|key| !key.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_localhost_8000() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(
            config.socket_addr().unwrap(),
            "127.0.0.1:8000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load(Some("does-not-exist.yaml")).unwrap();
        assert_eq!(config.llm.provider, "groq_llm");
        assert_eq!(config.llm.model, "gemma2-9b-it");
        assert_eq!(config.llm.api_key_env, "GROQ_API_KEY");
        assert_eq!(config.llm.temperature, Some(0.7));
    }

    #[test]
    fn base_url_depends_on_provider() {
        let mut llm = LlmConfig::default();
        assert_eq!(llm.resolved_base_url(), DEFAULT_GROQ_BASE_URL);

        llm.provider = "openai_llm".to_string();
        assert_eq!(llm.resolved_base_url(), crate::llm::DEFAULT_OPENAI_BASE_URL);

        llm.base_url = "http://localhost:11434/v1/".to_string();
        assert_eq!(llm.resolved_base_url(), "http://localhost:11434/v1");
    }

    #[test]
    fn empty_api_key_counts_as_absent() {
        assert_eq!(read_api_key("LANGCHAIN_TRANSLATE_TEST_UNSET_KEY"), None);
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let llm = LlmConfig {
            api_key: Some("gsk_secret".to_string()),
            ..LlmConfig::default()
        };
        let rendered = format!("{:?}", llm);
        assert!(!rendered.contains("gsk_secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
