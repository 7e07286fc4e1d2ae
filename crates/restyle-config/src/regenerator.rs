use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Upstream image regeneration configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegeneratorConfig {
    /// Bearer token for the chat-completions provider
    pub api_key: SecretString,
    /// Provider base URL, `/chat/completions` is appended
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Multimodal model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Output token budget per variant
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Application title sent as `X-Title`
    #[serde(default)]
    pub app_title: Option<String>,
    /// Style applied when a request carries none
    #[serde(default = "default_style")]
    pub default_style: String,
    /// Per-call timeout (e.g. "60s"); unset means no timeout
    #[serde(default)]
    pub request_timeout: Option<String>,
}

impl RegeneratorConfig {
    /// Create a configuration with defaults for everything but the key
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            app_title: None,
            default_style: default_style(),
            request_timeout: None,
        }
    }

    /// Parsed per-call timeout
    ///
    /// # Errors
    ///
    /// Returns an error if `request_timeout` is not a valid duration
    pub fn request_timeout(&self) -> anyhow::Result<Option<Duration>> {
        self.request_timeout
            .as_deref()
            .map(|raw| {
                duration_str::parse(raw).map_err(|e| anyhow::anyhow!("invalid regenerator.request_timeout '{raw}': {e}"))
            })
            .transpose()
    }
}

fn default_base_url() -> Url {
    Url::parse("https://openrouter.ai/api/v1").expect("must be valid URL")
}

fn default_model() -> String {
    "google/gemini-2.5-flash-image-preview:free".to_string()
}

const fn default_max_tokens() -> u32 {
    1000
}

fn default_style() -> String {
    "Athletic".to_string()
}
