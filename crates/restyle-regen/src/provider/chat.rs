use async_trait::async_trait;
use reqwest::{Client, header::AUTHORIZATION};
use restyle_config::RegeneratorConfig;
use secrecy::{ExposeSecret, SecretString};

use super::VariantProvider;
use crate::{
    error::{RegenError, Result},
    normalize::normalize_response,
    protocol::{ChatRequest, ChatResponse},
    types::{ImageReference, SourceImage},
};

/// Image variants through a multimodal chat-completions endpoint
pub(crate) struct ChatImageProvider {
    name: String,
    client: Client,
    api_key: SecretString,
    endpoint: String,
    model: String,
    max_tokens: u32,
    app_title: Option<String>,
}

impl ChatImageProvider {
    pub fn new(config: &RegeneratorConfig) -> Result<Self> {
        let timeout = config
            .request_timeout()
            .map_err(|e| RegenError::Config(e.to_string()))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RegenError::Config(format!("failed to build HTTP client: {e}")))?;

        let endpoint = format!("{}/chat/completions", config.base_url.as_str().trim_end_matches('/'));
        let name = config.base_url.host_str().unwrap_or("upstream").to_string();

        Ok(Self {
            name,
            client,
            api_key: config.api_key.clone(),
            endpoint,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            app_title: config.app_title.clone(),
        })
    }
}

#[async_trait]
impl VariantProvider for ChatImageProvider {
    async fn generate(&self, image: &SourceImage, prompt: &str) -> Result<ImageReference> {
        let wire_request = ChatRequest::image_variant(&self.model, image, prompt, self.max_tokens);

        tracing::debug!(
            provider = %self.name,
            model = %self.model,
            "sending image variant request"
        );

        let mut request = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key.expose_secret()))
            .json(&wire_request);

        if let Some(title) = &self.app_title {
            request = request.header("X-Title", title);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(provider = %self.name, error = %e, "image variant request failed");
            RegenError::Connection(format!("Failed to send request to {}: {e}", self.name))
        })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!(
                provider = %self.name,
                status = %status,
                body = %error_text,
                "provider API error"
            );

            return Err(RegenError::UpstreamStatus {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let wire_response: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!(provider = %self.name, error = %e, "failed to parse provider response");
            RegenError::MalformedResponse(e.to_string())
        })?;

        tracing::debug!(
            provider = %self.name,
            choices = wire_response.choices.len(),
            "image variant response received"
        );

        normalize_response(&wire_response)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
