use std::sync::Arc;

use futures::future::try_join_all;

use crate::{
    error::{RegenError, Result},
    normalize::preview,
    prompts::{Style, render_prompts},
    provider::VariantProvider,
    types::{ImageReference, SourceImage},
};

/// Fans one source image out to a variant per prompt template
///
/// All calls are dispatched at once with no concurrency cap. Results come
/// back in template order; the first failure fails the whole batch and
/// drops the calls still in flight.
pub struct Regenerator {
    provider: Arc<dyn VariantProvider>,
    default_style: String,
}

impl Regenerator {
    pub fn new(provider: Arc<dyn VariantProvider>, default_style: impl Into<String>) -> Self {
        Self {
            provider,
            default_style: default_style.into(),
        }
    }

    /// Style used when a request carries none
    pub fn default_style(&self) -> &str {
        &self.default_style
    }

    /// Generate one variant of `image` per template, in template order
    pub async fn generate_variants(&self, image: &SourceImage, style: &Style) -> Result<Vec<ImageReference>> {
        let prompts = render_prompts(style);

        tracing::info!(
            provider = self.provider.name(),
            variants = prompts.len(),
            style = %style,
            "generating image variants"
        );

        let calls = prompts.iter().enumerate().map(|(index, prompt)| async move {
            tracing::debug!(index, prompt = preview(prompt, 100), "starting variant");

            self.provider.generate(image, prompt).await.map_err(|source| {
                tracing::error!(index, error = %source, "variant generation failed");
                RegenError::VariantFailed {
                    index,
                    prompt: prompt.clone(),
                    source: Box::new(source),
                }
            })
        });

        let variants = try_join_all(calls).await?;

        tracing::info!(variants = variants.len(), "image variants generated");

        Ok(variants)
    }
}

impl std::fmt::Debug for Regenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Regenerator")
            .field("provider", &self.provider.name())
            .field("default_style", &self.default_style)
            .finish()
    }
}
