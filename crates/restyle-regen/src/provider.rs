pub(crate) mod chat;

use async_trait::async_trait;

use crate::{
    error::Result,
    types::{ImageReference, SourceImage},
};

/// Upstream capable of producing one image variant per call
#[async_trait]
pub trait VariantProvider: Send + Sync {
    /// Transform `image` according to `prompt`
    async fn generate(&self, image: &SourceImage, prompt: &str) -> Result<ImageReference>;

    /// Get the provider name
    fn name(&self) -> &str;
}
