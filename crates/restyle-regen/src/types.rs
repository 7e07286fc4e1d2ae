use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Mime type assumed when inline upstream data omits one
const DEFAULT_INLINE_MIME: &str = "image/png";

/// Uploaded photo shared unmodified by every variant call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    data: String,
    mime_type: String,
}

impl SourceImage {
    /// Create from bare base64 data
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Create from client upload data, dropping a `data:image/...;base64,` prefix
    pub fn from_upload(image_data: &str, mime_type: &str) -> Self {
        fn prefix() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new(r"^data:image/[a-z]+;base64,").expect("must be valid regex"))
        }

        Self::new(prefix().replace(image_data, ""), mime_type)
    }

    /// Bare base64 payload
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Inline form sent upstream
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Canonical generated image: a data URI or an absolute URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImageReference(String);

impl ImageReference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Build a data URI from inline base64 data
    pub fn inline(mime_type: Option<&str>, data: &str) -> Self {
        Self(format!(
            "data:{};base64,{data}",
            mime_type.unwrap_or(DEFAULT_INLINE_MIME)
        ))
    }

    /// Whether a bare string is an image reference rather than prose
    pub fn looks_like_image(candidate: &str) -> bool {
        candidate.starts_with("data:image") || candidate.starts_with("http")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Body of `POST /api/generate`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Base64 image, optionally as a data URL
    #[serde(default)]
    pub image_data: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Style label chosen by the user
    #[serde(default)]
    pub physique: Option<String>,
}

/// Successful reply of `POST /api/generate`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    /// Generated images in template order
    pub images: Vec<ImageReference>,
    pub remaining_credits: u32,
}
