//! Chat-completions wire format for image-to-image requests
//!
//! Responses are deliberately lenient: every field is optional so that
//! each of the shapes the provider has been seen to return can be
//! deserialized and then tried in order by the normalizer.

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::types::{ImageReference, SourceImage};

// -- Request types --

/// Single-turn request carrying the source image and one prompt
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RequestPart {
    ImageUrl { image_url: ImageUrl },
    Text { text: String },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    r#type: &'static str,
}

impl ChatRequest {
    /// Ask the model to transform `image` according to `prompt`
    pub(crate) fn image_variant(model: &str, image: &SourceImage, prompt: &str, max_tokens: u32) -> Self {
        Self {
            model: model.to_owned(),
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    RequestPart::ImageUrl {
                        image_url: ImageUrl { url: image.data_url() },
                    },
                    RequestPart::Text {
                        text: format!(
                            "Generate an image: {prompt}. Return only the generated image, no text description."
                        ),
                    },
                ],
            }],
            response_format: ResponseFormat { r#type: "image" },
            max_tokens,
        }
    }
}

// -- Response types --

#[derive(Debug, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Choice {
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<ResponseMessage>,
    /// Inline image attached to the choice itself
    #[serde(default, deserialize_with = "lenient")]
    pub inline_data: Option<InlineData>,
    #[serde(default, rename = "inlineData", deserialize_with = "lenient")]
    pub inline_data_camel: Option<InlineData>,
}

impl Choice {
    pub fn inline(&self) -> Option<&InlineData> {
        self.inline_data.as_ref().or(self.inline_data_camel.as_ref())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponseMessage {
    /// Images generated alongside the message
    #[serde(default, deserialize_with = "lenient_list")]
    pub images: Option<Vec<GeneratedImage>>,
    #[serde(default)]
    pub content: Option<MessageContent>,
}

/// Message content as a plain string or a list of typed parts
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    #[serde(deserialize_with = "lenient_items")]
    Parts(Vec<ContentPart>),
    /// Anything else; never carries an image
    Other(serde_json::Value),
}

#[derive(Debug, Default, Deserialize)]
pub struct GeneratedImage {
    #[serde(default, deserialize_with = "lenient")]
    pub image_url: Option<UrlField>,
}

impl GeneratedImage {
    pub fn url(&self) -> Option<&str> {
        self.image_url.as_ref()?.url()
    }
}

/// `image_url` as `{"url": "..."}` or as a bare string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum UrlField {
    Bare(String),
    Object {
        #[serde(default)]
        url: Option<String>,
    },
}

impl UrlField {
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Bare(url) => Some(url),
            Self::Object { url } => url.as_deref(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ContentPart {
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_url: Option<UrlField>,
    #[serde(default, deserialize_with = "lenient")]
    pub inline_data: Option<InlineData>,
    #[serde(default, rename = "inlineData", deserialize_with = "lenient")]
    pub inline_data_camel: Option<InlineData>,
}

impl ContentPart {
    /// Image carried by this part, if any
    pub fn image_reference(&self) -> Option<ImageReference> {
        if self.kind.as_deref() == Some("image_url")
            && let Some(url) = self.image_url.as_ref().and_then(UrlField::url)
        {
            return Some(ImageReference::new(url));
        }

        self.inline_data
            .as_ref()
            .or(self.inline_data_camel.as_ref())
            .and_then(InlineData::to_reference)
    }
}

/// Inline binary image, under either field naming convention
#[derive(Debug, Default, Deserialize)]
pub struct InlineData {
    #[serde(default, rename = "mimeType", deserialize_with = "lenient")]
    pub mime_type_camel: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub mime_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub data: Option<String>,
}

impl InlineData {
    pub fn to_reference(&self) -> Option<ImageReference> {
        let data = self.data.as_deref()?;
        let mime_type = self.mime_type_camel.as_deref().or(self.mime_type.as_deref());
        Some(ImageReference::inline(mime_type, data))
    }
}

// A field of the wrong type reads as absent instead of failing the response
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

// Malformed elements become empty defaults so positions are kept
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|value| serde_json::from_value(value).unwrap_or_default())
        .collect())
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Array(values) => Ok(Some(
            values
                .into_iter()
                .map(|value| serde_json::from_value(value).unwrap_or_default())
                .collect(),
        )),
        _ => Ok(None),
    }
}
