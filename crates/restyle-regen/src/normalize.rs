//! Reduce a chat-completions response to one canonical image reference

use crate::{
    error::{RegenError, Result},
    protocol::{ChatResponse, Choice, ContentPart, GeneratedImage, InlineData, MessageContent},
    types::ImageReference,
};

/// Places an image has been observed in, highest priority first
#[derive(Debug)]
enum ResponseShape<'a> {
    /// `message.images[0].image_url.url`
    MessageImages(&'a [GeneratedImage]),
    /// `message.content` as a bare string
    TextContent(&'a str),
    /// `message.content` as typed parts
    ContentParts(&'a [ContentPart]),
    /// `inline_data` / `inlineData` on the choice
    ChoiceInlineData(&'a InlineData),
}

fn shapes(choice: &Choice) -> Vec<ResponseShape<'_>> {
    let mut shapes = Vec::with_capacity(4);

    if let Some(message) = &choice.message {
        if let Some(images) = message.images.as_deref().filter(|images| !images.is_empty()) {
            shapes.push(ResponseShape::MessageImages(images));
        }

        match &message.content {
            Some(MessageContent::Text(text)) if !text.is_empty() => shapes.push(ResponseShape::TextContent(text)),
            Some(MessageContent::Parts(parts)) => shapes.push(ResponseShape::ContentParts(parts)),
            _ => {}
        }
    }

    if let Some(inline) = choice.inline() {
        shapes.push(ResponseShape::ChoiceInlineData(inline));
    }

    shapes
}

/// Extract the generated image from the first choice
///
/// Shapes are tried in priority order and the first match wins. Text
/// content that is not an image reference ends the search with
/// `TextInsteadOfImage`.
pub fn normalize_response(response: &ChatResponse) -> Result<ImageReference> {
    let Some(choice) = response.choices.first() else {
        tracing::warn!("upstream response has no choices");
        return Err(RegenError::UnexpectedFormat);
    };

    for shape in shapes(choice) {
        match shape {
            ResponseShape::MessageImages(images) => {
                if let Some(url) = images.first().and_then(GeneratedImage::url) {
                    tracing::debug!("image found in message images");
                    return Ok(ImageReference::new(url));
                }
            }
            ResponseShape::TextContent(text) => {
                if ImageReference::looks_like_image(text) {
                    return Ok(ImageReference::new(text));
                }

                tracing::warn!(content = preview(text, 100), "model returned text instead of an image");
                return Err(RegenError::TextInsteadOfImage);
            }
            ResponseShape::ContentParts(parts) => {
                if let Some(reference) = parts.iter().find_map(ContentPart::image_reference) {
                    tracing::debug!("image found in content parts");
                    return Ok(reference);
                }
            }
            ResponseShape::ChoiceInlineData(inline) => {
                if let Some(reference) = inline.to_reference() {
                    tracing::debug!("image found in choice inline data");
                    return Ok(reference);
                }
            }
        }
    }

    tracing::warn!(has_message = choice.message.is_some(), "unexpected upstream response format");
    Err(RegenError::UnexpectedFormat)
}

/// Leading `max_chars` characters of `text`, for logs
pub(crate) fn preview(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(end, _)| &text[..end])
}
