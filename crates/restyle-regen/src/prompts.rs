//! Fixed prompt templates and style substitution

use std::fmt;

/// Token replaced by the lower-cased style in every template
pub const STYLE_PLACEHOLDER: &str = "{physique}";

/// Number of variants produced per batch
pub const VARIANT_COUNT: usize = 10;

/// One scene per variant, in output order
pub const PROMPT_TEMPLATES: [&str; VARIANT_COUNT] = [
    "A candid, photorealistic shot of this person, who has an {physique} build, laughing at a rooftop bar at sunset. The focus is solely on them, looking natural and fun. No other people. Crucially, maintain the person's exact facial features, ethnicity, and hairstyle from the original photo for character consistency.",
    "A realistic photo of this person, with an {physique} physique, hiking on a scenic mountain trail, looking adventurous and happy. Golden hour lighting. The focus is only on them. Animals are allowed. Crucially, maintain the person's exact facial features, ethnicity, and hairstyle from the original photo for character consistency.",
    "Create a photo of this person, with an {physique} build, focused on a hobby, like playing a guitar in a cozy room. The atmosphere is passionate and creative. The person is the only one in the image. Crucially, maintain the person's exact facial features, ethnicity, and hairstyle from the original photo for character consistency.",
    "Generate an image of this person, with an {physique} body type, volunteering at an animal shelter, smiling while petting a dog. The shot looks heartwarming and genuine. No other people visible. Crucially, maintain the person's exact facial features, ethnicity, and hairstyle from the original photo for character consistency.",
    "A photorealistic image of this person, who has an {physique} build, in a stylish cafe, reading a book. The vibe is intelligent, relaxed, and sophisticated. They are the sole focus. Crucially, maintain the person's exact facial features, ethnicity, and hairstyle from the original photo for character consistency.",
    "A high-quality, realistic photo of this person with an {physique} build, dressed smartly at an art gallery, looking thoughtfully at a painting. Soft, artistic lighting. They are the only person in the shot. Crucially, maintain the person's exact facial features, ethnicity, and hairstyle from the original photo for character consistency.",
    "Generate a photorealistic image of this person, with an {physique} physique, laughing while cooking in a bright, modern kitchen. The atmosphere is joyful and domestic. The focus is entirely on them. Crucially, maintain the person's exact facial features, ethnicity, and hairstyle from the original photo for character consistency.",
    "A candid shot of this person, who has an {physique} build, walking through a vibrant city street at night. City lights create a beautiful bokeh effect. They look confident and happy, and are the only person in focus. Crucially, maintain the person's exact facial features, ethnicity, and hairstyle from the original photo for character consistency.",
    "Create a photo of this person, with an {physique} body type, enjoying a picnic in a park on a sunny day, smiling at the camera. An adorable pet can be next to them. No other people. Crucially, maintain the person's exact facial features, ethnicity, and hairstyle from the original photo for character consistency.",
    "A photorealistic portrait of this person, with an {physique} build, sitting by a cozy fireplace with a mug. The setting is warm and inviting, with a relaxed expression. This must be a solo portrait. Crucially, maintain the person's exact facial features, ethnicity, and hairstyle from the original photo for character consistency.",
];

/// Style or build descriptor substituted into the templates
///
/// Any label is accepted; it is only lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style(String);

impl Style {
    pub fn new(label: &str) -> Self {
        Self(label.to_lowercase())
    }

    /// Use `label` unless it is absent or blank, otherwise `default`
    pub fn resolve(label: Option<&str>, default: &str) -> Self {
        match label.filter(|label| !label.trim().is_empty()) {
            Some(label) => Self::new(label),
            None => Self::new(default),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitute this style into a single template
    pub fn apply(&self, template: &str) -> String {
        template.replace(STYLE_PLACEHOLDER, &self.0)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Final prompts for a batch, in template order
pub fn render_prompts(style: &Style) -> [String; VARIANT_COUNT] {
    PROMPT_TEMPLATES.map(|template| style.apply(template))
}
