//! Instruction templates sent to the title and image models.

use crate::thumbforge::types::{AspectRatio, StyleTag};

/// Title request. Placeholders: `{count}`, `{topic}`, `{language}`.
pub const TITLE_PROMPT_TEMPLATE: &str = r#"Act as a viral YouTube content strategist.
Write a list of {count} catchy, clickbait (within reason) and curiosity-driven YouTube video titles for the following topic: "{topic}".
The titles must be written in {language}.
Return only a JSON array of title strings."#;

/// Thumbnail request. Placeholders: `{ratio}`, `{title}`, `{style}`, `{composition}`.
pub const THUMBNAIL_PROMPT_TEMPLATE: &str = r#"Create a highly engaging YouTube thumbnail (aspect ratio {ratio}) for a video titled: "{title}".

VISUAL STYLE: {style} (transform the user's face and the environment into this style).

Detailed instructions:
1. **Subject**: Use the face from the input image. Transform that face to match the "{style}" style (for example, for 3D make it look like a character from a popular 3D animated film). The expression must be very expressive (shocked, laughing or serious).
2. **TEXT (VERY IMPORTANT)**: Show the title text "{title}" (or a 2-3 keyword summary of it) inside the image.
   - Font: VERY LARGE, BOLD, sans-serif.
   - Colour: bright (yellow/white/neon) with a THICK OUTLINE (black/red) so the text stays readable over any background.
   - Position: make sure the text never covers the face.
3. **Composition**: {composition}
4. **Atmosphere**: Use highly saturated colours, glow lighting and a background relevant to the topic but slightly blurred so the focus stays on the subject and the text."#;

const LANDSCAPE_COMPOSITION: &str =
    "Use the rule of thirds: subject on the left or right, text in the empty side.";

const PORTRAIT_COMPOSITION: &str =
    "Vertical Shorts layout: subject at the bottom or centre, text in the empty top or middle area, clear of the edges.";

/// Build the title request for `topic`.
pub fn title_prompt(topic: &str, count: usize, language: &str) -> String {
    TITLE_PROMPT_TEMPLATE
        .replace("{count}", &count.to_string())
        .replace("{language}", language)
        .replace("{topic}", topic)
}

pub fn composition_hint(ratio: AspectRatio) -> &'static str {
    match ratio {
        AspectRatio::Landscape => LANDSCAPE_COMPOSITION,
        AspectRatio::Portrait => PORTRAIT_COMPOSITION,
    }
}

/// Build the thumbnail composition instruction.
pub fn thumbnail_prompt(title: &str, ratio: AspectRatio, style: StyleTag) -> String {
    THUMBNAIL_PROMPT_TEMPLATE
        .replace("{ratio}", ratio.as_str())
        .replace("{style}", style.id())
        .replace("{composition}", composition_hint(ratio))
        .replace("{title}", title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_prompt_mentions_topic_count_and_json() {
        let prompt = title_prompt("nasi goreng", 20, "Indonesian");
        assert!(prompt.contains("\"nasi goreng\""));
        assert!(prompt.contains("list of 20 catchy"));
        assert!(prompt.contains("written in Indonesian"));
        assert!(prompt.contains("JSON array"));
    }

    #[test]
    fn user_text_is_substituted_last() {
        // a topic that looks like a placeholder must not be expanded
        let prompt = title_prompt("{count} ways", 5, "English");
        assert!(prompt.contains("\"{count} ways\""));
    }

    #[test]
    fn thumbnail_prompt_switches_composition_by_ratio() {
        let wide = thumbnail_prompt("Judul A", AspectRatio::Landscape, StyleTag::ComicBook);
        assert!(wide.contains("aspect ratio 16:9"));
        assert!(wide.contains("rule of thirds"));
        assert!(wide.contains("VISUAL STYLE: Comic Book"));
        assert!(wide.contains("\"Judul A\""));

        let tall = thumbnail_prompt("Judul A", AspectRatio::Portrait, StyleTag::Anime);
        assert!(tall.contains("aspect ratio 9:16"));
        assert!(tall.contains("Vertical Shorts layout"));
        assert!(!tall.contains("rule of thirds"));
    }
}
