use regex::Regex;
use std::sync::OnceLock;

/// A single emoji glyph (presentation form, or text form forced by U+FE0F)
/// followed by one whitespace character.
///
/// Multi-codepoint sequences (ZWJ families, skin tones, flags) do not match;
/// they stay in the text.
fn emoji_prefix_regex() -> &'static Regex {
    static EMOJI_PREFIX: OnceLock<Regex> = OnceLock::new();
    EMOJI_PREFIX.get_or_init(|| {
        Regex::new(r"(?s)^(\p{Emoji_Presentation}|\p{Emoji}\x{FE0F})\s(.*)$")
            .expect("Invalid emoji prefix regex")
    })
}

/// Split `"<emoji> rest"` into `(emoji, rest)`
pub fn split_emoji_prefix(text: &str) -> Option<(&str, &str)> {
    let caps = emoji_prefix_regex().captures(text)?;
    let emoji = caps.get(1)?.as_str();
    let rest = caps.get(2).map_or("", |m| m.as_str());
    Some((emoji, rest))
}

/// Inverse of [`split_emoji_prefix`]
pub fn join_emoji_prefix(emoji: &str, text: &str) -> String {
    format!("{emoji} {text}")
}
