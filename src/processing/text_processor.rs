//! Text normalization shared by skill patterns and resume text

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Normalizes text so that skill names and resume text compare on equal terms.
///
/// Normalization lowercases, turns every run of characters that is not a letter,
/// a digit, `+` or `#` into a single space, and trims the ends. `+` and `#` stay
/// inside tokens so that "C++" and "C#" survive as distinct tokens.
pub struct TextProcessor {
    separator_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let separator_regex = Regex::new(r"[^\p{Alphabetic}\p{Nd}+#]+")
            .expect("Invalid separator regex");

        Self { separator_regex }
    }

    /// Lowercase, strip punctuation and collapse whitespace.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        self.separator_regex
            .replace_all(&lowered, " ")
            .trim()
            .to_string()
    }

    /// True when nothing but whitespace and punctuation remains after normalization.
    pub fn is_blank(&self, text: &str) -> bool {
        self.normalize(text).is_empty()
    }
}

/// Key used to compare skill names and job labels: case-insensitive,
/// whitespace-collapsed, punctuation preserved.
pub fn name_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Truncate text to at most `max_graphemes` user-perceived characters.
pub fn preview(text: &str, max_graphemes: usize) -> String {
    let mut graphemes = text.graphemes(true);
    let head: String = graphemes.by_ref().take(max_graphemes).collect();
    if graphemes.next().is_some() {
        format!("{}...", head.trim_end())
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_punctuation_variants() {
        let processor = TextProcessor::new();

        assert_eq!(processor.normalize("Node.js"), "node js");
        assert_eq!(processor.normalize("node   js"), "node js");
        assert_eq!(processor.normalize("NodeJS"), "nodejs");
        assert_eq!(processor.normalize("  Problem-Solving!! "), "problem solving");
    }

    #[test]
    fn test_normalize_keeps_plus_and_hash() {
        let processor = TextProcessor::new();

        assert_eq!(processor.normalize("C++, C# and CI/CD"), "c++ c# and ci cd");
    }

    #[test]
    fn test_blank_detection() {
        let processor = TextProcessor::new();

        assert!(processor.is_blank(""));
        assert!(processor.is_blank("  \n\t "));
        assert!(processor.is_blank("--- ... ---"));
        assert!(!processor.is_blank("Rust"));
    }

    #[test]
    fn test_name_key() {
        assert_eq!(name_key("  Data   Scientist "), "data scientist");
        assert_eq!(name_key("Node.js"), "node.js");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("a longer piece of text", 8), "a longer...");
        assert_eq!(preview("naïve café", 5), "naïve...");
    }
}
