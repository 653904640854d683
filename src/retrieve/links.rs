//! Extraction of embedded URLs from free-form clue text.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"https?://(?:www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b(?:[-a-zA-Z0-9()@:%_+.~#?&/=]*)",
    )
    .expect("link pattern compiles")
});

/// Clue text with its embedded link split out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLink {
    /// Text with every matched URL removed.
    pub text: String,
    /// First URL found in the text.
    pub link: Option<String>,
}

/// Pull the first URL out of `text`.
///
/// All URLs are stripped from the returned text, not only the first one.
/// Text without any URL is returned unchanged.
pub fn extract_link(text: &str) -> ExtractedLink {
    let Some(first) = LINK_PATTERN.find(text) else {
        debug!(text, "clue has no embedded link");
        return ExtractedLink {
            text: text.to_owned(),
            link: None,
        };
    };

    let link = first.as_str().to_owned();
    debug!(text, link = %link, "clue has embedded link");

    ExtractedLink {
        text: LINK_PATTERN.replace_all(text, "").into_owned(),
        link: Some(link),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_link_is_split_from_text() {
        let extracted = extract_link("Look at this https://i.imgur.com/abc123.jpg painting");
        assert_eq!(extracted.text, "Look at this  painting");
        assert_eq!(
            extracted.link.as_deref(),
            Some("https://i.imgur.com/abc123.jpg")
        );
    }

    #[test]
    fn text_without_link_is_unchanged() {
        let text = "This 1969 mission put men on the moon. No link, e.g. not.a.url";
        let extracted = extract_link(text);
        assert_eq!(extracted.text, text);
        assert_eq!(extracted.link, None);
    }

    #[test]
    fn first_link_wins_and_all_are_stripped() {
        let extracted =
            extract_link("http://www.example.com/one.png then https://example.org/two.gif?x=1");
        assert_eq!(extracted.link.as_deref(), Some("http://www.example.com/one.png"));
        assert_eq!(extracted.text, " then ");
    }

    #[test]
    fn query_strings_stay_in_the_link() {
        let extracted = extract_link("Name it: https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42");
        assert_eq!(
            extracted.link.as_deref(),
            Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42")
        );
        assert_eq!(extracted.text, "Name it: ");
    }
}
