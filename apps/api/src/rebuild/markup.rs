//! Regex-based markup stripping.
//!
//! Rewritten resumes come back with light markdown decoration. Stripping is
//! plain substitution, not parsing: links keep their text, bold/italic/code
//! markers are removed, heading markers are dropped. Malformed markup passes
//! through unchanged and falls to the plain-text rendering branch.

use once_cell::sync::Lazy;
use regex::Regex;

static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"#{1,6}\s").unwrap());
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

pub fn strip_markup(text: &str) -> String {
    let text = LINK.replace_all(text, "$1");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = HEADING.replace_all(&text, "");
    let text = CODE.replace_all(&text, "$1");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_markers_are_removed_without_residue() {
        assert_eq!(strip_markup("**X**"), "X");
        assert_eq!(strip_markup("**Senior Engineer** at Acme"), "Senior Engineer at Acme");
    }

    #[test]
    fn test_links_keep_their_text() {
        assert_eq!(
            strip_markup("see [my portfolio](https://example.com) online"),
            "see my portfolio online"
        );
    }

    #[test]
    fn test_heading_markers_are_dropped() {
        assert_eq!(strip_markup("# JANE DOE"), "JANE DOE");
        assert_eq!(strip_markup("### Skills"), "Skills");
    }

    #[test]
    fn test_italic_and_inline_code() {
        assert_eq!(strip_markup("*emphasis* and `code`"), "emphasis and code");
    }

    #[test]
    fn test_combined_markup_in_one_line() {
        assert_eq!(
            strip_markup("## **Led** a [team](x) of *twelve*"),
            "Led a team of twelve"
        );
    }

    #[test]
    fn test_plain_text_is_only_trimmed() {
        assert_eq!(strip_markup("  plain line  "), "plain line");
    }
}
