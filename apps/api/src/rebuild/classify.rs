//! Line classification for resume reconstruction.
//!
//! The reconstructor walks the rewritten text line by line through a small
//! state machine and emits one [`RenderAction`] per line. States:
//!
//!  - `AwaitingTitle`: no name line seen yet; the first heading becomes the
//!    document title.
//!  - `InContactBlock`: the title was just emitted; lines that look like
//!    contact details stay in this state and render centered under the name.
//!  - `InBody`: everything after the contact block; heading lines here are
//!    section headers, never titles.
//!
//! Classification rules apply in strict priority order; the first match wins.

use once_cell::sync::Lazy;
use regex::Regex;

use super::markup::strip_markup;

/// Keywords that mark a short line as a section header, compared against the
/// upper-cased line. English-only; the oracle is prompted to answer in
/// English regardless of the resume language.
pub const SECTION_KEYWORDS: [&str; 6] = [
    "EXPERIENCE",
    "EDUCATION",
    "SKILLS",
    "SUMMARY",
    "PROJECTS",
    "ACHIEVEMENTS",
];

/// Lines longer than this never qualify as section headers, keyword or not.
const SECTION_HEADER_MAX_CHARS: usize = 50;

static PAGE_FOOTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+ of \d+$").unwrap());
static HEADING_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}\s").unwrap());
static ROLE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^•]+•[^•]+\|").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflowState {
    AwaitingTitle,
    InContactBlock,
    InBody,
}

/// What the PDF composer should do with one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderAction {
    /// Artifact of a previous rendering pass; dropped without advancing.
    Skip,
    /// The person's name, large and centered.
    Title(String),
    /// Contact details, small and centered.
    Contact(String),
    /// Upper-cased, colored, underlined section divider.
    SectionHeader(String),
    /// Role/company line, bold with bullet separators removed.
    RoleLine(String),
    /// Bullet point, indented and wrapped under a normalized marker.
    Bullet(String),
    /// Bold standalone line.
    Emphasis(String),
    /// Vertical gap.
    BlankGap,
    /// Plain wrapped body text.
    Body(String),
}

/// Classifies one line. Pure: the only inputs are the current state and the
/// line, the only outputs the next state and the render action.
pub fn classify_line(state: ReflowState, raw: &str) -> (ReflowState, RenderAction) {
    let line = raw.trim();

    // 1. Noise left over from a previous export.
    if line.contains("OPTIMIZED RESUME")
        || line.contains("Optimized for:")
        || line.starts_with("Page ")
        || PAGE_FOOTER.is_match(line)
    {
        return (state, RenderAction::Skip);
    }

    // 2. The first heading is the person's name. A bare "#" prefix with no
    // following space still counts here.
    if state == ReflowState::AwaitingTitle && line.starts_with('#') {
        let title = strip_markup(line.trim_start_matches('#'));
        return (ReflowState::InContactBlock, RenderAction::Title(title));
    }

    // 3. Contact details directly under the name.
    if state == ReflowState::InContactBlock
        && (line.contains('@') || line.contains('+') || line.contains('|'))
    {
        return (state, RenderAction::Contact(strip_markup(line)));
    }

    // 4. Section headers always move the machine into the body.
    if is_section_header(line) {
        let header = strip_markup(line).to_uppercase();
        return (ReflowState::InBody, RenderAction::SectionHeader(header));
    }

    // Remaining branches end the contact block but leave AwaitingTitle
    // intact, so a late name heading can still be captured.
    let next = exit_contact(state);

    // 5. Role/company line: "Title • Company | Dates". The separator is
    // removed and the surrounding whitespace collapsed.
    if ROLE_LINE.is_match(line) {
        let cleaned = strip_markup(&line.replace('•', ""));
        let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
        return (next, RenderAction::RoleLine(cleaned));
    }

    // 6. Bullets, glyph or markdown marker.
    if let Some(text) = bullet_text(line) {
        return (next, RenderAction::Bullet(strip_markup(text)));
    }

    // 7. Bold standalone line.
    if line.contains("**") {
        return (next, RenderAction::Emphasis(strip_markup(line)));
    }

    // 8. Blank line.
    if line.is_empty() {
        return (next, RenderAction::BlankGap);
    }

    // 9. Plain body text.
    (next, RenderAction::Body(strip_markup(line)))
}

/// Classifies a whole document, threading the state through every line.
pub fn classify_document(text: &str) -> Vec<RenderAction> {
    let mut state = ReflowState::AwaitingTitle;
    let mut actions = Vec::new();
    for line in text.lines() {
        let (next, action) = classify_line(state, line);
        state = next;
        actions.push(action);
    }
    actions
}

fn exit_contact(state: ReflowState) -> ReflowState {
    if state == ReflowState::InContactBlock {
        ReflowState::InBody
    } else {
        state
    }
}

fn is_section_header(line: &str) -> bool {
    if line.is_empty() {
        return false;
    }
    if HEADING_MARKER.is_match(line) {
        return true;
    }
    let upper = line.to_uppercase();
    line.chars().count() <= SECTION_HEADER_MAX_CHARS
        && SECTION_KEYWORDS.iter().any(|k| upper.contains(k))
}

/// Returns the bullet body if the line starts with a bullet marker.
///
/// The markdown markers require a trailing space so that `**bold**` lines
/// fall through to the emphasized branch.
fn bullet_text(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix('•') {
        return Some(rest.trim_start());
    }
    if let Some(rest) = line.strip_prefix("* ") {
        return Some(rest.trim_start());
    }
    if let Some(rest) = line.strip_prefix("- ") {
        return Some(rest.trim_start());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use RenderAction::*;
    use ReflowState::*;

    #[test]
    fn test_short_mixed_case_keyword_line_is_a_header() {
        let line = "Relevant education and training"; // 31 chars, contains "education"
        let (state, action) = classify_line(InBody, line);
        assert_eq!(state, InBody);
        assert_eq!(
            action,
            SectionHeader("RELEVANT EDUCATION AND TRAINING".into())
        );
    }

    #[test]
    fn test_long_keyword_line_is_not_a_header() {
        let line = "My EDUCATION taught me to write sentences of this length";
        assert!(line.chars().count() > 50);
        let (_, action) = classify_line(InBody, line);
        assert!(matches!(action, Body(_)), "got {action:?}");
    }

    #[test]
    fn test_fifty_char_keyword_line_is_still_a_header() {
        let line = "Professional EXPERIENCE in distributed systems dev";
        assert_eq!(line.chars().count(), 50);
        let (_, action) = classify_line(InBody, line);
        assert!(matches!(action, SectionHeader(_)));
    }

    #[test]
    fn test_noise_lines_are_skipped_without_state_change() {
        for line in [
            "OPTIMIZED RESUME",
            "Optimized for: Senior Engineer at Acme",
            "Page 2",
            "2 of 3",
        ] {
            let (state, action) = classify_line(AwaitingTitle, line);
            assert_eq!(action, Skip, "line {line:?}");
            assert_eq!(state, AwaitingTitle, "line {line:?}");
        }
    }

    #[test]
    fn test_title_is_only_captured_before_the_body() {
        let (state, action) = classify_line(AwaitingTitle, "# JANE DOE");
        assert_eq!(state, InContactBlock);
        assert_eq!(action, Title("JANE DOE".into()));

        // In the body the same line is a section header.
        let (state, action) = classify_line(InBody, "# JANE DOE");
        assert_eq!(state, InBody);
        assert_eq!(action, SectionHeader("JANE DOE".into()));
    }

    #[test]
    fn test_title_accepts_heading_marker_without_a_space() {
        let (state, action) = classify_line(AwaitingTitle, "#JANE DOE");
        assert_eq!(state, InContactBlock);
        assert_eq!(action, Title("JANE DOE".into()));
    }

    #[test]
    fn test_contact_detection_requires_the_contact_block() {
        let line = "jane@example.com | 555-1234";
        let (state, action) = classify_line(InContactBlock, line);
        assert_eq!(state, InContactBlock);
        assert_eq!(action, Contact(line.into()));

        let (_, action) = classify_line(InBody, line);
        assert!(!matches!(action, Contact(_)));
    }

    #[test]
    fn test_body_line_ends_the_contact_block() {
        let (state, _) = classify_line(InContactBlock, "A results-driven engineer.");
        assert_eq!(state, InBody);
    }

    #[test]
    fn test_bullet_markers_are_normalized() {
        for line in ["• Built X", "* Built X", "- Built X", "•Built X"] {
            let (_, action) = classify_line(InBody, line);
            assert_eq!(action, Bullet("Built X".into()), "line {line:?}");
        }
    }

    #[test]
    fn test_double_star_line_is_emphasis_not_a_bullet() {
        let (_, action) = classify_line(InBody, "**Engineer** | Acme | 2020-2022");
        assert_eq!(action, Emphasis("Engineer | Acme | 2020-2022".into()));
    }

    #[test]
    fn test_role_line_strips_bullet_separator() {
        let (_, action) = classify_line(InBody, "Senior Engineer • Acme Corp | 2020-2024");
        assert_eq!(action, RoleLine("Senior Engineer Acme Corp | 2020-2024".into()));
    }

    #[test]
    fn test_role_line_leaves_no_doubled_spaces() {
        let (_, action) = classify_line(InBody, "Lead Developer  •  Initech | 2018-2020");
        match action {
            RoleLine(text) => {
                assert!(!text.contains('•'));
                assert!(!text.contains("  "), "got {text:?}");
            }
            other => panic!("expected RoleLine, got {other:?}"),
        }
    }

    #[test]
    fn test_full_document_classification_order() {
        let text = "\
# JANE DOE
jane@x.com | 555-1234

EXPERIENCE
**Engineer** | Acme | 2020-2022
• Built X
• Improved Y by 30%";

        let actions = classify_document(text);
        assert_eq!(
            actions,
            vec![
                Title("JANE DOE".into()),
                Contact("jane@x.com | 555-1234".into()),
                BlankGap,
                SectionHeader("EXPERIENCE".into()),
                Emphasis("Engineer | Acme | 2020-2022".into()),
                Bullet("Built X".into()),
                Bullet("Improved Y by 30%".into()),
            ]
        );
    }
}
