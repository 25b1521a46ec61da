//! Fixed-canvas text layout for plain-text previews.
//!
//! The preview canvas is a fixed 800×1000 surface. Input text is split on line
//! breaks, each physical line is greedily word-wrapped against the usable
//! width, and lines are placed top-down from the top margin. Once the next
//! line would cross the bottom margin the rest of the document is silently
//! dropped. Single-page truncation is intentional: the preview is a visual
//! summary, not a faithful rendering.

use super::metrics::FontMetricTable;

/// Geometry of the plain-text preview canvas.
#[derive(Debug, Clone, Copy)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub line_height: u32,
    pub font_size: f32,
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            width: 800,
            height: 1000,
            margin: 40,
            line_height: 24,
            font_size: 14.0,
        }
    }
}

impl CanvasSpec {
    /// Usable width between the left and right margins, in pixels.
    pub fn usable_width(&self) -> f32 {
        (self.width - 2 * self.margin) as f32
    }

    /// Maximum number of lines that fit before truncation.
    ///
    /// A line placed at `y` is kept while `y + line_height <= height - margin`.
    pub fn line_capacity(&self) -> usize {
        let usable = self.height - 2 * self.margin;
        if usable < self.line_height {
            return 0;
        }
        ((usable - self.line_height) / self.line_height) as usize + 1
    }
}

/// A line of text placed at a pixel position (top-left of the line box).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// Greedily wraps one physical line into rendered lines no wider than
/// `max_width` (same unit as `font_size`, pixels here).
///
/// A single word wider than `max_width` is emitted on its own line and allowed
/// to overflow. Blank input produces no lines.
pub fn wrap_words(
    metrics: &FontMetricTable,
    line: &str,
    max_width: f32,
    font_size: f32,
) -> Vec<String> {
    let mut wrapped = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate_width = metrics.measure(&current, font_size)
            + metrics.space(font_size)
            + metrics.measure(word, font_size);
        if candidate_width <= max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            wrapped.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        wrapped.push(current);
    }
    wrapped
}

/// Plans the full canvas: wraps every physical line and assigns positions,
/// stopping at the hard truncation boundary.
pub fn plan_text_page(
    metrics: &FontMetricTable,
    text: &str,
    spec: &CanvasSpec,
) -> Vec<PlacedLine> {
    let limit = (spec.height - spec.margin) as i32;
    let line_height = spec.line_height as i32;
    let x = spec.margin as i32;
    let mut y = spec.margin as i32;
    let mut placed = Vec::new();

    'outer: for physical in text.lines() {
        for line in wrap_words(metrics, physical, spec.usable_width(), spec.font_size) {
            if y + line_height > limit {
                break 'outer;
            }
            placed.push(PlacedLine { text: line, x, y });
            y += line_height;
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::metrics::helvetica;

    #[test]
    fn test_short_line_is_not_wrapped() {
        let lines = wrap_words(helvetica(), "Jane Doe", 720.0, 14.0);
        assert_eq!(lines, vec!["Jane Doe".to_string()]);
    }

    #[test]
    fn test_wrap_never_exceeds_max_width() {
        let metrics = helvetica();
        let text = "Led a cross functional team of twelve engineers to deliver \
                    a payments platform processing millions of transactions";
        let lines = wrap_words(metrics, text, 200.0, 14.0);
        assert!(lines.len() > 1);
        for line in &lines {
            // A single over-wide word may overflow; multi-word lines must fit.
            if line.contains(' ') {
                assert!(
                    metrics.measure(line, 14.0) <= 200.0,
                    "line too wide: {line:?}"
                );
            }
        }
    }

    #[test]
    fn test_wrap_preserves_word_order() {
        let lines = wrap_words(helvetica(), "alpha beta gamma delta epsilon", 120.0, 14.0);
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, "alpha beta gamma delta epsilon");
    }

    #[test]
    fn test_blank_line_produces_no_output() {
        assert!(wrap_words(helvetica(), "", 720.0, 14.0).is_empty());
        assert!(wrap_words(helvetica(), "   ", 720.0, 14.0).is_empty());
    }

    #[test]
    fn test_oversized_word_gets_its_own_line() {
        let lines = wrap_words(
            helvetica(),
            "a Pneumonoultramicroscopicsilicovolcanoconiosis b",
            60.0,
            14.0,
        );
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Pneumonoultramicroscopicsilicovolcanoconiosis");
    }

    #[test]
    fn test_default_canvas_capacity() {
        // 1000px tall, 40px margins, 24px lines: y runs 40, 64, ... while
        // y + 24 <= 960, which admits exactly 38 lines.
        assert_eq!(CanvasSpec::default().line_capacity(), 38);
    }

    #[test]
    fn test_plan_truncates_overflow_to_capacity() {
        let spec = CanvasSpec::default();
        let text = "line\n".repeat(100);
        let placed = plan_text_page(helvetica(), &text, &spec);
        assert_eq!(placed.len(), spec.line_capacity());
    }

    #[test]
    fn test_plan_never_places_past_bottom_margin() {
        let spec = CanvasSpec::default();
        let text = "overflow content\n".repeat(200);
        let placed = plan_text_page(helvetica(), &text, &spec);
        let limit = (spec.height - spec.margin) as i32;
        for line in &placed {
            assert!(line.y + spec.line_height as i32 <= limit);
        }
    }

    #[test]
    fn test_plan_starts_at_top_margin_and_advances_uniformly() {
        let spec = CanvasSpec::default();
        let placed = plan_text_page(helvetica(), "one\ntwo\nthree", &spec);
        assert_eq!(placed.len(), 3);
        assert_eq!(placed[0].y, 40);
        assert_eq!(placed[1].y, 64);
        assert_eq!(placed[2].y, 88);
        assert!(placed.iter().all(|l| l.x == 40));
    }

    #[test]
    fn test_blank_physical_lines_do_not_advance_cursor() {
        let spec = CanvasSpec::default();
        let placed = plan_text_page(helvetica(), "one\n\n\ntwo", &spec);
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[1].y, placed[0].y + spec.line_height as i32);
    }
}
