//! Styled A4 PDF emission for reconstructed resumes.
//!
//! Consumes the classifier's render actions and lays them out with a cursor
//! measured in millimetres from the top of the page. printpdf's coordinate
//! origin is the bottom-left corner, so every write converts the cursor to a
//! baseline y in points. A page-break check runs before every drawn line;
//! crossing the printable boundary starts a fresh page with the cursor back
//! at the top margin.

use printpdf::{
    BuiltinFont, Color, Line, LinePoint, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions,
    PdfWarnMsg, Point, Pt, Rgb, TextItem,
};

use crate::convert::layout::wrap_words;
use crate::convert::metrics::helvetica;

use super::classify::{classify_document, RenderAction};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
// Breaking happens once the cursor passes this far above the page bottom.
const BOTTOM_GUARD_MM: f32 = 10.0;
const MM_PER_PT: f32 = 0.352_778;

const TITLE_SIZE: f32 = 16.0;
const CONTACT_SIZE: f32 = 9.0;
const HEADER_SIZE: f32 = 11.0;
const ROLE_SIZE: f32 = 10.5;
const BULLET_SIZE: f32 = 9.5;
const BODY_SIZE: f32 = 10.0;

/// Dark blue used for section headers and their rules: rgb(0, 51, 102).
fn header_color() -> Color {
    Color::Rgb(Rgb {
        r: 0.0,
        g: 0.2,
        b: 0.4,
        icc_profile: None,
    })
}

fn black() -> Color {
    Color::Rgb(Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        icc_profile: None,
    })
}

/// Renders rewritten resume text into a finished PDF byte stream.
pub fn render_pdf(text: &str, title: &str) -> Vec<u8> {
    let mut doc = PdfDocument::new(title);
    doc.with_pages(compose_pages(text));
    let mut warnings: Vec<PdfWarnMsg> = Vec::new();
    doc.save(&PdfSaveOptions::default(), &mut warnings)
}

/// Classifies the text and lays the actions out into pages.
fn compose_pages(text: &str) -> Vec<PdfPage> {
    let mut composer = Composer::new();
    for action in classify_document(text) {
        composer.apply(&action);
    }
    composer.finish()
}

struct Composer {
    pages: Vec<PdfPage>,
    ops: Vec<Op>,
    /// Distance from the top of the page to the next baseline, in mm.
    cursor_mm: f32,
}

impl Composer {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            ops: Vec::new(),
            cursor_mm: MARGIN_MM,
        }
    }

    fn apply(&mut self, action: &RenderAction) {
        match action {
            RenderAction::Skip => {}
            RenderAction::Title(name) => {
                self.write_centered(name, TITLE_SIZE, BuiltinFont::HelveticaBold);
                self.cursor_mm += 7.0;
            }
            RenderAction::Contact(details) => {
                self.write_centered(details, CONTACT_SIZE, BuiltinFont::Helvetica);
                self.cursor_mm += 4.0;
            }
            RenderAction::SectionHeader(header) => {
                self.cursor_mm += 3.0;
                self.break_page_if_needed();
                self.write_line(
                    header,
                    MARGIN_MM,
                    HEADER_SIZE,
                    BuiltinFont::HelveticaBold,
                    Some(header_color()),
                );
                self.cursor_mm += 5.0;
                self.draw_header_rule();
                self.cursor_mm += 1.0;
            }
            RenderAction::RoleLine(text) | RenderAction::Emphasis(text) => {
                self.break_page_if_needed();
                self.write_line(text, MARGIN_MM, ROLE_SIZE, BuiltinFont::HelveticaBold, None);
                self.cursor_mm += 5.0;
            }
            RenderAction::Bullet(text) => {
                let indent = MARGIN_MM + 4.0;
                let max_width = usable_width_mm() - 5.0;
                let bullet = format!("• {text}");
                for line in wrap_mm(&bullet, max_width, BULLET_SIZE) {
                    self.break_page_if_needed();
                    self.write_line(&line, indent, BULLET_SIZE, BuiltinFont::Helvetica, None);
                    self.cursor_mm += 4.0;
                }
                self.cursor_mm += 1.0;
            }
            RenderAction::BlankGap => {
                self.cursor_mm += 2.0;
            }
            RenderAction::Body(text) => {
                for line in wrap_mm(text, usable_width_mm(), BODY_SIZE) {
                    self.break_page_if_needed();
                    self.write_line(&line, MARGIN_MM, BODY_SIZE, BuiltinFont::Helvetica, None);
                    self.cursor_mm += 4.5;
                }
                self.cursor_mm += 1.0;
            }
        }
    }

    fn finish(mut self) -> Vec<PdfPage> {
        if !self.ops.is_empty() || self.pages.is_empty() {
            self.flush_page();
        }
        self.pages
    }

    fn break_page_if_needed(&mut self) {
        if self.cursor_mm > PAGE_HEIGHT_MM - MARGIN_MM - BOTTOM_GUARD_MM {
            self.flush_page();
        }
    }

    fn flush_page(&mut self) {
        let ops = std::mem::take(&mut self.ops);
        self.pages
            .push(PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), ops));
        self.cursor_mm = MARGIN_MM;
    }

    fn write_centered(&mut self, text: &str, size: f32, font: BuiltinFont) {
        self.break_page_if_needed();
        let width_mm = helvetica().measure(text, size) * MM_PER_PT;
        let x = ((PAGE_WIDTH_MM - width_mm) / 2.0).max(MARGIN_MM);
        self.write_line(text, x, size, font, None);
    }

    fn write_line(&mut self, text: &str, x_mm: f32, size: f32, font: BuiltinFont, color: Option<Color>) {
        let baseline = Point {
            x: Mm(x_mm).into_pt(),
            y: Mm(PAGE_HEIGHT_MM - self.cursor_mm).into_pt(),
        };
        let colored = color.is_some();

        self.ops.push(Op::StartTextSection);
        if let Some(col) = color {
            self.ops.push(Op::SetFillColor { col });
        }
        self.ops.push(Op::SetTextCursor { pos: baseline });
        self.ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(size),
            font,
        });
        self.ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text.to_string())],
            font,
        });
        if colored {
            self.ops.push(Op::SetFillColor { col: black() });
        }
        self.ops.push(Op::EndTextSection);
    }

    /// Horizontal rule just below a section header.
    fn draw_header_rule(&mut self) {
        let y = Mm(PAGE_HEIGHT_MM - (self.cursor_mm - 2.0)).into_pt();
        self.ops.push(Op::SetOutlineColor {
            col: header_color(),
        });
        self.ops.push(Op::SetOutlineThickness { pt: Pt(0.85) });
        self.ops.push(Op::DrawLine {
            line: Line {
                points: vec![
                    LinePoint {
                        p: Point {
                            x: Mm(MARGIN_MM).into_pt(),
                            y,
                        },
                        bezier: false,
                    },
                    LinePoint {
                        p: Point {
                            x: Mm(PAGE_WIDTH_MM - MARGIN_MM).into_pt(),
                            y,
                        },
                        bezier: false,
                    },
                ],
                is_closed: false,
            },
        });
    }
}

fn usable_width_mm() -> f32 {
    PAGE_WIDTH_MM - 2.0 * MARGIN_MM
}

/// Wraps text against a width given in mm, measuring at the given point size.
fn wrap_mm(text: &str, width_mm: f32, size_pt: f32) -> Vec<String> {
    let width_pt = width_mm / MM_PER_PT;
    wrap_words(helvetica(), text, width_pt, size_pt)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# JANE DOE
jane@x.com | 555-1234

EXPERIENCE
**Engineer** | Acme | 2020-2022
• Built X
• Improved Y by 30%";

    #[test]
    fn test_short_resume_fits_one_page() {
        let pages = compose_pages(SAMPLE);
        assert_eq!(pages.len(), 1);
        assert!(!pages[0].ops.is_empty());
    }

    #[test]
    fn test_long_resume_breaks_onto_multiple_pages() {
        let mut text = String::from("# JANE DOE\n\nEXPERIENCE\n");
        for i in 0..200 {
            text.push_str(&format!("• Achievement number {i} with some detail\n"));
        }
        let pages = compose_pages(&text);
        assert!(pages.len() >= 2, "expected a page break, got {} page(s)", pages.len());
        for page in &pages {
            assert!(!page.ops.is_empty());
        }
    }

    #[test]
    fn test_empty_input_still_produces_one_page() {
        let pages = compose_pages("");
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_rendered_document_is_a_pdf() {
        let bytes = render_pdf(SAMPLE, "resume_optimized.pdf");
        assert!(bytes.starts_with(b"%PDF"));
    }
}
