//! Resume reconstruction: oracle-rewritten text back into a styled PDF.
//!
//! The rewritten resume comes back as freeform text with light markdown. The
//! classifier walks it line by line and emits render actions; the PDF
//! composer turns those into paginated A4 output. Reconstruction itself has
//! no failure mode: any line the heuristics cannot place renders as plain
//! body text.

pub mod classify;
pub mod markup;
pub mod pdf;

use crate::convert::naming::optimized_pdf_name;

/// A finished reconstructed resume.
#[derive(Debug, Clone)]
pub struct RebuiltResume {
    pub file_name: String,
    pub pdf: Vec<u8>,
}

/// Reconstructs a styled PDF from rewritten resume text. The output name is
/// derived from the originally uploaded file.
pub fn rebuild_resume_pdf(rewritten: &str, original_name: &str) -> RebuiltResume {
    let file_name = optimized_pdf_name(original_name);
    let pdf = pdf::render_pdf(rewritten, &file_name);
    RebuiltResume { file_name, pdf }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebuild_derives_name_and_produces_pdf() {
        let rebuilt = rebuild_resume_pdf("# JANE DOE\n\nEXPERIENCE\n• Built X", "resume.pdf");
        assert_eq!(rebuilt.file_name, "resume_optimized.pdf");
        assert!(rebuilt.pdf.starts_with(b"%PDF"));
    }
}
