//! Derived-file naming.

/// Name for the preview image derived from an uploaded document:
/// the last extension is replaced with `.png`.
pub fn derived_image_name(original: &str) -> String {
    format!("{}.png", base_name(original))
}

/// Name for the reconstructed PDF derived from an uploaded document:
/// the last extension is replaced with `_optimized.pdf`.
pub fn optimized_pdf_name(original: &str) -> String {
    format!("{}_optimized.pdf", base_name(original))
}

fn base_name(original: &str) -> &str {
    match original.rfind('.') {
        // A leading dot is part of the name, not an extension separator.
        Some(idx) if idx > 0 => &original[..idx],
        _ => original,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docx_maps_to_png() {
        assert_eq!(derived_image_name("resume.docx"), "resume.png");
    }

    #[test]
    fn test_pdf_maps_to_optimized_pdf() {
        assert_eq!(optimized_pdf_name("resume.pdf"), "resume_optimized.pdf");
    }

    #[test]
    fn test_only_last_extension_is_replaced() {
        assert_eq!(derived_image_name("jane.doe.resume.pdf"), "jane.doe.resume.png");
    }

    #[test]
    fn test_name_without_extension_keeps_base() {
        assert_eq!(derived_image_name("resume"), "resume.png");
        assert_eq!(optimized_pdf_name("resume"), "resume_optimized.pdf");
    }

    #[test]
    fn test_leading_dot_is_not_an_extension() {
        assert_eq!(derived_image_name(".resume"), ".resume.png");
    }
}
