//! Multi-page document stitching.
//!
//! Paginated documents are rendered one page at a time through the
//! [`PageDecoder`] capability and stitched into a single tall bitmap: the
//! output is as wide as page one and as tall as the sum of all page heights,
//! pages blitted top-to-bottom in page order. Stitching is all-or-nothing;
//! a failure on any page aborts the conversion with no partial image.

use image::{imageops, Rgba, RgbaImage};

use super::ConvertError;

/// Magnification applied to every page before stitching.
pub const PREVIEW_SCALE: f32 = 4.0;

/// Renders pages of a paginated document format.
///
/// Injected into [`super::DocumentConverter`] so the conversion pipeline can
/// be exercised without a native rendering library.
pub trait PageDecoder: Send + Sync {
    /// Number of pages in the document.
    fn page_count(&self, doc: &[u8]) -> Result<u32, ConvertError>;

    /// Renders the zero-based page `index` at the given magnification.
    fn render_page(&self, doc: &[u8], index: u32, scale: f32) -> Result<RgbaImage, ConvertError>;
}

/// Renders every page at [`PREVIEW_SCALE`] and stacks them vertically.
pub fn stitch_preview(decoder: &dyn PageDecoder, doc: &[u8]) -> Result<RgbaImage, ConvertError> {
    let page_count = decoder.page_count(doc)?;
    if page_count == 0 {
        return Err(ConvertError::Decode("document has no pages".into()));
    }

    let mut pages = Vec::with_capacity(page_count as usize);
    for index in 0..page_count {
        pages.push(decoder.render_page(doc, index, PREVIEW_SCALE)?);
    }

    let width = pages[0].width();
    let height = pages.iter().map(|p| p.height()).sum();

    let mut stitched = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    let mut y: i64 = 0;
    for page in &pages {
        imageops::overlay(&mut stitched, page, 0, y);
        y += i64::from(page.height());
    }
    Ok(stitched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Decoder that renders each configured page as a solid color.
    struct FakeDecoder {
        pages: Vec<(u32, u32, Rgba<u8>)>,
        fail_at: Option<u32>,
        render_calls: AtomicU32,
    }

    impl FakeDecoder {
        fn new(pages: Vec<(u32, u32, Rgba<u8>)>) -> Self {
            Self {
                pages,
                fail_at: None,
                render_calls: AtomicU32::new(0),
            }
        }

        fn failing_at(mut self, index: u32) -> Self {
            self.fail_at = Some(index);
            self
        }
    }

    impl PageDecoder for FakeDecoder {
        fn page_count(&self, _doc: &[u8]) -> Result<u32, ConvertError> {
            Ok(self.pages.len() as u32)
        }

        fn render_page(
            &self,
            _doc: &[u8],
            index: u32,
            _scale: f32,
        ) -> Result<RgbaImage, ConvertError> {
            self.render_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_at == Some(index) {
                return Err(ConvertError::Render {
                    page: index + 1,
                    reason: "simulated failure".into(),
                });
            }
            let (w, h, color) = self.pages[index as usize];
            Ok(RgbaImage::from_pixel(w, h, color))
        }
    }

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    #[test]
    fn test_stitched_dimensions_follow_first_page_width_and_summed_height() {
        let decoder = FakeDecoder::new(vec![(100, 80, RED), (100, 120, BLUE)]);
        let stitched = stitch_preview(&decoder, b"doc").unwrap();
        assert_eq!(stitched.width(), 100);
        assert_eq!(stitched.height(), 200);
    }

    #[test]
    fn test_pages_are_stacked_in_order_without_gap_or_overlap() {
        let decoder = FakeDecoder::new(vec![(50, 40, RED), (50, 30, GREEN), (50, 60, BLUE)]);
        let stitched = stitch_preview(&decoder, b"doc").unwrap();

        // Page regions: rows [0,40) red, [40,70) green, [70,130) blue.
        assert_eq!(*stitched.get_pixel(25, 0), RED);
        assert_eq!(*stitched.get_pixel(25, 39), RED);
        assert_eq!(*stitched.get_pixel(25, 40), GREEN);
        assert_eq!(*stitched.get_pixel(25, 69), GREEN);
        assert_eq!(*stitched.get_pixel(25, 70), BLUE);
        assert_eq!(*stitched.get_pixel(25, 129), BLUE);
    }

    #[test]
    fn test_single_page_passes_through() {
        let decoder = FakeDecoder::new(vec![(64, 90, GREEN)]);
        let stitched = stitch_preview(&decoder, b"doc").unwrap();
        assert_eq!((stitched.width(), stitched.height()), (64, 90));
        assert_eq!(*stitched.get_pixel(0, 0), GREEN);
        assert_eq!(*stitched.get_pixel(63, 89), GREEN);
    }

    #[test]
    fn test_zero_pages_is_decode_error() {
        let decoder = FakeDecoder::new(vec![]);
        let err = stitch_preview(&decoder, b"doc").unwrap_err();
        assert!(matches!(err, ConvertError::Decode(_)));
    }

    #[test]
    fn test_page_failure_aborts_with_no_partial_image() {
        let decoder =
            FakeDecoder::new(vec![(100, 80, RED), (100, 80, GREEN), (100, 80, BLUE)])
                .failing_at(1);
        let err = stitch_preview(&decoder, b"doc").unwrap_err();
        assert!(matches!(err, ConvertError::Render { page: 2, .. }));
        // Rendering stops at the failing page.
        assert_eq!(decoder.render_calls.load(Ordering::SeqCst), 2);
    }
}
