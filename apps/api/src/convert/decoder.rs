//! MuPDF-backed page decoder.
//!
//! MuPDF documents are not thread-safe and keep internal state between
//! operations. The decoder therefore opens a fresh document from the input
//! bytes for each call and serializes calls behind a mutex. Callers run
//! decoding inside `spawn_blocking`; the mutex only guards against concurrent
//! library entry, not long waits.

use std::sync::Mutex;

use image::RgbaImage;
use mupdf::{Colorspace, Document, Matrix, Pixmap};

use super::pages::PageDecoder;
use super::ConvertError;

const PDF_MIME: &str = "application/pdf";

pub struct MupdfPageDecoder {
    lock: Mutex<()>,
}

impl MupdfPageDecoder {
    pub fn new() -> Self {
        Self {
            lock: Mutex::new(()),
        }
    }

    fn open(doc: &[u8]) -> Result<Document, ConvertError> {
        Document::from_bytes(doc, PDF_MIME)
            .map_err(|e| ConvertError::Decode(format!("failed to open document: {e}")))
    }
}

impl Default for MupdfPageDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PageDecoder for MupdfPageDecoder {
    fn page_count(&self, doc: &[u8]) -> Result<u32, ConvertError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let document = Self::open(doc)?;
        let count = document
            .page_count()
            .map_err(|e| ConvertError::Decode(format!("failed to read page count: {e}")))?;
        Ok(count as u32)
    }

    fn render_page(&self, doc: &[u8], index: u32, scale: f32) -> Result<RgbaImage, ConvertError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let document = Self::open(doc)?;

        let render_err = |reason: String| ConvertError::Render {
            page: index + 1,
            reason,
        };

        let page = document
            .load_page(index as i32)
            .map_err(|e| render_err(format!("failed to load page: {e}")))?;

        let matrix = Matrix::new_scale(scale, scale);
        let colorspace = Colorspace::device_rgb();
        let pixmap = page
            .to_pixmap(&matrix, &colorspace, true, true)
            .map_err(|e| render_err(format!("failed to rasterize page: {e}")))?;

        pixmap_to_rgba(&pixmap).ok_or_else(|| render_err("pixmap buffer size mismatch".into()))
    }
}

/// Converts a MuPDF pixmap (3 or 4 samples per pixel) into an RGBA buffer.
fn pixmap_to_rgba(pixmap: &Pixmap) -> Option<RgbaImage> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let samples = pixmap.samples();
    let n = pixmap.n() as usize;
    if n < 3 || samples.len() < (width as usize) * (height as usize) * n {
        return None;
    }

    let mut rgba = Vec::with_capacity((width as usize) * (height as usize) * 4);
    for pixel in samples.chunks_exact(n).take((width * height) as usize) {
        let alpha = if n >= 4 { pixel[3] } else { 255 };
        rgba.extend_from_slice(&[pixel[0], pixel[1], pixel[2], alpha]);
    }
    RgbaImage::from_raw(width, height, rgba)
}
