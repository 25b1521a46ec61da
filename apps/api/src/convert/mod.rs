//! Document-to-preview conversion pipeline.
//!
//! Uploads arrive as one of four source formats. The sniffer picks exactly one
//! strategy from the declared MIME type and file name, and the converter
//! produces a single PNG preview image:
//!
//!  - paginated documents are rendered page by page and stitched vertically,
//!  - raster images are re-encoded as PNG,
//!  - plain text is drawn onto a fixed canvas,
//!  - word-processor documents are reduced to plain text first.
//!
//! Conversion is CPU-bound and synchronous; handlers run it inside
//! `tokio::task::spawn_blocking`.

pub mod decoder;
pub mod docx;
pub mod layout;
pub mod metrics;
pub mod naming;
pub mod pages;
pub mod text;

use std::io::Cursor;
use std::sync::Arc;

use image::{DynamicImage, RgbaImage};
use thiserror::Error;

use self::pages::{stitch_preview, PageDecoder};
use self::text::{rasterize_text, GlyphRasterizer};

const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Conversion strategy selected by the sniffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    PaginatedDocument,
    RasterImage,
    PlainText,
    WordProcessor,
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("failed to decode input: {0}")]
    Decode(String),
    #[error("failed to render page {page}: {reason}")]
    Render { page: u32, reason: String },
    #[error("failed to encode preview image: {0}")]
    Encode(String),
}

/// A successfully produced preview image.
#[derive(Debug, Clone)]
pub struct PreviewImage {
    pub file_name: String,
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Selects the conversion strategy from the declared MIME type, falling back
/// to the file extension. Content is never inspected: a mislabeled file is
/// routed by its label, which keeps sniffing cheap and predictable.
pub fn sniff(declared_mime: &str, file_name: &str) -> Result<SourceFormat, ConvertError> {
    let mime = declared_mime.trim();
    if mime.eq_ignore_ascii_case("application/pdf") {
        return Ok(SourceFormat::PaginatedDocument);
    }
    if mime.to_ascii_lowercase().starts_with("image/") {
        return Ok(SourceFormat::RasterImage);
    }
    if mime.eq_ignore_ascii_case("text/plain") {
        return Ok(SourceFormat::PlainText);
    }
    if mime.eq_ignore_ascii_case(DOCX_MIME) {
        return Ok(SourceFormat::WordProcessor);
    }

    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".pdf") {
        Ok(SourceFormat::PaginatedDocument)
    } else if lower.ends_with(".png") || lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        Ok(SourceFormat::RasterImage)
    } else if lower.ends_with(".txt") {
        Ok(SourceFormat::PlainText)
    } else if lower.ends_with(".docx") {
        Ok(SourceFormat::WordProcessor)
    } else if mime.is_empty() {
        Err(ConvertError::UnsupportedFormat(file_name.to_string()))
    } else {
        Err(ConvertError::UnsupportedFormat(mime.to_string()))
    }
}

/// Extracts the text the scoring oracle reads.
///
/// Raster images carry no text layer; scoring for them takes the fallback
/// path at the call site.
pub fn extract_resume_text(format: SourceFormat, bytes: &[u8]) -> Result<String, ConvertError> {
    match format {
        SourceFormat::PaginatedDocument => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ConvertError::Decode(format!("text extraction failed: {e}"))),
        SourceFormat::WordProcessor => docx::extract_docx_text(bytes),
        SourceFormat::PlainText => Ok(String::from_utf8_lossy(bytes).into_owned()),
        SourceFormat::RasterImage => {
            Err(ConvertError::Decode("raster image has no text layer".into()))
        }
    }
}

/// Converts uploads into preview images.
///
/// Page decoding and glyph drawing are injected capabilities, so the dispatch
/// and stitching logic is testable without mupdf or font files.
pub struct DocumentConverter {
    decoder: Arc<dyn PageDecoder>,
    glyphs: Arc<dyn GlyphRasterizer>,
}

impl DocumentConverter {
    pub fn new(decoder: Arc<dyn PageDecoder>, glyphs: Arc<dyn GlyphRasterizer>) -> Self {
        Self { decoder, glyphs }
    }

    /// Sniffs the format and produces the PNG preview. The sniffer runs
    /// before any decoding so unsupported formats never reach a decoder.
    pub fn to_preview(
        &self,
        file_name: &str,
        declared_mime: &str,
        bytes: &[u8],
    ) -> Result<PreviewImage, ConvertError> {
        let format = sniff(declared_mime, file_name)?;
        self.render_preview(format, file_name, bytes)
    }

    /// Produces the PNG preview for an already-sniffed format.
    pub fn render_preview(
        &self,
        format: SourceFormat,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<PreviewImage, ConvertError> {
        let canvas = match format {
            SourceFormat::PaginatedDocument => stitch_preview(self.decoder.as_ref(), bytes)?,
            SourceFormat::RasterImage => image::load_from_memory(bytes)
                .map_err(|e| ConvertError::Decode(format!("failed to decode image: {e}")))?
                .to_rgba8(),
            SourceFormat::PlainText => {
                let text = String::from_utf8_lossy(bytes);
                rasterize_text(&text, self.glyphs.as_ref())
            }
            SourceFormat::WordProcessor => {
                let text = docx::extract_docx_text(bytes)?;
                rasterize_text(&text, self.glyphs.as_ref())
            }
        };

        Ok(PreviewImage {
            file_name: naming::derived_image_name(file_name),
            width: canvas.width(),
            height: canvas.height(),
            png: encode_png(&canvas)?,
        })
    }
}

fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, ConvertError> {
    let mut png = Vec::new();
    DynamicImage::ImageRgba8(canvas.clone())
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| ConvertError::Encode(e.to_string()))?;
    Ok(png)
}
