//! Plain-text rendering onto the preview canvas.

use ab_glyph::{FontVec, InvalidFont, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

use super::layout::{plan_text_page, CanvasSpec};
use super::metrics::helvetica;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Draws text lines onto a canvas.
///
/// Layout decisions (wrapping, truncation) happen before this trait is
/// reached; implementations only paint what they are given.
pub trait GlyphRasterizer: Send + Sync {
    fn draw_line(&self, canvas: &mut RgbaImage, text: &str, x: i32, y: i32, font_size: f32);
}

/// Production rasterizer backed by a TrueType font loaded at startup.
pub struct AbGlyphRasterizer {
    font: FontVec,
}

impl AbGlyphRasterizer {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, InvalidFont> {
        Ok(Self {
            font: FontVec::try_from_vec(bytes)?,
        })
    }
}

impl GlyphRasterizer for AbGlyphRasterizer {
    fn draw_line(&self, canvas: &mut RgbaImage, text: &str, x: i32, y: i32, font_size: f32) {
        draw_text_mut(canvas, INK, x, y, PxScale::from(font_size), &self.font, text);
    }
}

/// Renders plain text onto the fixed preview canvas, truncating at the bottom
/// margin.
pub fn rasterize_text(text: &str, glyphs: &dyn GlyphRasterizer) -> RgbaImage {
    let spec = CanvasSpec::default();
    let mut canvas = RgbaImage::from_pixel(spec.width, spec.height, BACKGROUND);
    for line in plan_text_page(helvetica(), text, &spec) {
        glyphs.draw_line(&mut canvas, &line.text, line.x, line.y, spec.font_size);
    }
    canvas
}
