//! Text renderer

use super::{Font, Glyph};
use crate::traits::canvas::{plot, Canvas};

/// Draws strings with the currently selected font
///
/// Holds only a reference to the font, so it is `Copy` and can be kept
/// next to the framebuffer or created per frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer<'f> {
    font: Option<&'f Font<'f>>,
}

impl<'f> TextRenderer<'f> {
    /// Renderer with no font selected
    pub const fn new() -> Self {
        Self { font: None }
    }

    /// Renderer with `font` already selected
    pub const fn with_font(font: &'f Font<'f>) -> Self {
        Self { font: Some(font) }
    }

    /// Make `font` the active font
    pub fn select_font(&mut self, font: &'f Font<'f>) {
        self.font = Some(font);
    }

    /// Deselect the active font; drawing becomes a no-op
    pub fn clear_font(&mut self) {
        self.font = None;
    }

    /// The active font, if any
    pub fn font(&self) -> Option<&'f Font<'f>> {
        self.font
    }

    /// Draw one character with its cursor at `(x, y)`
    ///
    /// `y` is the baseline; glyph offsets place the bitmap relative to it.
    /// Does nothing without a font or when the font has no glyph for `c`.
    pub fn draw_char<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        c: char,
        x: u16,
        y: u16,
        brightness: u8,
    ) {
        let Some(font) = self.font else {
            return;
        };
        if let Some(glyph) = font.glyph(c) {
            blit_glyph(canvas, font.bitmap, glyph, x, y, brightness);
        }
    }

    /// Draw `text` left to right starting at `(x, y)`, without wrapping
    ///
    /// Characters without a glyph are skipped and do not move the cursor.
    /// A NUL character ends the string. Returns the cursor position after
    /// the last character drawn.
    pub fn draw_text<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        text: &str,
        x: u16,
        y: u16,
        brightness: u8,
    ) -> u16 {
        let Some(font) = self.font else {
            return x;
        };

        let mut cursor = x;
        for glyph in glyphs(font, text) {
            blit_glyph(canvas, font.bitmap, glyph, cursor, y, brightness);
            cursor = cursor.saturating_add(u16::from(glyph.x_advance));
        }
        cursor
    }

    /// Total advance of `text`, as [`draw_text`](Self::draw_text) would move
    /// the cursor
    pub fn text_width(&self, text: &str) -> u16 {
        let Some(font) = self.font else {
            return 0;
        };

        glyphs(font, text).fold(0u16, |width, glyph| {
            width.saturating_add(u16::from(glyph.x_advance))
        })
    }
}

fn glyphs<'a>(font: &Font<'a>, text: &'a str) -> impl Iterator<Item = &'a Glyph> + 'a {
    let font = *font;
    text.chars()
        .take_while(|&c| c != '\0')
        .filter_map(move |c| font.glyph(c))
}

/// Plot the set bits of one glyph bitmap
///
/// Bits run MSB first and continue across rows. A bitmap that ends early
/// stops the glyph there.
fn blit_glyph<C: Canvas + ?Sized>(
    canvas: &mut C,
    bitmap: &[u8],
    glyph: &Glyph,
    x: u16,
    y: u16,
    brightness: u8,
) {
    let left = x as i32 + glyph.x_offset as i32;
    let top = y as i32 + glyph.y_offset as i32;

    let mut offset = glyph.bitmap_offset as usize;
    let mut bits = 0u8;
    let mut bit = 0u32;
    for row in 0..glyph.height as i32 {
        for col in 0..glyph.width as i32 {
            if bit % 8 == 0 {
                let Some(&byte) = bitmap.get(offset) else {
                    return;
                };
                bits = byte;
                offset += 1;
            }
            if bits & 0x80 != 0 {
                plot(canvas, left + col, top + row, brightness);
            }
            bits <<= 1;
            bit += 1;
        }
    }
}
