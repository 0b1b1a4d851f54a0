//! Font and glyph tables

/// Placement and bitmap location of one character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph {
    /// Byte offset of the first row in [`Font::bitmap`]
    pub bitmap_offset: u16,
    /// Bitmap width in pixels
    pub width: u8,
    /// Bitmap height in pixels
    pub height: u8,
    /// Cursor advance after this character
    pub x_advance: u8,
    /// Horizontal distance from cursor to the bitmap's left edge
    pub x_offset: i8,
    /// Vertical distance from the baseline to the bitmap's top edge
    pub y_offset: i8,
}

/// A bitmap font covering the character codes `first..=last`
///
/// Glyph bitmaps are 1 bit per pixel, MSB first, packed continuously with
/// no padding at the end of a row.
#[derive(Debug, Clone, Copy)]
pub struct Font<'a> {
    /// Concatenated glyph bitmaps
    pub bitmap: &'a [u8],
    /// One entry per code in `first..=last`
    pub glyphs: &'a [Glyph],
    /// First covered character code
    pub first: u16,
    /// Last covered character code
    pub last: u16,
    /// Line height
    pub y_advance: u8,
}

impl<'a> Font<'a> {
    /// Glyph for `c`, or `None` if the font does not cover it
    pub fn glyph(&self, c: char) -> Option<&'a Glyph> {
        let code = u32::from(c);
        if code < u32::from(self.first) || code > u32::from(self.last) {
            return None;
        }
        self.glyphs.get((code - u32::from(self.first)) as usize)
    }

    /// Whether `c` has a glyph
    pub fn contains(&self, c: char) -> bool {
        self.glyph(c).is_some()
    }
}
