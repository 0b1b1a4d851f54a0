//! Pixel sink trait for 4-bit grayscale surfaces

/// A surface that accepts single 4-bit pixel writes
///
/// This is the only primitive the rasterizer and text renderer need. Every
/// higher-level shape is a sequence of `set_pixel` calls, so bounds checking
/// done here covers all of them.
pub trait Canvas {
    /// Write one pixel
    ///
    /// Only the low 4 bits of `brightness` are used. Coordinates outside the
    /// surface are silently ignored.
    fn set_pixel(&mut self, x: u16, y: u16, brightness: u8);

    /// Logical size as `(width, height)` in pixels
    fn size(&self) -> (u16, u16);
}

/// Helper for primitives that compute coordinates in signed space
///
/// Negative or oversized coordinates are dropped, matching the silent
/// overdraw policy of [`Canvas::set_pixel`].
pub(crate) fn plot<C: Canvas + ?Sized>(canvas: &mut C, x: i32, y: i32, brightness: u8) {
    if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) {
        canvas.set_pixel(x, y, brightness);
    }
}
