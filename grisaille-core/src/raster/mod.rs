//! Rasterizer
//!
//! Shape and bitmap drawing on top of any [`Canvas`]. Every primitive is a
//! sequence of single-pixel writes, so out-of-range geometry is clipped
//! pixel by pixel rather than rejected.
//!
//! All coordinates are `u16`. Loop counters and intermediate values are
//! `i32`, so nothing wraps on a 256-pixel-wide panel. Straight spans stop at
//! the canvas edge instead of issuing writes that would be dropped anyway.

mod bitmap;
mod circle;
mod line;

use crate::traits::Canvas;

/// Drawing primitives, available on every [`Canvas`]
pub trait Rasterizer: Canvas {
    /// Write one pixel
    fn draw_pixel(&mut self, x: u16, y: u16, brightness: u8) {
        self.set_pixel(x, y, brightness);
    }

    /// Vertical line from `y0` to `y1` inclusive, in either order
    fn draw_vline(&mut self, x: u16, y0: u16, y1: u16, brightness: u8) {
        let (start, end) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        let Some(last) = self.size().1.checked_sub(1) else {
            return;
        };
        for y in start..=end.min(last) {
            self.set_pixel(x, y, brightness);
        }
    }

    /// Horizontal line from `x0` to `x1` inclusive, in either order
    fn draw_hline(&mut self, y: u16, x0: u16, x1: u16, brightness: u8) {
        let (start, end) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let Some(last) = self.size().0.checked_sub(1) else {
            return;
        };
        for x in start..=end.min(last) {
            self.set_pixel(x, y, brightness);
        }
    }

    /// Line between two points (Bresenham)
    fn draw_line(&mut self, x0: u16, y0: u16, x1: u16, y1: u16, brightness: u8) {
        line::bresenham(self, x0, y0, x1, y1, brightness);
    }

    /// Antialiased line between two points (Xiaolin Wu)
    ///
    /// Each column gets two pixels whose brightness is split by how close
    /// the ideal line passes to each. Both pixels are written, so the
    /// lighter one replaces whatever was underneath.
    fn draw_antialiased_line(&mut self, x0: u16, y0: u16, x1: u16, y1: u16, brightness: u8) {
        line::wu(self, x0, y0, x1, y1, brightness);
    }

    /// Rectangle outline with corners `(x0, y0)` and `(x1, y1)`
    fn draw_rect(&mut self, x0: u16, y0: u16, x1: u16, y1: u16, brightness: u8) {
        self.draw_vline(x0, y0, y1, brightness);
        self.draw_vline(x1, y0, y1, brightness);
        self.draw_hline(y0, x0, x1, brightness);
        self.draw_hline(y1, x0, x1, brightness);
    }

    /// Filled rectangle with corners `(x0, y0)` and `(x1, y1)`
    fn draw_rect_filled(&mut self, x0: u16, y0: u16, x1: u16, y1: u16, brightness: u8) {
        let (left, right) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (top, bottom) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        let (width, height) = self.size();
        let (Some(max_x), Some(max_y)) = (width.checked_sub(1), height.checked_sub(1)) else {
            return;
        };
        for x in left..=right.min(max_x) {
            for y in top..=bottom.min(max_y) {
                self.set_pixel(x, y, brightness);
            }
        }
    }

    /// Circle outline of radius `r` (midpoint algorithm)
    fn draw_circle(&mut self, x0: u16, y0: u16, r: u16, brightness: u8) {
        circle::midpoint(self, x0, y0, r, brightness);
    }

    /// Bitmap with one 8-bit grayscale byte per pixel, row-major
    ///
    /// Only the top four bits of each source byte are kept.
    fn draw_bitmap_8bpp(&mut self, x0: u16, y0: u16, width: u16, height: u16, source: &[u8]) {
        bitmap::blit_8bpp(self, x0, y0, width, height, source);
    }

    /// Bitmap with two 4-bit pixels per byte, first pixel in the high nibble
    ///
    /// Pixels are packed continuously across rows; `width * height` may be
    /// odd.
    fn draw_bitmap_4bpp_packed(
        &mut self,
        x0: u16,
        y0: u16,
        width: u16,
        height: u16,
        source: &[u8],
    ) {
        bitmap::blit_4bpp(self, x0, y0, width, height, source);
    }
}

impl<T: Canvas + ?Sized> Rasterizer for T {}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::framebuffer::{Framebuffer, PANEL_BUFFER_SIZE};
    use proptest::prelude::*;
    use std::collections::{BTreeMap, BTreeSet};

    /// Canvas that remembers which pixels were written, and with what
    #[derive(Debug, Default)]
    pub(crate) struct Recorder {
        pub(crate) size: (u16, u16),
        pub(crate) pixels: BTreeMap<(u16, u16), u8>,
    }

    impl Recorder {
        pub(crate) fn new(width: u16, height: u16) -> Self {
            Self {
                size: (width, height),
                ..Self::default()
            }
        }

        pub(crate) fn lit(&self) -> BTreeSet<(u16, u16)> {
            self.pixels.keys().copied().collect()
        }
    }

    impl Canvas for Recorder {
        fn set_pixel(&mut self, x: u16, y: u16, brightness: u8) {
            if x < self.size.0 && y < self.size.1 {
                self.pixels.insert((x, y), brightness & 0x0F);
            }
        }

        fn size(&self) -> (u16, u16) {
            self.size
        }
    }

    #[test]
    fn test_filled_rect_on_panel() {
        let mut fb = Framebuffer::panel([0u8; PANEL_BUFFER_SIZE]);
        fb.clear(0);
        fb.draw_rect_filled(10, 10, 20, 20, 15);

        let nibble = |index: usize| {
            let byte = fb.as_bytes()[index / 2];
            if index % 2 == 0 {
                byte & 0x0F
            } else {
                byte >> 4
            }
        };
        assert_eq!(nibble(15 * 256 + 15), 15);
        assert_eq!(nibble(5 * 256 + 5), 0);
        assert_eq!(fb.get_pixel(10, 10), Some(15));
        assert_eq!(fb.get_pixel(20, 20), Some(15));
        assert_eq!(fb.get_pixel(21, 20), Some(0));
        assert_eq!(fb.get_pixel(9, 10), Some(0));
    }

    #[test]
    fn test_rect_outline() {
        let mut canvas = Recorder::new(32, 32);
        canvas.draw_rect(2, 3, 6, 5, 9);

        // 5 columns x 3 rows perimeter
        assert_eq!(canvas.lit().len(), 12);
        assert!(canvas.lit().contains(&(2, 3)));
        assert!(canvas.lit().contains(&(6, 5)));
        assert!(!canvas.lit().contains(&(4, 4)));
    }

    #[test]
    fn test_filled_rect_any_corner_order() {
        let mut a = Recorder::new(32, 32);
        let mut b = Recorder::new(32, 32);
        a.draw_rect_filled(3, 4, 8, 9, 5);
        b.draw_rect_filled(8, 9, 3, 4, 5);
        assert_eq!(a.pixels, b.pixels);
        assert_eq!(a.lit().len(), 36);
    }

    #[test]
    fn test_hline_reaches_last_column() {
        let mut fb = Framebuffer::panel([0u8; PANEL_BUFFER_SIZE]);
        fb.draw_hline(0, 250, 255, 3);
        assert_eq!(fb.get_pixel(255, 0), Some(3));
        assert_eq!(fb.get_pixel(249, 0), Some(0));
    }

    #[test]
    fn test_vline_past_bottom_is_clipped() {
        let mut canvas = Recorder::new(8, 8);
        canvas.draw_vline(1, 5, 20, 2);
        assert_eq!(canvas.lit().len(), 3);
    }

    proptest! {
        #[test]
        fn prop_reversed_lines_match(a in 0u16..64, b in 0u16..64, c in 0u16..64) {
            let mut forward = Recorder::new(64, 64);
            let mut backward = Recorder::new(64, 64);
            forward.draw_hline(c, a, b, 7);
            backward.draw_hline(c, b, a, 7);
            prop_assert_eq!(forward.lit(), backward.lit());

            let mut forward = Recorder::new(64, 64);
            let mut backward = Recorder::new(64, 64);
            forward.draw_vline(c, a, b, 7);
            backward.draw_vline(c, b, a, 7);
            prop_assert_eq!(forward.lit(), backward.lit());
        }
    }
}
