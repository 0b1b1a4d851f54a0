//! Bitmap blitting from 8bpp and packed 4bpp sources

use crate::traits::Canvas;

/// Copy an 8-bit grayscale image, keeping the high nibble of each byte
///
/// Stops early if `source` holds fewer than `width * height` bytes.
pub(super) fn blit_8bpp<C: Canvas + ?Sized>(
    canvas: &mut C,
    x0: u16,
    y0: u16,
    width: u16,
    height: u16,
    source: &[u8],
) {
    let mut pixels = source.iter();
    for row in 0..height {
        for col in 0..width {
            let Some(&value) = pixels.next() else {
                return;
            };
            put(canvas, x0, y0, col, row, value >> 4);
        }
    }
}

/// Copy a packed 4-bit image, two pixels per byte, high nibble first
///
/// Packing runs continuously across rows, so an odd-width row ends halfway
/// through a byte and the next row picks up its low nibble.
pub(super) fn blit_4bpp<C: Canvas + ?Sized>(
    canvas: &mut C,
    x0: u16,
    y0: u16,
    width: u16,
    height: u16,
    source: &[u8],
) {
    let mut index = 0usize;
    for row in 0..height {
        for col in 0..width {
            let Some(&byte) = source.get(index / 2) else {
                return;
            };
            let value = if index % 2 == 0 { byte >> 4 } else { byte & 0x0F };
            put(canvas, x0, y0, col, row, value);
            index += 1;
        }
    }
}

fn put<C: Canvas + ?Sized>(canvas: &mut C, x0: u16, y0: u16, col: u16, row: u16, value: u8) {
    if let (Some(x), Some(y)) = (x0.checked_add(col), y0.checked_add(row)) {
        canvas.set_pixel(x, y, value);
    }
}
