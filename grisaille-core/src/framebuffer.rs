//! Packed 4-bit framebuffer
//!
//! Two pixels per byte. Pixel `(x, y)` is nibble `n = y * width + x`; even
//! nibbles occupy the low half of byte `n / 2`, odd nibbles the high half.
//!
//! The logical dimensions are independent of the panel, so a buffer can be
//! larger than the display and shown through an offset window.

use crate::traits::Canvas;

/// Physical panel width in pixels
pub const PANEL_WIDTH: u16 = 256;

/// Physical panel height in pixels
pub const PANEL_HEIGHT: u16 = 64;

/// Bytes needed for one full panel frame
pub const PANEL_BUFFER_SIZE: usize = PANEL_WIDTH as usize * PANEL_HEIGHT as usize / 2;

/// Byte that holds `brightness` in both nibbles
#[inline]
pub const fn fill_byte(brightness: u8) -> u8 {
    let b = brightness & 0x0F;
    (b << 4) | b
}

/// Bytes needed for a `width` x `height` buffer
#[inline]
pub const fn buffer_size(width: u16, height: u16) -> usize {
    (width as usize * height as usize).div_ceil(2)
}

/// Packed 4-bit-per-pixel framebuffer over caller-owned storage
///
/// `B` is anything byte-sliceable: a `[u8; N]`, a `&mut [u8]`, a
/// `heapless::Vec`. The storage is never resized; writes that would fall
/// past its end are dropped.
#[derive(Debug, Clone)]
pub struct Framebuffer<B> {
    storage: B,
    width: u16,
    height: u16,
}

impl<B> Framebuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wrap `storage` as a `width` x `height` buffer
    ///
    /// The storage should hold at least [`buffer_size`]`(width, height)`
    /// bytes. Nothing is cleared.
    pub fn new(storage: B, width: u16, height: u16) -> Self {
        Self {
            storage,
            width,
            height,
        }
    }

    /// Wrap `storage` as a buffer the size of the physical panel
    pub fn panel(storage: B) -> Self {
        Self::new(storage, PANEL_WIDTH, PANEL_HEIGHT)
    }

    /// Change the logical dimensions
    ///
    /// Neither reallocates nor checks the new size against the storage
    /// length; that is the caller's responsibility.
    pub fn configure(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Logical width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Logical height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Bytes implied by the configured dimensions
    pub fn byte_len(&self) -> usize {
        buffer_size(self.width, self.height)
    }

    /// Bytes actually available in the storage
    pub fn storage_len(&self) -> usize {
        self.storage.as_ref().len()
    }

    /// Fill the whole buffer with one brightness
    pub fn clear(&mut self, brightness: u8) {
        let len = self.byte_len();
        let storage = self.storage.as_mut();
        let len = len.min(storage.len());
        storage[..len].fill(fill_byte(brightness));
    }

    /// Write one pixel, preserving the other nibble of its byte
    ///
    /// Out-of-range coordinates are silently ignored.
    pub fn set_pixel(&mut self, x: u16, y: u16, brightness: u8) {
        if x >= self.width || y >= self.height {
            return;
        }

        let index = y as usize * self.width as usize + x as usize;
        let value = brightness & 0x0F;
        if let Some(byte) = self.storage.as_mut().get_mut(index / 2) {
            *byte = if index % 2 == 0 {
                (*byte & 0xF0) | value
            } else {
                (*byte & 0x0F) | (value << 4)
            };
        }
    }

    /// Read one pixel back
    ///
    /// Returns `None` outside the configured dimensions or past the end of
    /// the storage.
    pub fn get_pixel(&self, x: u16, y: u16) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let index = y as usize * self.width as usize + x as usize;
        let byte = *self.storage.as_ref().get(index / 2)?;
        Some(if index % 2 == 0 { byte & 0x0F } else { byte >> 4 })
    }

    /// Raw packed bytes (the whole storage)
    pub fn as_bytes(&self) -> &[u8] {
        self.storage.as_ref()
    }

    /// Give the storage back
    pub fn into_inner(self) -> B {
        self.storage
    }
}

impl<B> Canvas for Framebuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn set_pixel(&mut self, x: u16, y: u16, brightness: u8) {
        Framebuffer::set_pixel(self, x, y, brightness);
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::vec;
    use std::vec::Vec;

    fn nibble(bytes: &[u8], index: usize) -> u8 {
        let byte = bytes[index / 2];
        if index % 2 == 0 {
            byte & 0x0F
        } else {
            byte >> 4
        }
    }

    #[test]
    fn test_even_index_is_low_nibble() {
        let mut fb = Framebuffer::new([0u8; 4], 4, 2);
        fb.set_pixel(0, 0, 0xA);
        assert_eq!(fb.as_bytes()[0], 0x0A);

        fb.set_pixel(1, 0, 0x5);
        assert_eq!(fb.as_bytes()[0], 0x5A);
    }

    #[test]
    fn test_brightness_masked_to_four_bits() {
        let mut fb = Framebuffer::new([0u8; 2], 2, 2);
        fb.set_pixel(1, 1, 0xF3);
        assert_eq!(fb.as_bytes(), &[0x00, 0x30]);
    }

    #[test]
    fn test_clear_fills_both_nibbles() {
        let mut fb = Framebuffer::panel([0u8; PANEL_BUFFER_SIZE]);
        fb.clear(7);
        assert!(fb.as_bytes().iter().all(|&b| b == 0x77));
    }

    #[test]
    fn test_clear_only_touches_configured_bytes() {
        let mut fb = Framebuffer::new([0u8; 8], 4, 2);
        fb.clear(0xF);
        assert_eq!(fb.as_bytes(), &[0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0, 0]);
    }

    #[test]
    fn test_clear_odd_pixel_count_rounds_up() {
        let mut fb = Framebuffer::new([0u8; 3], 5, 1);
        fb.clear(1);
        assert_eq!(fb.as_bytes(), &[0x11, 0x11, 0x11]);
    }

    #[test]
    fn test_clear_clamps_to_storage() {
        let mut fb = Framebuffer::new([0u8; 2], 16, 16);
        fb.clear(2);
        assert_eq!(fb.as_bytes(), &[0x22, 0x22]);
        assert_eq!(fb.byte_len(), 128);
        assert_eq!(fb.storage_len(), 2);
    }

    #[test]
    fn test_configure_keeps_storage() {
        let mut fb = Framebuffer::new([0u8; 8], 4, 4);
        fb.set_pixel(3, 0, 9);
        fb.configure(2, 8);

        assert_eq!((fb.width(), fb.height()), (2, 8));
        // Same nibble, now addressed as (1, 1)
        assert_eq!(fb.get_pixel(1, 1), Some(9));
    }

    #[test]
    fn test_write_past_storage_is_dropped() {
        let mut fb = Framebuffer::new([0u8; 2], 16, 16);
        fb.set_pixel(15, 15, 0xF);
        assert_eq!(fb.as_bytes(), &[0, 0]);
        assert_eq!(fb.get_pixel(15, 15), None);
    }

    #[test]
    fn test_last_column_of_wide_panel() {
        let mut fb = Framebuffer::panel([0u8; PANEL_BUFFER_SIZE]);
        fb.set_pixel(255, 63, 0xC);
        assert_eq!(fb.as_bytes()[PANEL_BUFFER_SIZE - 1], 0xC0);
    }

    #[test]
    fn test_works_over_borrowed_slice() {
        let mut storage = [0u8; 4];
        let mut fb = Framebuffer::new(&mut storage[..], 4, 2);
        fb.set_pixel(2, 1, 4);
        drop(fb);
        assert_eq!(storage, [0, 0, 0, 0x04]);
    }

    proptest! {
        #[test]
        fn prop_write_then_read_back(
            (w, h, x, y) in (1u16..=300, 1u16..=80)
                .prop_flat_map(|(w, h)| (Just(w), Just(h), 0..w, 0..h)),
            brightness in 0u8..16,
            seed in any::<u8>(),
        ) {
            let mut storage = vec![seed; buffer_size(w, h)];
            let before = storage.clone();
            let mut fb = Framebuffer::new(&mut storage[..], w, h);
            fb.set_pixel(x, y, brightness);
            prop_assert_eq!(fb.get_pixel(x, y), Some(brightness));

            let index = y as usize * w as usize + x as usize;
            let sibling = index ^ 1;
            let bytes = fb.as_bytes();
            prop_assert_eq!(nibble(bytes, index), brightness);
            if sibling / 2 < bytes.len() {
                prop_assert_eq!(nibble(bytes, sibling), nibble(&before, sibling));
            }
            for (i, (a, b)) in bytes.iter().zip(before.iter()).enumerate() {
                if i != index / 2 {
                    prop_assert_eq!(a, b);
                }
            }
        }

        #[test]
        fn prop_out_of_range_write_is_noop(
            w in 1u16..=64,
            h in 1u16..=64,
            x in any::<u16>(),
            y in any::<u16>(),
            brightness in any::<u8>(),
        ) {
            prop_assume!(x >= w || y >= h);
            let before: Vec<u8> = (0..buffer_size(w, h)).map(|i| i as u8).collect();
            let mut fb = Framebuffer::new(before.clone(), w, h);
            fb.set_pixel(x, y, brightness);
            prop_assert_eq!(fb.as_bytes(), &before[..]);
        }

        #[test]
        fn prop_clear_round_trip(brightness in 0u8..16) {
            let mut fb = Framebuffer::new([0u8; 64], 16, 8);
            fb.clear(brightness);
            let expected = (brightness << 4) | brightness;
            prop_assert!(fb.as_bytes().iter().all(|&b| b == expected));
        }
    }
}
