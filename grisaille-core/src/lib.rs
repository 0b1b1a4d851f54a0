//! Board-agnostic graphics core for SSD1322 grayscale panels
//!
//! This crate contains everything that happens before a frame touches the
//! bus:
//!
//! - Packed 4-bit-per-pixel framebuffer with caller-owned storage
//! - Rasterizer (lines, antialiased lines, rectangles, circles, bitmaps)
//! - Bitmap-font text rendering (Adafruit GFX glyph layout)
//! - Panel geometry and grayscale table configuration types
//!
//! # Pixel packing
//!
//! Pixel `(x, y)` of a `W`-wide buffer is nibble `n = y * W + x`, stored in
//! byte `n / 2`. Even nibbles live in the low half of the byte, odd nibbles
//! in the high half.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod framebuffer;
pub mod raster;
pub mod text;
pub mod traits;

pub use config::{GrayscaleError, GrayscaleTable, PanelConfig};
pub use framebuffer::{Framebuffer, PANEL_BUFFER_SIZE, PANEL_HEIGHT, PANEL_WIDTH};
pub use raster::Rasterizer;
pub use text::{Font, Glyph, TextRenderer};
pub use traits::Canvas;
