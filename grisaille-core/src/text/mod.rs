//! Bitmap-font text
//!
//! Fonts use the Adafruit GFX layout: one shared 1-bit bitmap blob plus a
//! glyph table indexed by `code - first`. A [`TextRenderer`] holds the
//! active font and draws into any [`Canvas`](crate::traits::Canvas).

mod font;
mod renderer;

pub use font::{Font, Glyph};
pub use renderer::TextRenderer;
