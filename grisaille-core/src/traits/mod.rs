//! Drawing surface traits
//!
//! These traits define the seam between the rasterizer and whatever stores
//! the pixels.

pub mod canvas;

pub use canvas::Canvas;
