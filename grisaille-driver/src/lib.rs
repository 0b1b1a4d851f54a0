//! SSD1322 protocol driver
//!
//! Turns display operations into the controller's command/data byte stream
//! over a [`grisaille_hal`] transport:
//!
//! - Typed command vocabulary shared by both drivers
//! - Blocking driver ([`Ssd1322`]) and async driver ([`Ssd1322Async`])
//! - Frame transfer from a [`grisaille_core::Framebuffer`], with an offset
//!   for scrolling through oversized buffers
//!
//! # Example
//!
//! ```ignore
//! let mut display = Ssd1322::new(SpiTransport::new(spi, cs, dc, rst, delay));
//! display.initialize()?;
//!
//! let mut fb = Framebuffer::panel([0u8; PANEL_BUFFER_SIZE]);
//! fb.draw_rect_filled(10, 10, 20, 20, 15);
//! display.push(&fb, 0, 0)?;
//! ```

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod asynch;
pub mod command;
pub mod error;
pub mod ssd1322;
pub mod state;
pub mod transfer;

pub use asynch::Ssd1322Async;
pub use command::{Command, DisplayMode};
pub use error::DriverError;
pub use ssd1322::Ssd1322;
pub use state::PowerState;
pub use transfer::Window;
