//! Grisaille Hardware Abstraction Layer
//!
//! This crate defines the transport the SSD1322 driver talks through: the
//! chip-select, data/command and reset lines plus a blocking (or awaitable)
//! SPI write and a millisecond delay. Board support only has to provide
//! these primitives; everything above them is hardware independent.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  grisaille-driver (command protocol)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  grisaille-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ SpiTransport  │       │ MockTransport │
//! │ (embedded-hal)│       │ (host tests)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`transport::Transport`] - Blocking 4-wire link
//! - [`transport::AsyncTransport`] - Completion-notified 4-wire link (DMA)

#![no_std]
#![deny(unsafe_code)]

#[cfg(any(test, feature = "mock"))]
extern crate std;

#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod spi;
pub mod transport;

// Re-export key traits at crate root for convenience
pub use spi::{AsyncSpiTransport, SpiTransport, TransportError};
pub use transport::{AsyncTransport, DcMode, Transport};

#[cfg(any(test, feature = "mock"))]
pub use mock::{Event, MockError, MockTransport, Write};
