//! 4-wire display link abstractions
//!
//! The SSD1322 is driven through chip select (CS), data/command select (D/C),
//! an active-low reset line and a write-only SPI bus. Every controller
//! transaction is framed by the driver from these primitives.

/// Blocking 4-wire transport
///
/// Every method returns only after the operation has completed on the bus.
/// Errors are surfaced unchanged; the driver never retries.
pub trait Transport {
    /// Error type for pin and bus operations
    type Error;

    /// Assert chip select (drive CS low)
    fn chip_select_low(&mut self) -> Result<(), Self::Error>;

    /// Release chip select (drive CS high)
    fn chip_select_high(&mut self) -> Result<(), Self::Error>;

    /// Select command mode (drive D/C low)
    fn mode_command(&mut self) -> Result<(), Self::Error>;

    /// Select data mode (drive D/C high)
    fn mode_data(&mut self) -> Result<(), Self::Error>;

    /// Hold the controller in reset (drive RST low)
    fn reset_low(&mut self) -> Result<(), Self::Error>;

    /// Release the controller from reset (drive RST high)
    fn reset_high(&mut self) -> Result<(), Self::Error>;

    /// Transmit a single byte and wait for the bus to go idle
    fn transmit_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.transmit_array(&[byte])
    }

    /// Transmit a block of bytes and wait for the bus to go idle
    fn transmit_array(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Block for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32) -> Result<(), Self::Error>;
}

/// Completion-notified 4-wire transport
///
/// Pin changes are immediate; bus writes and delays complete when the
/// returned future resolves. Callers must keep the transmitted buffer
/// borrowed (and unmodified) until then, which the signature enforces.
#[allow(async_fn_in_trait)]
pub trait AsyncTransport {
    /// Error type for pin and bus operations
    type Error;

    /// Assert chip select (drive CS low)
    fn chip_select_low(&mut self) -> Result<(), Self::Error>;

    /// Release chip select (drive CS high)
    fn chip_select_high(&mut self) -> Result<(), Self::Error>;

    /// Select command mode (drive D/C low)
    fn mode_command(&mut self) -> Result<(), Self::Error>;

    /// Select data mode (drive D/C high)
    fn mode_data(&mut self) -> Result<(), Self::Error>;

    /// Hold the controller in reset (drive RST low)
    fn reset_low(&mut self) -> Result<(), Self::Error>;

    /// Release the controller from reset (drive RST high)
    fn reset_high(&mut self) -> Result<(), Self::Error>;

    /// Transmit a single byte
    async fn transmit_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.transmit_array(&[byte]).await
    }

    /// Transmit a block of bytes, resolving once the bus is idle
    async fn transmit_array(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Wait for at least `ms` milliseconds
    async fn delay_ms(&mut self, ms: u32) -> Result<(), Self::Error>;
}

/// State of the data/command select line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DcMode {
    /// D/C low: bytes are opcodes
    Command,
    /// D/C high: bytes are parameters or pixel data
    Data,
}
