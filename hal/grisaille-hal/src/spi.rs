//! embedded-hal backed transports
//!
//! Wraps an SPI bus, three output pins and a delay provider into a
//! [`Transport`] (or [`AsyncTransport`]). The bus must be exclusive to the
//! display: chip select is driven here, not by an `SpiDevice`.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{self, SpiBus};
use embedded_hal_async::delay::DelayNs as AsyncDelayNs;
use embedded_hal_async::spi::SpiBus as AsyncSpiBus;

use crate::transport::{AsyncTransport, Transport};

/// SPI mode accepted by the SSD1322 in 4-wire mode (mode 3 also works)
pub const SPI_MODE: spi::Mode = spi::MODE_0;

/// Maximum serial clock the SSD1322 tolerates (100 ns cycle time)
pub const MAX_SPI_FREQUENCY_HZ: u32 = 10_000_000;

/// Transport errors, reduced to the embedded-hal error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// SPI bus write or flush failed
    Spi(spi::ErrorKind),
    /// Driving CS, D/C or RST failed
    Pin(embedded_hal::digital::ErrorKind),
}

fn spi_error<E: spi::Error>(e: E) -> TransportError {
    TransportError::Spi(e.kind())
}

fn pin_error<E: embedded_hal::digital::Error>(e: E) -> TransportError {
    TransportError::Pin(e.kind())
}

/// Blocking transport over an embedded-hal SPI bus
pub struct SpiTransport<SPI, CS, DC, RST, D> {
    spi: SPI,
    cs: CS,
    dc: DC,
    rst: RST,
    delay: D,
}

impl<SPI, CS, DC, RST, D> SpiTransport<SPI, CS, DC, RST, D> {
    /// Create a new transport from its bus, pins and delay
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST, delay: D) -> Self {
        Self {
            spi,
            cs,
            dc,
            rst,
            delay,
        }
    }

    /// Give the peripherals back
    pub fn release(self) -> (SPI, CS, DC, RST, D) {
        (self.spi, self.cs, self.dc, self.rst, self.delay)
    }
}

impl<SPI, CS, DC, RST, D> Transport for SpiTransport<SPI, CS, DC, RST, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    type Error = TransportError;

    fn chip_select_low(&mut self) -> Result<(), Self::Error> {
        self.cs.set_low().map_err(pin_error)
    }

    fn chip_select_high(&mut self) -> Result<(), Self::Error> {
        self.cs.set_high().map_err(pin_error)
    }

    fn mode_command(&mut self) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(pin_error)
    }

    fn mode_data(&mut self) -> Result<(), Self::Error> {
        self.dc.set_high().map_err(pin_error)
    }

    fn reset_low(&mut self) -> Result<(), Self::Error> {
        self.rst.set_low().map_err(pin_error)
    }

    fn reset_high(&mut self) -> Result<(), Self::Error> {
        self.rst.set_high().map_err(pin_error)
    }

    fn transmit_array(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(bytes).map_err(spi_error)?;
        // CS must not rise before the last bit is clocked out
        self.spi.flush().map_err(spi_error)
    }

    fn delay_ms(&mut self, ms: u32) -> Result<(), Self::Error> {
        self.delay.delay_ms(ms);
        Ok(())
    }
}

/// Completion-notified transport over an embedded-hal-async SPI bus
///
/// With a DMA-capable bus, `transmit_array` resolves when the transfer
/// finishes, leaving the CPU free in the meantime.
pub struct AsyncSpiTransport<SPI, CS, DC, RST, D> {
    spi: SPI,
    cs: CS,
    dc: DC,
    rst: RST,
    delay: D,
}

impl<SPI, CS, DC, RST, D> AsyncSpiTransport<SPI, CS, DC, RST, D> {
    /// Create a new transport from its bus, pins and delay
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST, delay: D) -> Self {
        Self {
            spi,
            cs,
            dc,
            rst,
            delay,
        }
    }

    /// Give the peripherals back
    pub fn release(self) -> (SPI, CS, DC, RST, D) {
        (self.spi, self.cs, self.dc, self.rst, self.delay)
    }
}

impl<SPI, CS, DC, RST, D> AsyncTransport for AsyncSpiTransport<SPI, CS, DC, RST, D>
where
    SPI: AsyncSpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    D: AsyncDelayNs,
{
    type Error = TransportError;

    fn chip_select_low(&mut self) -> Result<(), Self::Error> {
        self.cs.set_low().map_err(pin_error)
    }

    fn chip_select_high(&mut self) -> Result<(), Self::Error> {
        self.cs.set_high().map_err(pin_error)
    }

    fn mode_command(&mut self) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(pin_error)
    }

    fn mode_data(&mut self) -> Result<(), Self::Error> {
        self.dc.set_high().map_err(pin_error)
    }

    fn reset_low(&mut self) -> Result<(), Self::Error> {
        self.rst.set_low().map_err(pin_error)
    }

    fn reset_high(&mut self) -> Result<(), Self::Error> {
        self.rst.set_high().map_err(pin_error)
    }

    async fn transmit_array(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(bytes).await.map_err(spi_error)?;
        self.spi.flush().await.map_err(spi_error)
    }

    async fn delay_ms(&mut self, ms: u32) -> Result<(), Self::Error> {
        self.delay.delay_ms(ms).await;
        Ok(())
    }
}
